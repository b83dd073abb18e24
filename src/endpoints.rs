//! One-function-per-endpoint wrappers over the dispatch layer.
//!
//! Each wrapper builds a URL, declares its [`AuthMode`](crate::dispatch::AuthMode),
//! dispatches, and reshapes the decoded payload. List endpoints hand their raw payloads
//! to [`page::normalize`](crate::page::normalize) with a per-resource transform table.

pub mod badges;
pub mod games;
pub mod groups;
pub mod thumbnails;
pub mod users;

// self
use crate::_prelude::*;

/// Page sizes the upstream accepts for list endpoints.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PageLimit {
	/// Ten items per page (upstream default).
	#[default]
	Ten,
	/// Twenty-five items per page.
	TwentyFive,
	/// Fifty items per page.
	Fifty,
	/// One hundred items per page.
	Hundred,
}
impl PageLimit {
	fn as_str(&self) -> &'static str {
		match self {
			Self::Ten => "10",
			Self::TwentyFive => "25",
			Self::Fifty => "50",
			Self::Hundred => "100",
		}
	}
}

/// Sort direction for list endpoints.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SortOrder {
	/// Oldest first.
	#[default]
	Asc,
	/// Newest first.
	Desc,
}
impl SortOrder {
	fn as_str(&self) -> &'static str {
		match self {
			Self::Asc => "Asc",
			Self::Desc => "Desc",
		}
	}
}

/// Paging knobs shared by every cursor-paginated endpoint.
///
/// The cursor is an opaque continuation value from a previously returned page; this
/// layer never parses or validates it.
#[derive(Clone, Debug, Default)]
pub struct PageParams {
	/// Page size.
	pub limit: PageLimit,
	/// Sort direction.
	pub sort_order: SortOrder,
	/// Opaque continuation cursor from a previous page.
	pub cursor: Option<String>,
}
impl PageParams {
	pub(crate) fn apply(&self, url: &mut Url) {
		let mut pairs = url.query_pairs_mut();

		pairs.append_pair("limit", self.limit.as_str());
		pairs.append_pair("sortOrder", self.sort_order.as_str());

		if let Some(cursor) = &self.cursor {
			pairs.append_pair("cursor", cursor);
		}
	}
}
