//! Cursor-pagination contract: raw list payloads become typed pages.
//!
//! [`normalize`] never reorders or drops items and passes both cursors through verbatim;
//! it only rewrites fields per the caller-supplied [`TransformTable`]. Timestamp coercion
//! parses the upstream's ISO-8601 strings and rewrites them in canonical RFC 3339 form,
//! which makes a second coercion of already-normalized output a no-op. Error envelopes
//! never reach this module: the [`ApiBody`](crate::api::ApiBody) boundary rejects them
//! before a [`RawPage`] exists.

// crates.io
use time::format_description::well_known::{Iso8601, Rfc3339};
// self
use crate::{_prelude::*, api, error::DecodeError};

/// One page of results with opaque continuation cursors.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
	/// Cursor for the preceding page, passed through verbatim.
	pub previous_page_cursor: Option<String>,
	/// Cursor for the following page, passed through verbatim.
	pub next_page_cursor: Option<String>,
	/// Items in upstream order.
	pub data: Vec<T>,
}

/// Raw paginated payload exactly as the upstream ships it.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPage {
	/// Cursor for the preceding page.
	#[serde(default)]
	pub previous_page_cursor: Option<String>,
	/// Cursor for the following page.
	#[serde(default)]
	pub next_page_cursor: Option<String>,
	/// Untyped items in upstream order.
	#[serde(default)]
	pub data: Vec<Json>,
}

/// Per-field rewrite applied to each raw item independently.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldTransform {
	/// Parse the field's ISO-8601 string and rewrite it in canonical RFC 3339 form.
	CoerceTimestamp,
	/// Delete the field from the output item entirely.
	Redact,
}

/// Ordered field-path to transform mapping for one resource type.
///
/// Paths are dot-separated and may address nested fields (`group.shout.created`). A path
/// that does not resolve inside an item is skipped for that item.
#[derive(Clone, Debug, Default)]
pub struct TransformTable(Vec<(&'static str, FieldTransform)>);
impl TransformTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Marks a field path for timestamp coercion.
	pub fn coerce_timestamp(mut self, path: &'static str) -> Self {
		self.0.push((path, FieldTransform::CoerceTimestamp));

		self
	}

	/// Marks a field path for removal.
	pub fn redact(mut self, path: &'static str) -> Self {
		self.0.push((path, FieldTransform::Redact));

		self
	}

	fn entries(&self) -> &[(&'static str, FieldTransform)] {
		&self.0
	}
}

/// Normalizes a raw paginated payload into a typed page.
///
/// A payload with zero items still yields its cursors, so "no results on this page" stays
/// distinct from "final page".
pub fn normalize<T>(raw: RawPage, transforms: &TransformTable) -> Result<Page<T>, DecodeError>
where
	T: DeserializeOwned,
{
	let mut data = Vec::with_capacity(raw.data.len());

	for mut item in raw.data {
		for (path, transform) in transforms.entries() {
			apply(&mut item, path, *transform)?;
		}

		data.push(api::decode_value(item)?);
	}

	Ok(Page {
		previous_page_cursor: raw.previous_page_cursor,
		next_page_cursor: raw.next_page_cursor,
		data,
	})
}

fn apply(item: &mut Json, path: &str, transform: FieldTransform) -> Result<(), DecodeError> {
	let mut segments = path.split('.');
	let Some(mut leaf) = segments.next() else {
		return Ok(());
	};
	let mut target = &mut *item;

	for next in segments {
		let Some(child) = target.get_mut(leaf) else {
			return Ok(());
		};

		target = child;
		leaf = next;
	}

	let Some(object) = target.as_object_mut() else {
		return Ok(());
	};

	match transform {
		FieldTransform::Redact => {
			object.remove(leaf);
		},
		FieldTransform::CoerceTimestamp => match object.get_mut(leaf) {
			None | Some(Json::Null) => {},
			Some(Json::String(value)) => *value = coerce_timestamp(value, path)?,
			Some(_) => return Err(DecodeError::TimestampShape { path: path.to_owned() }),
		},
	}

	Ok(())
}

fn coerce_timestamp(value: &str, path: &str) -> Result<String, DecodeError> {
	let parsed = OffsetDateTime::parse(value, &Iso8601::DEFAULT)
		.map_err(|source| DecodeError::Timestamp { path: path.to_owned(), source })?;

	parsed
		.format(&Rfc3339)
		.map_err(|source| DecodeError::TimestampRange { path: path.to_owned(), source })
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	fn raw(value: Json) -> RawPage {
		serde_json::from_value(value).expect("Raw page fixture should deserialize.")
	}

	#[test]
	fn order_is_preserved_and_no_item_dropped() {
		let page = normalize::<Json>(
			raw(json!({
				"previousPageCursor": null,
				"nextPageCursor": "abc",
				"data": [{ "id": 1 }, { "id": 2 }, { "id": 3 }],
			})),
			&TransformTable::new(),
		)
		.expect("Untransformed payload should normalize successfully.");

		assert_eq!(page.data.len(), 3);

		for (index, item) in page.data.iter().enumerate() {
			assert_eq!(item["id"], json!(index + 1));
		}
	}

	#[test]
	fn empty_page_keeps_cursors() {
		let page = normalize::<Json>(
			raw(json!({ "previousPageCursor": null, "nextPageCursor": "abc", "data": [] })),
			&TransformTable::new(),
		)
		.expect("Empty payload should normalize successfully.");

		assert!(page.data.is_empty());
		assert_eq!(page.next_page_cursor.as_deref(), Some("abc"));
		assert_eq!(page.previous_page_cursor, None);
	}

	#[test]
	fn timestamp_coercion_is_idempotent() {
		let transforms = TransformTable::new().coerce_timestamp("created");
		let once = normalize::<Json>(
			raw(json!({ "data": [{ "created": "2021-07-01T00:00:00.000Z" }] })),
			&transforms,
		)
		.expect("First coercion should succeed.");
		let twice = normalize::<Json>(
			raw(json!({ "data": once.data.clone() })),
			&transforms,
		)
		.expect("Re-coercing canonical output should succeed.");

		assert_eq!(once.data, twice.data);
		assert_eq!(once.data[0]["created"], json!("2021-07-01T00:00:00Z"));
	}

	#[test]
	fn nested_paths_are_coerced_and_missing_branches_skipped() {
		let transforms = TransformTable::new()
			.coerce_timestamp("group.shout.created")
			.coerce_timestamp("group.shout.updated");
		let page = normalize::<Json>(
			raw(json!({
				"data": [
					{ "group": { "shout": {
						"created": "2020-03-24T20:42:01.193Z",
						"updated": "2020-03-25T08:00:00Z",
					} } },
					{ "group": { "shout": null } },
					{ "group": {} },
				],
			})),
			&transforms,
		)
		.expect("Nested coercion should succeed.");

		assert_eq!(page.data[0]["group"]["shout"]["created"], json!("2020-03-24T20:42:01.193Z"));
		assert_eq!(page.data.len(), 3);
	}

	#[test]
	fn redaction_removes_the_field_entirely() {
		let page = normalize::<Json>(
			raw(json!({ "data": [{ "id": 7, "displayName": "secret" }] })),
			&TransformTable::new().redact("displayName"),
		)
		.expect("Redaction should succeed.");

		assert_eq!(page.data[0], json!({ "id": 7 }));
	}

	#[test]
	fn non_string_timestamp_is_a_decode_error() {
		let err = normalize::<Json>(
			raw(json!({ "data": [{ "created": 42 }] })),
			&TransformTable::new().coerce_timestamp("created"),
		)
		.expect_err("Numeric timestamp field should be rejected.");

		assert!(matches!(err, DecodeError::TimestampShape { path } if path == "created"));
	}

	#[test]
	fn malformed_timestamp_is_a_decode_error() {
		let err = normalize::<Json>(
			raw(json!({ "data": [{ "created": "yesterday" }] })),
			&TransformTable::new().coerce_timestamp("created"),
		)
		.expect_err("Malformed timestamp should be rejected.");

		assert!(matches!(err, DecodeError::Timestamp { .. }));
	}
}
