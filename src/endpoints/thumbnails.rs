//! Batch thumbnail lookups with per-kind allowed-size tables.
//!
//! Results come back keyed by `targetId`, one entry per requested identifier; callers
//! collect them by position or by target, never by completion order.

// self
use crate::{
	_prelude::*,
	api,
	client::{Client, endpoint_url},
	dispatch::{AuthMode, RequestOverrides},
	error::{DecodeError, ValidationError},
};

const AVATAR_SIZES: &[(u32, u32)] = &[
	(30, 30),
	(48, 48),
	(60, 60),
	(75, 75),
	(100, 100),
	(110, 100),
	(140, 140),
	(150, 150),
	(180, 180),
	(250, 250),
	(352, 352),
	(420, 420),
	(720, 720),
];
const HEADSHOT_SIZES: &[(u32, u32)] = &[
	(48, 48),
	(50, 50),
	(60, 60),
	(75, 75),
	(100, 100),
	(110, 100),
	(150, 150),
	(180, 180),
	(352, 352),
	(420, 420),
	(720, 720),
];
const GROUP_ICON_SIZES: &[(u32, u32)] = &[(150, 150), (420, 420)];
const PLACE_ICON_SIZES: &[(u32, u32)] =
	&[(50, 50), (128, 128), (150, 150), (256, 256), (512, 512)];
const BADGE_ICON_SIZES: &[(u32, u32)] = &[(150, 150)];
const GAMEPASS_ICON_SIZES: &[(u32, u32)] = &[(150, 150)];

/// Requested thumbnail dimensions, validated against the per-kind allowed table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ThumbnailSize {
	/// Width in pixels.
	pub width: u32,
	/// Height in pixels.
	pub height: u32,
}
impl ThumbnailSize {
	/// Creates a size request.
	pub const fn new(width: u32, height: u32) -> Self {
		Self { width, height }
	}
}
impl Display for ThumbnailSize {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}x{}", self.width, self.height)
	}
}

/// One entry of a batch thumbnail response.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailData {
	/// Identifier the entry answers for.
	pub target_id: u64,
	/// Render state reported by the upstream (`Completed`, `Pending`, ...).
	#[serde(default)]
	pub state: String,
	/// Image URL; absent while the render is pending.
	#[serde(default)]
	pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ThumbnailBatch {
	#[serde(default)]
	data: Vec<ThumbnailData>,
}

impl Client {
	/// Fetches full-body avatar thumbnails for a batch of users.
	pub async fn avatars(
		&self,
		user_ids: &[u64],
		size: ThumbnailSize,
	) -> Result<Vec<ThumbnailData>> {
		self.thumbnail_batch("v1/users/avatar", "userIds", user_ids, size, "avatar", AVATAR_SIZES, false)
			.await
	}

	/// Fetches avatar headshot thumbnails for a batch of users.
	pub async fn avatar_headshots(
		&self,
		user_ids: &[u64],
		size: ThumbnailSize,
	) -> Result<Vec<ThumbnailData>> {
		self.thumbnail_batch(
			"v1/users/avatar-headshot",
			"userIds",
			user_ids,
			size,
			"head-shot",
			HEADSHOT_SIZES,
			false,
		)
		.await
	}

	/// Fetches circular group icons for a batch of groups.
	pub async fn group_icons(
		&self,
		group_ids: &[u64],
		size: ThumbnailSize,
	) -> Result<Vec<ThumbnailData>> {
		self.thumbnail_batch(
			"v1/groups/icons",
			"groupIds",
			group_ids,
			size,
			"group-icon",
			GROUP_ICON_SIZES,
			true,
		)
		.await
	}

	/// Fetches game icons for a batch of places.
	pub async fn place_icons(
		&self,
		place_ids: &[u64],
		size: ThumbnailSize,
	) -> Result<Vec<ThumbnailData>> {
		self.thumbnail_batch(
			"v1/places/gameicons",
			"placeIds",
			place_ids,
			size,
			"place-icon",
			PLACE_ICON_SIZES,
			false,
		)
		.await
	}

	/// Fetches badge icons for a batch of badges.
	pub async fn badge_icons(
		&self,
		badge_ids: &[u64],
		size: ThumbnailSize,
	) -> Result<Vec<ThumbnailData>> {
		self.thumbnail_batch(
			"v1/badges/icons",
			"badgeIds",
			badge_ids,
			size,
			"badge-icon",
			BADGE_ICON_SIZES,
			false,
		)
		.await
	}

	/// Fetches icons for a batch of gamepasses.
	pub async fn gamepass_icons(
		&self,
		gamepass_ids: &[u64],
		size: ThumbnailSize,
	) -> Result<Vec<ThumbnailData>> {
		self.thumbnail_batch(
			"v1/game-passes",
			"gamePassIds",
			gamepass_ids,
			size,
			"game-pass-icon",
			GAMEPASS_ICON_SIZES,
			false,
		)
		.await
	}

	#[allow(clippy::too_many_arguments)]
	async fn thumbnail_batch(
		&self,
		path: &str,
		ids_param: &str,
		ids: &[u64],
		size: ThumbnailSize,
		kind: &'static str,
		allowed: &[(u32, u32)],
		circular: bool,
	) -> Result<Vec<ThumbnailData>> {
		if ids.is_empty() {
			return Err(ValidationError::EmptyField { field: "ids" }.into());
		}
		if !allowed.contains(&(size.width, size.height)) {
			return Err(ValidationError::UnsupportedThumbnailSize {
				kind,
				width: size.width,
				height: size.height,
			}
			.into());
		}

		let mut url = endpoint_url(&self.endpoints.thumbnails, path)?;

		{
			let joined =
				ids.iter().map(u64::to_string).collect::<Vec<_>>().join(",");
			let mut pairs = url.query_pairs_mut();

			pairs.append_pair(ids_param, &joined);
			pairs.append_pair("size", &size.to_string());
			pairs.append_pair("format", "Png");
			pairs.append_pair("isCircular", if circular { "true" } else { "false" });
		}

		let response = self.dispatch(url, AuthMode::Anonymous, RequestOverrides::new()).await?;
		let batch: ThumbnailBatch = api::read_body(response).await?;

		Ok(batch.data)
	}
}

/// Extracts the image URL answering `target_id` from a batch response.
pub(crate) fn batch_image(
	entries: Vec<ThumbnailData>,
	target_id: u64,
) -> Result<Option<String>, DecodeError> {
	entries
		.into_iter()
		.find(|entry| entry.target_id == target_id)
		.map(|entry| entry.image_url)
		.ok_or(DecodeError::MissingBatchEntry { target_id })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn batch_image_answers_by_target_not_position() {
		let entries = vec![
			ThumbnailData { target_id: 2, state: "Completed".into(), image_url: Some("b".into()) },
			ThumbnailData { target_id: 1, state: "Completed".into(), image_url: Some("a".into()) },
		];

		assert_eq!(
			batch_image(entries, 1).expect("Target 1 should be present."),
			Some("a".into())
		);
	}

	#[test]
	fn missing_target_is_a_decode_error() {
		let err = batch_image(Vec::new(), 7).expect_err("Empty batch should miss target 7.");

		assert!(matches!(err, DecodeError::MissingBatchEntry { target_id: 7 }));
	}
}
