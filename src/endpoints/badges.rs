//! Badges host wrappers: badge lookups, universe listings, awarded dates, and updates.

// crates.io
use serde_json::json;
// self
use crate::{
	_prelude::*,
	api,
	client::{Client, endpoint_url},
	dispatch::{AuthMode, RequestOverrides},
	endpoints::PageParams,
	error::ValidationError,
	page::{self, Page, TransformTable},
};

/// One badge.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
	/// Badge identifier.
	pub id: u64,
	/// Badge name.
	pub name: String,
	/// Badge description.
	#[serde(default)]
	pub description: Option<String>,
	/// Whether the badge can currently be awarded.
	#[serde(default)]
	pub enabled: bool,
	/// Creation instant.
	#[serde(with = "time::serde::iso8601")]
	pub created: OffsetDateTime,
	/// Last-update instant.
	#[serde(with = "time::serde::iso8601")]
	pub updated: OffsetDateTime,
}

/// Award instant for one badge held by one user.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardedBadge {
	/// Badge identifier.
	pub badge_id: u64,
	/// Instant the badge was awarded.
	#[serde(with = "time::serde::iso8601")]
	pub awarded_date: OffsetDateTime,
}

/// Fields of a badge update.
#[derive(Clone, Debug)]
pub struct BadgeUpdate {
	/// New badge name.
	pub name: String,
	/// New badge description.
	pub description: String,
	/// Whether the badge may be awarded.
	pub enabled: bool,
}

/// Transform table shared by every badge listing.
pub(crate) fn transforms() -> TransformTable {
	TransformTable::new().coerce_timestamp("created").coerce_timestamp("updated")
}

impl Client {
	/// Fetches one badge.
	pub async fn badge(&self, badge_id: u64) -> Result<Badge> {
		let url = endpoint_url(&self.endpoints.badges, &format!("v1/badges/{badge_id}"))?;
		let response = self.dispatch(url, AuthMode::Anonymous, RequestOverrides::new()).await?;

		api::read_body(response).await
	}

	/// Lists a universe's badges, one cursor page at a time.
	pub async fn universe_badges(
		&self,
		universe_id: u64,
		params: &PageParams,
	) -> Result<Page<Badge>> {
		let mut url = endpoint_url(
			&self.endpoints.badges,
			&format!("v1/universes/{universe_id}/badges"),
		)?;

		params.apply(&mut url);

		let response = self.dispatch(url, AuthMode::Anonymous, RequestOverrides::new()).await?;
		let raw = api::read_body(response).await?;

		Ok(page::normalize(raw, &transforms())?)
	}

	/// Fetches the award instants for a batch of badges held by one user.
	pub async fn badge_awarded_dates(
		&self,
		user_id: u64,
		badge_ids: &[u64],
	) -> Result<Vec<AwardedBadge>> {
		if badge_ids.is_empty() {
			return Err(ValidationError::EmptyField { field: "badge_ids" }.into());
		}

		let mut url = endpoint_url(
			&self.endpoints.badges,
			&format!("v1/users/{user_id}/badges/awarded-dates"),
		)?;
		let joined = badge_ids.iter().map(u64::to_string).collect::<Vec<_>>().join(",");

		url.query_pairs_mut().append_pair("badgeIds", &joined);

		let response = self.dispatch(url, AuthMode::Anonymous, RequestOverrides::new()).await?;
		let raw = api::read_body(response).await?;
		let transforms = TransformTable::new().coerce_timestamp("awardedDate");

		Ok(page::normalize::<AwardedBadge>(raw, &transforms)?.data)
	}

	/// Updates a badge's name, description, and enabled flag.
	///
	/// Requires a full authenticated session. Both text fields must be non-empty; that
	/// is checked before any network call.
	pub async fn update_badge(&self, badge_id: u64, update: &BadgeUpdate) -> Result<()> {
		if update.name.is_empty() {
			return Err(ValidationError::EmptyField { field: "name" }.into());
		}
		if update.description.is_empty() {
			return Err(ValidationError::EmptyField { field: "description" }.into());
		}

		let url = endpoint_url(&self.endpoints.badges, &format!("v1/badges/{badge_id}"))?;
		let overrides = RequestOverrides::new().method(Method::PATCH).json(json!({
			"name": update.name,
			"description": update.description,
			"enabled": update.enabled,
		}));
		let response = self.dispatch(url, AuthMode::CookieAndToken, overrides).await?;

		api::read_body::<Json>(response).await.map(|_| ())
	}
}
