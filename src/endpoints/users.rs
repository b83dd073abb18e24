//! Users host wrappers: profiles, search, memberships, and social-graph mutations.

// crates.io
use futures::future;
// self
use crate::{
	_prelude::*,
	api,
	client::{Client, endpoint_url},
	dispatch::{AuthMode, RequestOverrides},
	endpoints::{
		PageParams,
		badges::{self, Badge},
		groups::GroupShout,
		thumbnails::{ThumbnailSize, batch_image},
	},
	error::ValidationError,
	page::{self, Page, TransformTable},
};

/// Thumbnail dimensions used by the profile fan-out, matching the upstream defaults.
const PROFILE_THUMBNAIL_SIZE: ThumbnailSize = ThumbnailSize::new(352, 352);

/// Core profile fields from the users host.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
	/// User identifier.
	pub id: u64,
	/// Account username.
	pub name: String,
	/// Profile description.
	#[serde(default)]
	pub description: String,
	/// Account creation instant.
	#[serde(with = "time::serde::iso8601")]
	pub created: OffsetDateTime,
	/// Whether the account is banned.
	#[serde(default)]
	pub is_banned: bool,
}

/// Profile plus its two thumbnail variants, fetched with a positional fan-out.
#[derive(Clone, Debug)]
pub struct UserProfile {
	/// Core profile fields.
	pub detail: UserDetail,
	/// Full-body avatar image URL; absent while the render is pending.
	pub avatar_url: Option<String>,
	/// Headshot image URL; absent while the render is pending.
	pub headshot_url: Option<String>,
}

/// One user search hit.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSearchResult {
	/// User identifier.
	pub id: u64,
	/// Account username.
	pub name: String,
	/// Usernames this account previously held.
	#[serde(default)]
	pub previous_usernames: Vec<String>,
}

/// Group summary as embedded in a membership listing.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipGroup {
	/// Group identifier.
	pub id: u64,
	/// Group name.
	pub name: String,
	/// Member count at listing time.
	#[serde(default)]
	pub member_count: u64,
	/// Current group shout, if any.
	#[serde(default)]
	pub shout: Option<GroupShout>,
}

/// Role held within one group.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipRole {
	/// Role identifier.
	pub id: u64,
	/// Role name.
	pub name: String,
	/// Rank ordinal within the group (0-255).
	pub rank: u32,
}

/// One entry of a user's group membership listing.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGroupRole {
	/// Group the user belongs to.
	pub group: MembershipGroup,
	/// Role the user holds in that group.
	pub role: MembershipRole,
}

/// Outcome of a friend-request or follow mutation.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialOutcome {
	/// Whether the upstream accepted the mutation.
	#[serde(default)]
	pub success: bool,
	/// Whether a captcha challenge blocked the mutation.
	#[serde(default)]
	pub is_captcha_response: bool,
}

#[derive(Debug, Deserialize)]
struct LegacyUserLookup {
	#[serde(rename = "Id")]
	id: u64,
}

impl Client {
	/// Fetches a user's core profile fields.
	pub async fn user_detail(&self, user_id: u64) -> Result<UserDetail> {
		let url = endpoint_url(&self.endpoints.users, &format!("v1/users/{user_id}"))?;
		let response = self.dispatch(url, AuthMode::Anonymous, RequestOverrides::new()).await?;

		api::read_body(response).await
	}

	/// Fetches a user's profile together with both avatar thumbnail variants.
	///
	/// The three reads are issued concurrently and collected by position, so each
	/// thumbnail answers the request it was issued for regardless of completion order.
	pub async fn user(&self, user_id: u64) -> Result<UserProfile> {
		let (detail, avatars, headshots) = future::try_join3(
			self.user_detail(user_id),
			self.avatars(&[user_id], PROFILE_THUMBNAIL_SIZE),
			self.avatar_headshots(&[user_id], PROFILE_THUMBNAIL_SIZE),
		)
		.await?;

		Ok(UserProfile {
			detail,
			avatar_url: batch_image(avatars, user_id)?,
			headshot_url: batch_image(headshots, user_id)?,
		})
	}

	/// Resolves a username through the legacy lookup endpoint, then fetches the profile.
	pub async fn user_by_username(&self, username: &str) -> Result<UserProfile> {
		if username.is_empty() {
			return Err(ValidationError::EmptyField { field: "username" }.into());
		}

		let mut url = endpoint_url(&self.endpoints.api, "users/get-by-username")?;

		url.query_pairs_mut().append_pair("username", username);

		let response = self.dispatch(url, AuthMode::Anonymous, RequestOverrides::new()).await?;
		let found: LegacyUserLookup = api::read_body(response).await?;

		self.user(found.id).await
	}

	/// Searches users by keyword.
	pub async fn search_users(
		&self,
		keyword: &str,
		params: &PageParams,
	) -> Result<Page<UserSearchResult>> {
		if keyword.is_empty() {
			return Err(ValidationError::EmptyField { field: "keyword" }.into());
		}

		let mut url = endpoint_url(&self.endpoints.users, "v1/users/search")?;

		url.query_pairs_mut().append_pair("keyword", keyword);
		params.apply(&mut url);

		let response = self.dispatch(url, AuthMode::Anonymous, RequestOverrides::new()).await?;
		let raw = api::read_body(response).await?;

		Ok(page::normalize(raw, &TransformTable::new())?)
	}

	/// Lists every group the user belongs to, with the role held in each.
	pub async fn user_groups(&self, user_id: u64) -> Result<Vec<UserGroupRole>> {
		let url =
			endpoint_url(&self.endpoints.groups, &format!("v1/users/{user_id}/groups/roles"))?;
		let response = self.dispatch(url, AuthMode::Anonymous, RequestOverrides::new()).await?;
		let raw = api::read_body(response).await?;
		let transforms = TransformTable::new()
			.coerce_timestamp("group.shout.created")
			.coerce_timestamp("group.shout.updated");

		Ok(page::normalize::<UserGroupRole>(raw, &transforms)?.data)
	}

	/// Lists badges the user has been awarded, one cursor page at a time.
	pub async fn user_badges(&self, user_id: u64, params: &PageParams) -> Result<Page<Badge>> {
		let mut url =
			endpoint_url(&self.endpoints.badges, &format!("v1/users/{user_id}/badges"))?;

		params.apply(&mut url);

		let response = self.dispatch(url, AuthMode::Anonymous, RequestOverrides::new()).await?;
		let raw = api::read_body(response).await?;

		Ok(page::normalize(raw, &badges::transforms())?)
	}

	/// Sends a friend request to the target user.
	pub async fn friend(&self, target_id: u64) -> Result<SocialOutcome> {
		self.social_mutation(&format!("v1/users/{target_id}/request-friendship")).await
	}

	/// Follows the target user.
	pub async fn follow(&self, target_id: u64) -> Result<SocialOutcome> {
		self.social_mutation(&format!("v1/users/{target_id}/follow")).await
	}

	/// Unfollows the target user.
	pub async fn unfollow(&self, target_id: u64) -> Result<SocialOutcome> {
		self.social_mutation(&format!("v1/users/{target_id}/unfollow")).await
	}

	async fn social_mutation(&self, path: &str) -> Result<SocialOutcome> {
		let url = endpoint_url(&self.endpoints.friends, path)?;
		let response = self
			.dispatch(url, AuthMode::CookieAndToken, RequestOverrides::new().method(Method::POST))
			.await?;

		api::read_body(response).await
	}
}
