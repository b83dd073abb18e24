//! Groups host wrappers: group lookups, moderation lists, and membership mutations.
//!
//! Group-hierarchy business logic (promote/demote relative to the role ladder) is
//! deliberately not modeled; callers combine [`Client::group`] and [`Client::set_rank`]
//! themselves when they need it.

// crates.io
use futures::future;
use serde_json::json;
// self
use crate::{
	_prelude::*,
	api,
	client::{Client, endpoint_url},
	dispatch::{AuthMode, RequestOverrides},
	endpoints::{
		PageParams,
		thumbnails::{ThumbnailSize, batch_image},
	},
	page::{self, Page, TransformTable},
};

/// Group icon dimensions used by the group fan-out, matching the upstream default.
const GROUP_ICON_SIZE: ThumbnailSize = ThumbnailSize::new(150, 150);

/// Current group shout.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupShout {
	/// Shout text.
	#[serde(default)]
	pub body: String,
	/// Creation instant.
	#[serde(with = "time::serde::iso8601")]
	pub created: OffsetDateTime,
	/// Last-update instant.
	#[serde(with = "time::serde::iso8601")]
	pub updated: OffsetDateTime,
}

/// Group owner reference.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupOwner {
	/// Owner's user identifier.
	pub user_id: u64,
	/// Owner's username.
	#[serde(default)]
	pub username: String,
}

/// Core group fields from the groups host.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDetail {
	/// Group identifier.
	pub id: u64,
	/// Group name.
	pub name: String,
	/// Group description.
	#[serde(default)]
	pub description: String,
	/// Owner reference; absent for abandoned groups.
	#[serde(default)]
	pub owner: Option<GroupOwner>,
	/// Current shout, if any.
	#[serde(default)]
	pub shout: Option<GroupShout>,
	/// Member count.
	#[serde(default)]
	pub member_count: u64,
	/// Whether anyone may join without approval.
	#[serde(default)]
	pub public_entry_allowed: bool,
}

/// One rung of a group's role ladder.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRole {
	/// Role identifier.
	pub id: u64,
	/// Role name.
	pub name: String,
	/// Rank ordinal within the group (0-255).
	pub rank: u32,
	/// Members currently holding the role.
	#[serde(default)]
	pub member_count: u64,
}

/// Group detail, role ladder, and icon assembled from a positional fan-out.
#[derive(Clone, Debug)]
pub struct Group {
	/// Core group fields.
	pub detail: GroupDetail,
	/// Role ladder, lowest rank first as the upstream returns it.
	pub roles: Vec<GroupRole>,
	/// Circular group icon URL; absent while the render is pending.
	pub icon_url: Option<String>,
}

/// One group audit-log entry.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
	/// Moderator who performed the action; shape varies by action type.
	#[serde(default)]
	pub actor: Json,
	/// Upstream action-type label.
	#[serde(default)]
	pub action_type: String,
	/// Action-specific payload.
	#[serde(default)]
	pub description: Json,
	/// Instant the action happened.
	#[serde(with = "time::serde::iso8601")]
	pub created: OffsetDateTime,
}

/// One group wall post.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WallPost {
	/// Post identifier.
	pub id: u64,
	/// Post text.
	#[serde(default)]
	pub body: String,
	/// Posting member; absent when the account was deleted.
	#[serde(default)]
	pub poster: Option<Json>,
	/// Creation instant.
	#[serde(with = "time::serde::iso8601")]
	pub created: OffsetDateTime,
	/// Last-update instant.
	#[serde(with = "time::serde::iso8601")]
	pub updated: OffsetDateTime,
}

/// One pending join request.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
	/// Requesting user; the upstream ships the full requester object.
	#[serde(default)]
	pub requester: Json,
	/// Instant the request was filed.
	#[serde(with = "time::serde::iso8601")]
	pub created: OffsetDateTime,
}

/// Action-type filter values accepted by the audit log.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[allow(missing_docs)]
pub enum AuditLogAction {
	DeletePost,
	RemoveMember,
	AcceptJoinRequest,
	DeclineJoinRequest,
	PostStatus,
	ChangeRank,
	BuyAd,
	SendAllyRequest,
	CreateEnemy,
	AcceptAllyRequest,
	DeclineAllyRequest,
	DeleteAlly,
	DeleteEnemy,
	AddGroupPlace,
	RemoveGroupPlace,
	CreateItems,
	ConfigureItems,
	SpendGroupFunds,
	ChangeOwner,
	Delete,
	AdjustCurrencyAmounts,
	Abandon,
	Claim,
	Rename,
	ChangeDescription,
	CreateGroupAsset,
	UpdateGroupAsset,
	ConfigureGroupAsset,
	RevertGroupAsset,
	CreateGroupDeveloperProduct,
	ConfigureGroupGame,
	Lock,
	Unlock,
	CreateGamePass,
	CreateBadge,
	ConfigureBadge,
	SavePlace,
	PublishPlace,
	UpdateRolesetRank,
	UpdateRolesetData,
}
impl AuditLogAction {
	fn as_str(&self) -> &'static str {
		match self {
			Self::DeletePost => "DeletePost",
			Self::RemoveMember => "RemoveMember",
			Self::AcceptJoinRequest => "AcceptJoinRequest",
			Self::DeclineJoinRequest => "DeclineJoinRequest",
			Self::PostStatus => "PostStatus",
			Self::ChangeRank => "ChangeRank",
			Self::BuyAd => "BuyAd",
			Self::SendAllyRequest => "SendAllyRequest",
			Self::CreateEnemy => "CreateEnemy",
			Self::AcceptAllyRequest => "AcceptAllyRequest",
			Self::DeclineAllyRequest => "DeclineAllyRequest",
			Self::DeleteAlly => "DeleteAlly",
			Self::DeleteEnemy => "DeleteEnemy",
			Self::AddGroupPlace => "AddGroupPlace",
			Self::RemoveGroupPlace => "RemoveGroupPlace",
			Self::CreateItems => "CreateItems",
			Self::ConfigureItems => "ConfigureItems",
			Self::SpendGroupFunds => "SpendGroupFunds",
			Self::ChangeOwner => "ChangeOwner",
			Self::Delete => "Delete",
			Self::AdjustCurrencyAmounts => "AdjustCurrencyAmounts",
			Self::Abandon => "Abandon",
			Self::Claim => "Claim",
			Self::Rename => "Rename",
			Self::ChangeDescription => "ChangeDescription",
			Self::CreateGroupAsset => "CreateGroupAsset",
			Self::UpdateGroupAsset => "UpdateGroupAsset",
			Self::ConfigureGroupAsset => "ConfigureGroupAsset",
			Self::RevertGroupAsset => "RevertGroupAsset",
			Self::CreateGroupDeveloperProduct => "CreateGroupDeveloperProduct",
			Self::ConfigureGroupGame => "ConfigureGroupGame",
			Self::Lock => "Lock",
			Self::Unlock => "Unlock",
			Self::CreateGamePass => "CreateGamePass",
			Self::CreateBadge => "CreateBadge",
			Self::ConfigureBadge => "ConfigureBadge",
			Self::SavePlace => "SavePlace",
			Self::PublishPlace => "PublishPlace",
			Self::UpdateRolesetRank => "UpdateRolesetRank",
			Self::UpdateRolesetData => "UpdateRolesetData",
		}
	}
}

/// Optional filters for the group audit log.
#[derive(Clone, Debug, Default)]
pub struct AuditLogFilter {
	/// Restrict to actions performed by this user.
	pub user_id: Option<u64>,
	/// Restrict to one action type.
	pub action: Option<AuditLogAction>,
}

#[derive(Debug, Deserialize)]
struct GroupRolesList {
	#[serde(default)]
	roles: Vec<GroupRole>,
}

impl Client {
	/// Fetches a group's core fields.
	pub async fn group_detail(&self, group_id: u64) -> Result<GroupDetail> {
		let url = endpoint_url(&self.endpoints.groups, &format!("v1/groups/{group_id}"))?;
		let response = self.dispatch(url, AuthMode::Anonymous, RequestOverrides::new()).await?;

		api::read_body(response).await
	}

	/// Fetches a group's role ladder.
	pub async fn group_roles(&self, group_id: u64) -> Result<Vec<GroupRole>> {
		let url = endpoint_url(&self.endpoints.groups, &format!("v1/groups/{group_id}/roles"))?;
		let response = self.dispatch(url, AuthMode::Anonymous, RequestOverrides::new()).await?;
		let list: GroupRolesList = api::read_body(response).await?;

		Ok(list.roles)
	}

	/// Fetches a group's detail, role ladder, and icon with a positional fan-out.
	pub async fn group(&self, group_id: u64) -> Result<Group> {
		let (detail, roles, icons) = future::try_join3(
			self.group_detail(group_id),
			self.group_roles(group_id),
			self.group_icons(&[group_id], GROUP_ICON_SIZE),
		)
		.await?;

		Ok(Group { detail, roles, icon_url: batch_image(icons, group_id)? })
	}

	/// Reads the group audit log; requires a full authenticated session.
	pub async fn audit_log(
		&self,
		group_id: u64,
		filter: &AuditLogFilter,
		params: &PageParams,
	) -> Result<Page<AuditLogEntry>> {
		let mut url =
			endpoint_url(&self.endpoints.groups, &format!("v1/groups/{group_id}/audit-log"))?;

		params.apply(&mut url);

		{
			let mut pairs = url.query_pairs_mut();

			if let Some(user_id) = filter.user_id {
				pairs.append_pair("userId", &user_id.to_string());
			}
			if let Some(action) = filter.action {
				pairs.append_pair("actionType", action.as_str());
			}
		}

		let response =
			self.dispatch(url, AuthMode::CookieAndToken, RequestOverrides::new()).await?;
		let raw = api::read_body(response).await?;

		Ok(page::normalize(raw, &TransformTable::new().coerce_timestamp("created"))?)
	}

	/// Reads the group wall; a session is optional but changes visibility.
	pub async fn wall(&self, group_id: u64, params: &PageParams) -> Result<Page<WallPost>> {
		let mut url =
			endpoint_url(&self.endpoints.groups, &format!("v2/groups/{group_id}/wall/posts"))?;

		params.apply(&mut url);

		let response = self.dispatch(url, AuthMode::CookieOnly, RequestOverrides::new()).await?;
		let raw = api::read_body(response).await?;
		let transforms =
			TransformTable::new().coerce_timestamp("created").coerce_timestamp("updated");

		Ok(page::normalize(raw, &transforms)?)
	}

	/// Lists pending join requests; requires a full authenticated session.
	pub async fn join_requests(
		&self,
		group_id: u64,
		params: &PageParams,
	) -> Result<Page<JoinRequest>> {
		let mut url =
			endpoint_url(&self.endpoints.groups, &format!("v1/groups/{group_id}/join-requests"))?;

		params.apply(&mut url);

		let response =
			self.dispatch(url, AuthMode::CookieAndToken, RequestOverrides::new()).await?;
		let raw = api::read_body(response).await?;

		Ok(page::normalize(raw, &TransformTable::new().coerce_timestamp("created"))?)
	}

	/// Accepts a pending join request.
	pub async fn accept_join_request(&self, group_id: u64, user_id: u64) -> Result<()> {
		self.join_request_mutation(group_id, user_id, Method::POST).await
	}

	/// Declines a pending join request.
	pub async fn decline_join_request(&self, group_id: u64, user_id: u64) -> Result<()> {
		self.join_request_mutation(group_id, user_id, Method::DELETE).await
	}

	/// Moves a member onto the given role.
	pub async fn set_rank(&self, group_id: u64, user_id: u64, role_id: u64) -> Result<()> {
		let url = endpoint_url(
			&self.endpoints.groups,
			&format!("v1/groups/{group_id}/users/{user_id}"),
		)?;
		let overrides =
			RequestOverrides::new().method(Method::PATCH).json(json!({ "roleId": role_id }));
		let response = self.dispatch(url, AuthMode::CookieAndToken, overrides).await?;

		api::read_body::<Json>(response).await.map(|_| ())
	}

	/// Exiles a member from the group.
	pub async fn exile(&self, group_id: u64, user_id: u64) -> Result<()> {
		let url = endpoint_url(
			&self.endpoints.groups,
			&format!("v1/groups/{group_id}/users/{user_id}"),
		)?;
		let response = self
			.dispatch(url, AuthMode::CookieAndToken, RequestOverrides::new().method(Method::DELETE))
			.await?;

		api::read_body::<Json>(response).await.map(|_| ())
	}

	async fn join_request_mutation(
		&self,
		group_id: u64,
		user_id: u64,
		method: Method,
	) -> Result<()> {
		let url = endpoint_url(
			&self.endpoints.groups,
			&format!("v1/groups/{group_id}/join-requests/users/{user_id}"),
		)?;
		let response =
			self.dispatch(url, AuthMode::CookieAndToken, RequestOverrides::new().method(method))
				.await?;

		api::read_body::<Json>(response).await.map(|_| ())
	}
}
