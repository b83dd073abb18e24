//! Games host wrappers: legacy place details, gamepasses, servers, and creation listings.

// self
use crate::{
	_prelude::*,
	api,
	client::{Client, endpoint_url},
	dispatch::{AuthMode, RequestOverrides},
	endpoints::PageParams,
	error::UpstreamError,
	page::{self, Page, TransformTable},
};

/// Place owner reference.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOwner {
	/// Owner's user identifier.
	pub id: u64,
	/// Owner's username.
	pub username: String,
	/// Absolute profile URL.
	pub profile_url: String,
}

/// Place details from the legacy site endpoint, reshaped into the client's target form.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetails {
	/// Place (asset) identifier.
	pub id: u64,
	/// Place name.
	pub name: String,
	/// Place description.
	pub description: String,
	/// Creation instant.
	#[serde(with = "time::serde::iso8601")]
	pub created: OffsetDateTime,
	/// Last-update instant.
	#[serde(with = "time::serde::iso8601")]
	pub updated: OffsetDateTime,
	/// Favorite count.
	pub favorites: i64,
	/// Absolute place URL.
	pub url: String,
	/// Total visit count.
	pub visited: i64,
	/// Maximum concurrent players per server.
	pub max_players: u32,
	/// Builder reference.
	pub owner: PlaceOwner,
	/// Whether the caller can play the place.
	pub is_playable: bool,
	/// Whether copying is allowed.
	pub copying_allowed: bool,
	/// Genre label.
	pub genre: String,
	/// Players online right now.
	pub playing: i64,
	/// Universe the place belongs to.
	pub universe_id: u64,
	/// Root place of that universe.
	pub root_place_id: u64,
	/// Upvote count.
	pub up_votes: i64,
	/// Downvote count.
	pub down_votes: i64,
	/// Price in Robux; absent for free places.
	pub price: Option<i64>,
}

// The legacy endpoint ships flat PascalCase fields; decode them privately and
// reassemble the nested public shape.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawPlaceDetails {
	asset_id: u64,
	name: String,
	#[serde(default)]
	description: String,
	#[serde(with = "time::serde::iso8601")]
	created: OffsetDateTime,
	#[serde(with = "time::serde::iso8601")]
	updated: OffsetDateTime,
	#[serde(default)]
	favorited_count: i64,
	#[serde(default)]
	url: String,
	#[serde(default)]
	visited_count: i64,
	#[serde(default)]
	max_players: u32,
	builder_id: u64,
	#[serde(default)]
	builder: String,
	#[serde(default)]
	builder_absolute_url: String,
	#[serde(default)]
	is_playable: bool,
	#[serde(default)]
	is_copying_allowed: bool,
	#[serde(default)]
	asset_genre: String,
	#[serde(default)]
	online_count: i64,
	universe_id: u64,
	#[serde(default)]
	universe_root_place_id: u64,
	#[serde(default)]
	total_up_votes: i64,
	#[serde(default)]
	total_down_votes: i64,
	#[serde(default)]
	price: Option<i64>,
}
impl From<RawPlaceDetails> for PlaceDetails {
	fn from(raw: RawPlaceDetails) -> Self {
		Self {
			id: raw.asset_id,
			name: raw.name,
			description: raw.description,
			created: raw.created,
			updated: raw.updated,
			favorites: raw.favorited_count,
			url: raw.url,
			visited: raw.visited_count,
			max_players: raw.max_players,
			owner: PlaceOwner {
				id: raw.builder_id,
				username: raw.builder,
				profile_url: raw.builder_absolute_url,
			},
			is_playable: raw.is_playable,
			copying_allowed: raw.is_copying_allowed,
			genre: raw.asset_genre,
			playing: raw.online_count,
			universe_id: raw.universe_id,
			root_place_id: raw.universe_root_place_id,
			up_votes: raw.total_up_votes,
			down_votes: raw.total_down_votes,
			price: raw.price,
		}
	}
}

/// One gamepass of a universe.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Gamepass {
	/// Gamepass identifier.
	pub id: u64,
	/// Gamepass name.
	pub name: String,
	/// Price in Robux; absent when off sale.
	#[serde(default)]
	pub price: Option<i64>,
}

/// One game in a creation listing.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
	/// Universe identifier.
	pub id: u64,
	/// Game name.
	pub name: String,
	/// Players online right now.
	#[serde(default)]
	pub playing: i64,
	/// Total visit count.
	#[serde(default)]
	pub visits: i64,
	/// Creation instant.
	#[serde(with = "time::serde::iso8601")]
	pub created: OffsetDateTime,
	/// Last-update instant.
	#[serde(with = "time::serde::iso8601")]
	pub updated: OffsetDateTime,
}

/// One running server of a place.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameServer {
	/// Server job identifier.
	pub id: String,
	/// Maximum player count.
	#[serde(default)]
	pub max_players: u32,
	/// Current player count.
	#[serde(default)]
	pub playing: u32,
	/// Average ping in milliseconds.
	#[serde(default)]
	pub ping: Option<i64>,
	/// Server FPS.
	#[serde(default)]
	pub fps: Option<f64>,
}

impl Client {
	/// Fetches place details from the legacy site endpoint.
	///
	/// This is the one anonymous flow that gates on the HTTP status: the legacy endpoint
	/// reports unknown assets with a bare non-2xx response instead of an error envelope.
	pub async fn place_details(&self, place_id: u64) -> Result<PlaceDetails> {
		let mut url = endpoint_url(&self.endpoints.www, "places/api-get-details")?;

		url.query_pairs_mut().append_pair("assetId", &place_id.to_string());

		let response = self.dispatch(url, AuthMode::Anonymous, RequestOverrides::new()).await?;
		let status = response.status();

		if !status.is_success() {
			return Err(UpstreamError::from_status(status).into());
		}

		let raw: RawPlaceDetails = api::read_body(response).await?;

		Ok(raw.into())
	}

	/// Lists a universe's gamepasses, one cursor page at a time.
	pub async fn universe_gamepasses(
		&self,
		universe_id: u64,
		params: &PageParams,
	) -> Result<Page<Gamepass>> {
		self.game_listing(&format!("v1/games/{universe_id}/game-passes"), params, TransformTable::new())
			.await
	}

	/// Lists a group's games, one cursor page at a time.
	pub async fn group_games(&self, group_id: u64, params: &PageParams) -> Result<Page<GameSummary>> {
		self.game_listing(&format!("v2/groups/{group_id}/games"), params, game_transforms()).await
	}

	/// Lists a user's games, one cursor page at a time.
	pub async fn user_creations(
		&self,
		user_id: u64,
		params: &PageParams,
	) -> Result<Page<GameSummary>> {
		self.game_listing(&format!("v2/users/{user_id}/games"), params, game_transforms()).await
	}

	/// Lists a place's public servers, one cursor page at a time.
	pub async fn game_servers(
		&self,
		place_id: u64,
		params: &PageParams,
	) -> Result<Page<GameServer>> {
		self.game_listing(&format!("v1/games/{place_id}/servers/Public"), params, TransformTable::new())
			.await
	}

	async fn game_listing<T>(
		&self,
		path: &str,
		params: &PageParams,
		transforms: TransformTable,
	) -> Result<Page<T>>
	where
		T: DeserializeOwned,
	{
		let mut url = endpoint_url(&self.endpoints.games, path)?;

		params.apply(&mut url);

		let response = self.dispatch(url, AuthMode::Anonymous, RequestOverrides::new()).await?;
		let raw = api::read_body(response).await?;

		Ok(page::normalize(raw, &transforms)?)
	}
}

fn game_transforms() -> TransformTable {
	TransformTable::new().coerce_timestamp("created").coerce_timestamp("updated")
}
