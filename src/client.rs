//! Client handle, upstream endpoint descriptor, and the login flow.

// self
use crate::{
	_prelude::*,
	api,
	dispatch::{AuthMode, RequestOverrides},
	error::{ConfigError, ValidationError},
	http::HttpTransport,
	session::Session,
};

/// Mandatory warning prefix every genuine session cookie carries.
const COOKIE_WARNING_PREFIX: &str = "_|WARNING:-DO-NOT-SHARE-THIS";

/// Base URLs for every upstream host the client talks to.
///
/// [`Endpoints::production`] yields the live hosts; tests point all of them at a mock
/// server instead.
#[derive(Clone, Debug)]
pub struct Endpoints {
	/// Users host (profiles, search, the authenticated-user probe).
	pub users: Url,
	/// Auth host (token refresh side-channel).
	pub auth: Url,
	/// Groups host.
	pub groups: Url,
	/// Games host.
	pub games: Url,
	/// Badges host.
	pub badges: Url,
	/// Thumbnails host (batch image lookups).
	pub thumbnails: Url,
	/// Friends host (friend/follow operations).
	pub friends: Url,
	/// Legacy site host (place details).
	pub www: Url,
	/// Legacy API host (username lookup).
	pub api: Url,
}
impl Endpoints {
	/// Returns the production Roblox hosts.
	pub fn production() -> Self {
		fn base(raw: &'static str) -> Url {
			Url::parse(raw).expect("Hardcoded endpoint URL must parse.")
		}

		Self {
			users: base("https://users.roblox.com/"),
			auth: base("https://auth.roblox.com/"),
			groups: base("https://groups.roblox.com/"),
			games: base("https://games.roblox.com/"),
			badges: base("https://badges.roblox.com/"),
			thumbnails: base("https://thumbnails.roblox.com/"),
			friends: base("https://friends.roblox.com/"),
			www: base("https://www.roblox.com/"),
			api: base("https://api.roblox.com/"),
		}
	}
}
impl Default for Endpoints {
	fn default() -> Self {
		Self::production()
	}
}

/// Joins a relative endpoint path onto one of the host bases.
pub(crate) fn endpoint_url(base: &Url, path: &str) -> Result<Url> {
	base.join(path).map_err(|source| ConfigError::InvalidEndpoint { source }.into())
}

/// Handle for the Roblox web APIs.
///
/// Owns the transport, the endpoint descriptor, and the session context; cloning shares
/// all three, so clones observe the same login.
#[derive(Clone)]
pub struct Client {
	/// Transport used for every outbound request.
	pub http: HttpTransport,
	/// Upstream host bases.
	pub endpoints: Endpoints,
	pub(crate) session: Session,
}
impl Client {
	/// Creates a client with its own transport against the given hosts.
	pub fn new(endpoints: Endpoints) -> Result<Self> {
		let client = ReqwestClient::builder().build().map_err(ConfigError::from)?;

		Ok(Self::with_transport(HttpTransport::with_client(client), endpoints))
	}

	/// Creates a client that reuses a caller-provided transport.
	pub fn with_transport(http: HttpTransport, endpoints: Endpoints) -> Self {
		Self { http, endpoints, session: Session::default() }
	}

	/// Read access to the session context.
	pub fn session(&self) -> &Session {
		&self.session
	}
}
impl Debug for Client {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("endpoints", &self.endpoints)
			.field("session", &self.session)
			.finish()
	}
}

/// Identity returned by the authenticated-user probe.
///
/// The upstream additionally ships a display name on this payload; it is deliberately
/// not modeled here, matching the normalized shape callers receive.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AuthenticatedUser {
	/// User identifier.
	pub id: u64,
	/// Account username.
	pub name: String,
}

impl Client {
	/// Validates and adopts a session cookie, returning the authenticated identity.
	///
	/// The cookie must carry the upstream's `_|WARNING:-DO-NOT-SHARE-THIS` prefix;
	/// anything else is rejected before any network call. On success the cookie becomes
	/// the ambient session credential for every subsequent call. Re-login overwrites the
	/// previous cookie.
	pub async fn login(&self, cookie: &str) -> Result<AuthenticatedUser> {
		if !cookie.starts_with(COOKIE_WARNING_PREFIX) {
			return Err(ValidationError::MalformedCookie.into());
		}

		let url = endpoint_url(&self.endpoints.users, "v1/users/authenticated")?;
		let response =
			self.dispatch(url, AuthMode::CookieOnly, RequestOverrides::new().cookie(cookie)).await?;

		api::read_body_gated(response).await
	}

	/// Returns the identity bound to the current session cookie.
	pub async fn authenticated_user(&self) -> Result<AuthenticatedUser> {
		let url = endpoint_url(&self.endpoints.users, "v1/users/authenticated")?;
		let response = self.dispatch(url, AuthMode::CookieOnly, RequestOverrides::new()).await?;

		api::read_body_gated(response).await
	}
}
