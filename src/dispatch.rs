//! The authenticated request dispatch chokepoint.
//!
//! [`Client::dispatch`] is the single path every outbound call takes and the only place
//! authentication policy is enforced: the caller declares an [`AuthMode`], the dispatcher
//! decides what credentials to attach (brokering an anti-forgery token on demand), and
//! the raw transport response comes back for the endpoint wrapper to interpret. Status
//! codes and error envelopes are deliberately not inspected here.

// crates.io
use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderMap, HeaderName, HeaderValue};
// self
use crate::{
	_prelude::*,
	client::Client,
	error::TransportError,
	http::{self, CSRF_TOKEN_HEADER},
	obs::RequestSpan,
};

/// Authentication requirement a caller declares for one request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AuthMode {
	/// Never attach credentials.
	Anonymous,
	/// Attach the session cookie when one exists; proceed without it otherwise.
	CookieOnly,
	/// Require a cookie plus a freshly brokered anti-forgery token.
	CookieAndToken,
}
impl AuthMode {
	/// Stable label used in spans and diagnostics.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Anonymous => "anonymous",
			Self::CookieOnly => "cookie",
			Self::CookieAndToken => "cookie-and-token",
		}
	}
}

/// Transport overrides forwarded alongside one dispatched request.
#[derive(Clone, Debug, Default)]
pub struct RequestOverrides {
	method: Method,
	headers: HeaderMap,
	body: Option<Json>,
	cookie: Option<String>,
}
impl RequestOverrides {
	/// Creates an empty override set (GET, no extra headers, no body).
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the HTTP method.
	pub fn method(mut self, method: Method) -> Self {
		self.method = method;

		self
	}

	/// Adds one header to the outgoing request.
	pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);

		self
	}

	/// Attaches a JSON body.
	pub fn json(mut self, body: Json) -> Self {
		self.body = Some(body);

		self
	}

	/// Supplies an explicit session credential for this request.
	///
	/// An explicit credential always wins: dispatch writes it back into the session, so
	/// it becomes the ambient cookie for every later call as well.
	pub fn cookie(mut self, secret: impl Into<String>) -> Self {
		self.cookie = Some(secret.into());

		self
	}
}

impl Client {
	/// Dispatches one request with the declared authentication mode.
	///
	/// - [`AuthMode::Anonymous`] forwards the overrides untouched and never reads the
	///   session.
	/// - [`AuthMode::CookieOnly`] attaches the session cookie when present; its absence
	///   is not an error.
	/// - [`AuthMode::CookieAndToken`] fails fast with [`Error::AuthRequired`] before any
	///   network call when no cookie exists; otherwise it performs exactly one token
	///   refresh and attaches both the cookie and the token. Broker failures propagate
	///   unchanged.
	///
	/// Returns the raw response; interpreting the status and body is the caller's
	/// responsibility.
	pub async fn dispatch(
		&self,
		url: Url,
		mode: AuthMode,
		overrides: RequestOverrides,
	) -> Result<Response> {
		let span = RequestSpan::new(mode, &url);

		// An explicit credential always wins and becomes the new ambient session.
		if let Some(secret) = &overrides.cookie {
			self.session.set_cookie(secret.clone());
		}

		let mut headers = overrides.headers;

		match mode {
			AuthMode::Anonymous => {},
			AuthMode::CookieOnly =>
				if let Some(cookie) = self.session.snapshot().cookie {
					headers.insert(COOKIE, http::credential_header(cookie.expose())?);
				},
			AuthMode::CookieAndToken => {
				if self.session.snapshot().cookie.is_none() {
					return Err(Error::AuthRequired);
				}

				// The refresh suspends; a login racing this dispatch may swap the cookie
				// underneath it. The pair sent below is still one this dispatch obtained
				// itself, which is the whole contract (undefined ordering, not a bug).
				let token = self.refresh_csrf_token().await?;
				let cookie = self.session.snapshot().cookie.ok_or(Error::AuthRequired)?;

				headers.insert(COOKIE, http::credential_header(cookie.expose())?);
				headers.insert(CSRF_TOKEN_HEADER, http::header_value(&token)?);
			},
		}

		let mut request = self.http.request(overrides.method, url).headers(headers);

		if let Some(body) = &overrides.body {
			request = request.header(CONTENT_TYPE, "application/json").body(body.to_string());
		}

		let response = span.instrument(request.send()).await.map_err(TransportError::from)?;

		Ok(response)
	}
}
