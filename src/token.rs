//! Anti-forgery token brokering via the upstream's logout side-channel.
//!
//! The upstream echoes a fresh `x-csrf-token` header from `POST v2/logout` even though
//! the call itself may report an "already logged out" style error in its body. The broker
//! therefore reads the header before interpreting the body, and only treats a body-level
//! error as fatal when it is not the recognized token-validation complaint. Tokens are
//! short-lived and tied to the current cookie, so the broker runs synchronously inside
//! every token-requiring dispatch instead of caching across requests.

// crates.io
use reqwest::header::COOKIE;
// self
use crate::{
	_prelude::*,
	api::ApiBody,
	client::{Client, endpoint_url},
	error::{TransportError, UpstreamError},
	http::{self, CSRF_TOKEN_HEADER},
};

/// Substring marking the benign body-level error the logout side-channel returns when the
/// presented token is merely stale. Matches on upstream English text, which the upstream
/// can rewrite without notice.
const BENIGN_REFRESH_ERROR: &str = "Token Validation";

impl Client {
	/// Obtains a fresh anti-forgery token and stores it in the session.
	///
	/// Fails with [`Error::AuthRequired`] before any network call when no cookie exists,
	/// and with [`Error::TokenAcquisition`] when an otherwise non-fatal refresh response
	/// carries no header token.
	pub async fn refresh_csrf_token(&self) -> Result<String> {
		let Some(cookie) = self.session.snapshot().cookie else {
			return Err(Error::AuthRequired);
		};
		let url = endpoint_url(&self.endpoints.auth, "v2/logout")?;
		let response = self
			.http
			.post(url)
			.header(COOKIE, http::credential_header(cookie.expose())?)
			.send()
			.await
			.map_err(TransportError::from)?;
		// Header first: the body may carry a benign error while the header is fresh.
		let token = response
			.headers()
			.get(CSRF_TOKEN_HEADER)
			.and_then(|value| value.to_str().ok())
			.map(str::to_owned);
		let bytes = response.bytes().await.map_err(TransportError::body)?;

		let body: ApiBody<Json> = ApiBody::decode(&bytes)?;

		if let ApiBody::Failure(errors) = body {
			let benign = errors
				.first()
				.is_some_and(|error| error.message.contains(BENIGN_REFRESH_ERROR));

			if !benign {
				return Err(UpstreamError::new(errors).into());
			}
		}

		let token = token.ok_or(Error::TokenAcquisition)?;

		self.session.set_token(token.clone());

		Ok(token)
	}
}
