//! Transport wrapper and the wire-level header contract shared with the upstream.

// std
use std::ops::Deref;
// crates.io
use reqwest::header::HeaderValue;
// self
use crate::{_prelude::*, error::ValidationError};

/// Anti-forgery token header; the upstream reads it on requests and echoes a fresh value
/// under the same (case-insensitive) name on the refresh side-channel's response.
pub const CSRF_TOKEN_HEADER: &str = "x-csrf-token";
/// Cookie field carrying the session credential.
pub const SESSION_COOKIE: &str = ".ROBLOSECURITY";

/// Formats the credential cookie header value for an outgoing request.
pub fn cookie_header_value(secret: &str) -> String {
	format!("{SESSION_COOKIE}={secret}")
}

/// Encodes the credential cookie for one outgoing request.
pub(crate) fn credential_header(secret: &str) -> Result<HeaderValue, ValidationError> {
	header_value(&cookie_header_value(secret))
}

/// Encodes an arbitrary credential-bearing string as a header value.
pub(crate) fn header_value(value: &str) -> Result<HeaderValue, ValidationError> {
	HeaderValue::from_str(value).map_err(|_| ValidationError::UnencodableCredential)
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Each call opens an independent request: no connection-pool tuning, timeouts, or
/// redirect policy beyond reqwest's defaults happens at this layer.
#[derive(Clone, Debug, Default)]
pub struct HttpTransport(pub ReqwestClient);
impl HttpTransport {
	/// Wraps an existing [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
impl AsRef<ReqwestClient> for HttpTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for HttpTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn cookie_header_carries_field_name() {
		assert_eq!(cookie_header_value("secret"), ".ROBLOSECURITY=secret");
	}

	#[test]
	fn control_bytes_are_rejected() {
		assert!(credential_header("ok-value").is_ok());
		assert!(matches!(
			credential_header("bad\nvalue"),
			Err(ValidationError::UnencodableCredential)
		));
	}
}
