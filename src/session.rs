//! Per-client session context: the cookie credential and the current anti-forgery token.
//!
//! The session is an explicit context object threaded through the client rather than a
//! process global, so the interleaving documented on [`Client::dispatch`] is a visible,
//! testable contention point. Neither field is ever cleared; both live for the client's
//! lifetime. A token is only meaningful alongside the cookie it was minted for and is
//! never attached to a request on its own.
//!
//! [`Client::dispatch`]: crate::client::Client::dispatch

// self
use crate::_prelude::*;

/// Redacted session credential wrapper keeping the secret out of logs.
#[derive(Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SessionSecret(String);
impl SessionSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner secret. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for SessionSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for SessionSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SessionSecret").field(&"<redacted>").finish()
	}
}
impl Display for SessionSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[derive(Debug, Default)]
struct SessionInner {
	cookie: Option<SessionSecret>,
	token: Option<String>,
}

/// Shared mutable session state for one client.
///
/// Mutations are atomic at the granularity of a single assignment; no guard is held
/// across suspension points.
#[derive(Clone, Debug, Default)]
pub struct Session(Arc<Mutex<SessionInner>>);
impl Session {
	/// Returns a point-in-time copy of the cookie and token.
	pub fn snapshot(&self) -> SessionSnapshot {
		let inner = self.0.lock();

		SessionSnapshot { cookie: inner.cookie.clone(), token: inner.token.clone() }
	}

	/// Stores a new session cookie, overwriting any prior value.
	pub fn set_cookie(&self, secret: impl Into<String>) {
		self.0.lock().cookie = Some(SessionSecret::new(secret));
	}

	/// Stores the most recently brokered anti-forgery token.
	pub fn set_token(&self, token: impl Into<String>) {
		self.0.lock().token = Some(token.into());
	}
}

/// Point-in-time view of the session returned by [`Session::snapshot`].
#[derive(Clone, Debug)]
pub struct SessionSnapshot {
	/// Current session cookie, absent until a login-equivalent call succeeds.
	pub cookie: Option<SessionSecret>,
	/// Most recently brokered anti-forgery token; may be stale.
	pub token: Option<String>,
}
