//! Typed Roblox web API client built around a session-aware request dispatcher.
//!
//! Every outbound call funnels through [`Client::dispatch`](client::Client), the single
//! chokepoint where authentication policy lives: anonymous calls pass through untouched,
//! cookie-bearing calls attach the ambient session credential, and state-mutating calls
//! additionally broker a fresh anti-forgery token from the upstream's logout side-channel.
//! List responses flow through [`page::normalize`], which preserves item order and cursor
//! continuity while coercing timestamps into canonical form and redacting sensitive fields.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod client;
pub mod dispatch;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod obs;
pub mod page;
pub mod session;
pub mod token;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::client::{Client, Endpoints};

	/// Builds a client whose every upstream host points at `base`, typically a mock server.
	pub fn test_client(base: &str) -> Client {
		let base = Url::parse(base).expect("Failed to parse mock server URL.");
		let endpoints = Endpoints {
			users: base.clone(),
			auth: base.clone(),
			groups: base.clone(),
			games: base.clone(),
			badges: base.clone(),
			thumbnails: base.clone(),
			friends: base.clone(),
			www: base.clone(),
			api: base,
		};

		Client::new(endpoints).expect("Failed to build test client.")
	}
}

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	pub use reqwest::{
		Client as ReqwestClient, Error as ReqwestError, Method, Response, StatusCode,
	};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use serde_json::Value as Json;
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use {httpmock as _, rbxweb as _, tokio as _};
