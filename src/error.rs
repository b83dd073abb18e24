//! Client-wide error types shared across dispatch, token brokering, and decoding.

// self
use crate::{_prelude::*, api::ApiError};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// Every kind is terminal at this layer: nothing is retried internally except the single
/// mandatory token refresh inherent to token-requiring dispatches.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Malformed caller input, detected before any network call is made.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// An operation requiring a session was attempted with no cookie present.
	#[error("Endpoint requires a user; session not started.")]
	AuthRequired,
	/// The anti-forgery token could not be extracted from the refresh response.
	#[error("No x-csrf-token header was returned by the token refresh call.")]
	TokenAcquisition,
	/// The upstream API responded with an error envelope or a gated non-success status.
	#[error(transparent)]
	Upstream(#[from] UpstreamError),
	/// Transport failure (DNS, TCP, TLS, body streaming); propagated unchanged, never retried.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Upstream payload did not match the expected shape.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
}

/// Caller-input validation failures raised before any network call.
#[derive(Debug, ThisError)]
pub enum ValidationError {
	/// Cookie does not carry the upstream's mandatory warning prefix.
	#[error(
		"An invalid Roblox cookie was provided; the _|WARNING:-DO-NOT-SHARE-THIS prefix is missing."
	)]
	MalformedCookie,
	/// Credential or token contains bytes that cannot form an HTTP header value.
	#[error("Credential value cannot be encoded as an HTTP header.")]
	UnencodableCredential,
	/// Requested thumbnail size is not in the upstream's allowed table for that kind.
	#[error("Thumbnail size {width}x{height} is not supported for {kind} thumbnails.")]
	UnsupportedThumbnailSize {
		/// Thumbnail kind label (`avatar`, `head-shot`, `group-icon`).
		kind: &'static str,
		/// Requested width in pixels.
		width: u32,
		/// Requested height in pixels.
		height: u32,
	},
	/// An empty value was provided where the upstream requires content.
	#[error("{field} must not be empty.")]
	EmptyField {
		/// Name of the offending caller-supplied field.
		field: &'static str,
	},
}

/// Upstream error envelope or gated non-success status.
///
/// Messages are preserved verbatim and joined with `", "` when the envelope carries more
/// than one entry; this layer never rewords upstream text.
#[derive(Clone, Debug, ThisError)]
#[error("{}", self.joined_messages())]
pub struct UpstreamError {
	/// Envelope entries exactly as the upstream returned them.
	pub errors: Vec<ApiError>,
	/// HTTP status code, recorded when the calling flow gates on it.
	pub status: Option<u16>,
}
impl UpstreamError {
	/// Wraps an upstream error envelope.
	pub fn new(errors: Vec<ApiError>) -> Self {
		Self { errors, status: None }
	}

	/// Wraps an upstream error envelope together with the response status.
	pub fn with_status(errors: Vec<ApiError>, status: StatusCode) -> Self {
		Self { errors, status: Some(status.as_u16()) }
	}

	/// Synthesizes an error for a status-gated flow whose body carried no envelope.
	pub fn from_status(status: StatusCode) -> Self {
		Self { errors: Vec::new(), status: Some(status.as_u16()) }
	}

	fn joined_messages(&self) -> String {
		if self.errors.is_empty() {
			return match self.status {
				Some(status) => format!("Request failed with status code {status}."),
				None => "Request failed without an upstream error message.".into(),
			};
		}

		self.errors.iter().map(|error| error.message.as_str()).collect::<Vec<_>>().join(", ")
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the upstream API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The response body could not be read off the wire.
	#[error("Failed to read the upstream response body.")]
	Body {
		/// Transport-specific streaming error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a body-streaming error.
	pub fn body(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Body { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Upstream payload shape mismatches surfaced during decoding or normalization.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Response body is not the expected JSON shape.
	#[error("Response body did not match the expected shape.")]
	Json {
		/// Path-annotated parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// A field marked for timestamp coercion does not hold a well-formed timestamp.
	#[error("Field `{path}` does not hold a well-formed ISO-8601 timestamp.")]
	Timestamp {
		/// Dot-separated path of the offending field.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: time::error::Parse,
	},
	/// A field marked for timestamp coercion holds a non-string, non-null value.
	#[error("Field `{path}` holds a non-string value where a timestamp was expected.")]
	TimestampShape {
		/// Dot-separated path of the offending field.
		path: String,
	},
	/// A parsed timestamp cannot be rendered in canonical RFC 3339 form.
	#[error("Field `{path}` holds a timestamp outside the RFC 3339 representable range.")]
	TimestampRange {
		/// Dot-separated path of the offending field.
		path: String,
		/// Underlying formatting failure.
		#[source]
		source: time::error::Format,
	},
	/// A batch response omitted the entry for a requested target.
	#[error("Batch response did not include an entry for target {target_id}.")]
	MissingBatchEntry {
		/// Identifier the batch request asked for.
		target_id: u64,
	},
}

/// Configuration and construction failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Endpoint URL could not be constructed from its host base.
	#[error("Endpoint URL could not be constructed.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl ConfigError {
	/// Wraps a transport builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}
