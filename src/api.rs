//! Response-body boundary: every payload is decided into a tagged success or failure once.
//!
//! The upstream signals errors through a JSON envelope carrying an `errors` array of
//! `{code, message}` objects; absence of that key indicates success regardless of HTTP
//! status on most paths. [`ApiBody::decode`] makes that decision exactly once per
//! response so call sites never shape-sniff bodies themselves.

// self
use crate::{
	_prelude::*,
	error::{DecodeError, TransportError, UpstreamError},
};

/// One entry of the upstream error envelope.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ApiError {
	/// Upstream-assigned numeric error code.
	#[serde(default)]
	pub code: i64,
	/// Human-readable upstream message, preserved verbatim.
	#[serde(default)]
	pub message: String,
}

/// Tagged outcome of decoding one response body.
#[derive(Clone, Debug)]
pub enum ApiBody<T> {
	/// Envelope-free payload.
	Success(T),
	/// Upstream `errors` envelope.
	Failure(Vec<ApiError>),
}
impl<T> ApiBody<T>
where
	T: DeserializeOwned,
{
	/// Decodes raw body bytes, deciding success versus error envelope exactly once.
	pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
		let value = decode_slice::<Json>(bytes)?;

		if let Some(errors) = value.get("errors") {
			return Ok(Self::Failure(decode_value(errors.clone())?));
		}

		Ok(Self::Success(decode_value(value)?))
	}
}
impl<T> ApiBody<T> {
	/// Converts the failure arm into [`UpstreamError`], preserving messages verbatim.
	pub fn into_result(self) -> Result<T> {
		match self {
			Self::Success(payload) => Ok(payload),
			Self::Failure(errors) => Err(UpstreamError::new(errors).into()),
		}
	}
}

/// Reads and decodes a response body, ignoring the HTTP status entirely.
pub(crate) async fn read_body<T>(response: Response) -> Result<T>
where
	T: DeserializeOwned,
{
	let bytes = response.bytes().await.map_err(TransportError::body)?;

	ApiBody::decode(&bytes)?.into_result()
}

/// Reads and decodes a response body, additionally gating on a success status.
///
/// Used by the handful of flows (login, the authenticated-user probe, legacy place
/// details) that treat a non-2xx status as fatal even without an error envelope.
pub(crate) async fn read_body_gated<T>(response: Response) -> Result<T>
where
	T: DeserializeOwned,
{
	let status = response.status();
	let bytes = response.bytes().await.map_err(TransportError::body)?;

	match ApiBody::decode(&bytes)? {
		ApiBody::Failure(errors) => Err(UpstreamError::with_status(errors, status).into()),
		ApiBody::Success(payload) if status.is_success() => Ok(payload),
		ApiBody::Success(_) => Err(UpstreamError::from_status(status).into()),
	}
}

fn decode_slice<T>(bytes: &[u8]) -> Result<T, DecodeError>
where
	T: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(bytes);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| DecodeError::Json { source })
}

pub(crate) fn decode_value<T>(value: Json) -> Result<T, DecodeError>
where
	T: DeserializeOwned,
{
	serde_path_to_error::deserialize(value).map_err(|source| DecodeError::Json { source })
}
