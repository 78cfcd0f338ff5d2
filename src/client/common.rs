//! Shared helpers for the exchanger and dispatcher (URL parsing, body decoding).

// crates.io
use oauth2::HttpResponse;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, DecodeError},
};

/// Transport target label for the identity provider.
pub(crate) const TOKEN_TARGET: &str = "token endpoint";
/// Transport target label for the Search Ads API.
pub(crate) const API_TARGET: &str = "API";

/// Parses `raw`, reporting the offending string on failure.
pub(crate) fn parse_url(raw: &str) -> Result<Url, ConfigError> {
	Url::parse(raw).map_err(|source| ConfigError::InvalidUrl { url: raw.to_owned(), source })
}

/// Decodes a response body as UTF-8 JSON regardless of status.
///
/// An empty (or whitespace-only) body decodes to [`Value::Null`]; some delete endpoints
/// answer without content.
pub fn decode_json_body(response: &HttpResponse) -> Result<Value, DecodeError> {
	let status = Some(response.status().as_u16());
	let text = std::str::from_utf8(response.body())
		.map_err(|source| DecodeError::Utf8 { source, status })?;

	if text.trim().is_empty() {
		return Ok(Value::Null);
	}

	let mut de = serde_json::Deserializer::from_str(text);
	let value = serde_path_to_error::deserialize(&mut de)
		.map_err(|source| DecodeError::Json { source, status })?;

	de.end().map_err(|source| DecodeError::TrailingCharacters { source, status })?;

	Ok(value)
}
