//! Client-level error types shared by signing, token exchange, and dispatch.
//!
//! HTTP error statuses are deliberately absent from this taxonomy. Both the identity
//! provider and the Search Ads API answer failures with structured JSON bodies, and the
//! client hands those bodies back verbatim so callers can read the provider's own error
//! codes. Only local configuration, cryptography, transport, and decoding failures surface
//! as [`Error`] values.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem detected before any I/O.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Client assertion could not be signed.
	#[error(transparent)]
	Signing(#[from] SigningError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Response body was not UTF-8 JSON.
	#[error(transparent)]
	Decode(#[from] DecodeError),

	/// Identity provider answered the token exchange with an error payload.
	///
	/// Only raised by the opt-in [`TokenGrant`](crate::auth::TokenGrant) extraction; the
	/// exchange itself returns such payloads untouched.
	#[error("Identity provider rejected the token exchange: {error}.")]
	Provider {
		/// Provider error code, e.g. `invalid_client`.
		error: String,
		/// Optional human readable description.
		description: Option<String>,
	},
}

impl From<crate::selector::SelectorError> for Error {
	fn from(e: crate::selector::SelectorError) -> Self {
		ConfigError::from(e).into()
	}
}

/// Configuration and validation failures raised before a request leaves the process.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Identity is missing a field required for signing.
	#[error("Identity field `{field}` must not be empty.")]
	MissingIdentityField {
		/// Name of the empty field.
		field: &'static str,
	},
	/// API call attempted without a bearer token.
	#[error("No bearer token is attached to the client.")]
	MissingBearerToken,
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Endpoint or resource URL cannot be parsed.
	#[error("URL `{url}` is invalid.")]
	InvalidUrl {
		/// Offending URL string.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP method is not a valid token.
	#[error("HTTP method `{method}` is invalid.")]
	InvalidMethod {
		/// Method as supplied by the caller.
		method: String,
	},
	/// Header value derived from the identity or token is not a valid header value.
	#[error("Header `{name}` has an invalid value.")]
	InvalidHeaderValue {
		/// Header name.
		name: &'static str,
	},
	/// Request body could not be serialized as JSON.
	#[error("Request body could not be serialized as JSON.")]
	BodySerialize(#[source] serde_json::Error),
	/// Selector arguments are invalid.
	#[error(transparent)]
	Selector(#[from] crate::selector::SelectorError),

	/// Resource path template references a parameter that was not supplied.
	#[error("Resource `{resource}` requires path parameter `{parameter}`.")]
	MissingPathParameter {
		/// Descriptor name.
		resource: &'static str,
		/// Missing parameter name.
		parameter: String,
	},
	/// Path parameter value would not stay within its own path segment.
	#[error("Resource `{resource}` path parameter `{parameter}` must not be a dot segment.")]
	InvalidPathParameter {
		/// Descriptor name.
		resource: &'static str,
		/// Offending parameter name.
		parameter: String,
	},
	/// Resource requires a query parameter that was not supplied.
	#[error("Resource `{resource}` requires query parameter `{parameter}`.")]
	MissingQueryParameter {
		/// Descriptor name.
		resource: &'static str,
		/// Missing parameter name.
		parameter: &'static str,
	},
	/// Resource requires a JSON body that was not supplied.
	#[error("Resource `{resource}` requires a JSON body.")]
	MissingBody {
		/// Descriptor name.
		resource: &'static str,
	},
	/// Resource does not accept a JSON body.
	#[error("Resource `{resource}` does not accept a JSON body.")]
	UnexpectedBody {
		/// Descriptor name.
		resource: &'static str,
	},
	/// Supplied JSON body does not match the resource's body kind.
	#[error("Resource `{resource}` expects a JSON {expected} body.")]
	InvalidBody {
		/// Descriptor name.
		resource: &'static str,
		/// Expected JSON shape.
		expected: &'static str,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Cryptographic failures raised while minting a client assertion.
#[derive(Debug, ThisError)]
pub enum SigningError {
	/// Signing key is not a PEM encoded PKCS#8 P-256 private key.
	#[error("Signing key is not a valid PEM encoded P-256 private key.")]
	InvalidKey {
		/// Underlying key parsing failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
	/// Header or claims could not be signed.
	#[error("Client assertion could not be signed.")]
	Encode {
		/// Underlying signing failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {target}.")]
	Network {
		/// Endpoint label (`token endpoint` or `API`).
		target: &'static str,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request did not complete before the transport's deadline.
	#[error("Request to {target} timed out.")]
	Timeout {
		/// Endpoint label (`token endpoint` or `API`).
		target: &'static str,
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred during transport.")]
	Io(#[from] std::io::Error),
	/// Transport reported a failure without a typed cause.
	#[error("HTTP client error occurred while calling {target}: {message}.")]
	Other {
		/// Endpoint label (`token endpoint` or `API`).
		target: &'static str,
		/// Transport supplied description.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(target: &'static str, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { target, source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(target: &'static str, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { target, source: Box::new(src) }
	}
}

/// Response decoding failures.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Response body is not valid UTF-8.
	#[error("Response body is not valid UTF-8.")]
	Utf8 {
		/// Underlying UTF-8 failure.
		#[source]
		source: std::str::Utf8Error,
		/// HTTP status code of the response.
		status: Option<u16>,
	},
	/// Response body is not valid JSON.
	#[error("Response body is not valid JSON.")]
	Json {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: Option<u16>,
	},
	/// Response body has trailing characters after the JSON value.
	#[error("Response body has trailing characters after the JSON value.")]
	TrailingCharacters {
		/// Underlying parsing failure.
		#[source]
		source: serde_json::Error,
		/// HTTP status code of the response.
		status: Option<u16>,
	},
	/// JSON value does not have the shape of a token grant.
	#[error("Token response does not match the expected shape.")]
	TokenGrant {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl DecodeError {
	/// HTTP status attached to the failure, when known.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Utf8 { status, .. }
			| Self::Json { status, .. }
			| Self::TrailingCharacters { status, .. } => *status,
			Self::TokenGrant { .. } => None,
		}
	}
}
