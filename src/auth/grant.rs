//! Typed view over a verbatim token-exchange response.
//!
//! [`TokenExchanger`](crate::client::TokenExchanger) returns the provider's JSON body
//! untouched, including error payloads. Callers that just want the access token opt into
//! [`TokenGrant::from_response`], which is where provider errors become [`Error::Provider`].

// self
use crate::{_prelude::*, auth::BearerToken, error::DecodeError};

/// Access token issued by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGrant {
	/// Bearer token to present on API calls.
	pub access_token: BearerToken,
	/// Token type, normally `Bearer`.
	#[serde(default)]
	pub token_type: Option<String>,
	/// Lifetime hint in seconds.
	#[serde(default)]
	pub expires_in: Option<i64>,
	/// Granted scope, normally `searchadsorg`.
	#[serde(default)]
	pub scope: Option<String>,
}
impl TokenGrant {
	/// Extracts a grant from an exchange response body.
	///
	/// Bodies carrying an `error` field are surfaced as [`Error::Provider`] with the
	/// provider's code and description.
	pub fn from_response(body: &Value) -> Result<Self> {
		if let Some(error) = body.get("error") {
			let error = match error {
				Value::String(code) => code.clone(),
				other => other.to_string(),
			};
			let description =
				body.get("error_description").and_then(Value::as_str).map(ToOwned::to_owned);

			return Err(Error::Provider { error, description });
		}

		serde_path_to_error::deserialize(body)
			.map_err(|source| DecodeError::TokenGrant { source }.into())
	}

	/// Expiry instant relative to `issued_at`, when the provider sent a lifetime hint.
	pub fn expires_at(&self, issued_at: OffsetDateTime) -> Option<OffsetDateTime> {
		self.expires_in.map(|secs| issued_at + Duration::seconds(secs))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn extracts_access_token_and_lifetime() {
		let body = serde_json::json!({
			"access_token": "eyJ.access",
			"token_type": "Bearer",
			"expires_in": 3600,
			"scope": "searchadsorg"
		});
		let grant = TokenGrant::from_response(&body).expect("Grant body should parse.");

		assert_eq!(grant.access_token.expose(), "eyJ.access");
		assert_eq!(grant.expires_in, Some(3600));
		assert_eq!(
			grant.expires_at(OffsetDateTime::UNIX_EPOCH),
			Some(OffsetDateTime::UNIX_EPOCH + Duration::hours(1))
		);
	}

	#[test]
	fn provider_errors_are_surfaced() {
		let body = serde_json::json!({ "error": "invalid_client" });
		let err = TokenGrant::from_response(&body).expect_err("Error bodies should not parse.");

		assert!(matches!(
			err,
			Error::Provider { ref error, description: None } if error == "invalid_client"
		));
	}

	#[test]
	fn missing_access_token_reports_decode_error() {
		let body = serde_json::json!({ "expires_in": 3600 });
		let err = TokenGrant::from_response(&body).expect_err("Token is required.");

		assert!(matches!(err, Error::Decode(DecodeError::TokenGrant { .. })));
	}
}
