//! ES256 client assertions presented to the identity provider.
//!
//! Apple's OAuth endpoint authenticates Search Ads API clients with a JWT "client
//! secret" signed by the account's P-256 key. [`ClaimSigner`] mints a fresh assertion
//! for every exchange; assertions are never cached or reused because their lifetime
//! is unrelated to the bearer token they are traded for.

// crates.io
use jsonwebtoken::{Algorithm, EncodingKey, Header};
// self
use crate::{
	_prelude::*,
	error::SigningError,
	identity::Identity,
	obs::{self, OpKind},
};

/// Audience claim expected by the identity provider.
pub const ASSERTION_AUDIENCE: &str = "https://appleid.apple.com";
/// Validity window of a client assertion (180 days, the provider's maximum).
pub const ASSERTION_LIFETIME: Duration = Duration::days(180);

/// Claims carried by a client assertion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionClaims {
	/// Subject: the API client identifier.
	pub sub: String,
	/// Audience: always [`ASSERTION_AUDIENCE`].
	pub aud: String,
	/// Issued-at, seconds since the Unix epoch.
	pub iat: i64,
	/// Expiry, seconds since the Unix epoch.
	pub exp: i64,
	/// Issuer: the team identifier.
	pub iss: String,
}
impl AssertionClaims {
	/// Builds the claim set for `identity` issued at `now`.
	pub fn new(identity: &Identity, now: OffsetDateTime) -> Self {
		let iat = now.unix_timestamp();

		Self {
			sub: identity.client_id.clone(),
			aud: ASSERTION_AUDIENCE.into(),
			iat,
			exp: iat + ASSERTION_LIFETIME.whole_seconds(),
			iss: identity.team_id.clone(),
		}
	}
}

/// Signed compact JWS used as the `client_secret` of a token exchange.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientAssertion {
	token: String,
	claims: AssertionClaims,
}
impl ClientAssertion {
	/// Returns the compact token. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.token
	}

	/// Claims the assertion was signed with.
	pub fn claims(&self) -> &AssertionClaims {
		&self.claims
	}

	/// Issued-at instant.
	pub fn issued_at(&self) -> OffsetDateTime {
		OffsetDateTime::from_unix_timestamp(self.claims.iat).unwrap_or(OffsetDateTime::UNIX_EPOCH)
	}

	/// Expiry instant.
	pub fn expires_at(&self) -> OffsetDateTime {
		OffsetDateTime::from_unix_timestamp(self.claims.exp).unwrap_or(OffsetDateTime::UNIX_EPOCH)
	}

	/// Whether the assertion is expired at `now`.
	pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
		now.unix_timestamp() >= self.claims.exp
	}
}
impl AsRef<str> for ClientAssertion {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for ClientAssertion {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientAssertion")
			.field("token", &"<redacted>")
			.field("claims", &self.claims)
			.finish()
	}
}

/// Mints ES256 client assertions from an [`Identity`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ClaimSigner;
impl ClaimSigner {
	/// Signs a new assertion issued now.
	pub fn sign(&self, identity: &Identity) -> Result<ClientAssertion> {
		self.sign_at(identity, OffsetDateTime::now_utc())
	}

	/// Signs a new assertion issued at `now`.
	///
	/// Identity fields are validated before the key is parsed, so an incomplete identity
	/// never reaches the crypto provider.
	pub fn sign_at(&self, identity: &Identity, now: OffsetDateTime) -> Result<ClientAssertion> {
		obs::observe_sync(OpKind::Sign, "sign", || sign_claims(identity, now))
	}
}

fn sign_claims(identity: &Identity, now: OffsetDateTime) -> Result<ClientAssertion> {
	identity.validate_for_signing()?;

	let key = EncodingKey::from_ec_pem(identity.signing_key.expose().trim().as_bytes())
		.map_err(|source| SigningError::InvalidKey { source })?;
	let mut header = Header::new(Algorithm::ES256);

	header.typ = None;
	header.kid = Some(identity.key_id.clone());

	let claims = AssertionClaims::new(identity, now);
	let token = jsonwebtoken::encode(&header, &claims, &key)
		.map_err(|source| SigningError::Encode { source })?;

	Ok(ClientAssertion { token, claims })
}
