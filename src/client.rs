//! Client context plus the two network components: token exchange and request dispatch.
//!
//! [`SearchAdsClient`] owns the immutable [`Identity`], the transport, the endpoint pair,
//! and optionally a bearer token obtained earlier. Every operation borrows that state
//! read-only, so one client can serve any number of concurrent calls without locks.

pub mod common;
pub mod dispatch;
pub mod exchange;

pub use common::*;
pub use dispatch::*;
pub use exchange::*;

// self
use crate::{
	_prelude::*,
	auth::{BearerToken, ClaimSigner, ClientAssertion, TokenGrant},
	error::ConfigError,
	http::ApiHttpClient,
	identity::Identity,
	resource::{ResourceArgs, ResourceDescriptor},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Identity-provider token endpoint.
pub const TOKEN_ENDPOINT: &str = "https://appleid.apple.com/auth/oauth2/token";
/// Search Ads API origin; resources live under `/api/{version}/`.
pub const API_BASE: &str = "https://api.searchads.apple.com";

/// Base URLs the client talks to.
///
/// [`Endpoints::default`] is the fixed Apple pair and is what production code uses;
/// overriding it exists for pointing tests at a local mock server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
	/// Token endpoint URL.
	pub token: String,
	/// API origin.
	pub api_base: String,
}
impl Endpoints {
	/// Creates an endpoint pair after checking both URLs parse.
	pub fn new(token: impl Into<String>, api_base: impl Into<String>) -> Result<Self, ConfigError> {
		let endpoints = Self { token: token.into(), api_base: api_base.into() };

		parse_url(&endpoints.token)?;
		parse_url(&endpoints.api_base)?;

		Ok(endpoints)
	}
}
impl Default for Endpoints {
	fn default() -> Self {
		Self { token: TOKEN_ENDPOINT.into(), api_base: API_BASE.into() }
	}
}

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestSearchAdsClient = SearchAdsClient<ReqwestHttpClient>;

/// Search Ads client context.
pub struct SearchAdsClient<C>
where
	C: ApiHttpClient,
{
	identity: Arc<Identity>,
	http_client: Arc<C>,
	endpoints: Endpoints,
	token: Option<BearerToken>,
}
impl<C> SearchAdsClient<C>
where
	C: ApiHttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(identity: Identity, http_client: impl Into<Arc<C>>) -> Self {
		Self {
			identity: Arc::new(identity),
			http_client: http_client.into(),
			endpoints: Endpoints::default(),
			token: None,
		}
	}

	/// Attaches a bearer token used by [`SearchAdsClient::call`] and
	/// [`SearchAdsClient::invoke`].
	pub fn with_token(mut self, token: impl Into<BearerToken>) -> Self {
		self.token = Some(token.into());

		self
	}

	/// Replaces the endpoint pair.
	pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
		self.endpoints = endpoints;

		self
	}

	/// Identity shared by every operation of this client.
	pub fn identity(&self) -> &Identity {
		&self.identity
	}

	/// Bearer token attached with [`SearchAdsClient::with_token`].
	pub fn token(&self) -> Option<&BearerToken> {
		self.token.as_ref()
	}

	/// Endpoint pair in use.
	pub fn endpoints(&self) -> &Endpoints {
		&self.endpoints
	}

	/// Mints a fresh client assertion.
	pub fn sign_assertion(&self) -> Result<ClientAssertion> {
		ClaimSigner.sign(&self.identity)
	}

	/// Token exchanger bound to this client's transport and token endpoint.
	pub fn exchanger(&self) -> TokenExchanger<C> {
		TokenExchanger::new(Arc::clone(&self.http_client)).with_endpoint(self.endpoints.token.clone())
	}

	/// Request dispatcher bound to this client's transport, API origin, and version.
	pub fn dispatcher(&self) -> RequestDispatcher<C> {
		RequestDispatcher::new(Arc::clone(&self.http_client), self.identity.api_version.clone())
			.with_api_base(self.endpoints.api_base.clone())
	}

	/// Mints a fresh assertion and exchanges it, returning the provider's JSON verbatim.
	///
	/// Error payloads (HTTP 4xx/5xx) are returned as values, not errors.
	pub async fn exchange_token(&self) -> Result<Value> {
		let assertion = self.sign_assertion()?;

		self.exchanger().exchange(&assertion).await
	}

	/// Exchanges a fresh assertion and extracts the access token.
	///
	/// Unlike [`SearchAdsClient::exchange_token`] this classifies provider error payloads
	/// as [`Error::Provider`].
	pub async fn fetch_token_grant(&self) -> Result<TokenGrant> {
		let body = self.exchange_token().await?;

		TokenGrant::from_response(&body)
	}

	/// Calls `resource` with the attached token and the identity's organization scope.
	pub async fn call(&self, method: &str, resource: &str, options: CallOptions) -> Result<Value> {
		let token = self.token.as_ref().ok_or(ConfigError::MissingBearerToken)?;

		self.dispatcher()
			.call(method, resource, token.expose(), self.org_id(), options)
			.await
	}

	/// Calls the endpoint described by `descriptor` with `args`.
	pub async fn invoke(&self, descriptor: &ResourceDescriptor, args: ResourceArgs) -> Result<Value> {
		let prepared = descriptor.prepare(args, self.org_id())?;

		self.call(prepared.method.as_str(), &prepared.resource, prepared.options).await
	}

	fn org_id(&self) -> &str {
		self.identity.org_scope().unwrap_or_default()
	}
}
#[cfg(feature = "reqwest")]
impl SearchAdsClient<ReqwestHttpClient> {
	/// Creates a client backed by a default reqwest transport.
	pub fn new(identity: Identity) -> Self {
		Self::with_http_client(identity, ReqwestHttpClient::default())
	}
}
impl<C> Clone for SearchAdsClient<C>
where
	C: ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			identity: Arc::clone(&self.identity),
			http_client: Arc::clone(&self.http_client),
			endpoints: self.endpoints.clone(),
			token: self.token.clone(),
		}
	}
}
impl<C> Debug for SearchAdsClient<C>
where
	C: ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SearchAdsClient")
			.field("identity", &self.identity)
			.field("endpoints", &self.endpoints)
			.field("token_set", &self.token.is_some())
			.finish()
	}
}
