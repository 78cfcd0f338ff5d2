//! Assertion-for-token exchange against the identity provider.
//!
//! The exchange is a `client_credentials` grant where the signed assertion plays the role
//! of the client secret. The provider's JSON answer is returned verbatim whatever the HTTP
//! status, so error payloads such as `{"error":"invalid_client"}` reach the caller intact.

// crates.io
use oauth2::{
	HttpRequest,
	http::{
		Method, Request,
		header::{CONTENT_TYPE, HOST, HeaderValue},
	},
};
use url::form_urlencoded::Serializer as FormSerializer;
// self
use crate::{
	_prelude::*,
	auth::ClientAssertion,
	client::{
		TOKEN_ENDPOINT,
		common::{self, TOKEN_TARGET},
	},
	error::ConfigError,
	http::{self, ApiHttpClient},
	obs::{self, OpKind},
};

/// Grant type sent with every exchange.
pub const GRANT_TYPE: &str = "client_credentials";
/// Scope sent with every exchange.
pub const SCOPE: &str = "searchadsorg";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Exchanges client assertions for bearer tokens.
pub struct TokenExchanger<C>
where
	C: ApiHttpClient,
{
	http_client: Arc<C>,
	endpoint: String,
}
impl<C> TokenExchanger<C>
where
	C: ApiHttpClient,
{
	/// Creates an exchanger for the fixed Apple token endpoint.
	pub fn new(http_client: impl Into<Arc<C>>) -> Self {
		Self { http_client: http_client.into(), endpoint: TOKEN_ENDPOINT.into() }
	}

	/// Overrides the token endpoint.
	pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
		self.endpoint = endpoint.into();

		self
	}

	/// Exchanges `assertion`, using its subject as the client identifier.
	pub async fn exchange(&self, assertion: &ClientAssertion) -> Result<Value> {
		self.exchange_raw(&assertion.claims().sub, assertion.expose()).await
	}

	/// Exchanges an already serialized assertion for `client_id`.
	pub async fn exchange_raw(&self, client_id: &str, client_secret: &str) -> Result<Value> {
		obs::observe(OpKind::Exchange, "exchange", async move {
			let request = self.build_request(client_id, client_secret)?;

			obs::trace_request(Method::POST.as_str(), &self.endpoint);

			let response = http::execute(self.http_client.as_ref(), TOKEN_TARGET, request).await?;

			obs::trace_response(response.status().as_u16(), response.body().len());

			Ok(common::decode_json_body(&response)?)
		})
		.await
	}

	/// Builds the form-encoded token request.
	pub fn build_request(&self, client_id: &str, client_secret: &str) -> Result<HttpRequest> {
		let url = common::parse_url(&self.endpoint)?;
		let host = match (url.host_str(), url.port()) {
			(Some(host), Some(port)) => format!("{host}:{port}"),
			(Some(host), None) => host.to_owned(),
			(None, _) => return Err(ConfigError::InvalidHeaderValue { name: "Host" }.into()),
		};
		let host =
			HeaderValue::from_str(&host).map_err(|_| ConfigError::InvalidHeaderValue { name: "Host" })?;
		let form = FormSerializer::new(String::new())
			.append_pair("client_id", client_id)
			.append_pair("client_secret", client_secret)
			.append_pair("grant_type", GRANT_TYPE)
			.append_pair("scope", SCOPE)
			.finish();
		let request = Request::builder()
			.method(Method::POST)
			.uri(url.as_str())
			.header(HOST, host)
			.header(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE))
			.body(form.into_bytes())
			.map_err(ConfigError::from)?;

		Ok(request)
	}
}
impl<C> Clone for TokenExchanger<C>
where
	C: ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self { http_client: Arc::clone(&self.http_client), endpoint: self.endpoint.clone() }
	}
}
impl<C> Debug for TokenExchanger<C>
where
	C: ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenExchanger").field("endpoint", &self.endpoint).finish()
	}
}
