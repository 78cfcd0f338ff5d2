//! Authenticated request dispatch, the single path every API call goes through.
//!
//! [`RequestDispatcher::call`] resolves `/api/{version}/{resource}` against the API
//! origin, composes the default headers (`Authorization`, `X-AP-Context`, and
//! `Content-Type` for JSON bodies), lets caller headers override them, sends the request,
//! and returns the decoded JSON body verbatim. Non-2xx statuses are not errors here: the
//! API's error payloads are returned like any other body.

// crates.io
use oauth2::{
	HttpRequest,
	http::{
		HeaderMap, HeaderName, HeaderValue, Method, Request,
		header::{AUTHORIZATION, CONTENT_TYPE},
	},
};
// self
use crate::{
	_prelude::*,
	client::{
		API_BASE,
		common::{self, API_TARGET},
	},
	error::ConfigError,
	http::{self, ApiHttpClient},
	obs::{self, OpKind},
};

/// Organization scoping header.
pub const X_AP_CONTEXT: HeaderName = HeaderName::from_static("x-ap-context");

const JSON_CONTENT_TYPE: &str = "application/json";

/// Query parameters, JSON body, and extra headers of one call.
#[derive(Clone, Debug, Default)]
pub struct CallOptions {
	/// Query parameters, in order.
	pub query: Vec<(String, String)>,
	/// JSON body (object or array).
	pub json: Option<Value>,
	/// Extra headers; these override the dispatcher's defaults.
	pub headers: HeaderMap,
}
impl CallOptions {
	/// Creates empty options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a query parameter.
	pub fn query(mut self, key: impl Into<String>, value: impl Display) -> Self {
		self.query.push((key.into(), value.to_string()));

		self
	}

	/// Sets the JSON body.
	pub fn json(mut self, body: Value) -> Self {
		self.json = Some(body);

		self
	}

	/// Serializes `body` and sets it as the JSON body.
	pub fn json_from<T>(self, body: &T) -> Result<Self>
	where
		T: ?Sized + Serialize,
	{
		let body = serde_json::to_value(body).map_err(ConfigError::BodySerialize)?;

		Ok(self.json(body))
	}

	/// Adds an extra header, replacing any earlier value with the same name.
	pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);

		self
	}
}

/// Sends authenticated calls to the Search Ads API.
pub struct RequestDispatcher<C>
where
	C: ApiHttpClient,
{
	http_client: Arc<C>,
	api_base: String,
	version: String,
}
impl<C> RequestDispatcher<C>
where
	C: ApiHttpClient,
{
	/// Creates a dispatcher for the Apple API origin and `version`.
	pub fn new(http_client: impl Into<Arc<C>>, version: impl Into<String>) -> Self {
		Self { http_client: http_client.into(), api_base: API_BASE.into(), version: version.into() }
	}

	/// Overrides the API origin.
	pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
		self.api_base = api_base.into();

		self
	}

	/// Calls `resource` and returns the decoded JSON body, whatever the HTTP status.
	///
	/// `method` is case-insensitive. `X-AP-Context` is sent only when `org_id` is
	/// non-empty.
	pub async fn call(
		&self,
		method: &str,
		resource: &str,
		token: &str,
		org_id: &str,
		options: CallOptions,
	) -> Result<Value> {
		obs::observe(OpKind::Call, "call", async move {
			let request = self.build_request(method, resource, token, org_id, options)?;

			obs::trace_request(request.method().as_str(), &request.uri().to_string());

			let response = http::execute(self.http_client.as_ref(), API_TARGET, request).await?;

			obs::trace_response(response.status().as_u16(), response.body().len());

			Ok(common::decode_json_body(&response)?)
		})
		.await
	}

	/// Absolute URL of `resource` with `query` appended.
	pub fn resource_url(&self, resource: &str, query: &[(String, String)]) -> Result<Url> {
		let raw = format!(
			"{}/api/{}/{}",
			self.api_base.trim_end_matches('/'),
			self.version,
			resource.trim_start_matches('/')
		);
		let mut url = common::parse_url(&raw)?;

		if !query.is_empty() {
			url.query_pairs_mut().extend_pairs(query);
		}

		Ok(url)
	}

	/// Builds the outbound request without sending it.
	pub fn build_request(
		&self,
		method: &str,
		resource: &str,
		token: &str,
		org_id: &str,
		options: CallOptions,
	) -> Result<HttpRequest> {
		let method = normalize_method(method)?;
		let url = self.resource_url(resource, &options.query)?;
		let defaults = default_headers(token, org_id, options.json.is_some())?;
		let headers = merge_headers(defaults, options.headers);
		let body = match &options.json {
			Some(json) => serde_json::to_vec(json).map_err(ConfigError::BodySerialize)?,
			None => Vec::new(),
		};
		let mut builder = Request::builder().method(method).uri(url.as_str());

		if let Some(slot) = builder.headers_mut() {
			*slot = headers;
		}

		Ok(builder.body(body).map_err(ConfigError::from)?)
	}
}
impl<C> Clone for RequestDispatcher<C>
where
	C: ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: Arc::clone(&self.http_client),
			api_base: self.api_base.clone(),
			version: self.version.clone(),
		}
	}
}
impl<C> Debug for RequestDispatcher<C>
where
	C: ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestDispatcher")
			.field("api_base", &self.api_base)
			.field("version", &self.version)
			.finish()
	}
}

/// Upper-cases `method` and parses it as an HTTP method token.
pub fn normalize_method(method: &str) -> Result<Method, ConfigError> {
	let upper = method.trim().to_ascii_uppercase();

	Method::from_bytes(upper.as_bytes())
		.map_err(|_| ConfigError::InvalidMethod { method: method.to_owned() })
}

/// Default headers of an API call.
pub fn default_headers(token: &str, org_id: &str, json_body: bool) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();
	let mut authorization = HeaderValue::from_str(&format!("Bearer {token}"))
		.map_err(|_| ConfigError::InvalidHeaderValue { name: "Authorization" })?;

	authorization.set_sensitive(true);
	headers.insert(AUTHORIZATION, authorization);

	if !org_id.is_empty() {
		let context = HeaderValue::from_str(&format!("orgId={org_id}"))
			.map_err(|_| ConfigError::InvalidHeaderValue { name: "X-AP-Context" })?;

		headers.insert(X_AP_CONTEXT, context);
	}
	if json_body {
		headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
	}

	Ok(headers)
}

/// Merges `overrides` on top of `defaults`.
///
/// A name present in `overrides` replaces every default value for that name; names absent
/// from `overrides` keep their defaults.
pub fn merge_headers(mut defaults: HeaderMap, overrides: HeaderMap) -> HeaderMap {
	let mut current: Option<HeaderName> = None;

	for (name, value) in overrides {
		match name {
			Some(name) => {
				defaults.insert(name.clone(), value);
				current = Some(name);
			},
			None => {
				if let Some(name) = &current {
					defaults.append(name.clone(), value);
				}
			},
		}
	}

	defaults
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::http::recording::RecordingHttpClient;

	fn dispatcher(transport: &RecordingHttpClient) -> RequestDispatcher<RecordingHttpClient> {
		RequestDispatcher::new(transport.clone(), "v4")
	}

	fn map(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
		pairs
			.iter()
			.map(|&(name, value)| (HeaderName::from_static(name), HeaderValue::from_static(value)))
			.collect()
	}

	#[test]
	fn caller_headers_win_on_conflict() {
		let merged = merge_headers(map(&[("a", "1"), ("b", "2")]), map(&[("b", "3"), ("c", "4")]));

		assert_eq!(merged, map(&[("a", "1"), ("b", "3"), ("c", "4")]));
	}

	#[test]
	fn multi_valued_overrides_replace_defaults() {
		let mut overrides = HeaderMap::new();

		overrides.append("accept", HeaderValue::from_static("text/csv"));
		overrides.append("accept", HeaderValue::from_static("application/json"));

		let merged = merge_headers(map(&[("accept", "*/*")]), overrides);
		let values = merged.get_all("accept").iter().collect::<Vec<_>>();

		assert_eq!(values, ["text/csv", "application/json"]);
	}

	#[test]
	fn org_context_header_only_with_org() {
		let scoped = default_headers("T", "4242", false).expect("Headers should build.");
		let unscoped = default_headers("T", "", false).expect("Headers should build.");

		assert_eq!(scoped.get(X_AP_CONTEXT).map(|v| v.as_bytes()), Some(&b"orgId=4242"[..]));
		assert!(unscoped.get(X_AP_CONTEXT).is_none());
		assert_eq!(unscoped.get(AUTHORIZATION).map(|v| v.as_bytes()), Some(&b"Bearer T"[..]));
		assert!(unscoped.get(CONTENT_TYPE).is_none());
	}

	#[test]
	fn methods_are_upper_cased() {
		assert_eq!(normalize_method("get").expect("get is valid."), Method::GET);
		assert_eq!(normalize_method(" Delete ").expect("Delete is valid."), Method::DELETE);
		assert!(matches!(normalize_method(""), Err(ConfigError::InvalidMethod { .. })));
	}

	#[test]
	fn control_characters_in_token_are_rejected() {
		let err = default_headers("bad\ntoken", "", false).expect_err("Newlines are invalid.");

		assert!(matches!(
			err,
			Error::Config(ConfigError::InvalidHeaderValue { name: "Authorization" })
		));
	}

	#[test]
	fn resource_urls_join_base_version_and_query() {
		let transport = RecordingHttpClient::answering(200, "{}");
		let url = dispatcher(&transport)
			.with_api_base("http://localhost:9000/")
			.resource_url("/campaigns/42", &[("limit".into(), "5".into())])
			.expect("URL should build.");

		assert_eq!(url.as_str(), "http://localhost:9000/api/v4/campaigns/42?limit=5");
	}

	#[tokio::test]
	async fn acls_call_sends_bearer_without_org_context() {
		let transport = RecordingHttpClient::answering(200, r#"{"data":[]}"#);
		let body = dispatcher(&transport)
			.call("get", "acls", "T", "", CallOptions::new())
			.await
			.expect("Call should succeed.");

		assert_eq!(body, serde_json::json!({ "data": [] }));

		let requests = transport.requests();
		let request = &requests[0];

		assert_eq!(request.method, Method::GET);
		assert_eq!(request.uri, "https://api.searchads.apple.com/api/v4/acls");
		assert_eq!(request.header("authorization"), Some("Bearer T"));
		assert_eq!(request.header("x-ap-context"), None);
		assert!(request.body.is_empty());
	}

	#[tokio::test]
	async fn query_and_body_travel_together() {
		let transport = RecordingHttpClient::answering(200, r#"{"data":{"id":1}}"#);
		let options = CallOptions::new()
			.query("limit", 5)
			.json(serde_json::json!({ "name": "launch" }))
			.header(X_AP_CONTEXT, HeaderValue::from_static("orgId=override"));

		dispatcher(&transport)
			.call("POST", "campaigns", "T", "4242", options)
			.await
			.expect("Call should succeed.");

		let requests = transport.requests();
		let request = &requests[0];

		assert_eq!(request.uri, "https://api.searchads.apple.com/api/v4/campaigns?limit=5");
		assert_eq!(request.header("content-type"), Some(JSON_CONTENT_TYPE));
		assert_eq!(request.header("x-ap-context"), Some("orgId=override"));
		assert_eq!(request.json(), serde_json::json!({ "name": "launch" }));
	}

	#[tokio::test]
	async fn html_answers_fail_to_decode() {
		let transport = RecordingHttpClient::answering(502, "<html>Bad Gateway</html>");
		let err = dispatcher(&transport)
			.call("GET", "acls", "T", "", CallOptions::new())
			.await
			.expect_err("HTML is not JSON.");

		assert!(matches!(err, Error::Decode(ref decode) if decode.status() == Some(502)));
	}
}
