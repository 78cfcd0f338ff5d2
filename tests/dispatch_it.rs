mod common;

// std
use std::time::Duration;
// crates.io
use httpmock::prelude::*;
// self
use common::*;
use searchads_client::{
	client::{CallOptions, Endpoints, SearchAdsClient},
	error::{ConfigError, DecodeError, Error, TransportError},
	http::ReqwestHttpClient,
	oauth2::http::{HeaderName, HeaderValue},
};

#[tokio::test]
async fn acls_call_carries_the_bearer_token() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/v4/acls")
				.header("authorization", "Bearer T")
				.header("x-ap-context", "orgId=4242");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"data\":[{\"orgId\":4242,\"orgName\":\"Acme\"}]}");
		})
		.await;
	let client = mock_client(&server, identity()).with_token("T");
	let body = client.call("get", "acls", CallOptions::new()).await.expect("Call should succeed.");

	assert_eq!(body["data"][0]["orgName"], "Acme");

	mock.assert_async().await;
}

#[tokio::test]
async fn query_and_body_are_sent_together() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/v4/campaigns/find")
				.query_param("limit", "5")
				.header("content-type", "application/json");
			then.status(200).body("{\"data\":[],\"pagination\":{\"totalResults\":0}}");
		})
		.await;
	let client = mock_client(&server, identity()).with_token("T");
	let options = CallOptions::new()
		.query("limit", 5)
		.json(serde_json::json!({ "pagination": { "offset": 0, "limit": 5 } }));
	let body = client.call("POST", "campaigns/find", options).await.expect("Call should succeed.");

	assert_eq!(body["pagination"]["totalResults"], 0);

	mock.assert_async().await;
}

#[tokio::test]
async fn api_errors_are_returned_as_values() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v4/campaigns/1");
			then.status(404).body(
				"{\"data\":null,\"error\":{\"errors\":[{\"messageCode\":\"NOT_FOUND\"}]}}",
			);
		})
		.await;

	let client = mock_client(&server, identity()).with_token("T");
	let body = client
		.call("GET", "campaigns/1", CallOptions::new())
		.await
		.expect("A 404 payload is not a client failure.");

	assert_eq!(body["error"]["errors"][0]["messageCode"], "NOT_FOUND");
}

#[tokio::test]
async fn caller_headers_override_defaults() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v4/acls").header("authorization", "Bearer other");
			then.status(200).body("{}");
		})
		.await;
	let client = mock_client(&server, identity()).with_token("T");
	let options = CallOptions::new()
		.header(HeaderName::from_static("authorization"), HeaderValue::from_static("Bearer other"));

	client.call("GET", "acls", options).await.expect("Call should succeed.");

	mock.assert_async().await;
}

#[tokio::test]
async fn html_bodies_are_decode_errors() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v4/acls");
			then.status(502).body("<html>Bad Gateway</html>");
		})
		.await;

	let client = mock_client(&server, identity()).with_token("T");
	let err = client.call("GET", "acls", CallOptions::new()).await.expect_err("HTML is not JSON.");

	assert!(matches!(err, Error::Decode(DecodeError::Json { status: Some(502), .. })));
}

#[tokio::test]
async fn calls_require_a_token() {
	let server = MockServer::start_async().await;
	let client = mock_client(&server, identity());
	let err = client.call("GET", "acls", CallOptions::new()).await.expect_err("No token attached.");

	assert!(matches!(err, Error::Config(ConfigError::MissingBearerToken)));
}

#[tokio::test]
async fn unreachable_api_is_a_transport_error() {
	let endpoints = Endpoints::new("http://127.0.0.1:1/auth/oauth2/token", "http://127.0.0.1:1")
		.expect("Endpoints should parse.");
	let client = SearchAdsClient::with_http_client(identity(), test_http_client())
		.with_endpoints(endpoints)
		.with_token("T");
	let err = client
		.call("GET", "acls", CallOptions::new())
		.await
		.expect_err("Nothing listens on port 1.");

	assert!(matches!(err, Error::Transport(TransportError::Network { target: "API", .. })));
}

#[tokio::test]
async fn slow_api_is_a_transport_timeout() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v4/acls");
			then.status(200).delay(Duration::from_millis(800)).body("{}");
		})
		.await;

	let endpoints = Endpoints::new(server.url("/auth/oauth2/token"), server.base_url())
		.expect("Mock endpoints should parse.");
	let transport = ReqwestHttpClient::with_timeout(Duration::from_millis(100))
		.expect("Timeout client should build.");
	let client = SearchAdsClient::with_http_client(identity(), transport)
		.with_endpoints(endpoints)
		.with_token("T");
	let err = client
		.call("GET", "acls", CallOptions::new())
		.await
		.expect_err("The response arrives after the client deadline.");

	assert!(matches!(err, Error::Transport(TransportError::Timeout { target: "API", .. })));
}
