//! Transport primitives shared by the token exchanger and the request dispatcher.
//!
//! The client depends on a single capability: send an [`HttpRequest`] and await an
//! [`HttpResponse`] carrying the status and raw body. [`ApiHttpClient`] expresses that
//! capability through `oauth2`'s [`AsyncHttpClient`] handle so any HTTP stack can be
//! plugged in; [`ReqwestHttpClient`] is the default implementation. Timeouts, proxies,
//! and TLS are configured on the underlying transport, never by this crate.

// crates.io
use oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
};

/// Abstraction over HTTP transports used for every outbound request.
///
/// Implementations must be `Send + Sync + 'static` so one transport can be shared by
/// concurrent calls behind an `Arc`. The handles they return must own whatever state the
/// request needs so their futures stay `Send` for the lifetime of the in-flight call.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle used for a single request.
	///
	/// The request future returned by [`AsyncHttpClient::call`] must be `Send` so client
	/// futures inherit the same guarantee.
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Builds a handle for one outbound request.
	fn handle(&self) -> Self::Handle;

	/// Classifies a transport failure into the client's error taxonomy.
	///
	/// The default keeps the typed cause as a network failure; transports that can detect
	/// timeouts should override this to report [`TransportError::Timeout`].
	fn map_transport_error(
		&self,
		target: &'static str,
		err: HttpClientError<Self::TransportError>,
	) -> Error {
		map_http_client_error(target, err, |target, inner| TransportError::network(target, inner))
	}
}

/// Sends `request` through a fresh handle of `client`, mapping transport failures.
pub(crate) async fn execute<C>(
	client: &C,
	target: &'static str,
	request: HttpRequest,
) -> Result<HttpResponse>
where
	C: ?Sized + ApiHttpClient,
{
	let handle = client.handle();

	handle.call(request).await.map_err(|err| client.map_transport_error(target, err))
}

/// Shared mapping for [`HttpClientError`] variants.
///
/// `typed` converts the transport's own error type; every other variant has a fixed
/// mapping.
pub fn map_http_client_error<E, F>(target: &'static str, err: HttpClientError<E>, typed: F) -> Error
where
	E: 'static + Send + Sync + StdError,
	F: FnOnce(&'static str, E) -> TransportError,
{
	match err {
		HttpClientError::Reqwest(inner) => typed(target, *inner).into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) => TransportError::Other { target, message }.into(),
		other => TransportError::Other { target, message: format!("{other:?}") }.into(),
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Configure timeouts, proxies, or connection pooling on the wrapped client and pass it
/// to [`ReqwestHttpClient::with_client`].
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client whose requests fail after `timeout`.
	pub fn with_timeout(timeout: std::time::Duration) -> Result<Self> {
		let client = ReqwestClient::builder()
			.timeout(timeout)
			.build()
			.map_err(ConfigError::http_client_build)?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	type Handle = ReqwestHandle;
	type TransportError = ReqwestError;

	fn handle(&self) -> Self::Handle {
		ReqwestHandle(self.0.clone())
	}

	fn map_transport_error(
		&self,
		target: &'static str,
		err: HttpClientError<ReqwestError>,
	) -> Error {
		map_http_client_error(target, err, |target, inner| {
			if inner.is_builder() {
				TransportError::Other { target, message: inner.to_string() }
			} else if inner.is_timeout() {
				TransportError::timeout(target, inner)
			} else {
				TransportError::network(target, inner)
			}
		})
	}
}

/// Request handle returned by [`ReqwestHttpClient`].
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHandle(ReqwestClient);
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for ReqwestHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = self.0.clone();

		Box::pin(async move {
			let response =
				client.execute(request.try_into().map_err(Box::new)?).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}


#[cfg(test)]
mod tests {
	// std
	use std::io::{Error as IoError, ErrorKind};
	// self
	use super::*;

	#[derive(Debug)]
	struct Refused;
	impl Display for Refused {
		fn fmt(&self, f: &mut Formatter) -> FmtResult {
			f.write_str("connection refused")
		}
	}
	impl StdError for Refused {}

	#[test]
	fn typed_errors_use_the_transport_mapping() {
		let err = map_http_client_error("API", HttpClientError::Reqwest(Box::new(Refused)), |t, e| {
			TransportError::network(t, e)
		});

		assert!(matches!(err, Error::Transport(TransportError::Network { target: "API", .. })));
	}

	#[test]
	fn io_and_other_errors_map_to_transport() {
		let io = map_http_client_error::<Refused, _>(
			"token endpoint",
			HttpClientError::Io(IoError::new(ErrorKind::TimedOut, "slow")),
			TransportError::network,
		);
		let other = map_http_client_error::<Refused, _>(
			"API",
			HttpClientError::Other("boom".into()),
			TransportError::network,
		);

		assert!(matches!(io, Error::Transport(TransportError::Io(_))));
		assert!(matches!(
			other,
			Error::Transport(TransportError::Other { target: "API", ref message }) if message == "boom"
		));
	}
}
