//! Declarative resource descriptors (data) and the argument bag consumed by
//! [`SearchAdsClient::invoke`](crate::client::SearchAdsClient::invoke).
//!
//! Every Search Ads endpoint is a method, a path template, an optional set of required
//! query parameters, and a body shape. [`ResourceDescriptor`] records exactly that, and
//! [`catalog`] lists the endpoints the API exposes. [`ResourceDescriptor::prepare`] turns a
//! descriptor plus [`ResourceArgs`] into the resource path and [`CallOptions`] that the
//! dispatcher sends, so no endpoint needs hand-written request code.

pub mod catalog;

// crates.io
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	client::CallOptions,
	error::ConfigError,
	selector::{ReportRequest, Selector},
};

/// HTTP methods used by Search Ads endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
	/// `GET`
	Get,
	/// `POST`
	Post,
	/// `PUT`
	Put,
	/// `DELETE`
	Delete,
}
impl HttpMethod {
	/// Returns the wire token.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
			HttpMethod::Put => "PUT",
			HttpMethod::Delete => "DELETE",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Shape of the JSON body an endpoint accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
	/// No body.
	None,
	/// A JSON object.
	Object,
	/// A JSON array (bulk endpoints).
	Array,
	/// A [`Selector`] object.
	Selector,
	/// A [`ReportRequest`] object.
	Report,
}
impl BodyKind {
	/// Human readable description used in errors.
	pub const fn expected(self) -> &'static str {
		match self {
			BodyKind::None => "empty",
			BodyKind::Object => "object",
			BodyKind::Array => "array",
			BodyKind::Selector => "selector object",
			BodyKind::Report => "report object",
		}
	}

	fn accepts(self, body: &Value) -> bool {
		match self {
			BodyKind::None => false,
			BodyKind::Object => body.is_object(),
			BodyKind::Array => body.is_array(),
			BodyKind::Selector => body.get("pagination").is_some(),
			BodyKind::Report => body.get("selector").is_some(),
		}
	}
}

/// Value copied into an object body when the caller did not supply the key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Injection {
	/// The identity's organization identifier, skipped when the identity has none.
	OrgId {
		/// Body key, e.g. `orgId`.
		key: &'static str,
	},
	/// A path parameter of the same call.
	PathParameter {
		/// Body key, e.g. `campaignId`.
		key: &'static str,
		/// Path parameter name.
		parameter: &'static str,
	},
}

/// Declarative description of one API endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResourceDescriptor {
	/// Stable snake_case name.
	pub name: &'static str,
	/// HTTP method.
	pub method: HttpMethod,
	/// Path template relative to `/api/{version}/`, with `{param}` placeholders.
	pub path: &'static str,
	/// Query parameters the endpoint requires.
	pub required_query: &'static [&'static str],
	/// Accepted body shape.
	pub body: BodyKind,
	/// Values copied into object bodies.
	pub inject: &'static [Injection],
}
impl ResourceDescriptor {
	/// Creates a descriptor without body, required query parameters, or injections.
	pub const fn new(name: &'static str, method: HttpMethod, path: &'static str) -> Self {
		Self { name, method, path, required_query: &[], body: BodyKind::None, inject: &[] }
	}

	/// Declares the required query parameters.
	pub const fn required_query(mut self, names: &'static [&'static str]) -> Self {
		self.required_query = names;

		self
	}

	/// Declares the body shape.
	pub const fn body(mut self, body: BodyKind) -> Self {
		self.body = body;

		self
	}

	/// Declares body injections.
	pub const fn inject(mut self, inject: &'static [Injection]) -> Self {
		self.inject = inject;

		self
	}

	/// Names of the `{param}` placeholders in the path template, in order.
	pub fn path_parameters(&self) -> impl Iterator<Item = &'static str> {
		let path = self.path;

		path.split('/').filter_map(|segment| {
			segment.strip_prefix('{').and_then(|rest| rest.strip_suffix('}'))
		})
	}

	/// Renders the path template with `params`.
	///
	/// Each value fills exactly one segment: reserved characters are percent-encoded and
	/// the dot segments `.` and `..` are rejected.
	pub fn render_path(&self, params: &BTreeMap<String, String>) -> Result<String, ConfigError> {
		let mut rendered = Vec::new();

		for segment in self.path.split('/') {
			match segment.strip_prefix('{').and_then(|rest| rest.strip_suffix('}')) {
				Some(name) => {
					let value = params
						.get(name)
						.map(|value| value.trim())
						.filter(|value| !value.is_empty())
						.ok_or_else(|| ConfigError::MissingPathParameter {
							resource: self.name,
							parameter: name.to_owned(),
						})?;

					if matches!(value, "." | "..") {
						return Err(ConfigError::InvalidPathParameter {
							resource: self.name,
							parameter: name.to_owned(),
						});
					}

					rendered.push(encode_segment(value));
				},
				None => rendered.push(segment.to_owned()),
			}
		}

		Ok(rendered.join("/"))
	}

	/// Validates `args` against the descriptor and produces the call to dispatch.
	///
	/// `org_id` feeds [`Injection::OrgId`]; caller-supplied body keys always win over
	/// injected values.
	pub fn prepare(&self, args: ResourceArgs, org_id: &str) -> Result<PreparedCall, ConfigError> {
		let resource = self.render_path(&args.path)?;

		for &parameter in self.required_query {
			if !args.options.query.iter().any(|(key, _)| key == parameter) {
				return Err(ConfigError::MissingQueryParameter { resource: self.name, parameter });
			}
		}

		let ResourceArgs { path, mut options } = args;

		match (self.body, options.json.as_mut()) {
			(BodyKind::None, None) => {},
			(BodyKind::None, Some(_)) =>
				return Err(ConfigError::UnexpectedBody { resource: self.name }),
			(_, None) => return Err(ConfigError::MissingBody { resource: self.name }),
			(kind, Some(body)) => {
				if !kind.accepts(body) {
					return Err(ConfigError::InvalidBody {
						resource: self.name,
						expected: kind.expected(),
					});
				}
				if let Value::Object(map) = body {
					self.apply_injections(map, &path, org_id);
				}
			},
		}

		Ok(PreparedCall { method: self.method, resource, options })
	}

	fn apply_injections(
		&self,
		body: &mut serde_json::Map<String, Value>,
		path: &BTreeMap<String, String>,
		org_id: &str,
	) {
		for injection in self.inject {
			let (key, raw) = match *injection {
				Injection::OrgId { key } => (key, org_id),
				Injection::PathParameter { key, parameter } =>
					(key, path.get(parameter).map(String::as_str).unwrap_or_default()),
			};
			let raw = raw.trim();

			if raw.is_empty() || body.contains_key(key) {
				continue;
			}

			body.insert(key.to_owned(), identifier_value(raw));
		}
	}
}
impl Display for ResourceDescriptor {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{} {}", self.method, self.path)
	}
}

/// Method, rendered resource path, and options ready for the dispatcher.
#[derive(Clone, Debug)]
pub struct PreparedCall {
	/// HTTP method.
	pub method: HttpMethod,
	/// Resource path relative to `/api/{version}/`.
	pub resource: String,
	/// Query, body, and extra headers.
	pub options: CallOptions,
}

/// Arguments for one descriptor-driven call.
#[derive(Clone, Debug, Default)]
pub struct ResourceArgs {
	/// Path template parameters.
	pub path: BTreeMap<String, String>,
	/// Query, body, and extra headers.
	pub options: CallOptions,
}
impl ResourceArgs {
	/// Creates an empty argument bag.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets a path parameter.
	pub fn path(mut self, name: impl Into<String>, value: impl Display) -> Self {
		self.path.insert(name.into(), value.to_string());

		self
	}

	/// Appends a query parameter.
	pub fn query(mut self, key: impl Into<String>, value: impl Display) -> Self {
		self.options = self.options.query(key, value);

		self
	}

	/// Appends `offset` and `limit` query parameters.
	pub fn page(self, offset: u32, limit: u32) -> Self {
		self.query("offset", offset).query("limit", limit)
	}

	/// Sets the JSON body.
	pub fn json(mut self, body: Value) -> Self {
		self.options = self.options.json(body);

		self
	}

	/// Sets a selector as the JSON body.
	pub fn selector(self, selector: &Selector) -> Result<Self, ConfigError> {
		let body = serde_json::to_value(selector).map_err(ConfigError::BodySerialize)?;

		Ok(self.json(body))
	}

	/// Sets a report request as the JSON body.
	pub fn report(self, report: &ReportRequest) -> Result<Self, ConfigError> {
		let body = serde_json::to_value(report).map_err(ConfigError::BodySerialize)?;

		Ok(self.json(body))
	}

	/// Adds an extra header; it overrides the dispatcher's defaults.
	pub fn header(
		mut self,
		name: oauth2::http::HeaderName,
		value: oauth2::http::HeaderValue,
	) -> Self {
		self.options = self.options.header(name, value);

		self
	}
}

// `byte_serialize` writes spaces as `+`; a literal `+` is already `%2B`.
fn encode_segment(value: &str) -> String {
	form_urlencoded::byte_serialize(value.as_bytes()).collect::<String>().replace('+', "%20")
}

fn identifier_value(raw: &str) -> Value {
	match raw.parse::<i64>() {
		Ok(number) => Value::from(number),
		Err(_) => Value::String(raw.to_owned()),
	}
}
