//! Transport primitives for token exchanges and apps API calls.
//!
//! The module exposes [`Transport`] alongside [`TransportRequest`] and
//! [`TransportResponse`] so callers can plug in their own blocking HTTP stack. The client
//! only ever builds a request, hands it over, and reads the four response fields back; no
//! retries, backoff, or redirect re-fetching happen on this side of the trait.

// std
#[cfg(feature = "reqwest")] use std::time::Duration as StdDuration;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::{CONTENT_TYPE, HeaderMap};
use url::form_urlencoded::Serializer as FormSerializer;
// self
use crate::{
	_prelude::*,
	config::TransportOptions,
	error::{ConfigError, TransportError},
};

/// Content type used for form bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
/// Content type used for JSON bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Blocking HTTP transport used by [`AuthClient`](crate::AuthClient).
///
/// The client owns its transport exclusively and calls it with `&mut self`, so
/// implementations may keep per-request state without interior mutability. Each call to
/// [`execute`](Transport::execute) performs exactly one round trip.
pub trait Transport {
	/// Applies the opaque options bag from the client configuration.
	///
	/// Called once at client construction and again whenever `transportOptions` changes.
	/// The default implementation ignores every option.
	fn configure(&mut self, options: &TransportOptions) -> Result<(), ConfigError> {
		let _ = options;

		Ok(())
	}

	/// Performs the request once and returns the split response.
	fn execute(
		&mut self,
		request: &TransportRequest,
	) -> Result<TransportResponse, TransportError>;
}

/// HTTP methods accepted by the transport surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HttpMethod {
	/// `GET`.
	Get,
	#[default]
	/// `POST`.
	Post,
	/// `PUT`.
	Put,
	/// `PATCH`.
	Patch,
	/// `DELETE`.
	Delete,
}
impl HttpMethod {
	/// Returns the canonical upper-case method name.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
			HttpMethod::Put => "PUT",
			HttpMethod::Patch => "PATCH",
			HttpMethod::Delete => "DELETE",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for HttpMethod {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		[Self::Get, Self::Post, Self::Put, Self::Patch, Self::Delete]
			.into_iter()
			.find(|method| method.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| ConfigError::UnsupportedMethod { method: s.to_owned() })
	}
}
#[cfg(feature = "reqwest")]
impl From<HttpMethod> for reqwest::Method {
	fn from(method: HttpMethod) -> Self {
		match method {
			HttpMethod::Get => reqwest::Method::GET,
			HttpMethod::Post => reqwest::Method::POST,
			HttpMethod::Put => reqwest::Method::PUT,
			HttpMethod::Patch => reqwest::Method::PATCH,
			HttpMethod::Delete => reqwest::Method::DELETE,
		}
	}
}

/// Request body for apps API calls.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CallBody {
	/// No body.
	#[default]
	Empty,
	/// Pre-encoded body sent as-is without a content type.
	Raw(String),
	/// Pairs sent as `application/x-www-form-urlencoded`, in order.
	Form(Vec<(String, String)>),
	/// Document sent as `application/json`.
	Json(JsonValue),
}
impl CallBody {
	/// Encodes the body and returns it with its content type.
	pub fn encode(&self) -> (String, Option<&'static str>) {
		match self {
			CallBody::Empty => (String::new(), None),
			CallBody::Raw(raw) => (raw.clone(), None),
			CallBody::Form(pairs) =>
				(encode_form(pairs.iter().map(|(key, value)| (key, value))), Some(FORM_CONTENT_TYPE)),
			CallBody::Json(value) => (value.to_string(), Some(JSON_CONTENT_TYPE)),
		}
	}
}
impl From<&str> for CallBody {
	fn from(raw: &str) -> Self {
		Self::Raw(raw.to_owned())
	}
}
impl From<String> for CallBody {
	fn from(raw: String) -> Self {
		Self::Raw(raw)
	}
}
impl From<JsonValue> for CallBody {
	fn from(value: JsonValue) -> Self {
		Self::Json(value)
	}
}
impl From<Vec<(String, String)>> for CallBody {
	fn from(pairs: Vec<(String, String)>) -> Self {
		Self::Form(pairs)
	}
}

/// Fully resolved request handed to a [`Transport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportRequest {
	/// HTTP method.
	pub method: HttpMethod,
	/// Absolute target URL.
	pub url: String,
	/// Pre-encoded request body.
	pub body: String,
	/// Content type of `body`; wins over any content type supplied via transport options.
	pub content_type: Option<&'static str>,
}
impl TransportRequest {
	/// Builds a form-encoded `POST` request; pairs keep their order.
	pub fn form<K, V>(url: impl Into<String>, pairs: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: AsRef<str>,
		V: AsRef<str>,
	{
		Self {
			method: HttpMethod::Post,
			url: url.into(),
			body: encode_form(pairs),
			content_type: Some(FORM_CONTENT_TYPE),
		}
	}

	/// Builds a request carrying an apps API body.
	pub fn call(method: HttpMethod, url: impl Into<String>, body: &CallBody) -> Self {
		let (body, content_type) = body.encode();

		Self { method, url: url.into(), body, content_type }
	}
}

/// Raw response returned by [`Transport::execute`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportResponse {
	/// Status line plus header lines, terminated by an empty line.
	pub header: String,
	/// Response body.
	pub body: String,
	/// HTTP status code.
	pub http_code: u16,
	/// Final URL after any redirects the transport followed.
	pub last_url: String,
}

/// Blocking transport backed by [`ReqwestClient`].
///
/// Options understood by [`Transport::configure`]:
///
/// - `timeout` / `connect_timeout`: seconds, integer or fractional. No timeout applies when
///   unset.
/// - `user_agent`: string.
/// - `accept_invalid_certs`: bool.
/// - `headers`: object of string values added to every request.
///
/// Other options are ignored. A transport wrapping a caller-built client (see
/// [`with_client`](Self::with_client)) keeps that client for its whole life; only `headers`
/// apply to it and the client-level options above are rejected.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
	client: ReqwestClient,
	headers: Vec<(String, String)>,
	caller_client: bool,
}
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Options that can only be applied while building the reqwest client.
	pub const CLIENT_OPTIONS: [&str; 4] =
		["timeout", "connect_timeout", "user_agent", "accept_invalid_certs"];

	/// Wraps an existing blocking reqwest [`ReqwestClient`].
	///
	/// The client survives [`Transport::configure`]; its proxy, TLS, timeout, and default
	/// header settings stay in effect.
	pub fn with_client(client: ReqwestClient) -> Self {
		Self { client, headers: Vec::new(), caller_client: true }
	}

	/// Builds a transport from the configuration's options bag.
	pub fn from_options(options: &TransportOptions) -> Result<Self, ConfigError> {
		let mut builder = ReqwestClient::builder().timeout(None::<StdDuration>);
		let mut headers = Vec::new();

		for (name, value) in options.iter() {
			match name {
				"timeout" => builder = builder.timeout(option_seconds(name, value)?),
				"connect_timeout" => builder = builder.connect_timeout(option_seconds(name, value)?),
				"user_agent" => builder = builder.user_agent(option_str(name, value)?),
				"accept_invalid_certs" =>
					builder = builder.danger_accept_invalid_certs(option_bool(name, value)?),
				"headers" => headers = option_headers(name, value)?,
				_ => {},
			}
		}

		Ok(Self { client: builder.build()?, headers, caller_client: false })
	}
}
#[cfg(feature = "reqwest")]
impl Default for ReqwestTransport {
	fn default() -> Self {
		Self { client: ReqwestClient::new(), headers: Vec::new(), caller_client: false }
	}
}
#[cfg(feature = "reqwest")]
impl Transport for ReqwestTransport {
	fn configure(&mut self, options: &TransportOptions) -> Result<(), ConfigError> {
		if !self.caller_client {
			*self = Self::from_options(options)?;

			return Ok(());
		}
		if let Some((name, _)) =
			options.iter().find(|(name, _)| Self::CLIENT_OPTIONS.contains(name))
		{
			return Err(invalid_option(name, "cannot be applied to a caller-built client"));
		}

		self.headers = match options.get("headers") {
			Some(value) => option_headers("headers", value)?,
			None => Vec::new(),
		};

		Ok(())
	}

	fn execute(
		&mut self,
		request: &TransportRequest,
	) -> Result<TransportResponse, TransportError> {
		let mut builder = self.client.request(request.method.into(), &request.url);

		for (name, value) in &self.headers {
			if request.content_type.is_some() && name.eq_ignore_ascii_case(CONTENT_TYPE.as_str()) {
				continue;
			}

			builder = builder.header(name.as_str(), value.as_str());
		}
		if let Some(content_type) = request.content_type {
			builder = builder.header(CONTENT_TYPE, content_type);
		}

		let response = builder.body(request.body.clone()).send()?;
		let status = response.status();
		let header = render_header_block(
			&format!("{:?} {status}", response.version()),
			response.headers(),
		);
		let last_url = response.url().to_string();
		let body = response.text()?;

		Ok(TransportResponse { header, body, http_code: status.as_u16(), last_url })
	}
}

pub(crate) fn encode_form<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> String
where
	K: AsRef<str>,
	V: AsRef<str>,
{
	let mut serializer = FormSerializer::new(String::new());

	for (key, value) in pairs {
		serializer.append_pair(key.as_ref(), value.as_ref());
	}

	serializer.finish()
}

#[cfg(feature = "reqwest")]
fn render_header_block(status_line: &str, headers: &HeaderMap) -> String {
	let mut block = format!("{status_line}\r\n");

	for (name, value) in headers {
		block.push_str(name.as_str());
		block.push_str(": ");
		block.push_str(&String::from_utf8_lossy(value.as_bytes()));
		block.push_str("\r\n");
	}

	block.push_str("\r\n");

	block
}

#[cfg(feature = "reqwest")]
fn option_seconds(name: &str, value: &JsonValue) -> Result<StdDuration, ConfigError> {
	value
		.as_f64()
		.and_then(|secs| StdDuration::try_from_secs_f64(secs).ok())
		.ok_or_else(|| invalid_option(name, "expected a non-negative number of seconds in range"))
}

#[cfg(feature = "reqwest")]
fn option_str<'a>(name: &str, value: &'a JsonValue) -> Result<&'a str, ConfigError> {
	value.as_str().ok_or_else(|| invalid_option(name, "expected a string"))
}

#[cfg(feature = "reqwest")]
fn option_bool(name: &str, value: &JsonValue) -> Result<bool, ConfigError> {
	value.as_bool().ok_or_else(|| invalid_option(name, "expected a boolean"))
}

#[cfg(feature = "reqwest")]
fn option_headers(name: &str, value: &JsonValue) -> Result<Vec<(String, String)>, ConfigError> {
	let map = value.as_object().ok_or_else(|| invalid_option(name, "expected an object"))?;

	map.iter()
		.map(|(header, value)| {
			value
				.as_str()
				.map(|value| (header.clone(), value.to_owned()))
				.ok_or_else(|| invalid_option(name, "expected string header values"))
		})
		.collect()
}

#[cfg(feature = "reqwest")]
fn invalid_option(name: &str, reason: &'static str) -> ConfigError {
	ConfigError::InvalidTransportOption { name: name.to_owned(), reason }
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn methods_parse_case_insensitively() {
		assert_eq!(HttpMethod::from_str("post").ok(), Some(HttpMethod::Post));
		assert_eq!(HttpMethod::from_str("Delete").ok(), Some(HttpMethod::Delete));
		assert!(matches!(
			HttpMethod::from_str("TRACE"),
			Err(ConfigError::UnsupportedMethod { method }) if method == "TRACE"
		));
		assert_eq!(HttpMethod::default(), HttpMethod::Post);
	}

	#[test]
	fn form_requests_keep_pair_order() {
		let request = TransportRequest::form(
			"https://auth.olx.com.br/oauth/token",
			[("code", "abc"), ("grant_type", "authorization_code"), ("redirect_uri", "http://a.b/c d")],
		);

		assert_eq!(request.method, HttpMethod::Post);
		assert_eq!(
			request.body,
			"code=abc&grant_type=authorization_code&redirect_uri=http%3A%2F%2Fa.b%2Fc+d"
		);
		assert_eq!(request.content_type, Some(FORM_CONTENT_TYPE));
	}

	#[test]
	fn call_bodies_encode_with_content_types() {
		assert_eq!(CallBody::Empty.encode(), (String::new(), None));
		assert_eq!(CallBody::from("raw=1").encode(), ("raw=1".into(), None));
		assert_eq!(
			CallBody::from(vec![("ad_id".to_string(), "42".to_string())]).encode(),
			("ad_id=42".into(), Some(FORM_CONTENT_TYPE))
		);
		assert_eq!(
			CallBody::from(serde_json::json!({ "ad_list": [] })).encode(),
			("{\"ad_list\":[]}".into(), Some(JSON_CONTENT_TYPE))
		);
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn reqwest_options_are_type_checked() {
		let mut options = TransportOptions::default();

		options.insert("timeout", 2.5).insert("user_agent", "olx-test").insert("unknown", true);

		assert!(ReqwestTransport::from_options(&options).is_ok());

		options.insert("timeout", "soon");

		assert!(matches!(
			ReqwestTransport::from_options(&options),
			Err(ConfigError::InvalidTransportOption { name, .. }) if name == "timeout"
		));

		options.insert("timeout", 1e30);

		assert!(matches!(
			ReqwestTransport::from_options(&options),
			Err(ConfigError::InvalidTransportOption { name, .. }) if name == "timeout"
		));

		let mut options = TransportOptions::default();

		options.insert("headers", serde_json::json!({ "X-Trace": 1 }));

		assert!(ReqwestTransport::from_options(&options).is_err());

		for secs in [1e30, -1.] {
			let mut options = TransportOptions::default();

			options.insert("connect_timeout", secs);

			assert!(matches!(
				ReqwestTransport::from_options(&options),
				Err(ConfigError::InvalidTransportOption { name, .. }) if name == "connect_timeout"
			));
		}
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn caller_built_clients_only_take_headers() {
		let mut transport = ReqwestTransport::with_client(ReqwestClient::new());
		let mut options = TransportOptions::default();

		options.insert("headers", serde_json::json!({ "X-Api-Version": "2" }));
		transport.configure(&options).expect("Headers apply to caller-built clients.");

		assert!(transport.caller_client);
		assert_eq!(transport.headers, [("X-Api-Version".to_owned(), "2".to_owned())]);

		options.insert("timeout", 5);

		assert!(matches!(
			transport.configure(&options),
			Err(ConfigError::InvalidTransportOption { name, .. }) if name == "timeout"
		));
		assert_eq!(transport.headers.len(), 1, "Rejected options leave the headers in place.");

		transport.configure(&TransportOptions::default()).expect("Empty options always apply.");

		assert!(transport.headers.is_empty());
		assert!(transport.caller_client);
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn header_blocks_end_with_a_blank_line() {
		let mut headers = HeaderMap::new();

		headers.insert(CONTENT_TYPE, JSON_CONTENT_TYPE.parse().expect("Header value should parse."));

		assert_eq!(
			render_header_block("HTTP/1.1 200 OK", &headers),
			"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\n\r\n"
		);
	}
}
