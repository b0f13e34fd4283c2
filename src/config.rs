//! Typed client configuration, its schema, and config-source loading.
//!
//! [`Config`] is the strongly typed record behind the string-keyed `set_config` surface.
//! Keys are resolved through [`ConfigKey`] and every assignment is checked by
//! [`ConfigValidator`] against the declarative [`CONFIG_SCHEMA`] table before it lands.
//! Config sources are JSON objects whose keys use the same wire names; they pass through
//! the validator too, so a document cannot carry values `set_config` would reject.

pub mod schema;
pub mod validator;

pub use schema::*;
pub use validator::*;

// std
use std::fs;
// self
use crate::{_prelude::*, error::ConfigError};

/// Default authorization server base URL.
pub const DEFAULT_AUTH_URL: &str = "https://auth.olx.com.br/oauth";
/// Default apps API base URL.
pub const DEFAULT_APPS_URL: &str = "https://apps.olx.com.br/oauth";
/// The only response type this client requests.
pub const RESPONSE_TYPE: &str = "code";

/// Closed set of configuration keys recognized by the schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigKey {
	/// OAuth client identifier issued by the provider.
	ClientId,
	/// Space-separated list of requested scopes.
	Scope,
	/// Registered redirect URI.
	RedirectUri,
	/// Opaque state echoed back by the provider.
	State,
	/// Client secret used by the token exchange.
	ClientSecret,
	/// Base URL for apps API calls.
	AppsUrl,
	/// Base URL of the authorization server.
	AuthUrl,
	/// Opaque options forwarded to the transport.
	TransportOptions,
}
impl ConfigKey {
	/// Returns the wire name used by `set_config` and config sources.
	pub const fn as_str(self) -> &'static str {
		match self {
			ConfigKey::ClientId => "client_id",
			ConfigKey::Scope => "scope",
			ConfigKey::RedirectUri => "redirect_uri",
			ConfigKey::State => "state",
			ConfigKey::ClientSecret => "client_secret",
			ConfigKey::AppsUrl => "apps_url",
			ConfigKey::AuthUrl => "auth_url",
			ConfigKey::TransportOptions => "transportOptions",
		}
	}
}
impl Display for ConfigKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for ConfigKey {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		ConfigValidator::default().spec(s).map(|spec| spec.key)
	}
}

/// Opaque key/value options handed to the transport.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransportOptions(BTreeMap<String, JsonValue>);
impl TransportOptions {
	/// Parses options from a JSON object document.
	pub fn from_json_str(raw: &str) -> Option<Self> {
		match serde_json::from_str::<JsonValue>(raw).ok()? {
			JsonValue::Object(map) => Some(Self(map.into_iter().collect())),
			_ => None,
		}
	}

	/// Adds or replaces a single option.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> &mut Self {
		self.0.insert(name.into(), value.into());

		self
	}

	/// Returns the raw value of an option.
	pub fn get(&self, name: &str) -> Option<&JsonValue> {
		self.0.get(name)
	}

	/// Returns true if no options are set.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates over options in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &JsonValue)> {
		self.0.iter().map(|(name, value)| (name.as_str(), value))
	}
}

/// Client configuration keyed by [`ConfigKey`].
///
/// `auth_url` and `apps_url` are always present (defaulted when a source leaves them
/// out) and the response type is fixed to [`RESPONSE_TYPE`].
#[derive(Clone, PartialEq, Serialize)]
pub struct Config {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub(crate) client_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub(crate) scope: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub(crate) redirect_uri: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub(crate) state: Option<String>,
	#[serde(skip_serializing)]
	pub(crate) client_secret: Option<String>,
	pub(crate) apps_url: String,
	pub(crate) auth_url: String,
	#[serde(rename = "transportOptions", skip_serializing_if = "TransportOptions::is_empty")]
	pub(crate) transport_options: TransportOptions,
}
impl Config {
	/// Loads a JSON config source from disk.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let raw = fs::read_to_string(path)
			.map_err(|source| ConfigError::SourceRead { path: path.to_owned(), source })?;

		Self::from_json_str(&raw)
	}

	/// Decodes a JSON config source, validating every entry against the schema.
	///
	/// A `response_type` entry is accepted and ignored because the response type is fixed.
	pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
		let document: BTreeMap<String, JsonValue> =
			serde_path_to_error::deserialize(&mut serde_json::Deserializer::from_str(raw))
				.map_err(|source| ConfigError::SourceDecode { source })?;
		let validator = ConfigValidator::default();
		let mut config = Self::default();

		for (key, value) in document {
			if key == "response_type" {
				continue;
			}

			let spec = validator.spec(&key)?;

			match (spec.key, value) {
				(ConfigKey::TransportOptions, JsonValue::Object(map)) =>
					config.transport_options = TransportOptions(map.into_iter().collect()),
				(_, JsonValue::String(text)) => {
					validator.validate_item(&key, &text)?;
					config.assign(spec.key, &text)?;
				},
				(_, other) =>
					return Err(ConfigError::InvalidValue {
						key: spec.key.as_str(),
						value: other.to_string(),
					}),
			}
		}

		Ok(config)
	}

	/// Returns the current value for a string-valued key.
	pub fn get(&self, key: ConfigKey) -> Option<&str> {
		match key {
			ConfigKey::ClientId => self.client_id.as_deref(),
			ConfigKey::Scope => self.scope.as_deref(),
			ConfigKey::RedirectUri => self.redirect_uri.as_deref(),
			ConfigKey::State => self.state.as_deref(),
			ConfigKey::ClientSecret => self.client_secret.as_deref(),
			ConfigKey::AppsUrl => Some(&self.apps_url),
			ConfigKey::AuthUrl => Some(&self.auth_url),
			ConfigKey::TransportOptions => None,
		}
	}

	/// Returns true if the key currently holds a value.
	pub fn is_set(&self, key: ConfigKey) -> bool {
		match key {
			ConfigKey::TransportOptions => !self.transport_options.is_empty(),
			key => self.get(key).is_some(),
		}
	}

	/// Wire names of every populated key, in schema order, followed by `response_type`.
	pub fn keys(&self) -> Vec<&'static str> {
		CONFIG_SCHEMA
			.iter()
			.map(|spec| spec.key)
			.filter(|key| self.is_set(*key))
			.map(ConfigKey::as_str)
			.chain(["response_type"])
			.collect()
	}

	/// OAuth client identifier.
	pub fn client_id(&self) -> Option<&str> {
		self.client_id.as_deref()
	}

	/// Requested scopes, space separated.
	pub fn scope(&self) -> Option<&str> {
		self.scope.as_deref()
	}

	/// Registered redirect URI.
	pub fn redirect_uri(&self) -> Option<&str> {
		self.redirect_uri.as_deref()
	}

	/// Opaque state value.
	pub fn state(&self) -> Option<&str> {
		self.state.as_deref()
	}

	/// Client secret. Callers must avoid logging it.
	pub fn client_secret(&self) -> Option<&str> {
		self.client_secret.as_deref()
	}

	/// Base URL for apps API calls.
	pub fn apps_url(&self) -> &str {
		&self.apps_url
	}

	/// Base URL of the authorization server.
	pub fn auth_url(&self) -> &str {
		&self.auth_url
	}

	/// Always [`RESPONSE_TYPE`].
	pub fn response_type(&self) -> &'static str {
		RESPONSE_TYPE
	}

	/// Options forwarded to the transport.
	pub fn transport_options(&self) -> &TransportOptions {
		&self.transport_options
	}

	/// Writes a value that already passed [`ConfigValidator::validate_item`].
	///
	/// Nothing is written when the value cannot be converted for its key.
	pub(crate) fn assign(&mut self, key: ConfigKey, value: &str) -> Result<(), ConfigError> {
		let value = value.to_owned();

		match key {
			ConfigKey::ClientId => self.client_id = Some(value),
			ConfigKey::Scope => self.scope = Some(value),
			ConfigKey::RedirectUri => self.redirect_uri = Some(value),
			ConfigKey::State => self.state = Some(value),
			ConfigKey::ClientSecret => self.client_secret = Some(value),
			ConfigKey::AppsUrl => self.apps_url = value,
			ConfigKey::AuthUrl => self.auth_url = value,
			ConfigKey::TransportOptions =>
				self.transport_options = TransportOptions::from_json_str(&value)
					.ok_or(ConfigError::InvalidValue { key: key.as_str(), value })?,
		}

		Ok(())
	}
}
impl Default for Config {
	fn default() -> Self {
		Self {
			client_id: None,
			scope: None,
			redirect_uri: None,
			state: None,
			client_secret: None,
			apps_url: DEFAULT_APPS_URL.into(),
			auth_url: DEFAULT_AUTH_URL.into(),
			transport_options: TransportOptions::default(),
		}
	}
}
impl Debug for Config {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Config")
			.field("client_id", &self.client_id)
			.field("scope", &self.scope)
			.field("redirect_uri", &self.redirect_uri)
			.field("state", &self.state)
			.field("client_secret_set", &self.client_secret.is_some())
			.field("apps_url", &self.apps_url)
			.field("auth_url", &self.auth_url)
			.field("response_type", &RESPONSE_TYPE)
			.field("transport_options", &self.transport_options)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn keys_parse_from_wire_names() {
		assert_eq!(ConfigKey::from_str("transportOptions").ok(), Some(ConfigKey::TransportOptions));
		assert_eq!("redirect_uri".parse::<ConfigKey>().ok(), Some(ConfigKey::RedirectUri));
		assert!(ConfigKey::from_str("transport_options").is_err());
	}

	#[test]
	fn defaults_fill_urls_only() {
		let config = Config::default();

		assert_eq!(config.auth_url(), DEFAULT_AUTH_URL);
		assert_eq!(config.apps_url(), DEFAULT_APPS_URL);
		assert_eq!(config.response_type(), "code");
		assert_eq!(config.keys(), ["apps_url", "auth_url", "response_type"]);
		assert!(config.transport_options().is_empty());
	}

	#[test]
	fn sources_keep_explicit_urls_and_ignore_response_type() {
		let config = Config::from_json_str(
			r#"{"auth_url":"https://auth.example.com/oauth","response_type":"token","transportOptions":{"timeout":5}}"#,
		)
		.expect("Config source should decode.");

		assert_eq!(config.auth_url(), "https://auth.example.com/oauth");
		assert_eq!(config.apps_url(), DEFAULT_APPS_URL);
		assert_eq!(config.response_type(), "code");
		assert_eq!(config.transport_options().get("timeout"), Some(&JsonValue::from(5)));
	}

	#[test]
	fn sources_reject_unknown_keys_and_bad_values() {
		assert!(matches!(
			Config::from_json_str(r#"{"curlOpts":{}}"#),
			Err(ConfigError::UnknownKey { key }) if key == "curlOpts"
		));
		assert!(matches!(
			Config::from_json_str(r#"{"scope":"everything"}"#),
			Err(ConfigError::InvalidValue { key: "scope", .. })
		));
		assert!(matches!(
			Config::from_json_str(r#"{"client_id":9876}"#),
			Err(ConfigError::InvalidValue { key: "client_id", value }) if value == "9876"
		));
		assert!(matches!(Config::from_json_str("[]"), Err(ConfigError::SourceDecode { .. })));
		assert!(matches!(Config::from_json_str("{"), Err(ConfigError::SourceDecode { .. })));
	}

	#[test]
	fn transport_options_assignment_requires_an_object() {
		let mut config = Config::default();

		config
			.assign(ConfigKey::TransportOptions, r#"{"timeout":10}"#)
			.expect("Object documents should be accepted.");

		assert!(config.is_set(ConfigKey::TransportOptions));

		let err = config
			.assign(ConfigKey::TransportOptions, "[1,2]")
			.expect_err("Non-object documents must be rejected.");

		assert!(matches!(err, ConfigError::InvalidValue { key: "transportOptions", .. }));
		assert_eq!(
			config.transport_options().get("timeout"),
			Some(&JsonValue::from(10)),
			"Failed assignments leave the previous options in place."
		);
	}

	#[test]
	fn debug_output_redacts_client_secret() {
		let mut config = Config::default();

		config.client_secret = Some("a315f7cc0ae584a3da8ef0f6092693fb".into());

		let rendered = format!("{config:?}");

		assert!(!rendered.contains("a315f7cc"));
		assert!(rendered.contains("client_secret_set: true"));
	}
}
