//! The authorization-code client and its configuration surface.
//!
//! [`AuthClient`] owns a [`Config`], the [`ConfigValidator`] guarding it, a [`Transport`],
//! and the most recently issued [`AccessToken`]. Every operation is blocking and runs to
//! completion before returning; a failed call leaves configuration, transport, and token
//! state exactly as they were, so callers can correct their input and retry.

pub mod authorize;
pub mod token;

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ClientState},
	config::{Config, ConfigKey, ConfigValidator},
	http::{CallBody, HttpMethod, Transport, TransportRequest, TransportResponse},
	obs::{self, Operation, OperationOutcome},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestAuthClient = AuthClient<ReqwestTransport>;

/// OAuth 2.0 authorization-code client for a single provider.
///
/// Instances are not synchronized; callers running several flows concurrently should use
/// one client per flow.
pub struct AuthClient<T>
where
	T: Transport,
{
	config: Config,
	validator: ConfigValidator,
	transport: T,
	access_token: Option<AccessToken>,
}
impl<T> AuthClient<T>
where
	T: Transport,
{
	/// Creates a client around a caller-provided transport.
	///
	/// The transport is configured with the config's `transportOptions` before use.
	pub fn with_transport(config: Config, mut transport: T) -> Result<Self> {
		transport.configure(config.transport_options())?;

		Ok(Self { config, validator: ConfigValidator::default(), transport, access_token: None })
	}

	/// Replaces the validator, e.g. to enforce a stricter schema.
	pub fn with_validator(mut self, validator: ConfigValidator) -> Self {
		self.validator = validator;

		self
	}

	/// Assigns a configuration value by its wire name.
	///
	/// Last write wins. Unknown keys fail with `UnknownKey` and values outside an
	/// enumerated constraint fail with `InvalidValue`; neither touches the configuration.
	pub fn set_config(&mut self, key: &str, value: &str) -> Result<()> {
		let key = self.validator.validate_item(key, value)?;

		self.commit(key, value)
	}

	/// Typed counterpart of [`set_config`](Self::set_config).
	pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
		let key = self.validator.validate_item(key.as_str(), value)?;

		self.commit(key, value)
	}

	/// Current configuration.
	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Validator guarding [`set_config`](Self::set_config).
	pub fn validator(&self) -> &ConfigValidator {
		&self.validator
	}

	/// Access token retained from the last successful [`authenticate`](Self::authenticate).
	pub fn access_token(&self) -> Option<&AccessToken> {
		self.access_token.as_ref()
	}

	/// Lifecycle state derived from the configuration and retained token.
	pub fn state(&self) -> ClientState {
		ClientState::derive(&self.config, &self.validator, self.access_token.as_ref())
	}

	/// Shared access to the transport.
	pub fn transport(&self) -> &T {
		&self.transport
	}

	/// Exclusive access to the transport.
	pub fn transport_mut(&mut self) -> &mut T {
		&mut self.transport
	}

	/// Posts `body` to the apps API endpoint `name`.
	///
	/// See [`call_with_method`](Self::call_with_method).
	pub fn call(&mut self, name: &str, body: impl Into<CallBody>) -> Result<TransportResponse> {
		self.call_with_method(name, body, HttpMethod::Post.as_str())
	}

	/// Sends `body` to `{apps_url}_api/{name}` and returns the raw transport result.
	///
	/// The response is not interpreted; status codes and bodies are the caller's concern.
	pub fn call_with_method(
		&mut self,
		name: &str,
		body: impl Into<CallBody>,
		method: &str,
	) -> Result<TransportResponse> {
		obs::observe(
			Operation::Call,
			|| {
				let method = HttpMethod::from_str(method)?;
				let url = format!("{}_api/{name}", self.config.apps_url());
				let request = TransportRequest::call(method, url, &body.into());

				Ok(self.transport.execute(&request)?)
			},
			OperationOutcome::of,
		)
	}

	fn commit(&mut self, key: ConfigKey, value: &str) -> Result<()> {
		let mut next = self.config.clone();

		next.assign(key, value)?;

		if key == ConfigKey::TransportOptions {
			self.transport.configure(next.transport_options())?;
		}

		self.config = next;

		Ok(())
	}
}
#[cfg(feature = "reqwest")]
impl AuthClient<ReqwestTransport> {
	/// Creates a client with default configuration and the reqwest transport.
	pub fn new() -> Result<Self> {
		Self::from_config(Config::default())
	}

	/// Creates a client from a JSON config source on disk.
	///
	/// Unreadable or malformed sources are fatal and reported as [`ConfigError`](crate::error::ConfigError).
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
		Self::from_config(Config::load(path)?)
	}

	/// Creates a client from an already decoded configuration.
	pub fn from_config(config: Config) -> Result<Self> {
		let transport = ReqwestTransport::from_options(config.transport_options())?;

		Self::with_transport(config, transport)
	}
}
impl<T> Debug for AuthClient<T>
where
	T: Transport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthClient")
			.field("config", &self.config)
			.field("state", &self.state())
			.field("access_token", &self.access_token)
			.finish()
	}
}
