//! Lifecycle state derived from a client's configuration and token.

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	config::{Config, ConfigValidator},
};

/// Coarse lifecycle of an [`AuthClient`](crate::AuthClient).
///
/// Failed validation or authentication never advances the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClientState {
	/// Every key still holds its default value.
	Unconfigured,
	/// Some key differs from its default (endpoint overrides and transport options
	/// included) but a required key is still missing.
	PartiallyConfigured,
	/// Every required key is set; authorize URLs can be built.
	FullyConfigured,
	/// A token exchange succeeded and its access token is retained.
	Authenticated,
}
impl ClientState {
	/// Derives the state from the client's parts.
	pub fn derive(
		config: &Config,
		validator: &ConfigValidator,
		token: Option<&AccessToken>,
	) -> Self {
		if token.is_some() {
			return Self::Authenticated;
		}
		if validator.validate_complete(config).is_ok() {
			return Self::FullyConfigured;
		}
		if *config != Config::default() {
			return Self::PartiallyConfigured;
		}

		Self::Unconfigured
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ClientState::Unconfigured => "unconfigured",
			ClientState::PartiallyConfigured => "partially_configured",
			ClientState::FullyConfigured => "fully_configured",
			ClientState::Authenticated => "authenticated",
		}
	}
}
impl Display for ClientState {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn state_tracks_configuration_progress() {
		let validator = ConfigValidator::default();
		let mut config = Config::default();

		assert_eq!(ClientState::derive(&config, &validator, None), ClientState::Unconfigured);

		config.auth_url = "https://auth.example.com/oauth".into();

		assert_eq!(
			ClientState::derive(&config, &validator, None),
			ClientState::PartiallyConfigured
		);

		config = Config::default();
		config.transport_options.insert("timeout", 5);

		assert_eq!(
			ClientState::derive(&config, &validator, None),
			ClientState::PartiallyConfigured
		);

		config = Config::default();
		config.state = Some("xxxxx".into());

		assert_eq!(
			ClientState::derive(&config, &validator, None),
			ClientState::PartiallyConfigured
		);

		config.client_id = Some("123".into());
		config.scope = Some("basic_user_info".into());
		config.redirect_uri = Some("https://teste.com.br/return_page".into());

		assert_eq!(ClientState::derive(&config, &validator, None), ClientState::FullyConfigured);

		let token = AccessToken::new("86f7e437faa5a7fce15d1ddcb9eaeaea377667b8", None);

		assert_eq!(
			ClientState::derive(&config, &validator, Some(&token)),
			ClientState::Authenticated
		);
	}
}
