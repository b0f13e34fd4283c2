//! Authorization code exchange.

// self
use crate::{
	_prelude::*,
	auth::{AUTHORIZATION_CODE_LEN, TokenOutcome},
	client::AuthClient,
	error::ConfigError,
	http::{Transport, TransportRequest, TransportResponse},
	obs::{self, Operation, OperationOutcome},
};

const GRANT_TYPE: &str = "authorization_code";

impl<T> AuthClient<T>
where
	T: Transport,
{
	/// Exchanges an authorization code for an access token.
	///
	/// The code must be exactly 40 bytes long; anything else fails with `InvalidCode`
	/// before the transport is touched. The token endpoint receives a form body with
	/// `code`, `grant_type`, `client_id`, `client_secret`, and `redirect_uri` (unset
	/// values are omitted). A decoded body carrying a string `access_token` is retained on
	/// the client and returned as [`TokenOutcome::AccessToken`]; any other JSON body comes
	/// back verbatim as [`TokenOutcome::ProviderError`]. Bodies that are not JSON fail with
	/// [`Error::MalformedResponse`].
	pub fn authenticate(&mut self, code: &str) -> Result<TokenOutcome> {
		obs::observe(
			Operation::Authenticate,
			|| self.exchange_code(code),
			|result| match result {
				Ok(TokenOutcome::AccessToken(_)) => OperationOutcome::Success,
				Ok(TokenOutcome::ProviderError(_)) | Err(_) => OperationOutcome::Failure,
			},
		)
	}

	fn exchange_code(&mut self, code: &str) -> Result<TokenOutcome> {
		if code.len() != AUTHORIZATION_CODE_LEN {
			return Err(ConfigError::InvalidCode { length: code.len() }.into());
		}

		let config = &self.config;
		let params = [
			("code", Some(code)),
			("grant_type", Some(GRANT_TYPE)),
			("client_id", config.client_id()),
			("client_secret", config.client_secret()),
			("redirect_uri", config.redirect_uri()),
		];
		let request = TransportRequest::form(
			format!("{}/token", config.auth_url()),
			params.into_iter().filter_map(|(key, value)| Some((key, value?))),
		);
		let response = self.transport.execute(&request)?;
		let outcome = TokenOutcome::from_response_body(response.http_code, decode_body(&response)?);

		if let TokenOutcome::AccessToken(token) = &outcome {
			self.access_token = Some(token.clone());
		}

		Ok(outcome)
	}
}

fn decode_body(response: &TransportResponse) -> Result<JsonValue> {
	let mut deserializer = serde_json::Deserializer::from_str(&response.body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| Error::MalformedResponse { source, status: response.http_code })
}
