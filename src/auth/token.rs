//! Token exchange outcomes: issued access tokens or provider error payloads.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Exact byte length of authorization codes accepted by the token exchange.
pub const AUTHORIZATION_CODE_LEN: usize = 40;

/// Access token issued by the provider and retained by the client.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
	/// Token secret; callers must avoid logging it.
	pub secret: TokenSecret,
	/// `token_type` reported alongside the token, when present.
	pub token_type: Option<String>,
	/// Instant the client decoded the token response.
	pub obtained_at: OffsetDateTime,
}
impl AccessToken {
	/// Wraps a freshly issued token.
	pub fn new(secret: impl Into<String>, token_type: Option<String>) -> Self {
		Self { secret: TokenSecret::new(secret), token_type, obtained_at: OffsetDateTime::now_utc() }
	}

	/// Returns the raw token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		self.secret.expose()
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("secret", &self.secret)
			.field("token_type", &self.token_type)
			.field("obtained_at", &self.obtained_at)
			.finish()
	}
}

/// Decoded token endpoint body that carried no `access_token`.
///
/// The provider imposes no schema on failed exchanges, so the body is kept verbatim for
/// callers to inspect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProviderErrorPayload {
	/// HTTP status code reported by the transport.
	pub status: u16,
	/// Decoded response body.
	pub body: JsonValue,
}
impl ProviderErrorPayload {
	/// Collects human-readable messages from the common provider error shapes.
	///
	/// Arrays of `{"property", "message"}` objects yield every `message`; OAuth-style
	/// objects yield `error_description`, falling back to `error`.
	pub fn messages(&self) -> Vec<&str> {
		match &self.body {
			JsonValue::Array(items) =>
				items.iter().filter_map(|item| item.get("message")?.as_str()).collect(),
			JsonValue::Object(map) => map
				.get("error_description")
				.or_else(|| map.get("error"))
				.and_then(JsonValue::as_str)
				.into_iter()
				.collect(),
			_ => Vec::new(),
		}
	}
}

/// Result of a completed token exchange round trip.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenOutcome {
	/// Provider issued an access token.
	AccessToken(AccessToken),
	/// Provider answered without an access token.
	ProviderError(ProviderErrorPayload),
}
impl TokenOutcome {
	/// Interprets a decoded token endpoint body.
	///
	/// Only a string `access_token` member counts as an issued token. A member holding any
	/// other JSON type (`{"access_token":42}`, `null`, an object) is treated like a missing
	/// one, and the body comes back whole as a [`ProviderErrorPayload`].
	pub fn from_response_body(status: u16, body: JsonValue) -> Self {
		let issued = body.get("access_token").and_then(JsonValue::as_str).map(|secret| {
			let token_type =
				body.get("token_type").and_then(JsonValue::as_str).map(ToOwned::to_owned);

			AccessToken::new(secret, token_type)
		});

		match issued {
			Some(token) => Self::AccessToken(token),
			None => Self::ProviderError(ProviderErrorPayload { status, body }),
		}
	}

	/// Returns the issued token, if any.
	pub fn access_token(&self) -> Option<&AccessToken> {
		match self {
			Self::AccessToken(token) => Some(token),
			Self::ProviderError(_) => None,
		}
	}

	/// Converts the outcome into a standard [`Result`](std::result::Result).
	pub fn into_result(self) -> std::result::Result<AccessToken, ProviderErrorPayload> {
		match self {
			Self::AccessToken(token) => Ok(token),
			Self::ProviderError(payload) => Err(payload),
		}
	}
}
