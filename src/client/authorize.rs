//! Authorize URL construction.
//!
//! The URL is `{auth_url}/?client_id=..&scope=..&redirect_uri=..&response_type=code`, with
//! the parameters in exactly that order. Every value first goes through
//! [`sanitize_markup`] and is then form-encoded (`application/x-www-form-urlencoded`, so
//! spaces become `+`).

// std
use std::borrow::Cow;
// self
use crate::{
	_prelude::*,
	client::AuthClient,
	config::ConfigKey,
	http::{Transport, encode_form},
	obs::{self, Operation, OperationOutcome},
};

const QUERY_KEYS: [ConfigKey; 3] = [ConfigKey::ClientId, ConfigKey::Scope, ConfigKey::RedirectUri];

impl<T> AuthClient<T>
where
	T: Transport,
{
	/// Builds the URL end users visit to grant access.
	///
	/// Fails with `MissingRequired` naming the first unset required key (schema order).
	pub fn create_auth_url(&self) -> Result<String> {
		obs::observe(Operation::CreateAuthUrl, || self.build_auth_url(), OperationOutcome::of)
	}

	fn build_auth_url(&self) -> Result<String> {
		self.validator.validate_complete(&self.config)?;

		let config = &self.config;
		let query = encode_form(
			QUERY_KEYS
				.iter()
				.map(|key| (key.as_str(), sanitize_markup(config.get(*key).unwrap_or_default())))
				.chain([("response_type", sanitize_markup(config.response_type()))]),
		);

		Ok(format!("{}/?{query}", sanitize_markup(config.auth_url())))
	}
}

/// Strips markup from a value before it is embedded in a URL.
///
/// - Tags are removed: everything from `<` through the next `>` (or the end of input).
/// - NUL bytes are removed.
/// - `"` becomes `&#34;` and `'` becomes `&#39;`.
///
/// Ordinary URL-safe input comes back borrowed and unchanged.
pub fn sanitize_markup(value: &str) -> Cow<'_, str> {
	if !value.contains(['<', '>', '"', '\'', '\0']) {
		return Cow::Borrowed(value);
	}

	let mut clean = String::with_capacity(value.len());
	let mut in_tag = false;

	for ch in value.chars() {
		match (in_tag, ch) {
			(true, '>') => in_tag = false,
			(true, _) => {},
			(false, '<') => in_tag = true,
			(false, '\0') => {},
			(false, '"') => clean.push_str("&#34;"),
			(false, '\'') => clean.push_str("&#39;"),
			(false, ch) => clean.push(ch),
		}
	}

	Cow::Owned(clean)
}
