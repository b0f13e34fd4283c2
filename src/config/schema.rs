//! Declarative description of the recognized configuration keys.

// self
use crate::config::ConfigKey;

/// Scope values the provider recognizes.
pub const SCOPE_VALUES: &[&str] = &["basic_user_info", "autoupload"];

/// Process-wide schema, in declared order.
///
/// The order matters: [`ConfigValidator::validate_complete`](crate::config::ConfigValidator::validate_complete)
/// reports the first missing required key it encounters while walking this table.
pub const CONFIG_SCHEMA: &[FieldSpec] = &[
	FieldSpec::required(ConfigKey::ClientId),
	FieldSpec::required(ConfigKey::Scope).allowing(SCOPE_VALUES).multi_valued(),
	FieldSpec::required(ConfigKey::RedirectUri),
	FieldSpec::optional(ConfigKey::State),
	FieldSpec::optional(ConfigKey::ClientSecret),
	FieldSpec::optional(ConfigKey::AppsUrl),
	FieldSpec::optional(ConfigKey::AuthUrl),
	FieldSpec::optional(ConfigKey::TransportOptions),
];

/// Constraints attached to a single configuration key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
	/// Key the constraints apply to.
	pub key: ConfigKey,
	/// Whether the key must be set before an authorize URL can be built.
	pub required: bool,
	/// Closed set of accepted values, when the key is enumerated.
	pub allowed_values: Option<&'static [&'static str]>,
	/// Splits values on single spaces and checks every token against `allowed_values`.
	pub multi_valued: bool,
}
impl FieldSpec {
	/// Declares a required, free-form key.
	pub const fn required(key: ConfigKey) -> Self {
		Self { key, required: true, allowed_values: None, multi_valued: false }
	}

	/// Declares an optional, free-form key.
	pub const fn optional(key: ConfigKey) -> Self {
		Self { key, required: false, allowed_values: None, multi_valued: false }
	}

	/// Restricts the key to the provided values.
	pub const fn allowing(mut self, values: &'static [&'static str]) -> Self {
		self.allowed_values = Some(values);

		self
	}

	/// Marks the key as a space-separated list of enumerated tokens.
	pub const fn multi_valued(mut self) -> Self {
		self.multi_valued = true;

		self
	}

	/// Checks a value against the enumerated constraint (if any).
	pub fn accepts(&self, value: &str) -> bool {
		let Some(allowed) = self.allowed_values else {
			return true;
		};

		if allowed.contains(&value) {
			return true;
		}
		if self.multi_valued {
			return value.split(' ').all(|token| allowed.contains(&token));
		}

		false
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn schema_keeps_declared_order() {
		let keys = CONFIG_SCHEMA.iter().map(|spec| spec.key.as_str()).collect::<Vec<_>>();

		assert_eq!(
			keys,
			[
				"client_id",
				"scope",
				"redirect_uri",
				"state",
				"client_secret",
				"apps_url",
				"auth_url",
				"transportOptions",
			]
		);
		assert_eq!(
			CONFIG_SCHEMA.iter().filter(|spec| spec.required).count(),
			3,
			"Only client_id, scope, and redirect_uri are required."
		);
	}

	#[test]
	fn multi_valued_specs_check_every_token() {
		let spec = FieldSpec::required(ConfigKey::Scope).allowing(SCOPE_VALUES).multi_valued();

		assert!(spec.accepts("basic_user_info"));
		assert!(spec.accepts("basic_user_info autoupload"));
		assert!(!spec.accepts("basic_user_info  autoupload"), "Double spaces yield an empty token.");
		assert!(!spec.accepts("basic_user_info,autoupload"));
		assert!(!spec.accepts(""));
	}

	#[test]
	fn single_valued_specs_require_exact_membership() {
		let spec = FieldSpec::required(ConfigKey::ClientId).allowing(&["xpto"]);

		assert!(spec.accepts("xpto"));
		assert!(!spec.accepts("xpto xpto"));
		assert!(FieldSpec::optional(ConfigKey::State).accepts("anything goes"));
	}
}
