//! Schema-driven validation for single assignments and whole configurations.

// self
use crate::{
	config::{CONFIG_SCHEMA, Config, ConfigKey, FieldSpec},
	error::ConfigError,
};

/// Validates configuration keys and values against a [`FieldSpec`] table.
///
/// The validator is pure: it never mutates the configuration it inspects. Clients use
/// [`ConfigValidator::default`], which reads the process-wide [`CONFIG_SCHEMA`].
#[derive(Clone, Copy, Debug)]
pub struct ConfigValidator {
	schema: &'static [FieldSpec],
}
impl ConfigValidator {
	/// Creates a validator over a custom schema table.
	pub const fn new(schema: &'static [FieldSpec]) -> Self {
		Self { schema }
	}

	/// Returns the schema entries in declared order.
	pub fn schema(&self) -> &'static [FieldSpec] {
		self.schema
	}

	/// Resolves a wire key into its schema entry.
	pub fn spec(&self, key: &str) -> Result<&'static FieldSpec, ConfigError> {
		self.schema
			.iter()
			.find(|spec| spec.key.as_str() == key)
			.ok_or_else(|| ConfigError::UnknownKey { key: key.to_owned() })
	}

	/// Checks that `key` is part of the schema and `value` satisfies its constraints.
	pub fn validate_item(&self, key: &str, value: &str) -> Result<ConfigKey, ConfigError> {
		let spec = self.spec(key)?;

		if spec.accepts(value) {
			Ok(spec.key)
		} else {
			Err(ConfigError::InvalidValue { key: spec.key.as_str(), value: value.to_owned() })
		}
	}

	/// Checks that every required key is set, reporting the first gap in schema order.
	pub fn validate_complete(&self, config: &Config) -> Result<(), ConfigError> {
		match self.schema.iter().find(|spec| spec.required && !config.is_set(spec.key)) {
			Some(spec) => Err(ConfigError::MissingRequired { key: spec.key.as_str() }),
			None => Ok(()),
		}
	}
}
impl Default for ConfigValidator {
	fn default() -> Self {
		Self::new(CONFIG_SCHEMA)
	}
}
