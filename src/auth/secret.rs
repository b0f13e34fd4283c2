//! Access token material that never reaches `Debug` or `Display` output.

// self
use crate::_prelude::*;

/// Opaque token string.
///
/// Formatting prints `<redacted>` (plus the byte length under `{:?}`), so clients and
/// tokens can be logged as a whole. Use [`expose`](Self::expose) to read the value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Takes ownership of a raw token.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Raw token value.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Byte length.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true for an empty token.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "TokenSecret(<redacted; {} bytes>)", self.len())
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
