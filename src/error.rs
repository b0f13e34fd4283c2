//! Client-level error types shared across configuration, token exchange, and transports.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration or input validation problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Token endpoint answered with a body that is not valid JSON.
	#[error("Token endpoint returned malformed JSON (HTTP {status}).")]
	MalformedResponse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code reported by the transport.
		status: u16,
	},
}

/// Configuration and validation failures raised synchronously by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Key is not part of the configuration schema.
	#[error("Config key `{key}` is not recognized.")]
	UnknownKey {
		/// Offending key as supplied by the caller.
		key: String,
	},
	/// Value violates the enumerated constraint declared for its key.
	#[error("Value `{value}` is invalid for config key `{key}`.")]
	InvalidValue {
		/// Key being assigned.
		key: &'static str,
		/// Full value as supplied by the caller.
		value: String,
	},
	/// A required key is unset.
	#[error("Required config key `{key}` is not set.")]
	MissingRequired {
		/// First missing key in schema order.
		key: &'static str,
	},
	/// Authorization code does not have the expected shape.
	#[error("Invalid code: expected 40 characters, got {length}.")]
	InvalidCode {
		/// Byte length of the rejected code.
		length: usize,
	},
	/// Config source could not be read.
	#[error("Config source {} could not be read.", .path.display())]
	SourceRead {
		/// Path that failed to load.
		path: PathBuf,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
	/// Config source is not a valid configuration document.
	#[error("Config source is malformed.")]
	SourceDecode {
		/// Structured decoding failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Transport option carries a value of the wrong shape.
	#[error("Transport option `{name}` is invalid: {reason}.")]
	InvalidTransportOption {
		/// Option name.
		name: String,
		/// What was expected.
		reason: &'static str,
	},
	/// HTTP method is not supported by the transport surface.
	#[error("HTTP method `{method}` is not supported.")]
	UnsupportedMethod {
		/// Method as supplied by the caller.
		method: String,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {url}.")]
	Network {
		/// Target URL of the failed request.
		url: String,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred during transport.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(
		url: impl Into<String>,
		src: impl 'static + Send + Sync + StdError,
	) -> Self {
		Self::Network { url: url.into(), source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		let url = e.url().map(|url| url.to_string()).unwrap_or_default();

		Self::network(url, e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn config_errors_render_offending_input() {
		let err = ConfigError::InvalidValue { key: "scope", value: "123".into() };

		assert_eq!(err.to_string(), "Value `123` is invalid for config key `scope`.");

		let err: Error = ConfigError::MissingRequired { key: "redirect_uri" }.into();

		assert_eq!(err.to_string(), "Required config key `redirect_uri` is not set.");
	}
}
