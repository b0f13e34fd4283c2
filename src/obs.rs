//! Instrumentation wrapped around every client operation.
//!
//! [`observe`] runs one operation and reports it through whichever backends are compiled in:
//!
//! - `tracing`: an `olx_oauth.operation` span carrying `operation`, with `outcome` recorded
//!   once the operation returns.
//! - `metrics`: the `olx_oauth_operation_total` counter (labels `operation`, `outcome`) plus
//!   the `olx_oauth_operation_duration_seconds` histogram (label `operation`).
//!
//! With neither feature enabled [`observe`] is a plain call.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// std
use std::time::Instant;
// self
use crate::_prelude::*;

/// Runs `run` inside an operation span and records its outcome and latency.
///
/// `classify` decides which terminal outcome the result counts as; most operations pass
/// [`OperationOutcome::of`].
pub fn observe<T>(
	operation: Operation,
	run: impl FnOnce() -> Result<T>,
	classify: impl FnOnce(&Result<T>) -> OperationOutcome,
) -> Result<T> {
	let span = OperationSpan::new(operation).entered();
	let started = Instant::now();

	record_operation_outcome(operation, OperationOutcome::Attempt);

	let result = run();
	let outcome = classify(&result);

	span.record_outcome(outcome);
	record_operation_outcome(operation, outcome);
	record_operation_duration(operation, started.elapsed());

	result
}

/// Public client entry points that get instrumented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// Authorize URL construction.
	CreateAuthUrl,
	/// Authorization code exchange.
	Authenticate,
	/// Apps API pass-through call.
	Call,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::CreateAuthUrl => "create_auth_url",
			Operation::Authenticate => "authenticate",
			Operation::Call => "call",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// `outcome` label values. Every operation records `Attempt` first, then exactly one of
/// `Success` or `Failure`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl OperationOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationOutcome::Attempt => "attempt",
			OperationOutcome::Success => "success",
			OperationOutcome::Failure => "failure",
		}
	}

	/// Maps a result onto its terminal outcome.
	pub fn of<T, E>(result: &std::result::Result<T, E>) -> Self {
		match result {
			Ok(_) => OperationOutcome::Success,
			Err(_) => OperationOutcome::Failure,
		}
	}
}
impl Display for OperationOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::ConfigError;

	#[test]
	fn observe_returns_the_wrapped_result() {
		let value =
			observe(Operation::Call, || Ok(7), OperationOutcome::of).expect("Ok passes through.");

		assert_eq!(value, 7);

		let err = observe(
			Operation::Authenticate,
			|| Err::<(), _>(ConfigError::InvalidCode { length: 3 }.into()),
			OperationOutcome::of,
		)
		.expect_err("Err passes through.");

		assert!(matches!(err, Error::Config(ConfigError::InvalidCode { length: 3 })));
	}

	#[test]
	fn outcomes_follow_results() {
		assert_eq!(OperationOutcome::of(&Ok::<_, ()>(())), OperationOutcome::Success);
		assert_eq!(OperationOutcome::of(&Err::<(), _>(())), OperationOutcome::Failure);
		assert_eq!(OperationOutcome::Attempt.to_string(), "attempt");
	}
}
