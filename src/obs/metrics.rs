// std
use std::time::Duration;
// self
use crate::obs::{Operation, OperationOutcome};

/// Bumps `olx_oauth_operation_total` for `operation` and `outcome`.
pub fn record_operation_outcome(operation: Operation, outcome: OperationOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"olx_oauth_operation_total",
			"operation" => operation.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (operation, outcome);
	}
}

/// Records wall-clock latency in `olx_oauth_operation_duration_seconds`.
pub fn record_operation_duration(operation: Operation, elapsed: Duration) {
	#[cfg(feature = "metrics")]
	{
		metrics::histogram!("olx_oauth_operation_duration_seconds", "operation" => operation.as_str())
			.record(elapsed.as_secs_f64());
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (operation, elapsed);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recording_without_an_installed_recorder_is_silent() {
		record_operation_outcome(Operation::Call, OperationOutcome::Failure);
		record_operation_duration(Operation::CreateAuthUrl, Duration::from_millis(3));
	}
}
