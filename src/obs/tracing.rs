// self
use crate::{
	_prelude::*,
	obs::{Operation, OperationOutcome},
};

/// Span covering one client operation; inert unless the `tracing` feature is enabled.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Opens an `olx_oauth.operation` span with an empty `outcome` slot.
	pub fn new(operation: Operation) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"olx_oauth.operation",
				operation = operation.as_str(),
				outcome = tracing::field::Empty,
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = operation;

			Self {}
		}
	}

	/// Enters the span until the returned guard drops.
	pub fn entered(self) -> OperationSpanGuard {
		#[cfg(feature = "tracing")]
		{
			OperationSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			OperationSpanGuard {}
		}
	}
}

/// Guard keeping an [`OperationSpan`] entered.
pub struct OperationSpanGuard {
	#[cfg(feature = "tracing")]
	guard: tracing::span::EnteredSpan,
}
impl OperationSpanGuard {
	/// Fills the span's `outcome` field.
	pub fn record_outcome(&self, outcome: OperationOutcome) {
		#[cfg(feature = "tracing")]
		{
			self.guard.record("outcome", outcome.as_str());
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = outcome;
		}
	}
}
impl Debug for OperationSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("OperationSpanGuard(..)")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn guards_accept_outcomes_with_or_without_a_subscriber() {
		let guard = OperationSpan::new(Operation::Authenticate).entered();

		guard.record_outcome(OperationOutcome::Success);

		assert_eq!(format!("{guard:?}"), "OperationSpanGuard(..)");
	}
}
