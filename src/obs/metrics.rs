// std
use std::time::Duration as StdDuration;
// self
use crate::obs::{OpKind, OpOutcome};

/// Counter incremented once per attempt and once per outcome.
pub const OPERATION_TOTAL: &str = "searchads_operation_total";
/// Histogram of completed operation latencies, in seconds.
pub const OPERATION_DURATION: &str = "searchads_operation_duration_seconds";

/// Counts one attempt or outcome of `kind` (when the `metrics` feature is enabled).
pub fn record_op_outcome(kind: OpKind, outcome: OpOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(OPERATION_TOTAL, "operation" => kind.as_str(), "outcome" => outcome.as_str())
			.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records how long a finished operation took, labeled by its outcome.
pub fn record_op_duration(kind: OpKind, outcome: OpOutcome, elapsed: StdDuration) {
	#[cfg(feature = "metrics")]
	{
		metrics::histogram!(
			OPERATION_DURATION,
			"operation" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.record(elapsed.as_secs_f64());
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome, elapsed);
	}
}
