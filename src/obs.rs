//! Optional observability around the three client operations.
//!
//! [`observe`] and [`observe_sync`] wrap an operation in a `searchads.operation` span,
//! count the attempt, then count and time the outcome. Both features compile to no-ops
//! when disabled.
//!
//! # Feature Flags
//!
//! - `tracing`: spans carry `operation` (sign/exchange/call) and `stage` fields; debug
//!   events describe the outbound method + URL and the response status. Tokens and
//!   assertions are never recorded.
//! - `metrics`: [`OPERATION_TOTAL`] counts attempts and outcomes and
//!   [`OPERATION_DURATION`] times completed operations, labeled by `operation` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// std
use std::time::Instant;
// self
use crate::_prelude::*;

/// Client operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
	/// Client assertion signing.
	Sign,
	/// Assertion-for-token exchange.
	Exchange,
	/// Authenticated API call.
	Call,
}
impl OpKind {
	/// Metric/span label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Sign => "sign",
			Self::Exchange => "exchange",
			Self::Call => "call",
		}
	}
}

/// Outcome label of an operation.
///
/// A provider error payload returned as a value still counts as [`OpOutcome::Success`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpOutcome {
	/// Operation entered.
	Attempt,
	/// Operation returned `Ok`.
	Success,
	/// Operation returned an [`Error`].
	Failure,
}
impl OpOutcome {
	/// Classifies a finished operation.
	pub fn of<T>(result: &Result<T>) -> Self {
		if result.is_ok() { Self::Success } else { Self::Failure }
	}

	/// Metric/span label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Attempt => "attempt",
			Self::Success => "success",
			Self::Failure => "failure",
		}
	}
}

/// Runs `fut` inside an operation span and records its attempt, outcome, and latency.
pub async fn observe<F, T>(kind: OpKind, stage: &'static str, fut: F) -> Result<T>
where
	F: Future<Output = Result<T>>,
{
	let span = OpSpan::new(kind, stage);
	let started = Instant::now();

	record_op_outcome(kind, OpOutcome::Attempt);

	let result = span.instrument(fut).await;

	finish(kind, started, &result);

	result
}

/// Synchronous counterpart of [`observe`].
pub fn observe_sync<F, T>(kind: OpKind, stage: &'static str, op: F) -> Result<T>
where
	F: FnOnce() -> Result<T>,
{
	let _guard = OpSpan::new(kind, stage).entered();
	let started = Instant::now();

	record_op_outcome(kind, OpOutcome::Attempt);

	let result = op();

	finish(kind, started, &result);

	result
}

fn finish<T>(kind: OpKind, started: Instant, result: &Result<T>) {
	let outcome = OpOutcome::of(result);

	record_op_outcome(kind, outcome);
	record_op_duration(kind, outcome, started.elapsed());
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::ConfigError;

	#[test]
	fn outcome_follows_the_result() {
		assert_eq!(OpOutcome::of(&Ok::<_, Error>(())), OpOutcome::Success);
		assert_eq!(
			OpOutcome::of(&Err::<(), _>(ConfigError::MissingBearerToken.into())),
			OpOutcome::Failure
		);
	}

	#[tokio::test]
	async fn observe_passes_results_through() {
		let value = observe(OpKind::Call, "test", async { Ok(42) }).await.expect("Ok passes through.");
		let err = observe_sync::<_, ()>(OpKind::Sign, "test", || {
			Err(ConfigError::MissingBearerToken.into())
		})
		.expect_err("Err passes through.");

		assert_eq!(value, 42);
		assert!(matches!(err, Error::Config(ConfigError::MissingBearerToken)));
	}
}
