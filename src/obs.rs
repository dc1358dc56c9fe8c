//! Optional observability helpers for token exchanges and REST operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit spans named `asgardeo.operation` carrying the `operation` label
//!   and, when known, the `target` resource id, plus `debug` events while login flows poll.
//! - Enable `metrics` to increment `asgardeo_operation_total` (labels `operation`, `outcome`)
//!   and `asgardeo_token_request_total` (labels `grant`, `outcome`).

mod metrics;
mod tracing;

pub use self::{metrics::*, tracing::*};

// self
use crate::_prelude::*;

/// Token-endpoint grants issued by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenGrant {
	/// Client-credentials grant for the root organization.
	ClientCredentials,
	/// Organization-switch grant for a sub-organization.
	OrganizationSwitch,
}
impl TokenGrant {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			TokenGrant::ClientCredentials => "client_credentials",
			TokenGrant::OrganizationSwitch => "organization_switch",
		}
	}
}
impl Display for TokenGrant {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// Entry to an instrumented call.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl Outcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Attempt => "attempt",
			Outcome::Success => "success",
			Outcome::Failure => "failure",
		}
	}

	/// Maps a result to [`Outcome::Success`] or [`Outcome::Failure`].
	pub fn of<T, E>(result: &Result<T, E>) -> Self {
		if result.is_ok() { Outcome::Success } else { Outcome::Failure }
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Runs `fut` inside an operation span, records its outcome, and labels any error with the
/// operation and target.
pub(crate) async fn observe<T, F>(operation: &'static str, target: Option<&str>, fut: F) -> Result<T>
where
	F: Future<Output = Result<T>>,
{
	let mut span = OperationSpan::new(operation);

	if let Some(target) = target {
		span = span.with_target(target);
	}

	record_operation_outcome(operation, Outcome::Attempt);

	let result = span.instrument(fut).await;

	record_operation_outcome(operation, Outcome::of(&result));

	match target {
		Some(target) => result.context_with(operation, target),
		None => result.context(operation),
	}
}
