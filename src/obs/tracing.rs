// self
use crate::_prelude::*;

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOperation<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOperation<F> = F;

/// Span wrapper used around REST calls and composite operations.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Creates a span labeled with the operation name.
	pub fn new(operation: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"asgardeo.operation",
				operation,
				target = tracing::field::Empty
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = operation;

			Self {}
		}
	}

	/// Records the resource identifier the operation targets.
	pub fn with_target(self, target: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			self.span.record("target", target);
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = target;
		}

		self
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOperation<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a debug event for a login-flow generation that is still running.
pub fn trace_login_flow_poll(operation_id: &str, attempt: u32) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(operation_id, attempt, "login flow generation still in progress");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (operation_id, attempt);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_passes_output_through() {
		let span = OperationSpan::new("instrument_passes_output_through").with_target("app-1");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}

	#[test]
	fn poll_trace_is_callable_without_subscriber() {
		trace_login_flow_poll("op-1", 3);
	}
}
