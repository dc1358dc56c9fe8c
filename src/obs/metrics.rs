// self
use crate::obs::{Outcome, TokenGrant};

/// Records a REST or composite operation outcome via the global metrics recorder (when
/// enabled).
pub fn record_operation_outcome(operation: &'static str, outcome: Outcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"asgardeo_operation_total",
			"operation" => operation,
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (operation, outcome);
	}
}

/// Records a token-endpoint exchange outcome via the global metrics recorder (when enabled).
pub fn record_token_request(grant: TokenGrant, outcome: Outcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"asgardeo_token_request_total",
			"grant" => grant.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (grant, outcome);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recorders_noop_without_metrics() {
		record_operation_outcome("list applications", Outcome::Failure);
		record_token_request(TokenGrant::OrganizationSwitch, Outcome::Attempt);
	}
}
