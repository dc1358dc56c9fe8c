//! Cached bearer token with the refresh safety margin.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Bearer token together with the instant it stops being accepted.
#[derive(Clone)]
pub struct CachedToken {
	/// Access token secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Expiry instant derived from the issue time plus `expires_in`.
	pub expires_at: OffsetDateTime,
}
impl CachedToken {
	/// Tokens closer than this to their expiry are refreshed before use.
	pub const REFRESH_MARGIN: Duration = Duration::seconds(30);

	/// Creates a cached token with an absolute expiry.
	pub fn new(access_token: impl Into<String>, expires_at: OffsetDateTime) -> Self {
		Self { access_token: TokenSecret::new(access_token), expires_at }
	}

	/// Creates a cached token from a relative lifetime measured from `issued_at`.
	pub fn from_expires_in(
		access_token: impl Into<String>,
		issued_at: OffsetDateTime,
		expires_in: Duration,
	) -> Self {
		Self::new(access_token, issued_at + expires_in)
	}

	/// Returns `true` when the token may still be handed out at `instant`, i.e. it is
	/// non-empty and expires strictly after `instant + REFRESH_MARGIN`.
	pub fn is_usable_at(&self, instant: OffsetDateTime) -> bool {
		!self.access_token.is_empty() && instant + Self::REFRESH_MARGIN < self.expires_at
	}

	/// Convenience helper that checks usability against the current UTC instant.
	pub fn is_usable(&self) -> bool {
		self.is_usable_at(OffsetDateTime::now_utc())
	}

	/// Remaining lifetime at `instant`, clamped to zero.
	pub fn remaining_at(&self, instant: OffsetDateTime) -> Duration {
		let remaining = self.expires_at - instant;

		if remaining.is_negative() { Duration::ZERO } else { remaining }
	}
}
impl Debug for CachedToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CachedToken")
			.field("access_token", &self.access_token)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;

	#[test]
	fn refresh_margin_boundaries() {
		let now = datetime!(2025-01-01 00:00 UTC);
		let stale = CachedToken::from_expires_in("stale", now, Duration::seconds(29));
		let edge = CachedToken::from_expires_in("edge", now, Duration::seconds(30));
		let fresh = CachedToken::from_expires_in("fresh", now, Duration::seconds(31));

		assert!(!stale.is_usable_at(now));
		assert!(!edge.is_usable_at(now));
		assert!(fresh.is_usable_at(now));
	}

	#[test]
	fn empty_token_is_never_usable() {
		let now = datetime!(2025-01-01 00:00 UTC);
		let token = CachedToken::from_expires_in("", now, Duration::hours(1));

		assert!(!token.is_usable_at(now));
	}

	#[test]
	fn remaining_clamps_to_zero() {
		let now = datetime!(2025-01-01 00:00 UTC);
		let token = CachedToken::new("gone", now - Duration::minutes(5));

		assert_eq!(token.remaining_at(now), Duration::ZERO);
		assert_eq!(
			CachedToken::new("live", now + Duration::minutes(5)).remaining_at(now),
			Duration::minutes(5)
		);
	}

	#[test]
	fn debug_redacts_token() {
		let token = CachedToken::new("secret", datetime!(2025-01-01 00:00 UTC));

		assert!(!format!("{token:?}").contains("secret\""));
	}
}
