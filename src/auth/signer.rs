//! Request-signing capability used by the REST layer.

// crates.io
use reqwest::RequestBuilder;
// self
use crate::{
	_prelude::*,
	auth::{TokenProvider, TokenSecret},
	error::AuthenticationError,
};

/// Future returned by [`RequestSigner::sign`].
pub type SignFuture<'a> =
	Pin<Box<dyn Future<Output = Result<RequestBuilder, AuthenticationError>> + 'a + Send>>;

/// Attaches `Authorization: Bearer <token>` to an outgoing request.
///
/// Implementations must not touch any other header. A failure aborts the call before it is
/// sent.
pub trait RequestSigner
where
	Self: Send + Sync,
{
	/// Returns `request` carrying a bearer token.
	fn sign(&self, request: RequestBuilder) -> SignFuture<'_>;
}
impl RequestSigner for TokenProvider {
	fn sign(&self, request: RequestBuilder) -> SignFuture<'_> {
		Box::pin(async move {
			let token = self.get_token().await?;

			Ok(request.bearer_auth(token.expose()))
		})
	}
}

/// Signer that always presents the same token, e.g. one obtained through an organization
/// switch.
#[derive(Clone, Debug)]
pub struct FixedTokenSigner(TokenSecret);
impl FixedTokenSigner {
	/// Wraps `token`.
	pub fn new(token: TokenSecret) -> Self {
		Self(token)
	}
}
impl RequestSigner for FixedTokenSigner {
	fn sign(&self, request: RequestBuilder) -> SignFuture<'_> {
		let token = self.0.clone();

		Box::pin(async move { Ok(request.bearer_auth(token.expose())) })
	}
}
