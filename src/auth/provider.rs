//! Token provider that owns the cached management token.

// self
use crate::{
	_prelude::*,
	auth::{CachedToken, TokenSecret},
	config::AuthMethod,
	error::AuthenticationError,
	http::ReqwestHttpClient,
	oauth,
	obs::{self, Outcome, TokenGrant},
};

/// Issues bearer tokens for management calls.
///
/// Static tokens are returned as-is. Client-credentials tokens are cached and reused until
/// they come within [`CachedToken::REFRESH_MARGIN`] of expiry. The cache lock is held across
/// the freshness check and any refresh, so concurrent callers never issue duplicate token
/// requests; they wait for the holder and then observe its result.
pub struct TokenProvider {
	auth: AuthMethod,
	token_endpoint: Url,
	http_client: ReqwestHttpClient,
	cache: AsyncMutex<Option<CachedToken>>,
}
impl TokenProvider {
	/// Creates a provider with an empty cache.
	pub fn new(auth: AuthMethod, token_endpoint: Url, http_client: ReqwestHttpClient) -> Self {
		Self { auth, token_endpoint, http_client, cache: AsyncMutex::new(None) }
	}

	/// Seeds the cache with a previously issued token.
	pub fn with_cached_token(mut self, token: CachedToken) -> Self {
		self.cache = AsyncMutex::new(Some(token));

		self
	}

	/// Configured authentication method.
	pub fn auth_method(&self) -> &AuthMethod {
		&self.auth
	}

	/// Token endpoint used for exchanges.
	pub fn token_endpoint(&self) -> &Url {
		&self.token_endpoint
	}

	/// Snapshot of the cached token, if any.
	pub async fn cached_token(&self) -> Option<CachedToken> {
		self.cache.lock().await.clone()
	}

	/// Returns a bearer token, refreshing the cached client-credentials token when needed.
	pub async fn get_token(&self) -> Result<TokenSecret, AuthenticationError> {
		let (client_id, client_secret) = match &self.auth {
			AuthMethod::StaticToken(token) => return Ok(token.clone()),
			AuthMethod::ClientCredentials { client_id, client_secret } =>
				(client_id, client_secret),
		};
		let mut cache = self.cache.lock().await;

		if let Some(token) = cache.as_ref().filter(|token| token.is_usable()) {
			return Ok(token.access_token.clone());
		}

		obs::record_token_request(TokenGrant::ClientCredentials, Outcome::Attempt);

		let span = obs::OperationSpan::new("fetch access token");
		let result = span
			.instrument(oauth::exchange_client_credentials(
				&self.http_client,
				&self.token_endpoint,
				client_id,
				client_secret,
			))
			.await;

		obs::record_token_request(TokenGrant::ClientCredentials, Outcome::of(&result));

		let token = result?;
		let access_token = token.access_token.clone();

		*cache = Some(token);

		Ok(access_token)
	}

	/// Exchanges the root-organization token for one scoped to `organization_id`.
	///
	/// Requires client credentials. The exchanged token is not cached.
	pub async fn exchange_for_organization(&self, organization_id: &str) -> Result<TokenSecret> {
		if organization_id.is_empty() {
			return Err(Error::InvalidArgument { name: "organization_id" });
		}

		let AuthMethod::ClientCredentials { client_id, client_secret } = &self.auth else {
			return Err(AuthenticationError::ClientCredentialsRequired.into());
		};
		let base_token = self.get_token().await?;

		obs::record_token_request(TokenGrant::OrganizationSwitch, Outcome::Attempt);

		let span = obs::OperationSpan::new("switch organization").with_target(organization_id);
		let result = span
			.instrument(oauth::exchange_organization_switch(
				&self.http_client,
				&self.token_endpoint,
				client_id,
				client_secret,
				&base_token,
				organization_id,
			))
			.await;

		obs::record_token_request(TokenGrant::OrganizationSwitch, Outcome::of(&result));

		Ok(result?)
	}
}
impl Debug for TokenProvider {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenProvider")
			.field("auth", &self.auth)
			.field("token_endpoint", &self.token_endpoint.as_str())
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn provider(auth: AuthMethod) -> TokenProvider {
		TokenProvider::new(
			auth,
			Url::parse("http://127.0.0.1:9/oauth2/token").expect("Token endpoint should parse."),
			ReqwestHttpClient::default(),
		)
	}

	#[tokio::test]
	async fn static_token_is_returned_verbatim() {
		let provider = provider(AuthMethod::StaticToken(TokenSecret::new("static")));
		let token = provider.get_token().await.expect("Static token should be returned.");

		assert_eq!(token.expose(), "static");
		assert!(provider.cached_token().await.is_none());
	}

	#[tokio::test]
	async fn fresh_cached_token_skips_network() {
		let provider = provider(AuthMethod::ClientCredentials {
			client_id: "id".into(),
			client_secret: TokenSecret::new("secret"),
		})
		.with_cached_token(CachedToken::new(
			"cached",
			OffsetDateTime::now_utc() + Duration::minutes(10),
		));
		let token = provider.get_token().await.expect("Cached token should be reused.");

		assert_eq!(token.expose(), "cached");
	}

	#[tokio::test]
	async fn organization_switch_requires_client_credentials() {
		let provider = provider(AuthMethod::StaticToken(TokenSecret::new("static")));
		let err = provider
			.exchange_for_organization("org-1")
			.await
			.expect_err("Static token configuration should not switch organizations.");

		assert!(matches!(
			err,
			Error::Authentication(AuthenticationError::ClientCredentialsRequired)
		));

		let err = provider
			.exchange_for_organization("")
			.await
			.expect_err("Empty organization id should be rejected.");

		assert!(matches!(err, Error::InvalidArgument { name: "organization_id" }));
	}
}
