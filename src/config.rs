//! Client configuration: base URL, transport, timeout, and exactly one authentication method.

// std
use std::time::Duration as StdDuration;
// crates.io
use reqwest::redirect::Policy;
// self
use crate::{
	_prelude::*,
	auth::{CachedToken, TokenProvider, TokenSecret},
	error::ConfigError,
	http::ReqwestHttpClient,
};

/// Request timeout applied to the default transport.
pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(30);
/// Token endpoint path relative to the tenant base URL.
pub const TOKEN_ENDPOINT_PATH: &str = "/oauth2/token";

/// How the client authenticates its management calls.
#[derive(Clone)]
pub enum AuthMethod {
	/// Pre-issued bearer token used verbatim, with no expiry tracking.
	StaticToken(TokenSecret),
	/// OAuth 2.0 client-credentials grant against the tenant token endpoint.
	ClientCredentials {
		/// OAuth client identifier.
		client_id: String,
		/// OAuth client secret.
		client_secret: TokenSecret,
	},
}
impl Debug for AuthMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			AuthMethod::StaticToken(_) => f.write_str("StaticToken(<redacted>)"),
			AuthMethod::ClientCredentials { client_id, .. } => f
				.debug_struct("ClientCredentials")
				.field("client_id", client_id)
				.field("client_secret", &"<redacted>")
				.finish(),
		}
	}
}

/// Immutable configuration shared by every service client derived from it.
///
/// The token cache lives inside [`ClientConfig::token_provider`], so cloning the surrounding
/// `Arc` shares one cache across all services.
#[derive(Clone, Debug)]
pub struct ClientConfig {
	base_url: Url,
	http_client: ReqwestClient,
	timeout: StdDuration,
	token_provider: Arc<TokenProvider>,
}
impl ClientConfig {
	/// Starts a builder for the tenant rooted at `base_url`
	/// (for example `https://api.asgardeo.io/t/acme`).
	pub fn builder(base_url: impl Into<String>) -> ClientConfigBuilder {
		ClientConfigBuilder::new(base_url)
	}

	/// Tenant base URL without a trailing slash.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// HTTP transport shared by REST calls and token exchanges.
	pub fn http_client(&self) -> &ReqwestClient {
		&self.http_client
	}

	/// Timeout applied to the default transport.
	pub fn timeout(&self) -> StdDuration {
		self.timeout
	}

	/// Configured authentication method.
	pub fn auth_method(&self) -> &AuthMethod {
		self.token_provider.auth_method()
	}

	/// Token provider owning the cached bearer token.
	pub fn token_provider(&self) -> &Arc<TokenProvider> {
		&self.token_provider
	}
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
	base_url: String,
	http_client: Option<ReqwestClient>,
	timeout: StdDuration,
	static_token: Option<String>,
	client_credentials: Option<(String, String)>,
	cached_token: Option<CachedToken>,
}
impl ClientConfigBuilder {
	fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into(),
			http_client: None,
			timeout: DEFAULT_TIMEOUT,
			static_token: None,
			client_credentials: None,
			cached_token: None,
		}
	}

	/// Replaces the default transport. The supplied client keeps its own timeout and redirect
	/// policy.
	pub fn http_client(mut self, client: ReqwestClient) -> Self {
		self.http_client = Some(client);

		self
	}

	/// Overrides the request timeout of the default transport.
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Authenticates with a pre-issued bearer token.
	pub fn static_token(mut self, token: impl Into<String>) -> Self {
		self.static_token = Some(token.into());

		self
	}

	/// Authenticates through the client-credentials grant.
	pub fn client_credentials(
		mut self,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> Self {
		self.client_credentials = Some((client_id.into(), client_secret.into()));

		self
	}

	/// Seeds the token cache, skipping the first exchange while the token stays fresh.
	pub fn cached_token(mut self, token: CachedToken) -> Self {
		self.cached_token = Some(token);

		self
	}

	/// Validates the inputs and builds the configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let trimmed = self.base_url.trim().trim_end_matches('/');
		let base_url = Url::parse(trimmed)
			.map_err(|source| ConfigError::InvalidBaseUrl { url: self.base_url.clone(), source })?;
		let auth = match (self.static_token, self.client_credentials) {
			(None, None) => return Err(ConfigError::MissingAuthMethod),
			(Some(_), Some(_)) => return Err(ConfigError::ConflictingAuthMethods),
			(Some(token), None) => {
				if token.is_empty() {
					return Err(ConfigError::EmptyStaticToken);
				}

				AuthMethod::StaticToken(TokenSecret::new(token))
			},
			(None, Some((client_id, client_secret))) => {
				if client_id.is_empty() || client_secret.is_empty() {
					return Err(ConfigError::EmptyClientCredentials);
				}

				AuthMethod::ClientCredentials {
					client_id,
					client_secret: TokenSecret::new(client_secret),
				}
			},
		};
		let http_client = match self.http_client {
			Some(client) => client,
			None => ReqwestClient::builder().timeout(self.timeout).redirect(Policy::none()).build()?,
		};
		let token_endpoint = join_endpoint(&base_url, TOKEN_ENDPOINT_PATH)?;
		let mut token_provider =
			TokenProvider::new(auth, token_endpoint, ReqwestHttpClient::with_client(http_client.clone()));

		if let Some(token) = self.cached_token {
			token_provider = token_provider.with_cached_token(token);
		}

		Ok(ClientConfig {
			base_url,
			http_client,
			timeout: self.timeout,
			token_provider: Arc::new(token_provider),
		})
	}
}

/// Appends `path` to `base` without discarding the tenant path segments of `base`.
pub(crate) fn join_endpoint(base: &Url, path: &str) -> Result<Url, ConfigError> {
	let joined = format!("{}{path}", base.as_str().trim_end_matches('/'));

	Url::parse(&joined).map_err(|source| ConfigError::InvalidEndpoint { url: joined, source })
}
