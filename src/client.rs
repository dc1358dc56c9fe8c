//! Entry point that hands out per-resource service clients.

// self
use crate::{
	_prelude::*,
	api::{
		ApiResourceApi, ApplicationApi, AuthenticatorApi, ClaimApi, IdentityProviderApi,
		OidcScopeApi, OrganizationApi, UserApi,
	},
	application::ApplicationClient,
	auth::TokenProvider,
	config::ClientConfig,
	organization::SubOrganizationClient,
	rest::RestClient,
};

/// Root client for one tenant.
///
/// Every service returned here shares the configuration's HTTP client and token cache, so a
/// client-credentials token is fetched once and reused across services. Cloning is cheap.
#[derive(Clone, Debug)]
pub struct Client {
	config: Arc<ClientConfig>,
	rest: RestClient,
}
impl Client {
	/// Creates a client from a validated configuration.
	pub fn new(config: ClientConfig) -> Self {
		let rest = RestClient::from_config(&config);

		Self { config: Arc::new(config), rest }
	}

	/// Configuration this client was built from.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Token provider shared by every service.
	pub fn token_provider(&self) -> &Arc<TokenProvider> {
		self.config.token_provider()
	}

	/// Composite application workflows.
	pub fn applications(&self) -> ApplicationClient {
		ApplicationClient::new(self.rest.clone())
	}

	/// Raw application endpoints.
	pub fn application_api(&self) -> ApplicationApi {
		ApplicationApi::new(self.rest.clone())
	}

	/// API resource endpoints.
	pub fn api_resources(&self) -> ApiResourceApi {
		ApiResourceApi::new(self.rest.clone())
	}

	/// Authenticator endpoints.
	pub fn authenticators(&self) -> AuthenticatorApi {
		AuthenticatorApi::new(self.rest.clone())
	}

	/// Claim endpoints.
	pub fn claims(&self) -> ClaimApi {
		ClaimApi::new(self.rest.clone())
	}

	/// Identity provider endpoints.
	pub fn identity_providers(&self) -> IdentityProviderApi {
		IdentityProviderApi::new(self.rest.clone())
	}

	/// OIDC scope endpoints.
	pub fn oidc_scopes(&self) -> OidcScopeApi {
		OidcScopeApi::new(self.rest.clone())
	}

	/// Organization endpoints.
	pub fn organizations(&self) -> OrganizationApi {
		OrganizationApi::new(self.rest.clone())
	}

	/// SCIM 2.0 user endpoints.
	pub fn users(&self) -> UserApi {
		UserApi::new(self.rest.clone())
	}

	/// Application reads inside child organizations.
	pub fn sub_organizations(&self) -> SubOrganizationClient {
		SubOrganizationClient::new(self.rest.clone(), self.token_provider().clone())
	}
}
