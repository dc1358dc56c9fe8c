//! Composite application workflows built on the raw [`ApplicationApi`].
//!
//! Each composite is a fixed sequence of REST calls. A failing step aborts the whole
//! operation and surfaces that step's error. Steps that already succeeded are not undone: an
//! application created before a failing follow-up read stays on the service.

pub mod login_flow;
pub mod oauth_config;
pub mod profile;
pub mod template;

pub use login_flow::{DEFAULT_POLL_INTERVAL, LoginFlowResult};
pub use oauth_config::OAuthConfigUpdate;
pub use profile::{AppType, ApplicationBasicInfo, determine_app_type};

// std
use std::time::Duration as StdDuration;
// self
use self::profile::{DEFAULT_SCOPES, ProfileParts};
use crate::{
	_prelude::*,
	api::{
		ApplicationApi, AuthenticatorApi, ClaimApi, IdentityProviderApi, OidcScopeApi,
		application::{
			ApplicationCreate, ApplicationList, ApplicationListItem, ApplicationListParams,
			ApplicationPatch, AuthenticationSequence, AuthorizedApi, AuthorizedApiCreate, ClaimConfiguration,
			LoginFlowGenerateRequest, LoginFlowGenerateResponse, LoginFlowStatusResponse,
		},
		claim::LocalClaimListParams,
		identity_provider::IdentityProviderListParams,
	},
	error::ResponseError,
	obs,
	rest::RestClient,
};

/// Page size used by [`ApplicationClient::list`] when the caller passes zero.
pub const DEFAULT_LIST_LIMIT: u32 = 10;

const LOOKUP_ATTRIBUTES: &str = "templateId,clientId";

/// Basic-information fields changed by [`ApplicationClient::update_basic_info`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BasicInfoUpdate {
	/// Display name.
	pub name: Option<String>,
	/// Description.
	pub description: Option<String>,
	/// Logo URL.
	pub image_url: Option<String>,
	/// Access URL.
	pub access_url: Option<String>,
	/// URL users land on after logging out.
	pub logout_return_url: Option<String>,
}
impl BasicInfoUpdate {
	/// Empty update.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the display name.
	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());

		self
	}

	/// Sets the description.
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());

		self
	}

	/// Sets the logo URL.
	pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
		self.image_url = Some(image_url.into());

		self
	}

	/// Sets the access URL.
	pub fn access_url(mut self, access_url: impl Into<String>) -> Self {
		self.access_url = Some(access_url.into());

		self
	}

	/// Sets the logout return URL.
	pub fn logout_return_url(mut self, logout_return_url: impl Into<String>) -> Self {
		self.logout_return_url = Some(logout_return_url.into());

		self
	}
}
impl From<BasicInfoUpdate> for ApplicationPatch {
	fn from(update: BasicInfoUpdate) -> Self {
		Self {
			name: update.name,
			description: update.description,
			image_url: update.image_url,
			access_url: update.access_url,
			logout_return_url: update.logout_return_url,
			..Default::default()
		}
	}
}

/// High-level application operations.
#[derive(Clone, Debug)]
pub struct ApplicationClient {
	api: ApplicationApi,
	authenticators: AuthenticatorApi,
	identity_providers: IdentityProviderApi,
	claims: ClaimApi,
	oidc_scopes: OidcScopeApi,
	poll_interval: StdDuration,
}
impl ApplicationClient {
	/// Creates a client whose calls go through `rest`.
	pub fn new(rest: RestClient) -> Self {
		Self {
			api: ApplicationApi::new(rest.clone()),
			authenticators: AuthenticatorApi::new(rest.clone()),
			identity_providers: IdentityProviderApi::new(rest.clone()),
			claims: ClaimApi::new(rest.clone()),
			oidc_scopes: OidcScopeApi::new(rest),
			poll_interval: DEFAULT_POLL_INTERVAL,
		}
	}

	/// Overrides the delay between login-flow status polls.
	pub fn with_login_flow_poll_interval(mut self, interval: StdDuration) -> Self {
		self.poll_interval = interval;

		self
	}

	/// Raw endpoints backing this client.
	pub fn api(&self) -> &ApplicationApi {
		&self.api
	}

	/// Lists applications, hiding system portals. A zero `limit` means ten.
	pub async fn list(&self, limit: u32, offset: u32) -> Result<ApplicationList> {
		let limit = if limit == 0 { DEFAULT_LIST_LIMIT } else { limit };
		let params = ApplicationListParams::default()
			.limit(limit)
			.offset(offset)
			.exclude_system_portals(true);

		self.api.list(&params).await
	}

	/// Creates a single-page application that redirects to `redirect_url`.
	pub async fn create_single_page_app(
		&self,
		name: &str,
		redirect_url: &str,
	) -> Result<ApplicationBasicInfo> {
		obs::observe("create single-page application", Some(name), async {
			let payload = ApplicationCreate::single_page_app(name, redirect_url)?;

			self.create(payload, AppType::Spa, Some(redirect_url)).await
		})
		.await
	}

	/// Creates a mobile application that redirects to `redirect_url`.
	pub async fn create_mobile_app(
		&self,
		name: &str,
		redirect_url: &str,
	) -> Result<ApplicationBasicInfo> {
		obs::observe(
			"create mobile application",
			Some(name),
			self.create(
				ApplicationCreate::mobile_app(name, redirect_url),
				AppType::Mobile,
				Some(redirect_url),
			),
		)
		.await
	}

	/// Creates a machine-to-machine application and returns its client credentials.
	pub async fn create_m2m_app(&self, name: &str) -> Result<ApplicationBasicInfo> {
		obs::observe(
			"create machine-to-machine application",
			Some(name),
			self.create(ApplicationCreate::m2m_app(name), AppType::M2m, None),
		)
		.await
	}

	/// Creates a server-rendered web application and returns its client credentials.
	pub async fn create_web_app_with_ssr(
		&self,
		name: &str,
		redirect_url: &str,
	) -> Result<ApplicationBasicInfo> {
		obs::observe(
			"create server-rendered web application",
			Some(name),
			self.create(
				ApplicationCreate::web_app_with_ssr(name, redirect_url),
				AppType::SsrWeb,
				Some(redirect_url),
			),
		)
		.await
	}

	async fn create(
		&self,
		payload: ApplicationCreate,
		app_type: AppType,
		redirect_url: Option<&str>,
	) -> Result<ApplicationBasicInfo> {
		let id = self.api.create(&payload).await?;
		let (client_id, client_secret) = if app_type.is_confidential() {
			let oidc = self.api.get_oidc_configuration(&id).await?;
			let client_id = oidc.client_id.ok_or(ResponseError::MissingField { field: "clientId" })?;

			(client_id, oidc.client_secret)
		} else {
			let application = self.api.get(&id).await?;
			let client_id =
				application.client_id.ok_or(ResponseError::MissingField { field: "clientId" })?;

			(client_id, None)
		};

		Ok(ApplicationBasicInfo {
			id,
			name: payload.name,
			client_id,
			client_secret,
			redirect_url: redirect_url.map(str::to_owned),
			authorized_scopes: DEFAULT_SCOPES.iter().map(|scope| (*scope).to_owned()).collect(),
			app_type,
		})
	}

	/// Profile of the application named exactly `name`.
	///
	/// Only the first page of filtered results is scanned.
	pub async fn get_by_name(&self, name: &str) -> Result<ApplicationBasicInfo> {
		obs::observe("find application by name", Some(name), async {
			let id = self.find(format!("name eq {name}"), |item| item.name == name, name).await?;

			self.profile(&id).await
		})
		.await
	}

	/// Profile of the application whose OAuth client id is exactly `client_id`.
	///
	/// Only the first page of filtered results is scanned.
	pub async fn get_by_client_id(&self, client_id: &str) -> Result<ApplicationBasicInfo> {
		obs::observe("find application by client id", Some(client_id), async {
			let id = self
				.find(
					format!("clientId eq {client_id}"),
					|item| item.client_id.as_deref() == Some(client_id),
					client_id,
				)
				.await?;

			self.profile(&id).await
		})
		.await
	}

	async fn find<P>(&self, filter: String, matches: P, key: &str) -> Result<String>
	where
		P: Fn(&ApplicationListItem) -> bool,
	{
		let params = ApplicationListParams::default()
			.filter(filter)
			.attributes(LOOKUP_ATTRIBUTES)
			.exclude_system_portals(true);
		let list = self.api.list(&params).await?;

		list.applications
			.into_iter()
			.find(|item| matches(item))
			.map(|item| item.id)
			.ok_or_else(|| Error::NotFound { resource: "application", key: key.to_owned() })
	}

	/// Profile of the application with id `application_id`: client credentials, redirect, and
	/// every scope it may request.
	pub async fn application_profile(&self, application_id: &str) -> Result<ApplicationBasicInfo> {
		obs::observe(
			"assemble application profile",
			Some(application_id),
			self.profile(application_id),
		)
		.await
	}

	async fn profile(&self, application_id: &str) -> Result<ApplicationBasicInfo> {
		let application = self.api.get(application_id).await?;
		let oidc = self.api.get_oidc_configuration(application_id).await?;
		let apis = self.api.list_authorized_apis(application_id).await?;
		let app_type = determine_app_type(&application)?;
		let oidc_scopes = if app_type.is_interactive() {
			self.oidc_scopes_for(application.claim_configuration.as_ref()).await?
		} else {
			Vec::new()
		};
		let parts = ProfileParts {
			application,
			oidc,
			api_scopes: profile::collect_api_scopes(&apis),
			oidc_scopes,
		};

		Ok(profile::assemble_profile(parts, app_type))
	}

	async fn oidc_scopes_for(&self, claims: Option<&ClaimConfiguration>) -> Result<Vec<String>> {
		if !profile::requests_claims(claims) {
			return Ok(profile::derive_oidc_scopes(None, &[], &[]));
		}

		let scopes = self.oidc_scopes.list().await?;
		let oidc_claims = self.claims.list_oidc_claims().await?;

		Ok(profile::derive_oidc_scopes(claims, &oidc_claims, &scopes))
	}

	/// Grants `application_id` access to an API resource.
	pub async fn authorize_api(
		&self,
		application_id: &str,
		authorization: &AuthorizedApiCreate,
	) -> Result<()> {
		self.api.authorize_api(application_id, authorization).await
	}

	/// API resources `application_id` is authorized for.
	pub async fn get_authorized_apis(&self, application_id: &str) -> Result<Vec<AuthorizedApi>> {
		self.api.list_authorized_apis(application_id).await
	}

	/// Changes name, description, or URLs of an application.
	pub async fn update_basic_info(&self, application_id: &str, update: BasicInfoUpdate) -> Result<()> {
		self.api.patch(application_id, &update.into()).await
	}

	/// Applies `update` over the current OIDC configuration and writes the result back.
	///
	/// Multiple callback URLs are stored as one `regexp=(..)` pattern.
	pub async fn update_oauth_config(
		&self,
		application_id: &str,
		update: &OAuthConfigUpdate,
	) -> Result<()> {
		obs::observe("update OAuth configuration", Some(application_id), async {
			let mut config = self.api.get_oidc_configuration(application_id).await?;

			update.apply(&mut config);

			self.api.put_oidc_configuration(application_id, &config).await
		})
		.await
	}

	/// Replaces the requested-claim configuration.
	pub async fn update_claim_config(
		&self,
		application_id: &str,
		claims: ClaimConfiguration,
	) -> Result<()> {
		let patch = ApplicationPatch { claim_configuration: Some(claims), ..Default::default() };

		self.api.patch(application_id, &patch).await
	}

	/// Replaces the login flow.
	pub async fn update_login_flow(
		&self,
		application_id: &str,
		flow: AuthenticationSequence,
	) -> Result<()> {
		let patch = ApplicationPatch { authentication_sequence: Some(flow), ..Default::default() };

		self.api.patch(application_id, &patch).await
	}

	/// Starts generating a login flow from a natural-language `prompt`.
	///
	/// The request advertises the tenant's authenticators and visible local claims.
	pub async fn generate_login_flow(&self, prompt: &str) -> Result<LoginFlowGenerateResponse> {
		obs::observe("start login flow generation", None, async {
			let local = self.authenticators.list_local().await?;
			let idps = self
				.identity_providers
				.list(&IdentityProviderListParams {
					required_attributes: Some("federatedAuthenticators".into()),
					..Default::default()
				})
				.await?;
			let claims = self
				.claims
				.list_local_claims(&LocalClaimListParams {
					exclude_hidden_claims: Some(true),
					..Default::default()
				})
				.await?;
			let request = LoginFlowGenerateRequest {
				available_authenticators: login_flow::available_authenticators(
					&local,
					&idps.identity_providers,
				),
				user_claims: login_flow::user_claims(&claims),
				user_query: prompt.to_owned(),
			};

			self.api.generate_login_flow(&request).await
		})
		.await
	}

	/// Current status of a login-flow generation.
	pub async fn get_login_flow_generation_status(
		&self,
		operation_id: &str,
	) -> Result<LoginFlowStatusResponse> {
		self.api.login_flow_status(operation_id).await
	}

	/// Result of a finished login-flow generation, decoded into a typed flow.
	pub async fn get_login_flow_generation_result(
		&self,
		operation_id: &str,
	) -> Result<LoginFlowResult> {
		let response = self.api.login_flow_result(operation_id).await?;
		let data = response.data.ok_or(ResponseError::MissingField { field: "data" })?;
		let flow = login_flow::decode_login_flow(data)
			.context_with("decode login flow generation result", operation_id)?;

		Ok(LoginFlowResult { status: response.status, flow })
	}

	/// Polls until every generation stage reports completion, then fetches the result.
	///
	/// Polling has no attempt limit. Dropping the returned future stops it, so callers can
	/// bound the wait with `tokio::time::timeout`.
	pub async fn await_login_flow(&self, operation_id: &str) -> Result<LoginFlowResult> {
		let mut attempt = 0_u32;

		loop {
			attempt = attempt.saturating_add(1);

			if self.get_login_flow_generation_status(operation_id).await?.is_complete() {
				break;
			}

			obs::trace_login_flow_poll(operation_id, attempt);
			tokio::time::sleep(self.poll_interval).await;
		}

		self.get_login_flow_generation_result(operation_id).await
	}

	/// Starts a generation and waits for its result.
	pub async fn generate_login_flow_and_wait(&self, prompt: &str) -> Result<LoginFlowResult> {
		let started = self.generate_login_flow(prompt).await?;

		if started.operation_id.is_empty() {
			return Err(ResponseError::MissingField { field: "operationId" })
				.context("start login flow generation");
		}

		self.await_login_flow(&started.operation_id).await
	}
}
