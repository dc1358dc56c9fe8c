//! Application reads inside child organizations.
//!
//! Every call first switches the root credentials to a token scoped to the child
//! organization, then addresses the child's management API under `/o`.

// self
use crate::{
	_prelude::*,
	api::{
		ApplicationApi,
		application::{Application, ApplicationList, ApplicationListParams},
	},
	auth::{FixedTokenSigner, TokenProvider},
	rest::{RestClient, SUB_ORGANIZATION_PATH},
};

/// Reads applications that live in child organizations.
#[derive(Clone, Debug)]
pub struct SubOrganizationClient {
	rest: RestClient,
	token_provider: Arc<TokenProvider>,
}
impl SubOrganizationClient {
	/// Creates a client; `rest` must be rooted at the parent tenant.
	pub fn new(rest: RestClient, token_provider: Arc<TokenProvider>) -> Self {
		Self { rest, token_provider }
	}

	/// Lists applications of `organization_id`.
	pub async fn list_applications(
		&self,
		organization_id: &str,
		params: &ApplicationListParams,
	) -> Result<ApplicationList> {
		let api = self.scoped(organization_id).await?;

		api.list(params).await
	}

	/// Reads application `application_id` of `organization_id`.
	pub async fn get_application(
		&self,
		organization_id: &str,
		application_id: &str,
	) -> Result<Application> {
		if application_id.is_empty() {
			return Err(Error::InvalidArgument { name: "application_id" });
		}

		let api = self.scoped(organization_id).await?;

		api.get(application_id).await
	}

	async fn scoped(&self, organization_id: &str) -> Result<ApplicationApi> {
		if organization_id.is_empty() {
			return Err(Error::InvalidArgument { name: "organization_id" });
		}

		let token = self.token_provider.exchange_for_organization(organization_id).await?;
		let rest = self
			.rest
			.with_base_path(SUB_ORGANIZATION_PATH)?
			.with_signer(Arc::new(FixedTokenSigner::new(token)));

		Ok(ApplicationApi::new(rest))
	}
}
