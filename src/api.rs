//! Raw per-resource bindings for the management and SCIM 2.0 APIs.
//!
//! Each service wraps a [`RestClient`](crate::rest::RestClient) and maps one method to one
//! endpoint. Composite workflows built on top of these live in
//! [`application`](crate::application) and [`organization`](crate::organization).

pub mod api_resource;
pub mod application;
pub mod authenticator;
pub mod claim;
pub mod identity_provider;
pub mod oidc_scope;
pub mod organization;
pub mod user;

pub use api_resource::ApiResourceApi;
pub use application::ApplicationApi;
pub use authenticator::AuthenticatorApi;
pub use claim::ClaimApi;
pub use identity_provider::IdentityProviderApi;
pub use oidc_scope::OidcScopeApi;
pub use organization::OrganizationApi;
pub use user::UserApi;

// self
use crate::{_prelude::*, rest::MANAGEMENT_API_PATH};

/// Pagination link returned by list endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
	/// Target URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub href: Option<String>,
	/// Relation, for example `next`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub rel: Option<String>,
}

fn management_path(suffix: &str) -> String {
	format!("{MANAGEMENT_API_PATH}{suffix}")
}
