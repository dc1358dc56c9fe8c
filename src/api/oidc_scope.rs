//! OpenID Connect scope listing.

// self
use super::management_path;
use crate::{_prelude::*, rest::RestClient};

/// Scope every OIDC request carries.
pub const OPENID_SCOPE: &str = "openid";

/// OIDC scope and the OIDC claims it releases.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OidcScope {
	/// Scope name, for example `profile`.
	#[serde(default)]
	pub name: String,
	/// Display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub display_name: Option<String>,
	/// Description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// OIDC claim URIs released under the scope.
	#[serde(default)]
	pub claims: Vec<String>,
}

/// Raw OIDC scope endpoints under `/api/server/v1/oidc/scopes`.
#[derive(Clone, Debug)]
pub struct OidcScopeApi {
	rest: RestClient,
}
impl OidcScopeApi {
	/// Wraps `rest`.
	pub fn new(rest: RestClient) -> Self {
		Self { rest }
	}

	/// `GET /oidc/scopes`.
	pub async fn list(&self) -> Result<Vec<OidcScope>> {
		let response = self
			.rest
			.get(management_path("/oidc/scopes"))
			.operation("list OIDC scopes")
			.send::<Vec<OidcScope>>()
			.await?;

		Ok(response.body.unwrap_or_default())
	}
}
