//! Local and external claim listing.

// self
use super::management_path;
use crate::{
	_prelude::*,
	rest::{QueryParams, RestClient, path_segment},
};

/// Dialect id of the OpenID Connect claim dialect.
pub const OIDC_DIALECT_ID: &str = "aHR0cDovL3dzbzIub3JnL29pZGMvY2xhaW0";

/// Query parameters for [`ClaimApi::list_local_claims`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocalClaimListParams {
	/// Drops claims hidden from end users.
	pub exclude_hidden_claims: Option<bool>,
	/// Drops identity-management claims.
	pub exclude_identity_claims: Option<bool>,
	/// Extra attributes to include.
	pub attributes: Option<String>,
	/// Page size; omitted when zero or unset.
	pub limit: Option<u32>,
	/// Page offset.
	pub offset: Option<u32>,
	/// Filter expression.
	pub filter: Option<String>,
	/// Sort expression.
	pub sort: Option<String>,
}
impl LocalClaimListParams {
	/// Converts to query parameters.
	pub fn to_query(&self) -> QueryParams {
		QueryParams::new()
			.opt("exclude-hidden-claims", self.exclude_hidden_claims)
			.opt("exclude-identity-claims", self.exclude_identity_claims)
			.non_empty("attributes", self.attributes.as_deref())
			.non_zero("limit", self.limit)
			.opt("offset", self.offset)
			.non_empty("filter", self.filter.as_deref())
			.non_empty("sort", self.sort.as_deref())
	}
}

/// Query parameters for [`ClaimApi::list_external_claims`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExternalClaimListParams {
	/// Filter expression.
	pub filter: Option<String>,
}
impl ExternalClaimListParams {
	/// Converts to query parameters.
	pub fn to_query(&self) -> QueryParams {
		QueryParams::new().non_empty("filter", self.filter.as_deref())
	}
}

/// Claim of the local dialect.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalClaim {
	/// Claim id.
	#[serde(default)]
	pub id: String,
	/// Claim URI, for example `http://wso2.org/claims/emailaddress`.
	#[serde(default, rename = "claimURI")]
	pub claim_uri: String,
	/// Dialect URI.
	#[serde(default, rename = "dialectURI", skip_serializing_if = "Option::is_none")]
	pub dialect_uri: Option<String>,
	/// Description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub display_name: Option<String>,
	/// Ordering hint for profile forms.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub display_order: Option<i64>,
	/// Whether users may edit the claim.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub read_only: Option<bool>,
	/// Whether the claim is mandatory.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub required: Option<bool>,
	/// Whether the claim shows on default profile forms.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub supported_by_default: Option<bool>,
	/// Validation pattern.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub reg_ex: Option<String>,
	/// Fields not modeled above.
	#[serde(flatten)]
	pub extra: BTreeMap<String, Value>,
}

/// Claim of an external dialect mapped onto a local claim.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalClaim {
	/// Claim id.
	#[serde(default)]
	pub id: String,
	/// External claim URI, for example `email`.
	#[serde(default, rename = "claimURI")]
	pub claim_uri: String,
	/// Dialect URI.
	#[serde(default, rename = "claimDialectURI", skip_serializing_if = "Option::is_none")]
	pub claim_dialect_uri: Option<String>,
	/// Local claim this claim maps to.
	#[serde(default, rename = "mappedLocalClaimURI", skip_serializing_if = "Option::is_none")]
	pub mapped_local_claim_uri: Option<String>,
}

/// Raw claim endpoints under `/api/server/v1/claim-dialects`.
#[derive(Clone, Debug)]
pub struct ClaimApi {
	rest: RestClient,
}
impl ClaimApi {
	/// Wraps `rest`.
	pub fn new(rest: RestClient) -> Self {
		Self { rest }
	}

	/// `GET /claim-dialects/local/claims`.
	pub async fn list_local_claims(&self, params: &LocalClaimListParams) -> Result<Vec<LocalClaim>> {
		self.rest
			.get(management_path("/claim-dialects/local/claims"))
			.query(params.to_query())
			.operation("list local claims")
			.fetch()
			.await
	}

	/// `GET /claim-dialects/{dialectId}/claims`.
	pub async fn list_external_claims(
		&self,
		dialect_id: &str,
		params: &ExternalClaimListParams,
	) -> Result<Vec<ExternalClaim>> {
		self.rest
			.get(management_path(&format!("/claim-dialects/{}/claims", path_segment(dialect_id))))
			.query(params.to_query())
			.operation("list external claims")
			.target(dialect_id)
			.fetch()
			.await
	}

	/// Claims of the OpenID Connect dialect.
	pub async fn list_oidc_claims(&self) -> Result<Vec<ExternalClaim>> {
		self.list_external_claims(OIDC_DIALECT_ID, &ExternalClaimListParams::default()).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn local_claim_params_use_hyphenated_keys() {
		let params = LocalClaimListParams { exclude_hidden_claims: Some(true), ..Default::default() };

		assert_eq!(params.to_query().iter().collect::<Vec<_>>(), [("exclude-hidden-claims", "true")]);
	}
}
