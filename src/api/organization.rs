//! Organization endpoints and models.

// self
use super::management_path;
use crate::{
	_prelude::*,
	rest::{QueryParams, RestClient, path_segment},
};

/// Query parameters for [`OrganizationApi::list`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrganizationListParams {
	/// Page size; omitted when zero.
	pub limit: u32,
	/// Filter expression; omitted when empty.
	pub filter: String,
	/// Includes nested organizations; always sent.
	pub recursive: bool,
}
impl OrganizationListParams {
	/// Converts to query parameters.
	pub fn to_query(&self) -> QueryParams {
		QueryParams::new()
			.non_zero("limit", Some(self.limit))
			.non_empty("filter", Some(&self.filter))
			.set("recursive", self.recursive)
	}
}

/// Page of organizations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationList {
	/// Number of items in this page.
	#[serde(default)]
	pub count: u32,
	/// Total number of matching organizations.
	#[serde(default)]
	pub total_results: u32,
	/// Items in server order.
	#[serde(default)]
	pub organizations: Vec<Organization>,
}

/// Organization model.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
	/// Organization id.
	#[serde(default)]
	pub id: String,
	/// Unique name.
	#[serde(default)]
	pub name: String,
	/// Display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub display_name: Option<String>,
	/// Description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Lifecycle status, for example `ACTIVE`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<String>,
	/// Resource self link.
	#[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
	pub self_link: Option<String>,
}

/// Create payload for `POST /organizations`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationCreate {
	/// Unique name.
	pub name: String,
	/// Display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub display_name: Option<String>,
	/// Description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Parent organization id; the root organization when absent.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parent_id: Option<String>,
	/// Organization type, for example `TENANT` or `STRUCTURAL`.
	#[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
}

/// Raw organization endpoints under `/api/server/v1/organizations`.
#[derive(Clone, Debug)]
pub struct OrganizationApi {
	rest: RestClient,
}
impl OrganizationApi {
	/// Wraps `rest`.
	pub fn new(rest: RestClient) -> Self {
		Self { rest }
	}

	/// `GET /organizations`.
	pub async fn list(&self, params: &OrganizationListParams) -> Result<OrganizationList> {
		self.rest
			.get(management_path("/organizations"))
			.query(params.to_query())
			.operation("list organizations")
			.fetch()
			.await
	}

	/// `GET /organizations/{id}`.
	pub async fn get(&self, organization_id: &str) -> Result<Organization> {
		self.rest
			.get(management_path(&format!("/organizations/{}", path_segment(organization_id))))
			.operation("get organization")
			.target(organization_id)
			.fetch()
			.await
	}

	/// `POST /organizations`; returns the created organization.
	pub async fn create(&self, organization: &OrganizationCreate) -> Result<Organization> {
		self.rest
			.post(management_path("/organizations"))
			.json(organization)
			.operation("create organization")
			.target(&organization.name)
			.fetch()
			.await
	}
}
