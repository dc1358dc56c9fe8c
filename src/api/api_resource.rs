//! API resource endpoints and models.

// self
use super::{Link, management_path};
use crate::{
	_prelude::*,
	rest::{QueryParams, RestClient, path_segment},
};

/// Query parameters for [`ApiResourceApi::list`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiResourceListParams {
	/// Cursor for the previous page.
	pub before: Option<String>,
	/// Cursor for the next page.
	pub after: Option<String>,
	/// Filter expression, for example `identifier eq /scim2/Users`.
	pub filter: Option<String>,
	/// Page size; omitted when zero or unset.
	pub limit: Option<u32>,
	/// Extra attributes to include per item.
	pub attributes: Option<String>,
}
impl ApiResourceListParams {
	/// Parameters carrying only `filter`.
	pub fn filtered(filter: impl Into<String>) -> Self {
		Self { filter: Some(filter.into()), ..Default::default() }
	}

	/// Converts to query parameters.
	pub fn to_query(&self) -> QueryParams {
		QueryParams::new()
			.non_empty("before", self.before.as_deref())
			.non_empty("after", self.after.as_deref())
			.non_empty("filter", self.filter.as_deref())
			.non_zero("limit", self.limit)
			.non_empty("attributes", self.attributes.as_deref())
	}
}

/// Page of API resources.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResourceList {
	/// Total number of matching resources.
	#[serde(default)]
	pub total_results: u32,
	/// Items in server order.
	#[serde(default, alias = "resources")]
	pub api_resources: Vec<ApiResourceListItem>,
	/// Pagination links.
	#[serde(default)]
	pub links: Vec<Link>,
}

/// Summary entry of [`ApiResourceList`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResourceListItem {
	/// Resource id.
	#[serde(default)]
	pub id: String,
	/// Display name.
	#[serde(default)]
	pub name: String,
	/// Audience identifier, for example `/scim2/Users`.
	#[serde(default)]
	pub identifier: String,
	/// Resource type, for example `BUSINESS` or `SYSTEM`.
	#[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	/// Whether calls require authorization.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub requires_authorization: Option<bool>,
	/// Resource self link.
	#[serde(default, rename = "self", skip_serializing_if = "Option::is_none")]
	pub self_link: Option<String>,
}

/// Full API resource model.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResource {
	/// Resource id.
	#[serde(default)]
	pub id: String,
	/// Display name.
	#[serde(default)]
	pub name: String,
	/// Audience identifier.
	#[serde(default)]
	pub identifier: String,
	/// Resource type.
	#[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	/// Description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Whether calls require authorization.
	#[serde(default)]
	pub requires_authorization: bool,
	/// Scopes defined by the resource.
	#[serde(default)]
	pub scopes: Vec<Scope>,
	/// Applications subscribed to the resource.
	#[serde(default)]
	pub subscribed_applications: Vec<SubscribedApplication>,
	/// Free-form properties.
	#[serde(default)]
	pub properties: Vec<Property>,
	/// Resource self link.
	#[serde(default, rename = "self", skip_serializing_if = "Option::is_none")]
	pub self_link: Option<String>,
}

/// Scope defined by an API resource.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scope {
	/// Scope id.
	#[serde(default)]
	pub id: String,
	/// Scope name as requested by clients.
	#[serde(default)]
	pub name: String,
	/// Display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub display_name: Option<String>,
	/// Description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

/// Scope definition sent when creating or extending an API resource.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeCreate {
	/// Scope name.
	pub name: String,
	/// Display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub display_name: Option<String>,
	/// Description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}
impl ScopeCreate {
	/// Scope named `name` whose display name is `display_name`.
	pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
		Self { name: name.into(), display_name: Some(display_name.into()), description: None }
	}
}

/// Application subscribed to an API resource.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribedApplication {
	/// Application id.
	#[serde(default)]
	pub id: String,
	/// Application name.
	#[serde(default)]
	pub name: String,
}

/// Name/value property.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
	/// Property name.
	pub name: String,
	/// Property value.
	pub value: String,
}

/// Create payload for `POST /api-resources`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResourceCreate {
	/// Audience identifier.
	pub identifier: String,
	/// Display name.
	pub name: String,
	/// Description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Whether calls require authorization.
	pub requires_authorization: bool,
	/// Initial scopes.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub scopes: Vec<ScopeCreate>,
}

/// Partial update payload for `PATCH /api-resources/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResourcePatch {
	/// New display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// New description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Scopes to add.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub added_scopes: Vec<ScopeCreate>,
	/// Names of scopes to remove.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub removed_scopes: Vec<String>,
}

/// Raw API resource endpoints under `/api/server/v1/api-resources`.
#[derive(Clone, Debug)]
pub struct ApiResourceApi {
	rest: RestClient,
}
impl ApiResourceApi {
	/// Wraps `rest`.
	pub fn new(rest: RestClient) -> Self {
		Self { rest }
	}

	/// `GET /api-resources`.
	pub async fn list(&self, params: &ApiResourceListParams) -> Result<ApiResourceList> {
		self.rest
			.get(management_path("/api-resources"))
			.query(params.to_query())
			.operation("list API resources")
			.fetch()
			.await
	}

	/// `GET /api-resources/{id}`.
	pub async fn get(&self, resource_id: &str) -> Result<ApiResource> {
		self.rest
			.get(resource_path(resource_id, ""))
			.operation("get API resource")
			.target(resource_id)
			.fetch()
			.await
	}

	/// Resources whose name equals `name`; an empty list when none match.
	pub async fn get_by_name(&self, name: &str) -> Result<Vec<ApiResourceListItem>> {
		let params = ApiResourceListParams::filtered(format!("name eq {name}"));

		Ok(self.list(&params).await?.api_resources)
	}

	/// The resource whose identifier equals `identifier`.
	pub async fn get_by_identifier(&self, identifier: &str) -> Result<ApiResourceListItem> {
		let params = ApiResourceListParams::filtered(format!("identifier eq {identifier}"));

		self.list(&params).await?.api_resources.into_iter().next().ok_or_else(|| Error::NotFound {
			resource: "API resource",
			key: identifier.to_owned(),
		})
	}

	/// `POST /api-resources`; returns the created resource.
	pub async fn create(&self, resource: &ApiResourceCreate) -> Result<ApiResource> {
		self.rest
			.post(management_path("/api-resources"))
			.json(resource)
			.operation("create API resource")
			.target(&resource.identifier)
			.fetch()
			.await
	}

	/// `PATCH /api-resources/{id}`.
	pub async fn patch(&self, resource_id: &str, patch: &ApiResourcePatch) -> Result<()> {
		self.rest
			.patch(resource_path(resource_id, ""))
			.json(patch)
			.operation("patch API resource")
			.target(resource_id)
			.send_without_body()
			.await
			.map(drop)
	}

	/// `DELETE /api-resources/{id}`.
	pub async fn delete(&self, resource_id: &str) -> Result<()> {
		self.rest
			.delete(resource_path(resource_id, ""))
			.operation("delete API resource")
			.target(resource_id)
			.send_without_body()
			.await
			.map(drop)
	}

	/// `GET /api-resources/{id}/scopes`.
	pub async fn get_scopes(&self, resource_id: &str) -> Result<Vec<Scope>> {
		let response = self
			.rest
			.get(resource_path(resource_id, "/scopes"))
			.operation("list API resource scopes")
			.target(resource_id)
			.send::<Vec<Scope>>()
			.await?;

		Ok(response.body.unwrap_or_default())
	}

	/// `PUT /api-resources/{id}/scopes`; adds or replaces the given scopes.
	pub async fn put_scopes(&self, resource_id: &str, scopes: &[ScopeCreate]) -> Result<()> {
		self.rest
			.put(resource_path(resource_id, "/scopes"))
			.json(scopes)
			.operation("update API resource scopes")
			.target(resource_id)
			.send_without_body()
			.await
			.map(drop)
	}

	/// `DELETE /api-resources/{id}/scopes/{name}`.
	pub async fn delete_scope(&self, resource_id: &str, scope_name: &str) -> Result<()> {
		let suffix = format!("/scopes/{}", path_segment(scope_name));

		self.rest
			.delete(resource_path(resource_id, &suffix))
			.operation("delete API resource scope")
			.target(scope_name)
			.send_without_body()
			.await
			.map(drop)
	}
}

fn resource_path(resource_id: &str, suffix: &str) -> String {
	management_path(&format!("/api-resources/{}{suffix}", path_segment(resource_id)))
}
