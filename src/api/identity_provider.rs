//! Identity provider listing.

// self
use super::{Link, management_path};
use crate::{
	_prelude::*,
	rest::{QueryParams, RestClient},
};

/// Query parameters for [`IdentityProviderApi::list`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdentityProviderListParams {
	/// Page size; omitted when zero or unset.
	pub limit: Option<u32>,
	/// Page offset.
	pub offset: Option<u32>,
	/// Filter expression.
	pub filter: Option<String>,
	/// `ASC` or `DESC`.
	pub sort_order: Option<String>,
	/// Attribute to sort by.
	pub sort_by: Option<String>,
	/// Extra attributes to include, for example `federatedAuthenticators`.
	pub required_attributes: Option<String>,
}
impl IdentityProviderListParams {
	/// Converts to query parameters.
	pub fn to_query(&self) -> QueryParams {
		QueryParams::new()
			.non_zero("limit", self.limit)
			.opt("offset", self.offset)
			.non_empty("filter", self.filter.as_deref())
			.non_empty("sortOrder", self.sort_order.as_deref())
			.non_empty("sortBy", self.sort_by.as_deref())
			.non_empty("requiredAttributes", self.required_attributes.as_deref())
	}
}

/// Page of identity providers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProviderList {
	/// Total number of matching providers.
	#[serde(default)]
	pub total_results: u32,
	/// Index of the first item.
	#[serde(default)]
	pub start_index: u32,
	/// Number of items in this page.
	#[serde(default)]
	pub count: u32,
	/// Items in server order.
	#[serde(default)]
	pub identity_providers: Vec<IdentityProvider>,
	/// Pagination links.
	#[serde(default)]
	pub links: Vec<Link>,
}

/// Identity provider entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProvider {
	/// Provider id.
	#[serde(default)]
	pub id: String,
	/// Provider name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Whether the provider is enabled.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub is_enabled: Option<bool>,
	/// Icon URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub image: Option<String>,
	/// Federated authenticators; present when requested through `requiredAttributes`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub federated_authenticators: Option<FederatedAuthenticators>,
	/// Resource self link.
	#[serde(default, rename = "self", skip_serializing_if = "Option::is_none")]
	pub self_link: Option<String>,
}
impl IdentityProvider {
	/// Name of the authenticator whose id matches the provider's default, if any.
	pub fn default_authenticator_name(&self) -> Option<&str> {
		let federated = self.federated_authenticators.as_ref()?;
		let default_id = federated.default_authenticator_id.as_deref()?;

		federated
			.authenticators
			.iter()
			.find(|authenticator| authenticator.authenticator_id.as_deref() == Some(default_id))
			.and_then(|authenticator| authenticator.name.as_deref())
	}
}

/// Federated authenticators configured on an identity provider.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FederatedAuthenticators {
	/// Id of the authenticator used by default.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub default_authenticator_id: Option<String>,
	/// Configured authenticators.
	#[serde(default)]
	pub authenticators: Vec<FederatedAuthenticator>,
}

/// Federated authenticator summary.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FederatedAuthenticator {
	/// Authenticator id.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub authenticator_id: Option<String>,
	/// Authenticator name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Whether the authenticator is enabled.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub is_enabled: Option<bool>,
	/// Resource self link.
	#[serde(default, rename = "self", skip_serializing_if = "Option::is_none")]
	pub self_link: Option<String>,
}

/// Raw identity provider endpoints under `/api/server/v1/identity-providers`.
#[derive(Clone, Debug)]
pub struct IdentityProviderApi {
	rest: RestClient,
}
impl IdentityProviderApi {
	/// Wraps `rest`.
	pub fn new(rest: RestClient) -> Self {
		Self { rest }
	}

	/// `GET /identity-providers`.
	pub async fn list(&self, params: &IdentityProviderListParams) -> Result<IdentityProviderList> {
		self.rest
			.get(management_path("/identity-providers"))
			.query(params.to_query())
			.operation("list identity providers")
			.fetch()
			.await
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn default_authenticator_name_follows_default_id() {
		let idp: IdentityProvider = serde_json::from_value(json!({
			"id": "idp-1",
			"name": "Google",
			"federatedAuthenticators": {
				"defaultAuthenticatorId": "R29vZ2xlT0lEQ0F1dGhlbnRpY2F0b3I",
				"authenticators": [
					{ "authenticatorId": "other", "name": "Other" },
					{ "authenticatorId": "R29vZ2xlT0lEQ0F1dGhlbnRpY2F0b3I", "name": "GoogleOIDCAuthenticator" }
				]
			}
		}))
		.expect("Identity provider should decode.");

		assert_eq!(idp.default_authenticator_name(), Some("GoogleOIDCAuthenticator"));
		assert_eq!(IdentityProvider::default().default_authenticator_name(), None);
	}
}
