//! SCIM 2.0 user provisioning.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	rest::{RestClient, SCIM2_PATH},
};

/// SCIM core user schema URN.
pub const SCIM_USER_SCHEMA: &str = "urn:ietf:params:scim:schemas:core:2.0:User";

/// Caller-facing user creation input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserCreate {
	/// Login name.
	pub username: String,
	/// Primary email address.
	pub email: String,
	/// Initial password.
	pub password: TokenSecret,
	/// Given name.
	pub first_name: String,
	/// Family name.
	pub last_name: String,
}

/// SCIM 2.0 user resource as sent to `POST /scim2/Users`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScimUser {
	/// Schema URNs.
	pub schemas: Vec<String>,
	/// Login name.
	pub user_name: String,
	/// Initial password; never returned by the service.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub password: Option<TokenSecret>,
	/// Structured name.
	#[serde(default)]
	pub name: ScimName,
	/// Email addresses.
	#[serde(default)]
	pub emails: Vec<ScimEmail>,
}
impl From<&UserCreate> for ScimUser {
	fn from(user: &UserCreate) -> Self {
		Self {
			schemas: vec![SCIM_USER_SCHEMA.to_owned()],
			user_name: user.username.clone(),
			password: Some(user.password.clone()),
			name: ScimName {
				given_name: user.first_name.clone(),
				family_name: user.last_name.clone(),
			},
			emails: vec![ScimEmail { primary: true, value: user.email.clone() }],
		}
	}
}

/// SCIM structured name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScimName {
	/// Given name.
	#[serde(default)]
	pub given_name: String,
	/// Family name.
	#[serde(default)]
	pub family_name: String,
}

/// SCIM email entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScimEmail {
	/// Whether this is the primary address.
	#[serde(default)]
	pub primary: bool,
	/// Address.
	pub value: String,
}

/// User created by [`UserApi::create`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedUser {
	/// User id.
	#[serde(default)]
	pub id: String,
	/// Login name.
	#[serde(default)]
	pub user_name: String,
}

/// Raw SCIM 2.0 endpoints under `/scim2`.
#[derive(Clone, Debug)]
pub struct UserApi {
	rest: RestClient,
}
impl UserApi {
	/// Wraps `rest`.
	pub fn new(rest: RestClient) -> Self {
		Self { rest }
	}

	/// `POST /scim2/Users`.
	pub async fn create(&self, user: &UserCreate) -> Result<CreatedUser> {
		self.rest
			.post(format!("{SCIM2_PATH}/Users"))
			.json(&ScimUser::from(user))
			.operation("create user")
			.target(&user.username)
			.fetch()
			.await
	}
}
