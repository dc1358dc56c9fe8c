//! Application management endpoints and models.

// self
use super::{Link, management_path};
use crate::{
	_prelude::*,
	auth::TokenSecret,
	rest::{QueryParams, RestClient, path_segment},
};

/// Query parameters for [`ApplicationApi::list`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApplicationListParams {
	/// Page size; omitted when zero or unset.
	pub limit: Option<u32>,
	/// Page offset; sent whenever set, including zero.
	pub offset: Option<u32>,
	/// Filter expression, for example `name eq Demo`.
	pub filter: Option<String>,
	/// Comma-separated extra attributes to include per item.
	pub attributes: Option<String>,
	/// Sort expression.
	pub sort: Option<String>,
	/// Hides the console and my-account portals.
	pub exclude_system_portals: Option<bool>,
}
impl ApplicationListParams {
	/// Sets the page size.
	pub fn limit(mut self, limit: u32) -> Self {
		self.limit = Some(limit);

		self
	}

	/// Sets the page offset.
	pub fn offset(mut self, offset: u32) -> Self {
		self.offset = Some(offset);

		self
	}

	/// Sets the filter expression.
	pub fn filter(mut self, filter: impl Into<String>) -> Self {
		self.filter = Some(filter.into());

		self
	}

	/// Sets the extra attributes.
	pub fn attributes(mut self, attributes: impl Into<String>) -> Self {
		self.attributes = Some(attributes.into());

		self
	}

	/// Sets the sort expression.
	pub fn sort(mut self, sort: impl Into<String>) -> Self {
		self.sort = Some(sort.into());

		self
	}

	/// Hides or shows system portals.
	pub fn exclude_system_portals(mut self, exclude: bool) -> Self {
		self.exclude_system_portals = Some(exclude);

		self
	}

	/// Converts to query parameters.
	pub fn to_query(&self) -> QueryParams {
		QueryParams::new()
			.non_zero("limit", self.limit)
			.opt("offset", self.offset)
			.non_empty("filter", self.filter.as_deref())
			.non_empty("attributes", self.attributes.as_deref())
			.non_empty("sort", self.sort.as_deref())
			.opt("excludeSystemPortals", self.exclude_system_portals)
	}
}

/// Page of applications.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationList {
	/// Total number of matching applications.
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
	pub applications: Vec<ApplicationListItem>,
	/// Pagination links.
	#[serde(default)]
	pub links: Vec<Link>,
}

/// Summary entry of [`ApplicationList`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationListItem {
	/// Application id.
	#[serde(default)]
	pub id: String,
	/// Display name.
	#[serde(default)]
	pub name: String,
	/// Description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Logo URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub image: Option<String>,
	/// Access URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub access_url: Option<String>,
	/// OAuth client id, when requested through `attributes`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub client_id: Option<String>,
	/// SAML issuer.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub issuer: Option<String>,
	/// Template the application was created from.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub template_id: Option<String>,
	/// Resource self link.
	#[serde(default, rename = "self", skip_serializing_if = "Option::is_none")]
	pub self_link: Option<String>,
}

/// Full application model.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
	/// Application id.
	#[serde(default)]
	pub id: String,
	/// Display name.
	#[serde(default)]
	pub name: String,
	/// Description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Logo URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub image_url: Option<String>,
	/// Access URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub access_url: Option<String>,
	/// URL users land on after logging out.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub logout_return_url: Option<String>,
	/// OAuth client id.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub client_id: Option<String>,
	/// SAML issuer.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub issuer: Option<String>,
	/// Template the application was created from.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub template_id: Option<String>,
	/// Template version.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub template_version: Option<String>,
	/// Whether the application is a management app.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub is_management_app: Option<bool>,
	/// Requested claims.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub claim_configuration: Option<ClaimConfiguration>,
	/// Login flow.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub authentication_sequence: Option<AuthenticationSequence>,
	/// Consent and discoverability settings.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub advanced_configurations: Option<AdvancedConfigurations>,
	/// Roles associated with the application.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub associated_roles: Option<AssociatedRoles>,
	/// Fields not modeled above.
	#[serde(flatten)]
	pub extra: BTreeMap<String, Value>,
}

/// Create payload for `POST /applications`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCreate {
	/// Display name.
	pub name: String,
	/// Description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Logo URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub image_url: Option<String>,
	/// Access URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub access_url: Option<String>,
	/// Template selecting the application archetype.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub template_id: Option<String>,
	/// Consent and discoverability settings.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub advanced_configurations: Option<AdvancedConfigurations>,
	/// Login flow.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub authentication_sequence: Option<AuthenticationSequence>,
	/// Requested claims.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub claim_configuration: Option<ClaimConfiguration>,
	/// Protocol settings.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub inbound_protocol_configuration: Option<InboundProtocolConfiguration>,
	/// Roles associated with the application.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub associated_roles: Option<AssociatedRoles>,
}

/// Partial update payload for `PATCH /applications/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPatch {
	/// Display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Logo URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub image_url: Option<String>,
	/// Access URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub access_url: Option<String>,
	/// URL users land on after logging out.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub logout_return_url: Option<String>,
	/// Requested claims.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub claim_configuration: Option<ClaimConfiguration>,
	/// Login flow.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub authentication_sequence: Option<AuthenticationSequence>,
	/// Consent and discoverability settings.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub advanced_configurations: Option<AdvancedConfigurations>,
}

/// Consent and discoverability settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedConfigurations {
	/// Lists the application in the end-user portal.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub discoverable_by_end_users: Option<bool>,
	/// Skips the logout consent page.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub skip_logout_consent: Option<bool>,
	/// Skips the login consent page.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub skip_login_consent: Option<bool>,
	/// Fields not modeled above.
	#[serde(flatten)]
	pub extra: BTreeMap<String, Value>,
}

/// Login flow type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthenticationSequenceType {
	/// Tenant default flow.
	Default,
	/// Flow defined by the steps of this sequence.
	UserDefined,
}

/// Login flow of an application.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationSequence {
	/// Flow type.
	#[serde(rename = "type")]
	pub kind: AuthenticationSequenceType,
	/// Ordered steps.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub steps: Option<Vec<AuthenticationStep>>,
	/// Adaptive authentication script.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub script: Option<String>,
	/// Step whose user attributes are released.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub attribute_step_id: Option<u32>,
	/// Step whose user identifies the subject.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub subject_step_id: Option<u32>,
}
impl AuthenticationSequence {
	/// Tenant default flow with no explicit steps.
	pub fn default_flow() -> Self {
		Self {
			kind: AuthenticationSequenceType::Default,
			steps: None,
			script: None,
			attribute_step_id: None,
			subject_step_id: None,
		}
	}
}

/// One step of an [`AuthenticationSequence`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationStep {
	/// 1-based step number.
	pub id: u32,
	/// Alternatives offered at this step.
	pub options: Vec<AuthenticatorOption>,
}

/// Authenticator offered within an [`AuthenticationStep`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatorOption {
	/// Identity provider name, `LOCAL` for built-in authenticators.
	pub idp: String,
	/// Authenticator name, for example `basic`.
	pub authenticator: String,
}

/// Claim dialect used by [`ClaimConfiguration`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimDialect {
	/// Local claim dialect.
	Local,
	/// Custom dialect.
	Custom,
}

/// Requested-claim settings of an application.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimConfiguration {
	/// Dialect the requested claims belong to.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub dialect: Option<ClaimDialect>,
	/// Requested claims.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub requested_claims: Option<Vec<RequestedClaim>>,
	/// Fields not modeled above.
	#[serde(flatten)]
	pub extra: BTreeMap<String, Value>,
}

/// Requested claim entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedClaim {
	/// Claim reference.
	pub claim: ClaimReference,
	/// Whether the user must provide the claim.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub mandatory: Option<bool>,
}
impl RequestedClaim {
	/// Optional request for the local claim `uri`.
	pub fn new(uri: impl Into<String>) -> Self {
		Self { claim: ClaimReference { uri: uri.into() }, mandatory: None }
	}
}

/// Reference to a local claim by URI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimReference {
	/// Claim URI, for example `http://wso2.org/claims/username`.
	pub uri: String,
}

/// Audience of the roles associated with an application.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociatedRoles {
	/// `APPLICATION` or `ORGANIZATION`.
	pub allowed_audience: String,
	/// Associated roles.
	#[serde(default)]
	pub roles: Vec<RoleReference>,
}

/// Role reference.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleReference {
	/// Role id.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Role name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
}

/// Protocol settings sent with a create payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InboundProtocolConfiguration {
	/// OpenID Connect settings.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub oidc: Option<OidcConfiguration>,
}

/// OpenID Connect inbound configuration.
///
/// The update endpoint replaces the whole document, so fields the client does not model are
/// kept in [`OidcConfiguration::extra`] and written back unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OidcConfiguration {
	/// OAuth client id.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub client_id: Option<String>,
	/// OAuth client secret; confidential clients only.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub client_secret: Option<TokenSecret>,
	/// Enabled grant types.
	#[serde(default)]
	pub grant_types: Vec<String>,
	/// Registered redirect URIs, possibly a single `regexp=(..)` pattern.
	#[serde(
		default,
		rename = "callbackURLs",
		alias = "callbackUrls",
		skip_serializing_if = "Option::is_none"
	)]
	pub callback_urls: Option<Vec<String>>,
	/// CORS origins.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub allowed_origins: Option<Vec<String>>,
	/// Whether the client is public.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub public_client: Option<bool>,
	/// PKCE policy.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pkce: Option<PkceConfiguration>,
	/// Access token settings.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub access_token: Option<AccessTokenConfiguration>,
	/// Refresh token settings.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<RefreshTokenConfiguration>,
	/// Logout endpoints.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub logout: Option<OidcLogoutConfiguration>,
	/// Fields not modeled above.
	#[serde(flatten)]
	pub extra: BTreeMap<String, Value>,
}

/// PKCE policy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PkceConfiguration {
	/// Rejects authorization requests without a code challenge.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub mandatory: Option<bool>,
	/// Accepts the `plain` challenge method.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub support_plain_transform_algorithm: Option<bool>,
}

/// Access token settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenConfiguration {
	/// Token format, `JWT` or `Default`.
	#[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	/// Lifetime of tokens issued to users.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user_access_token_expiry_in_seconds: Option<i64>,
	/// Lifetime of tokens issued to the application itself.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub application_access_token_expiry_in_seconds: Option<i64>,
	/// Token binding type, for example `sso-session` or `cookie`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub binding_type: Option<String>,
	/// Revokes tokens when the IdP session ends.
	#[serde(
		default,
		rename = "revokeTokensWhenIDPSessionTerminated",
		skip_serializing_if = "Option::is_none"
	)]
	pub revoke_tokens_when_idp_session_terminated: Option<bool>,
	/// Validates the token binding on each request.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub validate_token_binding: Option<bool>,
	/// User attributes embedded in JWT access tokens.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub access_token_attributes: Option<Vec<String>>,
	/// Fields not modeled above.
	#[serde(flatten)]
	pub extra: BTreeMap<String, Value>,
}

/// Refresh token settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenConfiguration {
	/// Refresh token lifetime.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub expiry_in_seconds: Option<i64>,
	/// Issues a new refresh token on each use.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub renew_refresh_token: Option<bool>,
	/// Fields not modeled above.
	#[serde(flatten)]
	pub extra: BTreeMap<String, Value>,
}

/// OIDC logout endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OidcLogoutConfiguration {
	/// Back-channel logout URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub back_channel_logout_url: Option<String>,
	/// Front-channel logout URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub front_channel_logout_url: Option<String>,
}

/// SAML 2.0 inbound configuration; unmodeled fields survive a GET/PUT round trip.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamlConfiguration {
	/// Service provider entity id.
	#[serde(default)]
	pub issuer: String,
	/// Assertion consumer service URLs.
	#[serde(default)]
	pub assertion_consumer_urls: Vec<String>,
	/// Single logout URLs.
	#[serde(default)]
	pub single_logout_urls: Vec<String>,
	/// Signs responses and assertions.
	#[serde(default)]
	pub signing_enabled: bool,
	/// Encrypts assertions.
	#[serde(default)]
	pub encrypt_assertion: bool,
	/// Enables single sign-on.
	#[serde(default)]
	pub enable_sso: bool,
	/// Fields not modeled above.
	#[serde(flatten)]
	pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CertificateBody {
	#[serde(default)]
	certificate: String,
}

/// Application template offered by `GET /applications/templates`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationTemplate {
	/// Template id, usable as [`ApplicationCreate::template_id`].
	#[serde(default)]
	pub id: String,
	/// Display name.
	#[serde(default)]
	pub name: String,
	/// Description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Classification tags.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub tags: Vec<String>,
}

/// Response of `GET /applications/templates`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationTemplateList {
	/// Templates in server order.
	#[serde(default)]
	pub templates: Vec<ApplicationTemplate>,
}

/// Payload for `POST /applications/{id}/authorized-apis`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizedApiCreate {
	/// API resource id.
	pub id: String,
	/// Authorization policy, for example `RBAC`.
	pub policy_identifier: String,
	/// Scope names granted to the application.
	pub scopes: Vec<String>,
}

/// API resource authorized for an application.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizedApi {
	/// API resource id.
	#[serde(default)]
	pub id: String,
	/// API identifier (audience).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub identifier: Option<String>,
	/// Display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub display_name: Option<String>,
	/// Authorization policy id.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub policy_id: Option<String>,
	/// API type.
	#[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	/// Granted scopes.
	#[serde(default)]
	pub authorized_scopes: Vec<AuthorizedScope>,
}

/// Scope granted through an [`AuthorizedApi`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizedScope {
	/// Scope name.
	#[serde(default)]
	pub name: String,
	/// Display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub display_name: Option<String>,
}

/// Entry of a full authorized-API replacement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizedApiReference {
	/// API resource id.
	#[serde(rename = "apiId")]
	pub api_id: String,
	/// Scope names granted to the application.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub scopes: Vec<String>,
}

#[derive(Serialize)]
struct AuthorizedApiReplacement<'a> {
	apis: &'a [AuthorizedApiReference],
}

/// Authenticator advertised to the login-flow generator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatorSummary {
	/// Human-readable description.
	pub description: String,
	/// `LOCAL` or the identity provider name.
	pub idp: String,
	/// Authenticator name.
	pub name: String,
}

/// Authenticators available to the login-flow generator, grouped by role.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableAuthenticators {
	/// Non-social federated authenticators.
	#[serde(default)]
	pub enterprise: Vec<AuthenticatorSummary>,
	/// First-factor local authenticators.
	#[serde(default)]
	pub local: Vec<AuthenticatorSummary>,
	/// Recovery authenticators such as backup codes.
	#[serde(default)]
	pub recovery: Vec<AuthenticatorSummary>,
	/// Second-factor authenticators.
	#[serde(default)]
	pub second_factor: Vec<AuthenticatorSummary>,
	/// Social login authenticators.
	#[serde(default)]
	pub social: Vec<AuthenticatorSummary>,
}

/// User claim advertised to the login-flow generator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaim {
	/// Local claim URI.
	#[serde(rename = "claimURI")]
	pub claim_uri: String,
	/// Claim description.
	pub description: String,
}

/// Payload for `POST /applications/loginflow/generate`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginFlowGenerateRequest {
	/// Authenticators the generator may use.
	pub available_authenticators: AvailableAuthenticators,
	/// Claims the generator may request.
	pub user_claims: Vec<UserClaim>,
	/// Natural-language description of the desired flow.
	pub user_query: String,
}

/// Response of the login-flow generate endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginFlowGenerateResponse {
	/// Handle used to poll status and fetch the result.
	#[serde(default)]
	pub operation_id: String,
}

/// Response of the login-flow status endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginFlowStatusResponse {
	/// Operation handle.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub operation_id: Option<String>,
	/// Completion flag per generation stage.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<BTreeMap<String, bool>>,
}
impl LoginFlowStatusResponse {
	/// Returns `true` once a status vector is present and every stage reports `true`.
	pub fn is_complete(&self) -> bool {
		self.status.as_ref().is_some_and(|stages| stages.values().all(|done| *done))
	}
}

/// Raw response of the login-flow result endpoint; `data` is decoded by
/// [`ApplicationClient`](crate::application::ApplicationClient).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginFlowResultResponse {
	/// Generation status label.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<String>,
	/// Untyped generated flow.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub data: Option<Value>,
}

/// Raw application endpoints under `/api/server/v1/applications`.
#[derive(Clone, Debug)]
pub struct ApplicationApi {
	rest: RestClient,
}
impl ApplicationApi {
	/// Wraps `rest`.
	pub fn new(rest: RestClient) -> Self {
		Self { rest }
	}

	/// `GET /applications`.
	pub async fn list(&self, params: &ApplicationListParams) -> Result<ApplicationList> {
		self.rest
			.get(management_path("/applications"))
			.query(params.to_query())
			.operation("list applications")
			.fetch()
			.await
	}

	/// `GET /applications/{id}`.
	pub async fn get(&self, application_id: &str) -> Result<Application> {
		self.rest
			.get(application_path(application_id, ""))
			.operation("get application")
			.target(application_id)
			.fetch()
			.await
	}

	/// `POST /applications`; returns the id taken from the `Location` header.
	pub async fn create(&self, application: &ApplicationCreate) -> Result<String> {
		let response = self
			.rest
			.post(management_path("/applications"))
			.json(application)
			.operation("create application")
			.target(&application.name)
			.send_without_body()
			.await?;

		response.location_id().context_with("create application", &application.name)
	}

	/// `PATCH /applications/{id}`.
	pub async fn patch(&self, application_id: &str, patch: &ApplicationPatch) -> Result<()> {
		self.rest
			.patch(application_path(application_id, ""))
			.json(patch)
			.operation("patch application")
			.target(application_id)
			.send_without_body()
			.await
			.map(drop)
	}

	/// `DELETE /applications/{id}`.
	pub async fn delete(&self, application_id: &str) -> Result<()> {
		self.rest
			.delete(application_path(application_id, ""))
			.operation("delete application")
			.target(application_id)
			.send_without_body()
			.await
			.map(drop)
	}

	/// `GET /applications/shared`.
	pub async fn list_shared(&self, params: &ApplicationListParams) -> Result<ApplicationList> {
		self.rest
			.get(management_path("/applications/shared"))
			.query(params.to_query())
			.operation("list shared applications")
			.fetch()
			.await
	}

	/// `GET /applications/shared/{id}`.
	pub async fn get_shared(&self, application_id: &str) -> Result<Application> {
		self.rest
			.get(application_path("shared", &format!("/{}", path_segment(application_id))))
			.operation("get shared application")
			.target(application_id)
			.fetch()
			.await
	}

	/// `GET /applications/templates`.
	pub async fn list_templates(&self) -> Result<Vec<ApplicationTemplate>> {
		self.rest
			.get(management_path("/applications/templates"))
			.operation("list application templates")
			.fetch::<ApplicationTemplateList>()
			.await
			.map(|list| list.templates)
	}

	/// `GET /applications/templates/{id}`.
	pub async fn get_template(&self, template_id: &str) -> Result<ApplicationTemplate> {
		self.rest
			.get(application_path("templates", &format!("/{}", path_segment(template_id))))
			.operation("get application template")
			.target(template_id)
			.fetch()
			.await
	}

	/// `GET /applications/{id}/inbound-protocols/oidc`.
	pub async fn get_oidc_configuration(&self, application_id: &str) -> Result<OidcConfiguration> {
		self.rest
			.get(application_path(application_id, "/inbound-protocols/oidc"))
			.operation("get OIDC configuration")
			.target(application_id)
			.fetch()
			.await
	}

	/// `PUT /applications/{id}/inbound-protocols/oidc`; replaces the whole document.
	pub async fn put_oidc_configuration(
		&self,
		application_id: &str,
		configuration: &OidcConfiguration,
	) -> Result<()> {
		self.rest
			.put(application_path(application_id, "/inbound-protocols/oidc"))
			.json(configuration)
			.operation("update OIDC configuration")
			.target(application_id)
			.send_without_body()
			.await
			.map(drop)
	}

	/// `POST /applications/{id}/inbound-protocols/oidc/regenerate-secret`.
	pub async fn regenerate_client_secret(&self, application_id: &str) -> Result<OidcConfiguration> {
		self.rest
			.post(application_path(application_id, "/inbound-protocols/oidc/regenerate-secret"))
			.operation("regenerate client secret")
			.target(application_id)
			.fetch()
			.await
	}

	/// `GET /applications/{id}/inbound-protocols/saml2`.
	pub async fn get_saml_configuration(&self, application_id: &str) -> Result<SamlConfiguration> {
		self.rest
			.get(application_path(application_id, "/inbound-protocols/saml2"))
			.operation("get SAML configuration")
			.target(application_id)
			.fetch()
			.await
	}

	/// `PUT /applications/{id}/inbound-protocols/saml2`; replaces the whole document.
	pub async fn put_saml_configuration(
		&self,
		application_id: &str,
		configuration: &SamlConfiguration,
	) -> Result<()> {
		self.rest
			.put(application_path(application_id, "/inbound-protocols/saml2"))
			.json(configuration)
			.operation("update SAML configuration")
			.target(application_id)
			.send_without_body()
			.await
			.map(drop)
	}

	/// `GET /applications/{id}/certificate`; returns the PEM text.
	pub async fn get_certificate(&self, application_id: &str) -> Result<String> {
		self.rest
			.get(application_path(application_id, "/certificate"))
			.operation("get application certificate")
			.target(application_id)
			.fetch::<CertificateBody>()
			.await
			.map(|body| body.certificate)
	}

	/// `PUT /applications/{id}/certificate`.
	pub async fn put_certificate(&self, application_id: &str, certificate: &str) -> Result<()> {
		self.rest
			.put(application_path(application_id, "/certificate"))
			.json(&CertificateBody { certificate: certificate.to_owned() })
			.operation("update application certificate")
			.target(application_id)
			.send_without_body()
			.await
			.map(drop)
	}

	/// `GET /applications/{id}/authorized-apis`.
	pub async fn list_authorized_apis(&self, application_id: &str) -> Result<Vec<AuthorizedApi>> {
		let response = self
			.rest
			.get(application_path(application_id, "/authorized-apis"))
			.operation("list authorized APIs")
			.target(application_id)
			.send::<Vec<AuthorizedApi>>()
			.await?;

		Ok(response.body.unwrap_or_default())
	}

	/// `GET /applications/{id}/authorized-apis/{apiId}`.
	pub async fn get_authorized_api(
		&self,
		application_id: &str,
		api_id: &str,
	) -> Result<AuthorizedApi> {
		let suffix = format!("/authorized-apis/{}", path_segment(api_id));

		self.rest
			.get(application_path(application_id, &suffix))
			.operation("get authorized API")
			.target(application_id)
			.fetch()
			.await
	}

	/// `PUT /applications/{id}/authorized-apis`; replaces every authorization at once.
	pub async fn replace_authorized_apis(
		&self,
		application_id: &str,
		apis: &[AuthorizedApiReference],
	) -> Result<()> {
		self.rest
			.put(application_path(application_id, "/authorized-apis"))
			.json(&AuthorizedApiReplacement { apis })
			.operation("replace authorized APIs")
			.target(application_id)
			.send_without_body()
			.await
			.map(drop)
	}

	/// `POST /applications/{id}/authorized-apis`.
	pub async fn authorize_api(
		&self,
		application_id: &str,
		authorization: &AuthorizedApiCreate,
	) -> Result<()> {
		self.rest
			.post(application_path(application_id, "/authorized-apis"))
			.json(authorization)
			.operation("authorize API")
			.target(application_id)
			.send_without_body()
			.await
			.map(drop)
	}

	/// `DELETE /applications/{id}/authorized-apis/{apiId}`.
	pub async fn revoke_api(&self, application_id: &str, api_id: &str) -> Result<()> {
		let suffix = format!("/authorized-apis/{}", path_segment(api_id));

		self.rest
			.delete(application_path(application_id, &suffix))
			.operation("revoke API authorization")
			.target(application_id)
			.send_without_body()
			.await
			.map(drop)
	}

	/// `POST /applications/loginflow/generate`.
	pub async fn generate_login_flow(
		&self,
		request: &LoginFlowGenerateRequest,
	) -> Result<LoginFlowGenerateResponse> {
		self.rest
			.post(management_path("/applications/loginflow/generate"))
			.json(request)
			.operation("generate login flow")
			.fetch()
			.await
	}

	/// `GET /applications/loginflow/status/{operationId}`.
	pub async fn login_flow_status(&self, operation_id: &str) -> Result<LoginFlowStatusResponse> {
		self.rest
			.get(management_path(&format!(
				"/applications/loginflow/status/{}",
				path_segment(operation_id)
			)))
			.operation("get login flow generation status")
			.target(operation_id)
			.fetch()
			.await
	}

	/// `GET /applications/loginflow/result/{operationId}`.
	pub async fn login_flow_result(&self, operation_id: &str) -> Result<LoginFlowResultResponse> {
		self.rest
			.get(management_path(&format!(
				"/applications/loginflow/result/{}",
				path_segment(operation_id)
			)))
			.operation("get login flow generation result")
			.target(operation_id)
			.fetch()
			.await
	}
}

fn application_path(application_id: &str, suffix: &str) -> String {
	management_path(&format!("/applications/{}{suffix}", path_segment(application_id)))
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn list_params_follow_omission_rules() {
		let query = ApplicationListParams::default().limit(0).offset(0).filter("").to_query();

		assert_eq!(query.iter().collect::<Vec<_>>(), [("offset", "0")]);

		let query = ApplicationListParams::default()
			.limit(5)
			.filter("name eq Demo")
			.exclude_system_portals(true)
			.to_query();

		assert_eq!(
			query.iter().collect::<Vec<_>>(),
			[("limit", "5"), ("filter", "name eq Demo"), ("excludeSystemPortals", "true")]
		);
	}

	#[test]
	fn oidc_configuration_round_trips_unknown_fields() {
		let raw = json!({
			"clientId": "cid",
			"grantTypes": ["authorization_code"],
			"callbackURLs": ["https://a"],
			"idToken": { "expiryInSeconds": 3600 },
			"accessToken": { "type": "JWT", "revokeTokensWhenIDPSessionTerminated": true, "extra": 1 }
		});
		let config: OidcConfiguration =
			serde_json::from_value(raw.clone()).expect("OIDC configuration should decode.");

		assert_eq!(config.callback_urls.as_deref(), Some(&["https://a".to_owned()][..]));
		assert_eq!(
			config.access_token.as_ref().and_then(|token| token.revoke_tokens_when_idp_session_terminated),
			Some(true)
		);
		assert_eq!(serde_json::to_value(&config).expect("OIDC configuration should encode."), raw);
	}

	#[test]
	fn callback_urls_alias_is_accepted() {
		let config: OidcConfiguration =
			serde_json::from_value(json!({ "callbackUrls": ["https://b"] }))
				.expect("Alias spelling should decode.");

		assert_eq!(config.callback_urls, Some(vec!["https://b".to_owned()]));
	}

	#[test]
	fn login_flow_status_requires_every_stage() {
		let pending: LoginFlowStatusResponse =
			serde_json::from_value(json!({ "operationId": "op", "status": { "a": true, "b": false } }))
				.expect("Status should decode.");
		let done: LoginFlowStatusResponse =
			serde_json::from_value(json!({ "operationId": "op", "status": { "a": true, "b": true } }))
				.expect("Status should decode.");

		assert!(!pending.is_complete());
		assert!(done.is_complete());
		assert!(!LoginFlowStatusResponse::default().is_complete());
	}
}
