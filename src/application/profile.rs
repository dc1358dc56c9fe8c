//! Application type classification and authorized-scope aggregation.

// self
use super::{
	oauth_config::decode_callback_url,
	template::{M2M_TEMPLATE_ID, MOBILE_TEMPLATE_ID, SPA_TEMPLATE_ID, SSR_WEB_TEMPLATE_ID},
};
use crate::{
	_prelude::*,
	api::{
		application::{Application, AuthorizedApi, ClaimConfiguration, OidcConfiguration},
		claim::ExternalClaim,
		oidc_scope::{OPENID_SCOPE, OidcScope},
	},
	auth::TokenSecret,
	error::ResponseError,
};

/// Application archetype, identified by template id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppType {
	/// Single-page application.
	#[serde(rename = "spa")]
	Spa,
	/// Mobile application.
	#[serde(rename = "mobile")]
	Mobile,
	/// Machine-to-machine application.
	#[serde(rename = "m2m")]
	M2m,
	/// Server-rendered web application.
	#[serde(rename = "ssr_web")]
	SsrWeb,
}
impl AppType {
	/// Classifies a template id; `None` for unknown or missing ids.
	pub fn from_template_id(template_id: &str) -> Option<Self> {
		match template_id {
			SPA_TEMPLATE_ID => Some(Self::Spa),
			MOBILE_TEMPLATE_ID => Some(Self::Mobile),
			M2M_TEMPLATE_ID => Some(Self::M2m),
			SSR_WEB_TEMPLATE_ID => Some(Self::SsrWeb),
			_ => None,
		}
	}

	/// Template id the archetype is created from.
	pub const fn template_id(self) -> &'static str {
		match self {
			Self::Spa => SPA_TEMPLATE_ID,
			Self::Mobile => MOBILE_TEMPLATE_ID,
			Self::M2m => M2M_TEMPLATE_ID,
			Self::SsrWeb => SSR_WEB_TEMPLATE_ID,
		}
	}

	/// Returns `true` for archetypes that hold a client secret.
	pub const fn is_confidential(self) -> bool {
		matches!(self, Self::M2m | Self::SsrWeb)
	}

	/// Returns `true` for archetypes that redirect an end user.
	pub const fn is_interactive(self) -> bool {
		!matches!(self, Self::M2m)
	}
}

/// Classifies `application` by template id, failing on unknown templates.
pub fn determine_app_type(application: &Application) -> Result<AppType, ResponseError> {
	application.template_id.as_deref().and_then(AppType::from_template_id).ok_or_else(|| {
		ResponseError::UnknownApplicationType { template_id: application.template_id.clone() }
	})
}

/// Condensed application profile returned by create and lookup composites.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationBasicInfo {
	/// Application id.
	pub id: String,
	/// Display name.
	pub name: String,
	/// OAuth client id.
	pub client_id: String,
	/// OAuth client secret; confidential clients only.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub client_secret: Option<TokenSecret>,
	/// Redirect URL, comma-joined when several are registered.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub redirect_url: Option<String>,
	/// Scopes the application may request.
	#[serde(default)]
	pub authorized_scopes: Vec<String>,
	/// Archetype.
	pub app_type: AppType,
}
impl ApplicationBasicInfo {
	/// Scopes joined by spaces, as sent in an OAuth `scope` parameter.
	pub fn scope(&self) -> String {
		self.authorized_scopes.join(" ")
	}
}

/// Scopes reported for freshly created applications.
pub const DEFAULT_SCOPES: [&str; 3] = ["openid", "profile", "email"];

/// Returns `true` when `claims` requests at least one claim, so OIDC scopes must be looked up.
pub fn requests_claims(claims: Option<&ClaimConfiguration>) -> bool {
	claims.and_then(|config| config.requested_claims.as_ref()).is_some_and(|list| !list.is_empty())
}

/// OIDC scopes covering the application's requested claims.
///
/// Requested local claims are mapped onto OIDC claims through `oidc_claims`; every scope other
/// than `openid` that releases one of them is included. The output always starts with `openid`,
/// followed by the other scopes in ascending order.
pub fn derive_oidc_scopes(
	claims: Option<&ClaimConfiguration>,
	oidc_claims: &[ExternalClaim],
	oidc_scopes: &[OidcScope],
) -> Vec<String> {
	let requested = claims.and_then(|config| config.requested_claims.as_deref()).unwrap_or_default();
	let local_to_oidc = oidc_claims
		.iter()
		.filter_map(|claim| {
			claim.mapped_local_claim_uri.as_deref().map(|local| (local, claim.claim_uri.as_str()))
		})
		.collect::<HashMap<_, _>>();
	let mut scopes = BTreeSet::new();

	for requested_claim in requested {
		let Some(oidc_claim) = local_to_oidc.get(requested_claim.claim.uri.as_str()) else {
			continue;
		};

		for scope in oidc_scopes {
			if scope.name != OPENID_SCOPE && scope.claims.iter().any(|claim| claim == *oidc_claim) {
				scopes.insert(scope.name.clone());
			}
		}
	}

	std::iter::once(OPENID_SCOPE.to_owned()).chain(scopes).collect()
}

/// Scope names granted through `apis`, deduplicated in first-seen order.
pub fn collect_api_scopes(apis: &[AuthorizedApi]) -> Vec<String> {
	let mut seen = HashSet::new();
	let mut scopes = Vec::new();

	for scope in apis.iter().flat_map(|api| &api.authorized_scopes) {
		if seen.insert(scope.name.as_str()) {
			scopes.push(scope.name.clone());
		}
	}

	scopes
}

/// Inputs fetched by the profile composite.
#[derive(Debug)]
pub(crate) struct ProfileParts {
	pub application: Application,
	pub oidc: OidcConfiguration,
	pub api_scopes: Vec<String>,
	pub oidc_scopes: Vec<String>,
}

/// Assembles the profile of an already classified application.
pub(crate) fn assemble_profile(parts: ProfileParts, app_type: AppType) -> ApplicationBasicInfo {
	let ProfileParts { application, oidc, api_scopes, oidc_scopes } = parts;
	let client_id = application.client_id.or(oidc.client_id).unwrap_or_default();
	let client_secret = if app_type.is_confidential() { oidc.client_secret } else { None };
	let (redirect_url, authorized_scopes) = if app_type.is_interactive() {
		let redirect = oidc
			.callback_urls
			.as_deref()
			.and_then(<[String]>::first)
			.map(|callback| decode_callback_url(callback));

		(redirect, oidc_scopes.into_iter().chain(api_scopes).collect())
	} else {
		(None, api_scopes)
	};

	ApplicationBasicInfo {
		id: application.id,
		name: application.name,
		client_id,
		client_secret,
		redirect_url,
		authorized_scopes,
		app_type,
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;
	use crate::api::application::RequestedClaim;

	fn oidc_claim(local: &str, oidc: &str) -> ExternalClaim {
		ExternalClaim {
			claim_uri: oidc.into(),
			mapped_local_claim_uri: Some(local.into()),
			..Default::default()
		}
	}

	fn scope(name: &str, claims: &[&str]) -> OidcScope {
		OidcScope {
			name: name.into(),
			claims: claims.iter().map(|claim| (*claim).to_owned()).collect(),
			..Default::default()
		}
	}

	#[test]
	fn unknown_template_is_rejected() {
		let application = Application { template_id: Some("custom".into()), ..Default::default() };

		assert!(matches!(
			determine_app_type(&application),
			Err(ResponseError::UnknownApplicationType { template_id: Some(id) }) if id == "custom"
		));
		assert!(determine_app_type(&Application::default()).is_err());

		let application =
			Application { template_id: Some(M2M_TEMPLATE_ID.into()), ..Default::default() };

		assert_eq!(determine_app_type(&application).expect("M2M should classify."), AppType::M2m);
	}

	#[test]
	fn oidc_scopes_start_with_openid_then_sorted() {
		let claims = ClaimConfiguration {
			requested_claims: Some(vec![
				RequestedClaim::new("http://wso2.org/claims/emailaddress"),
				RequestedClaim::new("http://wso2.org/claims/givenname"),
				RequestedClaim::new("http://wso2.org/claims/unmapped"),
			]),
			..Default::default()
		};
		let oidc_claims = [
			oidc_claim("http://wso2.org/claims/emailaddress", "email"),
			oidc_claim("http://wso2.org/claims/givenname", "given_name"),
		];
		let oidc_scopes = [
			scope("profile", &["given_name"]),
			scope("openid", &["email"]),
			scope("email", &["email"]),
			scope("phone", &["phone_number"]),
		];

		assert_eq!(
			derive_oidc_scopes(Some(&claims), &oidc_claims, &oidc_scopes),
			["openid", "email", "profile"]
		);
		assert_eq!(derive_oidc_scopes(None, &oidc_claims, &oidc_scopes), ["openid"]);
	}

	#[test]
	fn api_scopes_deduplicate_in_order() {
		let apis: Vec<AuthorizedApi> = serde_json::from_value(json!([
			{ "id": "a", "authorizedScopes": [{ "name": "orders:read" }, { "name": "orders:write" }] },
			{ "id": "b", "authorizedScopes": [{ "name": "orders:read" }, { "name": "users:read" }] }
		]))
		.expect("Authorized APIs should decode.");

		assert_eq!(collect_api_scopes(&apis), ["orders:read", "orders:write", "users:read"]);
	}

	#[test]
	fn profile_keeps_secret_for_confidential_clients_only() {
		let parts = || ProfileParts {
			application: Application {
				id: "app".into(),
				name: "Web".into(),
				client_id: Some("cid".into()),
				..Default::default()
			},
			oidc: OidcConfiguration {
				client_secret: Some(TokenSecret::new("secret")),
				callback_urls: Some(vec!["regexp=(https://a|https://b)".into()]),
				..Default::default()
			},
			api_scopes: vec!["orders:read".into()],
			oidc_scopes: vec!["openid".into()],
		};
		let ssr = assemble_profile(parts(), AppType::SsrWeb);
		let spa = assemble_profile(parts(), AppType::Spa);
		let m2m = assemble_profile(parts(), AppType::M2m);

		assert_eq!(ssr.client_secret.as_ref().map(TokenSecret::expose), Some("secret"));
		assert_eq!(ssr.redirect_url.as_deref(), Some("https://a,https://b"));
		assert_eq!(ssr.scope(), "openid orders:read");
		assert!(spa.client_secret.is_none());
		assert_eq!(m2m.redirect_url, None);
		assert_eq!(m2m.authorized_scopes, ["orders:read"]);
	}
}
