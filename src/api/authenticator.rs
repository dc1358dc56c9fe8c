//! Authenticator listing and well-known authenticator ids.

// self
use super::management_path;
use crate::{
	_prelude::*,
	rest::{QueryParams, RestClient},
};

/// Type label of built-in authenticators.
pub const LOCAL_AUTHENTICATOR_TYPE: &str = "LOCAL";

/// Well-known ids of federated authenticators.
pub mod federated {
	#![allow(missing_docs)]

	pub const APPLE: &str = "QXBwbGVPSURDQXV0aGVudGljYXRvcg";
	pub const DUO: &str = "RHVvQXV0aGVudGljYXRvcg";
	pub const EMAIL_OTP: &str = "RW1haWxPVFA";
	pub const FACEBOOK: &str = "RmFjZWJvb2tBdXRoZW50aWNhdG9y";
	pub const GITHUB: &str = "R2l0aHViQXV0aGVudGljYXRvcg";
	pub const GOOGLE_OIDC: &str = "R29vZ2xlT0lEQ0F1dGhlbnRpY2F0b3I";
	pub const HYPR: &str = "SFlQUkF1dGhlbnRpY2F0b3I";
	pub const IPROOV: &str = "SXByb292QXV0aGVudGljYXRvcg";
	pub const IWA_KERBEROS: &str = "SVdBS2VyYmVyb3NBdXRoZW50aWNhdG9y";
	pub const MICROSOFT_LIVE: &str = "TWljcm9zb2Z0V2luZG93c0xpdmVBdXRoZW50aWNhdG9y";
	pub const OFFICE_365: &str = "T2ZmaWNlMzY1QXV0aGVudGljYXRvcg";
	/// Shared by the Microsoft, Sign-In With Ethereum, and generic OIDC connectors.
	pub const OIDC: &str = "T3BlbklEQ29ubmVjdEF1dGhlbnRpY2F0b3I";
	pub const ORGANIZATION_ENTERPRISE: &str = "T3JnYW5pemF0aW9uQXV0aGVudGljYXRvcg";
	pub const PASSWORD_RESET_ENFORCER: &str = "cGFzc3dvcmQtcmVzZXQtZW5mb3JjZXI";
	pub const SAML: &str = "U0FNTFNTT0F1dGhlbnRpY2F0b3I";
	pub const SMS_OTP: &str = "U01TT1RQ";
	pub const TWITTER: &str = "VHdpdHRlckF1dGhlbnRpY2F0b3I";
	pub const YAHOO: &str = "WWFob29PQXV0aDJBdXRoZW50aWNhdG9y";
}

/// Well-known ids of local authenticators.
pub mod local {
	#![allow(missing_docs)]

	pub const ACTIVE_SESSION_LIMIT_HANDLER: &str = "U2Vzc2lvbkV4ZWN1dG9y";
	pub const BACKUP_CODE: &str = "YmFja3VwLWNvZGUtYXV0aGVudGljYXRvcg";
	pub const BASIC: &str = "QmFzaWNBdXRoZW50aWNhdG9y";
	pub const EMAIL_OTP: &str = "ZW1haWwtb3RwLWF1dGhlbnRpY2F0b3I";
	pub const FIDO: &str = "RklET0F1dGhlbnRpY2F0b3I";
	pub const IDENTIFIER_FIRST: &str = "SWRlbnRpZmllckV4ZWN1dG9y";
	pub const JWT_BASIC: &str = "SldUQmFzaWNBdXRoZW50aWNhdG9y";
	pub const MAGIC_LINK: &str = "TWFnaWNMaW5rQXV0aGVudGljYXRvcg";
	pub const PASSIVE_STS: &str = "UGFzc2l2ZVNUU0F1dGhlbnRpY2F0b3I";
	pub const PUSH: &str = "cHVzaC1ub3RpZmljYXRpb24tYXV0aGVudGljYXRvcg";
	pub const SMS_OTP: &str = "c21zLW90cC1hdXRoZW50aWNhdG9y";
	pub const TOTP: &str = "dG90cA";
	pub const X509_CERTIFICATE: &str = "eDUwOUNlcnRpZmljYXRlQXV0aGVudGljYXRvcg";
}

/// Default authenticator ids of social login connectors.
pub const SOCIAL_AUTHENTICATOR_IDS: [&str; 5] = [
	federated::APPLE,
	federated::GOOGLE_OIDC,
	federated::FACEBOOK,
	federated::TWITTER,
	federated::GITHUB,
];

/// Authenticator ids that act as a second factor.
pub const SECOND_FACTOR_AUTHENTICATOR_IDS: [&str; 4] =
	[local::TOTP, federated::IPROOV, federated::DUO, federated::PASSWORD_RESET_ENFORCER];

/// Role an authenticator plays in a generated login flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthenticatorCategory {
	/// First-factor local authenticator.
	Local,
	/// Account recovery.
	Recovery,
	/// Second factor.
	SecondFactor,
	/// Social login.
	Social,
	/// Any other federated authenticator.
	Enterprise,
}
impl AuthenticatorCategory {
	/// Classifies a local authenticator by id.
	pub fn of_local(authenticator_id: &str) -> Self {
		if authenticator_id == local::BACKUP_CODE {
			Self::Recovery
		} else if SECOND_FACTOR_AUTHENTICATOR_IDS.contains(&authenticator_id) {
			Self::SecondFactor
		} else {
			Self::Local
		}
	}

	/// Classifies a federated authenticator by the identity provider's default authenticator id.
	pub fn of_federated(default_authenticator_id: &str) -> Self {
		if SOCIAL_AUTHENTICATOR_IDS.contains(&default_authenticator_id) {
			Self::Social
		} else {
			Self::Enterprise
		}
	}
}

/// Query parameters for [`AuthenticatorApi::list`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthenticatorListParams {
	/// Filter expression.
	pub filter: Option<String>,
	/// Page size; omitted when zero or unset.
	pub limit: Option<u32>,
	/// Page offset.
	pub offset: Option<u32>,
}
impl AuthenticatorListParams {
	/// Converts to query parameters.
	pub fn to_query(&self) -> QueryParams {
		QueryParams::new()
			.non_empty("filter", self.filter.as_deref())
			.non_zero("limit", self.limit)
			.opt("offset", self.offset)
	}
}

/// Authenticator entry returned by `GET /authenticators`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authenticator {
	/// Authenticator id.
	#[serde(default)]
	pub id: String,
	/// Internal name, for example `BasicAuthenticator`.
	#[serde(default)]
	pub name: String,
	/// Display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub display_name: Option<String>,
	/// Whether the authenticator is enabled.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub is_enabled: Option<bool>,
	/// `LOCAL`, `FEDERATED`, or `REQUEST_PATH`.
	#[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	/// `SYSTEM` or `USER`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub defined_by: Option<String>,
	/// Icon URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub image: Option<String>,
	/// Description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Tags such as `MFA` or `Social-Login`.
	#[serde(default)]
	pub tags: Vec<String>,
	/// Resource self link.
	#[serde(default, rename = "self", skip_serializing_if = "Option::is_none")]
	pub self_link: Option<String>,
}
impl Authenticator {
	/// Returns `true` for built-in authenticators.
	pub fn is_local(&self) -> bool {
		self.kind.as_deref() == Some(LOCAL_AUTHENTICATOR_TYPE)
	}
}

/// Raw authenticator endpoints under `/api/server/v1/authenticators`.
#[derive(Clone, Debug)]
pub struct AuthenticatorApi {
	rest: RestClient,
}
impl AuthenticatorApi {
	/// Wraps `rest`.
	pub fn new(rest: RestClient) -> Self {
		Self { rest }
	}

	/// `GET /authenticators`.
	pub async fn list(&self, params: &AuthenticatorListParams) -> Result<Vec<Authenticator>> {
		let response = self
			.rest
			.get(management_path("/authenticators"))
			.query(params.to_query())
			.operation("list authenticators")
			.send::<Vec<Authenticator>>()
			.await?;

		Ok(response.body.unwrap_or_default())
	}

	/// Every authenticator of type `LOCAL`.
	pub async fn list_local(&self) -> Result<Vec<Authenticator>> {
		let mut authenticators = self.list(&AuthenticatorListParams::default()).await?;

		authenticators.retain(Authenticator::is_local);

		Ok(authenticators)
	}
}
