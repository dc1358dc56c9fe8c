//! Inputs and decoding for AI-assisted login-flow generation.

// self
use crate::{
	_prelude::*,
	api::{
		application::{
			AuthenticationSequence, AuthenticatorSummary, AvailableAuthenticators, UserClaim,
		},
		authenticator::{Authenticator, AuthenticatorCategory},
		claim::LocalClaim,
		identity_provider::IdentityProvider,
	},
	error::ResponseError,
};

/// Default delay between two status polls.
pub const DEFAULT_POLL_INTERVAL: std::time::Duration = std::time::Duration::from_secs(2);

/// Decoded result of a finished login-flow generation.
#[derive(Clone, Debug, PartialEq)]
pub struct LoginFlowResult {
	/// Generation status label reported by the service.
	pub status: Option<String>,
	/// Generated flow, ready for [`update_login_flow`].
	///
	/// [`update_login_flow`]: crate::application::ApplicationClient::update_login_flow
	pub flow: AuthenticationSequence,
}

/// Groups authenticators into the categories the generator understands.
///
/// Local authenticators are split by id into recovery, second-factor, and first-factor
/// groups. Identity providers are included only when their default authenticator can be
/// resolved to a name; social connectors go to `social` and everything else to `enterprise`.
pub fn available_authenticators(
	local: &[Authenticator],
	identity_providers: &[IdentityProvider],
) -> AvailableAuthenticators {
	let mut available = AvailableAuthenticators::default();

	for authenticator in local {
		let summary = AuthenticatorSummary {
			description: authenticator.description.clone().unwrap_or_default(),
			idp: authenticator.kind.clone().unwrap_or_default(),
			name: authenticator.name.clone(),
		};

		bucket(&mut available, AuthenticatorCategory::of_local(&authenticator.id)).push(summary);
	}

	for idp in identity_providers {
		let Some(idp_name) = idp.name.as_deref() else {
			continue;
		};
		let Some(default_id) = idp
			.federated_authenticators
			.as_ref()
			.and_then(|federated| federated.default_authenticator_id.as_deref())
		else {
			continue;
		};
		let Some(authenticator_name) = idp.default_authenticator_name().filter(|name| !name.is_empty())
		else {
			continue;
		};
		let summary = AuthenticatorSummary {
			description: idp.description.clone().unwrap_or_default(),
			idp: idp_name.to_owned(),
			name: authenticator_name.to_owned(),
		};

		bucket(&mut available, AuthenticatorCategory::of_federated(default_id)).push(summary);
	}

	available
}

fn bucket(
	available: &mut AvailableAuthenticators,
	category: AuthenticatorCategory,
) -> &mut Vec<AuthenticatorSummary> {
	match category {
		AuthenticatorCategory::Local => &mut available.local,
		AuthenticatorCategory::Recovery => &mut available.recovery,
		AuthenticatorCategory::SecondFactor => &mut available.second_factor,
		AuthenticatorCategory::Social => &mut available.social,
		AuthenticatorCategory::Enterprise => &mut available.enterprise,
	}
}

/// Claims offered to the generator; claims without a description are skipped.
pub fn user_claims(claims: &[LocalClaim]) -> Vec<UserClaim> {
	claims
		.iter()
		.filter_map(|claim| {
			let description = claim.description.as_ref()?;

			(!claim.claim_uri.is_empty()).then(|| UserClaim {
				claim_uri: claim.claim_uri.clone(),
				description: description.clone(),
			})
		})
		.collect()
}

/// Decodes the untyped generation payload into an [`AuthenticationSequence`].
pub fn decode_login_flow(data: Value) -> Result<AuthenticationSequence, ResponseError> {
	serde_path_to_error::deserialize(data)
		.map_err(|source| ResponseError::UnexpectedShape { what: "login flow", source })
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;
	use crate::api::{
		application::AuthenticationSequenceType,
		authenticator::{federated, local},
	};

	fn local_authenticator(id: &str, name: &str) -> Authenticator {
		Authenticator {
			id: id.into(),
			name: name.into(),
			kind: Some("LOCAL".into()),
			description: Some(format!("{name} authenticator")),
			..Default::default()
		}
	}

	#[test]
	fn authenticators_are_grouped_by_role() {
		let local = [
			local_authenticator(local::BASIC, "BasicAuthenticator"),
			local_authenticator(local::BACKUP_CODE, "backup-code-authenticator"),
			local_authenticator(local::TOTP, "totp"),
		];
		let idps: Vec<IdentityProvider> = serde_json::from_value(json!([
			{
				"id": "g",
				"name": "Google",
				"federatedAuthenticators": {
					"defaultAuthenticatorId": federated::GOOGLE_OIDC,
					"authenticators": [{ "authenticatorId": federated::GOOGLE_OIDC, "name": "GoogleOIDCAuthenticator" }]
				}
			},
			{
				"id": "s",
				"name": "Corporate",
				"description": "SAML IdP",
				"federatedAuthenticators": {
					"defaultAuthenticatorId": federated::SAML,
					"authenticators": [{ "authenticatorId": federated::SAML, "name": "SAMLSSOAuthenticator" }]
				}
			},
			{ "id": "n", "name": "NoAuthenticators" }
		]))
		.expect("Identity providers should decode.");
		let available = available_authenticators(&local, &idps);

		assert_eq!(available.local.len(), 1);
		assert_eq!(available.local[0].idp, "LOCAL");
		assert_eq!(available.recovery[0].name, "backup-code-authenticator");
		assert_eq!(available.second_factor[0].name, "totp");
		assert_eq!(available.social[0].idp, "Google");
		assert_eq!(available.enterprise[0].name, "SAMLSSOAuthenticator");
		assert_eq!(available.enterprise[0].description, "SAML IdP");
		assert_eq!(available.social.len() + available.enterprise.len(), 2);
	}

	#[test]
	fn claims_without_description_are_skipped() {
		let claims: Vec<LocalClaim> = serde_json::from_value(json!([
			{ "id": "1", "claimURI": "http://wso2.org/claims/emailaddress", "description": "Email" },
			{ "id": "2", "claimURI": "http://wso2.org/claims/hidden" }
		]))
		.expect("Local claims should decode.");

		assert_eq!(
			user_claims(&claims),
			[UserClaim {
				claim_uri: "http://wso2.org/claims/emailaddress".into(),
				description: "Email".into(),
			}]
		);
	}

	#[test]
	fn login_flow_payload_decodes_or_reports_shape() {
		let flow = decode_login_flow(json!({
			"type": "USER_DEFINED",
			"attributeStepId": 1,
			"subjectStepId": 1,
			"steps": [{ "id": 1, "options": [{ "idp": "LOCAL", "authenticator": "BasicAuthenticator" }] }]
		}))
		.expect("Generated flow should decode.");

		assert_eq!(flow.kind, AuthenticationSequenceType::UserDefined);
		assert_eq!(flow.steps.as_ref().map(Vec::len), Some(1));

		let err = decode_login_flow(json!({ "type": "USER_DEFINED", "steps": "oops" }))
			.expect_err("Malformed steps should not decode.");

		assert!(matches!(
			&err,
			ResponseError::UnexpectedShape { what: "login flow", source }
				if source.path().to_string() == "steps"
		));
	}
}
