//! Partial OAuth configuration updates applied over a full-replace endpoint.

// self
use crate::api::application::{
	AccessTokenConfiguration, OidcConfiguration, OidcLogoutConfiguration, RefreshTokenConfiguration,
};

const REGEXP_PREFIX: &str = "regexp=";

/// Subset of the OIDC configuration that [`update_oauth_config`] may change. Unset fields keep
/// their current remote value.
///
/// [`update_oauth_config`]: crate::application::ApplicationClient::update_oauth_config
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OAuthConfigUpdate {
	/// JWT access token attributes.
	pub access_token_attributes: Option<Vec<String>>,
	/// Lifetime of application tokens.
	pub application_access_token_expiry_in_seconds: Option<i64>,
	/// Lifetime of user tokens.
	pub user_access_token_expiry_in_seconds: Option<i64>,
	/// CORS origins.
	pub allowed_origins: Option<Vec<String>>,
	/// Redirect URIs; see [`encode_callback_urls`].
	pub callback_urls: Option<Vec<String>>,
	/// Logout endpoints.
	pub logout: Option<OidcLogoutConfiguration>,
	/// Refresh token lifetime.
	pub refresh_token_expiry_in_seconds: Option<i64>,
}
impl OAuthConfigUpdate {
	/// Empty update.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the JWT access token attributes.
	pub fn access_token_attributes<I, S>(mut self, attributes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.access_token_attributes = Some(attributes.into_iter().map(Into::into).collect());

		self
	}

	/// Sets the application token lifetime.
	pub fn application_access_token_expiry(mut self, seconds: i64) -> Self {
		self.application_access_token_expiry_in_seconds = Some(seconds);

		self
	}

	/// Sets the user token lifetime.
	pub fn user_access_token_expiry(mut self, seconds: i64) -> Self {
		self.user_access_token_expiry_in_seconds = Some(seconds);

		self
	}

	/// Sets the CORS origins.
	pub fn allowed_origins<I, S>(mut self, origins: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.allowed_origins = Some(origins.into_iter().map(Into::into).collect());

		self
	}

	/// Sets the redirect URIs.
	pub fn callback_urls<I, S>(mut self, urls: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.callback_urls = Some(urls.into_iter().map(Into::into).collect());

		self
	}

	/// Sets the logout endpoints.
	pub fn logout(mut self, logout: OidcLogoutConfiguration) -> Self {
		self.logout = Some(logout);

		self
	}

	/// Sets the refresh token lifetime.
	pub fn refresh_token_expiry(mut self, seconds: i64) -> Self {
		self.refresh_token_expiry_in_seconds = Some(seconds);

		self
	}

	/// Overlays the set fields onto `config`, leaving every other field untouched.
	pub fn apply(&self, config: &mut OidcConfiguration) {
		if self.access_token_attributes.is_some()
			|| self.application_access_token_expiry_in_seconds.is_some()
			|| self.user_access_token_expiry_in_seconds.is_some()
		{
			let access_token =
				config.access_token.get_or_insert_with(AccessTokenConfiguration::default);

			if let Some(attributes) = &self.access_token_attributes {
				access_token.access_token_attributes = Some(attributes.clone());
			}
			if let Some(seconds) = self.application_access_token_expiry_in_seconds {
				access_token.application_access_token_expiry_in_seconds = Some(seconds);
			}
			if let Some(seconds) = self.user_access_token_expiry_in_seconds {
				access_token.user_access_token_expiry_in_seconds = Some(seconds);
			}
		}
		if let Some(origins) = &self.allowed_origins {
			config.allowed_origins = Some(origins.clone());
		}
		if let Some(urls) = &self.callback_urls {
			config.callback_urls = Some(encode_callback_urls(urls));
		}
		if let Some(logout) = &self.logout {
			config.logout = Some(logout.clone());
		}
		if let Some(seconds) = self.refresh_token_expiry_in_seconds {
			config
				.refresh_token
				.get_or_insert_with(RefreshTokenConfiguration::default)
				.expiry_in_seconds = Some(seconds);
		}
	}
}

/// Encodes redirect URIs the way the service stores them.
///
/// One URL is sent verbatim. Several URLs collapse into the single pattern
/// `regexp=(url1|url2|...)`. An empty list becomes a single empty string.
pub fn encode_callback_urls(urls: &[String]) -> Vec<String> {
	match urls {
		[single] => vec![single.clone()],
		[] => vec![String::new()],
		_ => vec![format!("{REGEXP_PREFIX}({})", urls.join("|"))],
	}
}

/// Reverses [`encode_callback_urls`] for display: a `regexp=(a|b)` pattern becomes `a,b`.
pub fn decode_callback_url(callback: &str) -> String {
	match callback.strip_prefix(REGEXP_PREFIX) {
		Some(pattern) =>
			pattern.trim_matches(['(', ')']).split('|').collect::<Vec<_>>().join(","),
		None => callback.to_owned(),
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn callback_urls_encode_by_count() {
		assert_eq!(encode_callback_urls(&["https://a".into()]), ["https://a"]);
		assert_eq!(
			encode_callback_urls(&["https://a".into(), "https://b".into()]),
			["regexp=(https://a|https://b)"]
		);
		assert_eq!(encode_callback_urls(&[]), [""]);
	}

	#[test]
	fn regexp_callbacks_decode_to_comma_list() {
		assert_eq!(decode_callback_url("regexp=(https://a|https://b)"), "https://a,https://b");
		assert_eq!(decode_callback_url("https://a"), "https://a");
	}

	#[test]
	fn apply_touches_only_set_fields() {
		let mut config: OidcConfiguration = serde_json::from_value(json!({
			"clientId": "cid",
			"grantTypes": ["authorization_code"],
			"callbackURLs": ["https://old"],
			"accessToken": { "type": "JWT", "userAccessTokenExpiryInSeconds": 3600 },
			"idToken": { "expiryInSeconds": 3600 }
		}))
		.expect("OIDC configuration should decode.");

		OAuthConfigUpdate::new()
			.callback_urls(["https://a", "https://b"])
			.user_access_token_expiry(900)
			.refresh_token_expiry(7200)
			.apply(&mut config);

		assert_eq!(
			serde_json::to_value(&config).expect("OIDC configuration should encode."),
			json!({
				"clientId": "cid",
				"grantTypes": ["authorization_code"],
				"callbackURLs": ["regexp=(https://a|https://b)"],
				"accessToken": { "type": "JWT", "userAccessTokenExpiryInSeconds": 900 },
				"refreshToken": { "expiryInSeconds": 7200 },
				"idToken": { "expiryInSeconds": 3600 }
			})
		);
	}

	#[test]
	fn apply_leaves_absent_sections_absent() {
		let mut config = OidcConfiguration::default();

		OAuthConfigUpdate::new().allowed_origins(["https://a"]).apply(&mut config);

		assert!(config.access_token.is_none());
		assert!(config.refresh_token.is_none());
		assert_eq!(config.allowed_origins, Some(vec!["https://a".to_owned()]));
	}
}
