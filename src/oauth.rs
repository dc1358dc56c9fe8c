//! Token-endpoint exchanges: the client-credentials grant and the organization-switch grant.

pub use oauth2;

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use oauth2::{
	AuthType, ClientId, ClientSecret, HttpClientError, RequestTokenError, Scope, TokenResponse,
	TokenUrl,
	basic::{BasicClient, BasicErrorResponse, BasicRequestTokenError},
};
use reqwest::header::{ACCEPT, AUTHORIZATION};
// self
use crate::{
	_prelude::*,
	auth::{CachedToken, TokenSecret},
	error::{AuthenticationError, TransportError},
	http::{ReqwestHttpClient, ResponseMetadata, ResponseMetadataSlot},
};

/// Scope requested for management access tokens.
pub const SYSTEM_SCOPE: &str = "SYSTEM";
/// Grant type that trades a root-organization token for a sub-organization token.
pub const ORGANIZATION_SWITCH_GRANT: &str = "organization_switch";

/// Performs the client-credentials grant and returns a token stamped with its expiry.
///
/// `client_id` and `client_secret` travel in the form body alongside
/// `grant_type=client_credentials` and `scope=SYSTEM`. A response without `expires_in` yields
/// a token that is already inside the refresh margin, so the next call fetches a new one.
pub(crate) async fn exchange_client_credentials(
	http_client: &ReqwestHttpClient,
	token_endpoint: &Url,
	client_id: &str,
	client_secret: &TokenSecret,
) -> Result<CachedToken, AuthenticationError> {
	let oauth_client = BasicClient::new(ClientId::new(client_id.to_owned()))
		.set_client_secret(ClientSecret::new(client_secret.expose().to_owned()))
		.set_auth_type(AuthType::RequestBody)
		.set_token_uri(TokenUrl::from_url(token_endpoint.clone()));
	let meta = ResponseMetadataSlot::default();
	let instrumented = http_client.instrumented(meta.clone());
	let issued_at = OffsetDateTime::now_utc();
	let response = oauth_client
		.exchange_client_credentials()
		.add_scope(Scope::new(SYSTEM_SCOPE.to_owned()))
		.request_async(&instrumented)
		.await
		.map_err(|err| map_request_error(meta.take(), err))?;
	let access_token = response.access_token().secret();

	if access_token.is_empty() {
		return Err(AuthenticationError::EmptyToken);
	}

	let expires_in = response
		.expires_in()
		.and_then(|lifetime| i64::try_from(lifetime.as_secs()).ok())
		.unwrap_or_default();

	Ok(CachedToken::from_expires_in(access_token.to_owned(), issued_at, Duration::seconds(expires_in)))
}

#[derive(Deserialize)]
struct OrganizationSwitchResponse {
	#[serde(default)]
	access_token: String,
}

/// Trades `base_token` for a token scoped to `organization_id`.
///
/// The exchange authenticates with HTTP Basic credentials and is never cached.
pub(crate) async fn exchange_organization_switch(
	http_client: &ReqwestHttpClient,
	token_endpoint: &Url,
	client_id: &str,
	client_secret: &TokenSecret,
	base_token: &TokenSecret,
	organization_id: &str,
) -> Result<TokenSecret, AuthenticationError> {
	let form = [
		("grant_type", ORGANIZATION_SWITCH_GRANT),
		("scope", SYSTEM_SCOPE),
		("switching_organization", organization_id),
		("token", base_token.expose()),
	];
	let response = http_client
		.post(token_endpoint.clone())
		.header(AUTHORIZATION, basic_authorization(client_id, client_secret))
		.header(ACCEPT, "application/json")
		.form(&form)
		.send()
		.await
		.map_err(TransportError::from)?;
	let status = response.status();
	let body = response.bytes().await.map_err(TransportError::from)?;

	if status != StatusCode::OK {
		return Err(AuthenticationError::Rejected {
			status: Some(status.as_u16()),
			message: String::from_utf8_lossy(&body).into_owned(),
		});
	}

	let payload: OrganizationSwitchResponse =
		serde_path_to_error::deserialize(&mut serde_json::Deserializer::from_slice(&body))
			.map_err(|source| AuthenticationError::MalformedResponse {
				source,
				status: Some(status.as_u16()),
			})?;

	if payload.access_token.is_empty() {
		return Err(AuthenticationError::EmptyToken);
	}

	Ok(TokenSecret::new(payload.access_token))
}

/// `Authorization` header value for HTTP Basic client authentication.
pub(crate) fn basic_authorization(client_id: &str, client_secret: &TokenSecret) -> String {
	let credentials = format!("{client_id}:{}", client_secret.expose());

	format!("Basic {}", STANDARD.encode(credentials))
}

fn map_request_error(
	meta: Option<ResponseMetadata>,
	err: BasicRequestTokenError<HttpClientError<ReqwestError>>,
) -> AuthenticationError {
	let status = meta.and_then(|value| value.status);

	match err {
		RequestTokenError::ServerResponse(response) =>
			AuthenticationError::Rejected { status, message: server_response_message(&response) },
		RequestTokenError::Request(error) => map_transport_error(error).into(),
		RequestTokenError::Parse(source, body) => match status {
			Some(code) if code != StatusCode::OK.as_u16() => AuthenticationError::Rejected {
				status,
				message: String::from_utf8_lossy(&body).into_owned(),
			},
			_ => AuthenticationError::MalformedResponse { source, status },
		},
		RequestTokenError::Other(message) => AuthenticationError::Rejected { status, message },
	}
}

fn server_response_message(response: &BasicErrorResponse) -> String {
	match response.error_description() {
		Some(description) => format!("{}: {description}", response.error().as_ref()),
		None => response.error().as_ref().to_owned(),
	}
}

fn map_transport_error(err: HttpClientError<ReqwestError>) -> TransportError {
	match err {
		HttpClientError::Reqwest(inner) => TransportError::from(*inner),
		HttpClientError::Http(inner) => TransportError::network(inner),
		HttpClientError::Io(inner) => TransportError::Io(inner),
		HttpClientError::Other(message) => TransportError::Other { message },
		_ => TransportError::Other { message: "unclassified HTTP client failure".into() },
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn basic_authorization_encodes_credentials() {
		let header = basic_authorization("client", &TokenSecret::new("secret"));

		assert_eq!(header, "Basic Y2xpZW50OnNlY3JldA==");
	}

	#[test]
	fn other_errors_become_rejections() {
		let err = map_request_error(
			Some(ResponseMetadata { status: Some(500) }),
			RequestTokenError::Other("server returned empty error response".into()),
		);

		assert!(matches!(err, AuthenticationError::Rejected { status: Some(500), .. }));
	}
}
