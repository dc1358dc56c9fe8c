//! Demonstrates the cached client-credentials token being shared by two management services
//! against a local mock tenant.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use asgardeo::{client::Client, config::ClientConfig};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/t/demo/oauth2/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"Bearer\",\"expires_in\":3600}",
			);
		})
		.await;
	let _scopes = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/t/demo/api/server/v1/oidc/scopes")
				.header("authorization", "Bearer demo-access");
			then.status(200).body("[{\"name\":\"openid\",\"claims\":[\"sub\"]}]");
		})
		.await;
	let _authenticators = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/t/demo/api/server/v1/authenticators")
				.header("authorization", "Bearer demo-access");
			then.status(200)
				.body("[{\"id\":\"QmFzaWNBdXRoZW50aWNhdG9y\",\"name\":\"BasicAuthenticator\",\"type\":\"LOCAL\"}]");
		})
		.await;
	let config = ClientConfig::builder(server.url("/t/demo"))
		.client_credentials("demo-client", "demo-secret")
		.build()?;
	let client = Client::new(config);
	let scopes = client.oidc_scopes().list().await?;
	let authenticators = client.authenticators().list_local().await?;

	println!("OIDC scopes: {}.", scopes.iter().map(|scope| scope.name.as_str()).collect::<Vec<_>>().join(", "));
	println!("Local authenticators: {}.", authenticators.len());

	token_mock.assert_async().await;

	Ok(())
}
