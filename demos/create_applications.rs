//! Demonstrates creating a single-page application and a machine-to-machine application, then
//! authorizing the latter for an API resource, against a local mock tenant.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use asgardeo::{api::application::AuthorizedApiCreate, client::Client, config::ClientConfig};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let spa_location = server.url("/t/demo/api/server/v1/applications/spa-1");
	let m2m_location = server.url("/t/demo/api/server/v1/applications/m2m-1");
	let mut create_spa = server
		.mock_async(|when, then| {
			when.method(POST).path("/t/demo/api/server/v1/applications");
			then.status(201).header("location", spa_location);
		})
		.await;
	let _spa = server
		.mock_async(|when, then| {
			when.method(GET).path("/t/demo/api/server/v1/applications/spa-1");
			then.status(200).body("{\"id\":\"spa-1\",\"name\":\"Storefront\",\"clientId\":\"spa-client\"}");
		})
		.await;
	let _m2m = server
		.mock_async(|when, then| {
			when.method(GET).path("/t/demo/api/server/v1/applications/m2m-1/inbound-protocols/oidc");
			then.status(200).body("{\"clientId\":\"m2m-client\",\"clientSecret\":\"m2m-secret\"}");
		})
		.await;
	let authorize = server
		.mock_async(|when, then| {
			when.method(POST).path("/t/demo/api/server/v1/applications/m2m-1/authorized-apis");
			then.status(200);
		})
		.await;
	let config = ClientConfig::builder(server.url("/t/demo")).static_token("demo-token").build()?;
	let applications = Client::new(config).applications();
	let spa = applications
		.create_single_page_app("Storefront", "https://shop.example.com/callback")
		.await?;

	create_spa.delete_async().await;

	let _create_m2m = server
		.mock_async(|when, then| {
			when.method(POST).path("/t/demo/api/server/v1/applications");
			then.status(201).header("location", m2m_location);
		})
		.await;
	let worker = applications.create_m2m_app("Billing worker").await?;

	applications
		.authorize_api(
			&worker.id,
			&AuthorizedApiCreate {
				id: "orders-api".into(),
				policy_identifier: "RBAC".into(),
				scopes: vec!["orders:read".into()],
			},
		)
		.await?;

	println!("Created {} with client id {} and scope `{}`.", spa.name, spa.client_id, spa.scope());
	println!("Created {} with client id {}.", worker.name, worker.client_id);

	authorize.assert_async().await;

	Ok(())
}
