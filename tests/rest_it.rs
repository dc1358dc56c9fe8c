// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use asgardeo::{
	_preludet::*,
	api::application::ApplicationListParams,
	error::{ApiError, DecodeError},
};

#[tokio::test]
async fn list_sends_only_set_query_parameters() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/t/acme/api/server/v1/applications")
				.header("authorization", format!("Bearer {TEST_TOKEN}"))
				.query_param("limit", "10")
				.query_param("offset", "0")
				.query_param("excludeSystemPortals", "true");
			then.status(200).json_body(json!({
				"totalResults": 1,
				"startIndex": 1,
				"count": 1,
				"applications": [{ "id": "app-1", "name": "Portal" }]
			}));
		})
		.await;
	let client = static_token_client(&server.url("/t/acme"));
	let list = client.applications().list(0, 0).await.expect("Listing should succeed.");

	assert_eq!(list.total_results, 1);
	assert_eq!(list.applications[0].name, "Portal");

	mock.assert_async().await;

	let params = ApplicationListParams::default().limit(5);

	assert_eq!(params.to_query().get("limit"), Some("5"));
	assert_eq!(params.to_query().get("filter"), None);
	assert_eq!(params.to_query().get("excludeSystemPortals"), None);
}

#[tokio::test]
async fn no_content_responses_succeed() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/api/server/v1/applications/app-1");
			then.status(204);
		})
		.await;
	let client = static_token_client(&server.base_url());

	client.application_api().delete("app-1").await.expect("Delete should succeed on 204.");

	mock.assert_async().await;
}

#[tokio::test]
async fn error_status_carries_status_and_body() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/server/v1/applications/missing");
			then.status(404).body("{\"code\":\"APP-60006\",\"message\":\"Application not found.\"}");
		})
		.await;
	let client = static_token_client(&server.base_url());
	let err = client.application_api().get("missing").await.expect_err("Missing app should fail.");

	assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
	assert!(err.is_not_found());
	assert!(matches!(
		err.root(),
		Error::Api(ApiError { body, .. }) if body.contains("Application not found.")
	));
	assert!(err.to_string().contains("get application `missing`"));
}

#[tokio::test]
async fn bad_request_keeps_service_message() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(PATCH).path("/api/server/v1/applications/app-1");
			then.status(400).body("{\"message\":\"Invalid name.\"}");
		})
		.await;
	let client = static_token_client(&server.base_url());
	let err = client
		.applications()
		.update_basic_info("app-1", asgardeo::application::BasicInfoUpdate::new().name(""))
		.await
		.expect_err("Rejected patch should fail.");

	assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
	assert!(err.to_string().contains("Invalid name."));
}

#[tokio::test]
async fn malformed_body_reports_field_path() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/server/v1/applications");
			then.status(200).body("{\"totalResults\":\"many\"}");
		})
		.await;
	let client = static_token_client(&server.base_url());
	let err = client.applications().list(10, 0).await.expect_err("Malformed list should fail.");

	assert!(matches!(
		err.root(),
		Error::Decode(DecodeError { source, status })
			if source.path().to_string() == "totalResults" && *status == StatusCode::OK
	));
}

#[tokio::test]
async fn empty_body_fails_when_a_body_is_required() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/server/v1/applications/app-1");
			then.status(200);
		})
		.await;
	let client = static_token_client(&server.base_url());
	let err = client.application_api().get("app-1").await.expect_err("Empty body should fail.");

	assert!(matches!(err.root(), Error::Response(asgardeo::error::ResponseError::EmptyBody)));
}
