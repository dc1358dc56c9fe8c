//! Typed REST client: URL and query construction, JSON bodies, request signing, and response
//! classification.
//!
//! Every call goes through [`RestRequest`], which
//!
//! 1. joins the tenant base URL with the path and appends only the query parameters that carry
//!    a value,
//! 2. serializes the JSON body (if any) and sets `Content-Type: application/json`,
//! 3. asks the [`RequestSigner`] for a bearer token, aborting before any I/O if that fails,
//! 4. maps `2xx` responses to success (empty bodies decode to `None`) and every other status
//!    to [`ApiError`] carrying the raw body,
//! 5. wraps failures with the operation label.

// crates.io
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, LOCATION};
// self
use crate::{
	_prelude::*,
	auth::RequestSigner,
	config::{ClientConfig, join_endpoint},
	error::{ApiError, DecodeError, ResponseError, TransportError},
	obs,
};

/// Path prefix of the versioned management API.
pub const MANAGEMENT_API_PATH: &str = "/api/server/v1";
/// Path prefix of the SCIM 2.0 user API.
pub const SCIM2_PATH: &str = "/scim2";
/// Path prefix that routes calls to a sub-organization.
pub const SUB_ORGANIZATION_PATH: &str = "/o";

const JSON: &str = "application/json";

/// Shared, cheaply cloneable REST client bound to one base URL and signer.
#[derive(Clone)]
pub struct RestClient {
	http_client: ReqwestClient,
	base_url: Url,
	signer: Arc<dyn RequestSigner>,
}
impl RestClient {
	/// Creates a client rooted at `base_url`.
	pub fn new(http_client: ReqwestClient, base_url: Url, signer: Arc<dyn RequestSigner>) -> Self {
		Self { http_client, base_url, signer }
	}

	/// Creates a client that signs with the configuration's token provider.
	pub fn from_config(config: &ClientConfig) -> Self {
		Self::new(
			config.http_client().clone(),
			config.base_url().clone(),
			config.token_provider().clone(),
		)
	}

	/// Base URL every request path is appended to.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Returns a copy whose base URL is extended by `path`.
	pub fn with_base_path(&self, path: &str) -> Result<Self> {
		Ok(Self { base_url: join_endpoint(&self.base_url, path)?, ..self.clone() })
	}

	/// Returns a copy that signs with `signer`.
	pub fn with_signer(&self, signer: Arc<dyn RequestSigner>) -> Self {
		Self { signer, ..self.clone() }
	}

	/// Starts a request for `path`, relative to the base URL.
	pub fn request(&self, method: Method, path: impl Into<String>) -> RestRequest<'_> {
		RestRequest {
			client: self,
			method,
			path: path.into(),
			query: QueryParams::default(),
			body: None,
			operation: "call management API",
			target: None,
		}
	}

	/// Starts a `GET` request.
	pub fn get(&self, path: impl Into<String>) -> RestRequest<'_> {
		self.request(Method::GET, path)
	}

	/// Starts a `POST` request.
	pub fn post(&self, path: impl Into<String>) -> RestRequest<'_> {
		self.request(Method::POST, path)
	}

	/// Starts a `PUT` request.
	pub fn put(&self, path: impl Into<String>) -> RestRequest<'_> {
		self.request(Method::PUT, path)
	}

	/// Starts a `PATCH` request.
	pub fn patch(&self, path: impl Into<String>) -> RestRequest<'_> {
		self.request(Method::PATCH, path)
	}

	/// Starts a `DELETE` request.
	pub fn delete(&self, path: impl Into<String>) -> RestRequest<'_> {
		self.request(Method::DELETE, path)
	}

	fn url(&self, path: &str, query: &QueryParams) -> Result<Url> {
		let mut url = join_endpoint(&self.base_url, path)?;

		if !query.is_empty() {
			url.query_pairs_mut().extend_pairs(query.iter());
		}

		Ok(url)
	}
}
impl Debug for RestClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RestClient").field("base_url", &self.base_url.as_str()).finish_non_exhaustive()
	}
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum BodyMode {
	Ignore,
	Optional,
	Required,
}

/// Request under construction. Finish it with [`send`](Self::send),
/// [`fetch`](Self::fetch), or [`send_without_body`](Self::send_without_body).
pub struct RestRequest<'a> {
	client: &'a RestClient,
	method: Method,
	path: String,
	query: QueryParams,
	body: Option<Result<Vec<u8>, serde_json::Error>>,
	operation: &'static str,
	target: Option<String>,
}
impl RestRequest<'_> {
	/// Replaces the query parameters.
	pub fn query(mut self, query: QueryParams) -> Self {
		self.query = query;

		self
	}

	/// Serializes `body` as the JSON request payload.
	pub fn json<B>(mut self, body: &B) -> Self
	where
		B: ?Sized + Serialize,
	{
		self.body = Some(serde_json::to_vec(body));

		self
	}

	/// Labels the call for error context, spans, and metrics.
	pub fn operation(mut self, operation: &'static str) -> Self {
		self.operation = operation;

		self
	}

	/// Records the resource identifier the call targets.
	pub fn target(mut self, target: impl Into<String>) -> Self {
		self.target = Some(target.into());

		self
	}

	/// Sends the request and decodes a body when one is present.
	pub async fn send<T>(self) -> Result<RestResponse<T>>
	where
		T: DeserializeOwned,
	{
		self.execute(BodyMode::Optional).await
	}

	/// Sends the request and requires a decodable body.
	pub async fn fetch<T>(self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.execute(BodyMode::Required).await?.body.ok_or_else(|| ResponseError::EmptyBody.into())
	}

	/// Sends the request and discards any body.
	pub async fn send_without_body(self) -> Result<RestResponse<()>> {
		self.execute(BodyMode::Ignore).await
	}

	async fn execute<T>(self, mode: BodyMode) -> Result<RestResponse<T>>
	where
		T: DeserializeOwned,
	{
		let operation = self.operation;
		let target = self.target.clone();

		obs::observe(operation, target.as_deref(), self.dispatch(mode)).await
	}

	async fn dispatch<T>(self, mode: BodyMode) -> Result<RestResponse<T>>
	where
		T: DeserializeOwned,
	{
		let url = self.client.url(&self.path, &self.query)?;
		let mut request = self.client.http_client.request(self.method, url).header(ACCEPT, JSON);

		if let Some(body) = self.body {
			request = request.header(CONTENT_TYPE, JSON).body(body.map_err(Error::Encode)?);
		}

		let request = self.client.signer.sign(request).await?;
		let response = request.send().await.map_err(TransportError::from)?;
		let status = response.status();
		let headers = response.headers().to_owned();

		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();

			return Err(ApiError { status, body }.into());
		}

		let body = if mode == BodyMode::Ignore || response.content_length() == Some(0) {
			None
		} else {
			let bytes = response.bytes().await.map_err(TransportError::from)?;

			decode_body(status, &bytes)?
		};

		if mode == BodyMode::Required && body.is_none() {
			return Err(ResponseError::EmptyBody.into());
		}

		Ok(RestResponse { status, headers, body })
	}
}

/// Decodes a JSON body; an empty or whitespace-only body yields `None`.
pub(crate) fn decode_body<T>(status: StatusCode, bytes: &[u8]) -> Result<Option<T>, DecodeError>
where
	T: DeserializeOwned,
{
	if bytes.iter().all(u8::is_ascii_whitespace) {
		return Ok(None);
	}

	serde_path_to_error::deserialize(&mut serde_json::Deserializer::from_slice(bytes))
		.map(Some)
		.map_err(|source| DecodeError { source, status })
}

/// Successful response with its headers and optional decoded body.
#[derive(Debug)]
pub struct RestResponse<T> {
	/// HTTP status code in the `2xx` range.
	pub status: StatusCode,
	/// Response headers.
	pub headers: HeaderMap,
	/// Decoded body; `None` when the service sent no content.
	pub body: Option<T>,
}
impl<T> RestResponse<T> {
	/// Raw `Location` header, if present and valid UTF-8.
	pub fn location(&self) -> Option<&str> {
		self.headers.get(LOCATION).and_then(|value| value.to_str().ok())
	}

	/// Identifier of the created resource: the last non-empty path segment of `Location`.
	pub fn location_id(&self) -> Result<String, ResponseError> {
		let location = self.location().ok_or(ResponseError::MissingLocation)?;

		extract_resource_id(location)
			.ok_or_else(|| ResponseError::InvalidLocation { location: location.to_owned() })
	}
}

/// Returns the last non-empty path segment of an absolute or relative `location`.
pub fn extract_resource_id(location: &str) -> Option<String> {
	let path = match Url::parse(location) {
		Ok(url) => url.path().to_owned(),
		Err(_) => location.split(['?', '#']).next().unwrap_or_default().to_owned(),
	};

	path.rsplit('/').find(|segment| !segment.is_empty()).map(str::to_owned)
}

/// Percent-encodes a value for use as a single path segment.
pub fn path_segment(value: &str) -> String {
	url::form_urlencoded::byte_serialize(value.as_bytes()).collect::<String>().replace('+', "%20")
}

/// Ordered query parameters with omission semantics: absent, empty, and zero values are
/// skipped rather than sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(&'static str, String)>);
impl QueryParams {
	/// Creates an empty parameter list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Always appends `key=value`.
	pub fn set(mut self, key: &'static str, value: impl Display) -> Self {
		self.0.push((key, value.to_string()));

		self
	}

	/// Appends `key=value` unless `value` is absent or empty.
	pub fn non_empty<S>(self, key: &'static str, value: Option<S>) -> Self
	where
		S: AsRef<str>,
	{
		match value {
			Some(value) if !value.as_ref().is_empty() => self.set(key, value.as_ref()),
			_ => self,
		}
	}

	/// Appends `key=value` unless `value` is absent or zero.
	pub fn non_zero(self, key: &'static str, value: Option<u32>) -> Self {
		match value {
			Some(value) if value != 0 => self.set(key, value),
			_ => self,
		}
	}

	/// Appends `key=value` unless `value` is absent.
	pub fn opt(self, key: &'static str, value: Option<impl Display>) -> Self {
		match value {
			Some(value) => self.set(key, value),
			None => self,
		}
	}

	/// Returns `true` when no parameter will be sent.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Looks up the first value recorded for `key`.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.iter().find(|(name, _)| *name == key).map(|(_, value)| value.as_str())
	}

	/// Iterates over `(key, value)` pairs in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
		self.0.iter().map(|(key, value)| (*key, value.as_str()))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn query_params_skip_absent_values() {
		let query = QueryParams::new()
			.set("offset", 0)
			.non_zero("limit", Some(0))
			.non_empty("filter", Some(""))
			.non_empty::<&str>("sort", None)
			.opt("recursive", Some(false))
			.non_empty("attributes", Some("clientId"));
		let pairs = query.iter().collect::<Vec<_>>();

		assert_eq!(pairs, [("offset", "0"), ("recursive", "false"), ("attributes", "clientId")]);
		assert_eq!(query.get("attributes"), Some("clientId"));
		assert!(QueryParams::new().is_empty());
	}

	#[test]
	fn resource_id_comes_from_last_segment() {
		assert_eq!(
			extract_resource_id("/api/server/v1/applications/abc123").as_deref(),
			Some("abc123")
		);
		assert_eq!(
			extract_resource_id("https://api.asgardeo.io/t/acme/api/server/v1/applications/abc123/")
				.as_deref(),
			Some("abc123")
		);
		assert_eq!(extract_resource_id("/applications/xyz?tab=general").as_deref(), Some("xyz"));
		assert_eq!(extract_resource_id("/"), None);
	}

	#[test]
	fn path_segment_escapes_reserved_characters() {
		assert_eq!(path_segment("abc-123"), "abc-123");
		assert_eq!(path_segment("a b/c"), "a%20b%2Fc");
	}

	#[test]
	fn empty_body_decodes_to_none() {
		let decoded: Option<Value> =
			decode_body(StatusCode::NO_CONTENT, b"").expect("Empty body should decode.");

		assert!(decoded.is_none());

		let decoded: Option<Value> =
			decode_body(StatusCode::OK, b" \n").expect("Whitespace body should decode.");

		assert!(decoded.is_none());
	}

	#[test]
	fn malformed_body_reports_path() {
		#[derive(Debug, Deserialize)]
		struct Envelope {
			#[allow(dead_code)]
			count: u32,
		}

		let err = decode_body::<Envelope>(StatusCode::OK, b"{\"count\":\"one\"}")
			.expect_err("String count should not decode.");

		assert_eq!(err.source.path().to_string(), "count");
		assert_eq!(err.status, StatusCode::OK);
	}
}
