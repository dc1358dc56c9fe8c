//! Client-level error types shared across the token pipeline, REST layer, and composites.

// crates.io
use reqwest::StatusCode;
// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Bearer token could not be obtained.
	#[error(transparent)]
	Authentication(#[from] AuthenticationError),
	/// Transport failure before any HTTP response was obtained.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Remote service answered outside the `2xx` range.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// Response body is present but does not match the expected shape.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Successful response is missing data the operation depends on.
	#[error(transparent)]
	Response(#[from] ResponseError),
	/// Request body could not be serialized.
	#[error("Request body could not be serialized.")]
	Encode(#[source] serde_json::Error),

	/// Lookup completed successfully but matched nothing.
	#[error("No {resource} matches `{key}`.")]
	NotFound {
		/// Resource kind, for example `application`.
		resource: &'static str,
		/// Lookup key supplied by the caller.
		key: String,
	},
	/// Caller supplied an empty or otherwise unusable argument.
	#[error("Argument `{name}` must not be empty.")]
	InvalidArgument {
		/// Argument name.
		name: &'static str,
	},
	/// Redirect URL supplied by the caller cannot be parsed.
	#[error("Redirect URL `{url}` is invalid.")]
	InvalidRedirectUrl {
		/// Raw value supplied by the caller.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Context added by an outer layer while forwarding an inner failure.
	#[error("Failed to {operation}{}: {source}", display_target(.target))]
	Operation {
		/// Operation label, for example `list applications`.
		operation: &'static str,
		/// Resource identifier the operation targeted, if any.
		target: Option<String>,
		/// Wrapped failure.
		#[source]
		source: Box<Error>,
	},
}
impl Error {
	/// Wraps `self` with operation context.
	pub fn context(self, operation: &'static str, target: Option<String>) -> Self {
		Self::Operation { operation, target, source: Box::new(self) }
	}

	/// Returns the innermost error beneath any [`Error::Operation`] layers.
	pub fn root(&self) -> &Error {
		let mut current = self;

		while let Error::Operation { source, .. } = current {
			current = source;
		}

		current
	}

	/// HTTP status carried by the root [`ApiError`], if any.
	pub fn status(&self) -> Option<StatusCode> {
		match self.root() {
			Error::Api(e) => Some(e.status),
			_ => None,
		}
	}

	/// Returns `true` when the root cause is a logical "not found" or an HTTP 404.
	pub fn is_not_found(&self) -> bool {
		matches!(self.root(), Error::NotFound { .. }) || self.status() == Some(StatusCode::NOT_FOUND)
	}
}

fn display_target(target: &Option<String>) -> String {
	match target {
		Some(target) => format!(" `{target}`"),
		None => String::new(),
	}
}

/// Adds operation context to fallible results.
pub trait ResultExt<T> {
	/// Wraps the error with an operation label.
	fn context(self, operation: &'static str) -> Result<T>;

	/// Wraps the error with an operation label and the targeted resource identifier.
	fn context_with(self, operation: &'static str, target: impl Display) -> Result<T>;
}
impl<T, E> ResultExt<T> for Result<T, E>
where
	E: Into<Error>,
{
	fn context(self, operation: &'static str) -> Result<T> {
		self.map_err(|e| e.into().context(operation, None))
	}

	fn context_with(self, operation: &'static str, target: impl Display) -> Result<T> {
		self.map_err(|e| e.into().context(operation, Some(target.to_string())))
	}
}

/// Configuration and validation failures raised while building a client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL cannot be parsed.
	#[error("Base URL `{url}` is invalid.")]
	InvalidBaseUrl {
		/// Raw value supplied by the caller.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoint derived from the base URL cannot be parsed.
	#[error("Endpoint `{url}` is invalid.")]
	InvalidEndpoint {
		/// Joined URL string.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Neither a static token nor client credentials were configured.
	#[error("An authentication method must be configured.")]
	MissingAuthMethod,
	/// Both a static token and client credentials were configured.
	#[error("Static token and client credentials are mutually exclusive.")]
	ConflictingAuthMethods,
	/// Static token is empty.
	#[error("Static token must not be empty.")]
	EmptyStaticToken,
	/// Client id or secret is empty.
	#[error("Client id and client secret must not be empty.")]
	EmptyClientCredentials,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Token acquisition failures.
#[derive(Debug, ThisError)]
pub enum AuthenticationError {
	/// Token endpoint could not be reached.
	#[error("Token endpoint could not be reached.")]
	Transport(#[from] TransportError),
	/// Token endpoint answered with a non-200 status or an OAuth error document.
	#[error("Token endpoint rejected the request: {message}.")]
	Rejected {
		/// HTTP status code, when available.
		status: Option<u16>,
		/// Error description or raw body returned by the endpoint.
		message: String,
	},
	/// Token endpoint responded with malformed JSON that could not be parsed.
	#[error("Token endpoint returned malformed JSON.")]
	MalformedResponse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token endpoint returned an empty `access_token`.
	#[error("Token endpoint returned an empty access token.")]
	EmptyToken,
	/// Organization switch needs a client-credentials configuration.
	#[error("Organization switch requires client credentials.")]
	ClientCredentialsRequired,
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the remote service.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the remote service.")]
	Io(#[from] std::io::Error),
	/// HTTP client failed for a reason it did not classify.
	#[error("HTTP client error occurred: {message}.")]
	Other {
		/// Client-supplied description.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Response received outside the `2xx` range.
#[derive(Debug, ThisError)]
#[error("API request failed with status {}: {body}", .status.as_u16())]
pub struct ApiError {
	/// HTTP status code.
	pub status: StatusCode,
	/// Raw response body, read best effort.
	pub body: String,
}

/// JSON decoding failure annotated with the offending path.
#[derive(Debug, ThisError)]
#[error("Response body does not match the expected shape at `{}`.", .source.path())]
pub struct DecodeError {
	/// Structured parsing failure.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
	/// HTTP status of the response being decoded.
	pub status: StatusCode,
}

/// Successful responses that still cannot satisfy the calling operation.
#[derive(Debug, ThisError)]
pub enum ResponseError {
	/// Create call returned no `Location` header.
	#[error("Response is missing the Location header.")]
	MissingLocation,
	/// `Location` header carries no resource identifier.
	#[error("Location header `{location}` carries no resource identifier.")]
	InvalidLocation {
		/// Raw header value.
		location: String,
	},
	/// A field the operation depends on is absent.
	#[error("Response is missing the `{field}` field.")]
	MissingField {
		/// JSON field name.
		field: &'static str,
	},
	/// Expected a body but the service answered with an empty one.
	#[error("Response body is empty.")]
	EmptyBody,
	/// Template id matches none of the known application archetypes.
	#[error("Unknown application type for template `{}`.", .template_id.as_deref().unwrap_or("<none>"))]
	UnknownApplicationType {
		/// Template id reported by the service.
		template_id: Option<String>,
	},
	/// Embedded payload does not match the typed shape.
	#[error("Unexpected {what} shape.")]
	UnexpectedShape {
		/// Payload description.
		what: &'static str,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn api_error_message_carries_status_and_body() {
		let err = Error::from(ApiError {
			status: StatusCode::BAD_REQUEST,
			body: "{\"error\":\"invalid_request\"}".into(),
		})
		.context("list applications", None);
		let message = err.to_string();

		assert!(message.contains("400"));
		assert!(message.contains("{\"error\":\"invalid_request\"}"));
		assert!(message.starts_with("Failed to list applications: "));
		assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
	}

	#[test]
	fn root_unwraps_nested_context() {
		let err = Error::NotFound { resource: "application", key: "demo".into() }
			.context("resolve application", Some("demo".into()))
			.context("authorize API", None);

		assert!(matches!(err.root(), Error::NotFound { .. }));
		assert!(err.is_not_found());
		assert!(err.to_string().contains("`demo`"));
	}
}
