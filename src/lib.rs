//! Async management client for the Asgardeo identity platform: cached client-credentials
//! auth, typed REST bindings, and composite application workflows in one crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod application;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod organization;
pub mod rest;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// std
	use std::time::Duration as StdDuration;
	// self
	use crate::{client::Client, config::ClientConfig};

	/// Static bearer token used by [`static_token_client`].
	pub const TEST_TOKEN: &str = "test-token";
	/// Client id used by [`client_credentials_config`].
	pub const TEST_CLIENT_ID: &str = "test-client";
	/// Client secret used by [`client_credentials_config`].
	pub const TEST_CLIENT_SECRET: &str = "test-secret";

	/// Builds a [`Client`] that authenticates every call with [`TEST_TOKEN`].
	pub fn static_token_client(base_url: &str) -> Client {
		let config = ClientConfig::builder(base_url)
			.static_token(TEST_TOKEN)
			.timeout(StdDuration::from_secs(5))
			.build()
			.expect("Static token configuration should build.");

		Client::new(config)
	}

	/// Builds a [`ClientConfig`] that exchanges [`TEST_CLIENT_ID`] and [`TEST_CLIENT_SECRET`]
	/// at `{base_url}/oauth2/token`.
	pub fn client_credentials_config(base_url: &str) -> ClientConfig {
		ClientConfig::builder(base_url)
			.client_credentials(TEST_CLIENT_ID, TEST_CLIENT_SECRET)
			.timeout(StdDuration::from_secs(5))
			.build()
			.expect("Client credentials configuration should build.")
	}

	/// Token endpoint body returning `token` valid for `expires_in` seconds.
	pub fn token_body(token: &str, expires_in: u64) -> String {
		format!("{{\"access_token\":\"{token}\",\"token_type\":\"Bearer\",\"expires_in\":{expires_in}}}")
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, BTreeSet, HashMap, HashSet},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::Mutex;
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError, Method, StatusCode};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result, ResultExt};
}

pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
