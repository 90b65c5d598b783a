// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! HTTP clients for the binding and IAM policy providers

pub mod credentials;
pub mod gcp;
pub mod kube;

use std::time::Duration;

use rbac_lookup::ProviderError;
use serde::de::DeserializeOwned;

pub use gcp::ResourceManagerClient;
pub use kube::KubeClient;

/// Per-request timeout for every upstream call
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const USER_AGENT: &str = concat!("rbac-lookup/", env!("CARGO_PKG_VERSION"));

/// Start a reqwest client with the shared user agent and timeout
///
/// reqwest is built without a default crypto provider, so ring is installed
/// here before any client exists. Installing it a second time is a no-op.
pub(crate) fn http_client_builder() -> reqwest::ClientBuilder {
    let _ = rustls::crypto::ring::default_provider().install_default();

    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
}

pub(crate) fn transport_error(e: reqwest::Error) -> ProviderError {
    ProviderError::Transport(e.to_string())
}

/// Read a response body, mapping non-success statuses to `ProviderError::Api`
pub(crate) async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ProviderError> {
    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;

    if !status.is_success() {
        return Err(ProviderError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }

    Ok(serde_json::from_str(&body)?)
}

/// Pull a human-readable message out of an error body
///
/// Kubernetes answers with a `Status` object (`{"message": ...}`), Google
/// APIs with `{"error": {"message": ...}}`. Anything else is passed through.
fn error_message(body: &str) -> String {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .or_else(|| value.get("error").and_then(|e| e.get("message")))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        });

    message.unwrap_or_else(|| body.trim().to_string())
}
