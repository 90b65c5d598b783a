// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error types for rbac-lookup

use thiserror::Error;

/// Errors reported by a binding or IAM policy provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The request never produced a response (connect, TLS, timeout)
    #[error("Request failed: {0}")]
    Transport(String),

    /// The upstream API answered with a non-success status
    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors that abort a lookup run
///
/// Each variant names the source whose listing failed. A run stops at the
/// first failing source and never reports partial results.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Error loading role bindings: {0}")]
    RoleBindings(#[source] ProviderError),

    #[error("Error loading cluster role bindings: {0}")]
    ClusterRoleBindings(#[source] ProviderError),

    #[error("Error loading IAM policy for project {project}: {source}")]
    IamPolicy {
        project: String,
        #[source]
        source: ProviderError,
    },
}
