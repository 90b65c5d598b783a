// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Provider abstractions for the upstream listing APIs.
//!
//! The lookup only needs read access to bindings and to one IAM policy, so a
//! fixed in-memory fixture can stand in for a live cluster in tests.

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::types::{ClusterRoleBinding, IamPolicy, RoleBinding};

/// Source of Kubernetes RBAC bindings
#[async_trait]
pub trait BindingProvider: Send + Sync {
    /// All RoleBindings across every namespace
    async fn list_role_bindings(&self) -> Result<Vec<RoleBinding>, ProviderError>;

    /// All ClusterRoleBindings
    async fn list_cluster_role_bindings(&self) -> Result<Vec<ClusterRoleBinding>, ProviderError>;
}

/// Source of cloud project IAM policies
#[async_trait]
pub trait IamPolicyProvider: Send + Sync {
    async fn get_iam_policy(&self, project: &str) -> Result<IamPolicy, ProviderError>;
}
