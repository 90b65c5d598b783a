// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Simplified role model

use indexmap::IndexMap;
use serde::Serialize;

/// Scope label for grants coming from ClusterRoleBindings
pub const CLUSTER_WIDE_SCOPE: &str = "cluster-wide";

/// Scope label for grants coming from the cloud project IAM policy
pub const PROJECT_WIDE_SCOPE: &str = "project-wide";

/// Subject kind whose key is qualified by its namespace
pub const SERVICE_ACCOUNT_KIND: &str = "ServiceAccount";

pub const ROLE_BINDING_SOURCE: &str = "RoleBinding";
pub const CLUSTER_ROLE_BINDING_SOURCE: &str = "ClusterRoleBinding";
pub const IAM_ROLE_SOURCE: &str = "IAMRole";

/// Where a grant came from: the kind and name of the binding object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleSource {
    pub kind: String,
    pub name: String,
}

/// One role assignment as reported by the lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimpleRole {
    /// `Role`, `ClusterRole` or `IAM`
    pub kind: String,
    pub name: String,
    pub source: RoleSource,
}

impl SimpleRole {
    pub fn new(
        kind: impl Into<String>,
        name: impl Into<String>,
        source_kind: impl Into<String>,
        source_name: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            source: RoleSource {
                kind: source_kind.into(),
                name: source_name.into(),
            },
        }
    }
}

/// Everything one subject holds, grouped by scope
///
/// Scopes keep the order in which they were first seen, and grants within a
/// scope keep ingestion order. Nothing is deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RbacSubject {
    pub kind: String,
    pub roles_by_scope: IndexMap<String, Vec<SimpleRole>>,
}

impl RbacSubject {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            roles_by_scope: IndexMap::new(),
        }
    }

    /// Append a grant under `scope`, creating the scope if needed
    pub fn add_role(&mut self, scope: &str, role: SimpleRole) {
        self.roles_by_scope
            .entry(scope.to_string())
            .or_default()
            .push(role);
    }

    /// Grants held under `scope`, empty if the scope is unknown
    pub fn roles_in(&self, scope: &str) -> &[SimpleRole] {
        self.roles_by_scope
            .get(scope)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn role_count(&self) -> usize {
        self.roles_by_scope.values().map(Vec::len).sum()
    }
}
