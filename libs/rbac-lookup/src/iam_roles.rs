// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! GKE IAM role translation table.
//!
//! Only the IAM roles that confer access to a GKE cluster are modeled. Any
//! other role in a project policy is ignored by the lookup.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::model::{IAM_ROLE_SOURCE, SimpleRole};

/// Grant kind used for every translated IAM role
pub const IAM_ROLE_KIND: &str = "IAM";

/// A translated IAM role: the short name shown in reports and the role's
/// identifier without its `roles/` prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IamRole {
    pub name: &'static str,
    pub source: &'static str,
}

impl IamRole {
    pub fn to_simple_role(self) -> SimpleRole {
        SimpleRole::new(IAM_ROLE_KIND, self.name, IAM_ROLE_SOURCE, self.source)
    }
}

static GKE_IAM_ROLES: LazyLock<HashMap<&'static str, IamRole>> = LazyLock::new(|| {
    [
        ("roles/container.clusterAdmin", "gke-cluster-admin", "container.clusterAdmin"),
        ("roles/container.admin", "gke-admin", "container.admin"),
        ("roles/container.developer", "gke-developer", "container.developer"),
        ("roles/container.viewer", "gke-viewer", "container.viewer"),
        ("roles/owner", "gcp-owner", "owner"),
        ("roles/admin", "gcp-admin", "admin"),
        ("roles/editor", "gcp-editor", "editor"),
        ("roles/viewer", "gcp-viewer", "viewer"),
    ]
    .into_iter()
    .map(|(role, name, source)| (role, IamRole { name, source }))
    .collect()
});

/// Translate a full IAM role identifier into its simplified role, if the role
/// is one the lookup reports on
pub fn translate(role: &str) -> Option<SimpleRole> {
    GKE_IAM_ROLES.get(role).map(|r| r.to_simple_role())
}
