// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! RBAC lookup by subject
//!
//! Kubernetes spreads authorization over RoleBindings in every namespace and
//! ClusterRoleBindings at cluster scope, and GKE adds project-level IAM on
//! top. This library gathers all three into one view answering "which roles
//! does this user, group or service account hold, and where".
//!
//! # Flow
//!
//! 1. Build a [`Lister`] from [`LookupOptions`] (name filter, kind filter,
//!    optional GKE project)
//! 2. Call [`Lister::load_all`] with a [`BindingProvider`] and, optionally,
//!    an [`IamPolicyProvider`]
//! 3. Render with [`Lister::render`]
//!
//! # Scopes
//!
//! Grants are grouped under a scope label:
//!
//! - a namespace name, for RoleBindings
//! - `cluster-wide`, for ClusterRoleBindings
//! - `project-wide`, for IAM policy bindings
//!
//! # Example
//!
//! ```ignore
//! use rbac_lookup::{Lister, LookupOptions, ReportFormat};
//!
//! let mut lister = Lister::new(LookupOptions {
//!     name_filter: Some("jane".to_string()),
//!     ..Default::default()
//! });
//! lister.load_all(&kube_client, None).await?;
//! println!("{}", lister.render(ReportFormat::Wide));
//! ```

pub mod error;
pub mod iam_roles;
pub mod lister;
pub mod model;
pub mod provider;
pub mod render;
pub mod sources;
pub mod types;

pub use error::{LookupError, ProviderError};
pub use lister::{Lister, LookupOptions, parse_member, subject_key};
pub use model::{
    CLUSTER_WIDE_SCOPE, PROJECT_WIDE_SCOPE, RbacSubject, RoleSource, SERVICE_ACCOUNT_KIND,
    SimpleRole,
};
pub use provider::{BindingProvider, IamPolicyProvider};
pub use render::{NO_BINDINGS_FOUND, ReportFormat};
pub use types::{
    ClusterRoleBinding, IamBinding, IamPolicy, ObjectList, ObjectMeta, RoleBinding, RoleRef,
    Subject,
};
