// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Binding source adapters.
//!
//! Each adapter performs one upstream listing and feeds the result to the
//! matching ingestion routine. Sources are loaded one at a time in a fixed
//! order and the first failure aborts the run.

use tracing::debug;

use crate::error::LookupError;
use crate::lister::Lister;
use crate::provider::{BindingProvider, IamPolicyProvider};

impl Lister {
    pub async fn load_role_bindings(
        &mut self,
        provider: &dyn BindingProvider,
    ) -> Result<(), LookupError> {
        let bindings = provider
            .list_role_bindings()
            .await
            .map_err(LookupError::RoleBindings)?;

        self.ingest_role_bindings(&bindings);
        debug!(count = bindings.len(), "loaded role bindings");
        Ok(())
    }

    pub async fn load_cluster_role_bindings(
        &mut self,
        provider: &dyn BindingProvider,
    ) -> Result<(), LookupError> {
        let bindings = provider
            .list_cluster_role_bindings()
            .await
            .map_err(LookupError::ClusterRoleBindings)?;

        self.ingest_cluster_role_bindings(&bindings);
        debug!(count = bindings.len(), "loaded cluster role bindings");
        Ok(())
    }

    pub async fn load_iam_policy(
        &mut self,
        provider: &dyn IamPolicyProvider,
        project: &str,
    ) -> Result<(), LookupError> {
        let policy = provider
            .get_iam_policy(project)
            .await
            .map_err(|source| LookupError::IamPolicy {
                project: project.to_string(),
                source,
            })?;

        self.ingest_iam_policy(&policy);
        debug!(project, count = policy.bindings.len(), "loaded IAM policy");
        Ok(())
    }

    /// Load RoleBindings, then ClusterRoleBindings, then the IAM policy
    ///
    /// The IAM policy is only fetched when an IAM provider is given and the
    /// lister was configured with a project.
    pub async fn load_all(
        &mut self,
        bindings: &dyn BindingProvider,
        iam: Option<&dyn IamPolicyProvider>,
    ) -> Result<(), LookupError> {
        self.load_role_bindings(bindings).await?;
        self.load_cluster_role_bindings(bindings).await?;

        match (iam, self.gke_project().map(str::to_string)) {
            (Some(provider), Some(project)) => self.load_iam_policy(provider, &project).await?,
            (Some(_), None) => debug!("no project resolved, skipping IAM policy"),
            (None, _) => {}
        }

        debug!(subjects = self.len(), "lookup complete");
        Ok(())
    }
}
