// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! GKE cluster detection
//!
//! `gcloud container clusters get-credentials` names kubeconfig clusters
//! `gke_<project>_<location>_<cluster>`, which is enough to find the project
//! whose IAM policy applies.

use anyhow::Result;

use super::kubeconfig::Kubeconfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GkeClusterInfo {
    pub project: String,
    pub location: String,
    pub cluster: String,
}

impl GkeClusterInfo {
    /// Parse a kubeconfig cluster name; `None` for non-GKE clusters
    pub fn parse(cluster_name: &str) -> Option<Self> {
        let mut parts = cluster_name.splitn(4, '_');
        if parts.next()? != "gke" {
            return None;
        }

        let project = parts.next().filter(|s| !s.is_empty())?;
        let location = parts.next().filter(|s| !s.is_empty())?;
        let cluster = parts.next().filter(|s| !s.is_empty())?;

        Some(Self {
            project: project.to_string(),
            location: location.to_string(),
            cluster: cluster.to_string(),
        })
    }
}

/// Find the GCP project for the selected context
///
/// The project parsed from a GKE cluster name wins; `fallback` is used for
/// clusters whose name carries no project.
pub fn resolve_project(
    kubeconfig: &Kubeconfig,
    requested_context: Option<&str>,
    fallback: Option<&str>,
) -> Result<Option<String>> {
    let context_name = kubeconfig.context_name(requested_context)?;
    let context = kubeconfig.context(context_name)?;

    if let Some(info) = GkeClusterInfo::parse(&context.cluster) {
        tracing::debug!(
            project = %info.project,
            location = %info.location,
            cluster = %info.cluster,
            "detected GKE cluster"
        );
        return Ok(Some(info.project));
    }

    Ok(fallback
        .filter(|project| !project.is_empty())
        .map(str::to_string))
}
