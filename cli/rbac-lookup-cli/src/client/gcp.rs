// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Cloud Resource Manager client for project IAM policies

use std::process::{Command, Stdio};

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use rbac_lookup::{IamPolicy, IamPolicyProvider, ProviderError};

use super::{decode_response, http_client_builder, transport_error};

pub const RESOURCE_MANAGER_URL: &str = "https://cloudresourcemanager.googleapis.com";

/// Fetches project IAM policies with an OAuth access token
#[derive(Debug, Clone)]
pub struct ResourceManagerClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    fallback_project: Option<String>,
}

impl ResourceManagerClient {
    pub fn new(base_url: &str, token: String) -> Result<Self> {
        let http = http_client_builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            fallback_project: None,
        })
    }

    /// Project to retry with when the requested one cannot be read
    ///
    /// Mirrors gcloud's configured default project, for clusters whose name
    /// does not carry the project that owns their IAM policy.
    pub fn with_fallback_project(mut self, project: Option<String>) -> Self {
        self.fallback_project = project.filter(|p| !p.is_empty());
        self
    }

    async fn fetch(&self, project: &str) -> Result<IamPolicy, ProviderError> {
        let url = format!("{}/v1/projects/{}:getIamPolicy", self.base_url, project);
        tracing::debug!(%url, "fetching IAM policy");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(transport_error)?;

        decode_response(response).await
    }
}

#[async_trait]
impl IamPolicyProvider for ResourceManagerClient {
    async fn get_iam_policy(&self, project: &str) -> Result<IamPolicy, ProviderError> {
        match self.fetch(project).await {
            Ok(policy) => Ok(policy),
            Err(e) => match self.fallback_project.as_deref() {
                Some(fallback) if fallback != project => {
                    tracing::warn!(
                        project,
                        fallback,
                        error = %e,
                        "IAM policy lookup failed, retrying with fallback project"
                    );
                    self.fetch(fallback).await
                }
                _ => Err(e),
            },
        }
    }
}

/// The access token to use: `explicit` if set, else `gcloud`'s current one
pub fn access_token(explicit: Option<&str>) -> Result<String> {
    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok(token.to_string());
    }

    tracing::debug!("requesting access token from gcloud");

    let output = Command::new("gcloud")
        .args(["auth", "print-access-token"])
        .stdin(Stdio::null())
        .stderr(Stdio::inherit())
        .output()
        .context("Failed to run 'gcloud auth print-access-token'")?;

    if !output.status.success() {
        anyhow::bail!(
            "'gcloud auth print-access-token' exited with {}",
            output.status
        );
    }

    let token = String::from_utf8(output.stdout)
        .context("gcloud printed a non UTF-8 access token")?
        .trim()
        .to_string();
    if token.is_empty() {
        anyhow::bail!("gcloud printed an empty access token");
    }

    Ok(token)
}
