// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Kubernetes RBAC API client

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use rbac_lookup::{BindingProvider, ClusterRoleBinding, ObjectList, ProviderError, RoleBinding};
use serde::de::DeserializeOwned;

use super::credentials::{self, Credentials};
use super::{decode_response, http_client_builder, transport_error};
use crate::config::ClusterConnection;

const RBAC_API_PATH: &str = "/apis/rbac.authorization.k8s.io/v1";

/// Reads role bindings from one cluster's API server
#[derive(Debug, Clone)]
pub struct KubeClient {
    http: reqwest::Client,
    server: String,
    token: Option<String>,
}

impl KubeClient {
    pub fn new(connection: &ClusterConnection) -> Result<Self> {
        let cluster = &connection.cluster;
        let mut builder = http_client_builder()
            .danger_accept_invalid_certs(cluster.insecure_skip_tls_verify);

        let ca = credentials::inline_or_file(
            cluster.certificate_authority_data.as_deref(),
            cluster.certificate_authority.as_deref(),
            "certificate authority",
        )?;
        if let Some(pem) = ca {
            let certs = reqwest::Certificate::from_pem_bundle(&pem)
                .context("Invalid certificate authority bundle")?;
            for cert in certs {
                builder = builder.add_root_certificate(cert);
            }
        }

        let credentials = credentials::resolve(&connection.user).with_context(|| {
            format!(
                "Failed to load credentials for context '{}'",
                connection.context_name
            )
        })?;
        let token = match credentials {
            Credentials::Anonymous => None,
            Credentials::Bearer(token) => Some(token),
            Credentials::ClientCertificate(pem) => {
                let identity = reqwest::Identity::from_pem(&pem)
                    .context("Invalid client certificate or key")?;
                builder = builder.identity(identity);
                None
            }
        };

        let http = builder.build().context("Failed to build HTTP client")?;

        tracing::debug!(
            context = %connection.context_name,
            cluster = %connection.cluster_name,
            server = %cluster.server,
            "created kubernetes client"
        );

        Ok(Self {
            http,
            server: cluster.server.trim_end_matches('/').to_string(),
            token,
        })
    }

    async fn list<T: DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>, ProviderError> {
        let url = format!("{}{}/{}", self.server, RBAC_API_PATH, resource);
        tracing::debug!(%url, "listing");

        let mut request = self.http.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(transport_error)?;
        let list: ObjectList<T> = decode_response(response).await?;
        Ok(list.items)
    }
}

#[async_trait]
impl BindingProvider for KubeClient {
    async fn list_role_bindings(&self) -> Result<Vec<RoleBinding>, ProviderError> {
        self.list("rolebindings").await
    }

    async fn list_cluster_role_bindings(&self) -> Result<Vec<ClusterRoleBinding>, ProviderError> {
        self.list("clusterrolebindings").await
    }
}
