// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Kubeconfig file types
//!
//! Only the parts needed to reach the API server are modeled: clusters,
//! contexts, and users with token, client certificate or exec credentials.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::{Deserialize, Deserializer};

/// Treat an explicit YAML `null` the same as a missing field
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A parsed (and possibly merged) kubeconfig
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Kubeconfig {
    #[serde(default)]
    pub current_context: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub clusters: Vec<NamedCluster>,

    #[serde(default, deserialize_with = "nullable")]
    pub contexts: Vec<NamedContext>,

    #[serde(default, deserialize_with = "nullable")]
    pub users: Vec<NamedAuthInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedCluster {
    pub name: String,
    pub cluster: Cluster,
}

/// How to reach and trust an API server
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Cluster {
    pub server: String,

    /// Path to a PEM CA bundle
    #[serde(default)]
    pub certificate_authority: Option<PathBuf>,

    /// Base64-encoded PEM CA bundle
    #[serde(default)]
    pub certificate_authority_data: Option<String>,

    #[serde(default)]
    pub insecure_skip_tls_verify: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedContext {
    pub name: String,
    pub context: Context,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Context {
    pub cluster: String,
    #[serde(default)]
    pub user: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedAuthInfo {
    pub name: String,
    #[serde(default)]
    pub user: AuthInfo,
}

/// Credentials for an API server
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AuthInfo {
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default, rename = "tokenFile")]
    pub token_file: Option<PathBuf>,

    #[serde(default)]
    pub client_certificate: Option<PathBuf>,

    #[serde(default)]
    pub client_certificate_data: Option<String>,

    #[serde(default)]
    pub client_key: Option<PathBuf>,

    #[serde(default)]
    pub client_key_data: Option<String>,

    #[serde(default)]
    pub exec: Option<ExecConfig>,
}

/// An exec credential plugin (`client.authentication.k8s.io`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecConfig {
    #[serde(default)]
    pub api_version: Option<String>,

    pub command: String,

    #[serde(default, deserialize_with = "nullable")]
    pub args: Vec<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub env: Vec<ExecEnvVar>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExecEnvVar {
    pub name: String,
    pub value: String,
}

/// Everything needed to build a client for one context
#[derive(Debug, Clone)]
pub struct ClusterConnection {
    pub context_name: String,
    pub cluster_name: String,
    pub cluster: Cluster,
    pub user: AuthInfo,
}

fn resolve_relative(path: &mut Option<PathBuf>, dir: &Path) {
    if let Some(p) = path
        && p.is_relative()
    {
        *p = dir.join(&*p);
    }
}

impl Kubeconfig {
    /// Load a single kubeconfig file
    ///
    /// Relative file references inside it are resolved against the file's
    /// own directory.
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read kubeconfig '{}'", path.display()))?;
        let mut config: Kubeconfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse kubeconfig '{}'", path.display()))?;

        if let Some(dir) = path.parent() {
            config.resolve_relative_paths(dir);
        }

        Ok(config)
    }

    /// Load and merge kubeconfig files
    ///
    /// With several files, missing ones are skipped and the first definition
    /// of any cluster, context or user name wins. A lone file must exist.
    pub fn load(paths: &[PathBuf]) -> Result<Self> {
        if let [path] = paths {
            return Self::read(path);
        }

        let mut merged: Option<Kubeconfig> = None;
        for path in paths {
            if !path.exists() {
                tracing::debug!(path = %path.display(), "skipping missing kubeconfig");
                continue;
            }
            let config = Self::read(path)?;
            merged = Some(match merged {
                Some(existing) => existing.merge(config),
                None => config,
            });
        }

        merged.ok_or_else(|| anyhow::anyhow!("No kubeconfig found in KUBECONFIG"))
    }

    /// Fold `other` into `self`, keeping existing entries on name clashes
    pub fn merge(mut self, other: Kubeconfig) -> Self {
        if self.current_context.as_deref().is_none_or(str::is_empty) {
            self.current_context = other.current_context;
        }

        for cluster in other.clusters {
            if !self.clusters.iter().any(|c| c.name == cluster.name) {
                self.clusters.push(cluster);
            }
        }
        for context in other.contexts {
            if !self.contexts.iter().any(|c| c.name == context.name) {
                self.contexts.push(context);
            }
        }
        for user in other.users {
            if !self.users.iter().any(|u| u.name == user.name) {
                self.users.push(user);
            }
        }

        self
    }

    fn resolve_relative_paths(&mut self, dir: &Path) {
        for cluster in &mut self.clusters {
            resolve_relative(&mut cluster.cluster.certificate_authority, dir);
        }
        for user in &mut self.users {
            resolve_relative(&mut user.user.token_file, dir);
            resolve_relative(&mut user.user.client_certificate, dir);
            resolve_relative(&mut user.user.client_key, dir);
        }
    }

    /// Pick the context to use: the requested one, else current-context
    pub fn context_name<'a>(&'a self, requested: Option<&'a str>) -> Result<&'a str> {
        requested
            .filter(|name| !name.is_empty())
            .or(self.current_context.as_deref().filter(|name| !name.is_empty()))
            .ok_or_else(|| {
                anyhow::anyhow!("No context selected. Set current-context or pass --context")
            })
    }

    pub fn context(&self, name: &str) -> Result<&Context> {
        self.contexts
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.context)
            .ok_or_else(|| anyhow::anyhow!("Context '{}' not found in kubeconfig", name))
    }

    pub fn cluster(&self, name: &str) -> Result<&Cluster> {
        self.clusters
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.cluster)
            .ok_or_else(|| anyhow::anyhow!("Cluster '{}' not found in kubeconfig", name))
    }

    /// Credentials for `name`; an unknown or empty user means anonymous
    pub fn user(&self, name: &str) -> AuthInfo {
        self.users
            .iter()
            .find(|u| u.name == name)
            .map(|u| u.user.clone())
            .unwrap_or_default()
    }

    /// Resolve the cluster and credentials for a context
    pub fn connection(&self, requested: Option<&str>) -> Result<ClusterConnection> {
        let context_name = self.context_name(requested)?;
        let context = self.context(context_name)?;
        let cluster = self.cluster(&context.cluster)?;

        if cluster.server.is_empty() {
            anyhow::bail!("Cluster '{}' has no server configured", context.cluster);
        }

        Ok(ClusterConnection {
            context_name: context_name.to_string(),
            cluster_name: context.cluster.clone(),
            cluster: cluster.clone(),
            user: self.user(&context.user),
        })
    }
}
