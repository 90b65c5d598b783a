// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Credential resolution for kubeconfig users

use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context as _, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;

use crate::config::kubeconfig::{AuthInfo, ExecConfig};

const DEFAULT_EXEC_API_VERSION: &str = "client.authentication.k8s.io/v1beta1";

/// Credentials presented to the API server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Anonymous,
    Bearer(String),
    /// PEM certificate followed by its PEM private key
    ClientCertificate(Vec<u8>),
}

/// Turn a kubeconfig user into usable credentials
///
/// Precedence follows kubectl: static token, token file, client
/// certificate, then an exec plugin.
pub fn resolve(user: &AuthInfo) -> Result<Credentials> {
    if let Some(token) = user.token.as_deref().filter(|t| !t.is_empty()) {
        return Ok(Credentials::Bearer(token.to_string()));
    }

    if let Some(path) = &user.token_file {
        let token = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read token file '{}'", path.display()))?;
        return Ok(Credentials::Bearer(token.trim().to_string()));
    }

    let cert = inline_or_file(
        user.client_certificate_data.as_deref(),
        user.client_certificate.as_deref(),
        "client certificate",
    )?;
    let key = inline_or_file(
        user.client_key_data.as_deref(),
        user.client_key.as_deref(),
        "client key",
    )?;
    match (cert, key) {
        (Some(cert), Some(key)) => return Ok(Credentials::ClientCertificate(concat_pem(cert, key))),
        (Some(_), None) => anyhow::bail!("Client certificate configured without a client key"),
        (None, Some(_)) => anyhow::bail!("Client key configured without a client certificate"),
        (None, None) => {}
    }

    if let Some(exec) = &user.exec {
        return run_exec_plugin(exec);
    }

    Ok(Credentials::Anonymous)
}

/// Decode base64 inline data, else read the referenced file
pub fn inline_or_file(data: Option<&str>, path: Option<&Path>, what: &str) -> Result<Option<Vec<u8>>> {
    if let Some(data) = data.filter(|d| !d.is_empty()) {
        let bytes = STANDARD
            .decode(data.trim())
            .with_context(|| format!("Invalid base64 in {} data", what))?;
        return Ok(Some(bytes));
    }

    match path {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read {} '{}'", what, path.display()))?;
            Ok(Some(bytes))
        }
        None => Ok(None),
    }
}

fn concat_pem(mut cert: Vec<u8>, key: Vec<u8>) -> Vec<u8> {
    if !cert.ends_with(b"\n") {
        cert.push(b'\n');
    }
    cert.extend(key);
    cert
}

#[derive(Debug, Deserialize)]
struct ExecCredential {
    #[serde(default)]
    status: Option<ExecCredentialStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExecCredentialStatus {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    client_certificate_data: Option<String>,
    #[serde(default)]
    client_key_data: Option<String>,
}

/// Run an exec credential plugin and read the ExecCredential it prints
fn run_exec_plugin(exec: &ExecConfig) -> Result<Credentials> {
    let api_version = exec
        .api_version
        .as_deref()
        .unwrap_or(DEFAULT_EXEC_API_VERSION);
    let exec_info = serde_json::json!({
        "apiVersion": api_version,
        "kind": "ExecCredential",
        "spec": { "interactive": false },
    });

    tracing::debug!(command = %exec.command, "running exec credential plugin");

    let output = Command::new(&exec.command)
        .args(&exec.args)
        .envs(exec.env.iter().map(|v| (&v.name, &v.value)))
        .env("KUBERNETES_EXEC_INFO", exec_info.to_string())
        .stdin(Stdio::null())
        .stderr(Stdio::inherit())
        .output()
        .with_context(|| format!("Failed to run credential plugin '{}'", exec.command))?;

    if !output.status.success() {
        anyhow::bail!(
            "Credential plugin '{}' exited with {}",
            exec.command,
            output.status
        );
    }

    parse_exec_credential(&output.stdout)
        .with_context(|| format!("Invalid output from credential plugin '{}'", exec.command))
}

fn parse_exec_credential(stdout: &[u8]) -> Result<Credentials> {
    let credential: ExecCredential = serde_json::from_slice(stdout)?;
    let status = credential
        .status
        .ok_or_else(|| anyhow::anyhow!("ExecCredential has no status"))?;

    if let Some(token) = status.token.filter(|t| !t.is_empty()) {
        return Ok(Credentials::Bearer(token));
    }

    match (status.client_certificate_data, status.client_key_data) {
        (Some(cert), Some(key)) => Ok(Credentials::ClientCertificate(concat_pem(
            cert.into_bytes(),
            key.into_bytes(),
        ))),
        _ => anyhow::bail!("ExecCredential status carries neither a token nor a client certificate"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_static_token() {
        let user = AuthInfo {
            token: Some("abc".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve(&user).unwrap(), Credentials::Bearer("abc".to_string()));
    }

    #[test]
    fn test_token_file_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "from-file\n").unwrap();

        let user = AuthInfo {
            token_file: Some(path),
            ..Default::default()
        };
        assert_eq!(
            resolve(&user).unwrap(),
            Credentials::Bearer("from-file".to_string())
        );
    }

    #[test]
    fn test_missing_token_file() {
        let user = AuthInfo {
            token_file: Some("/nonexistent/rbac-lookup/token".into()),
            ..Default::default()
        };
        let err = resolve(&user).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read token file"));
    }

    #[test]
    fn test_inline_client_certificate() {
        let user = AuthInfo {
            client_certificate_data: Some(STANDARD.encode("CERT")),
            client_key_data: Some(STANDARD.encode("KEY\n")),
            ..Default::default()
        };
        assert_eq!(
            resolve(&user).unwrap(),
            Credentials::ClientCertificate(b"CERT\nKEY\n".to_vec())
        );
    }

    #[test]
    fn test_certificate_without_key() {
        let user = AuthInfo {
            client_certificate_data: Some(STANDARD.encode("CERT")),
            ..Default::default()
        };
        assert!(resolve(&user).is_err());
    }

    #[test]
    fn test_anonymous() {
        assert_eq!(resolve(&AuthInfo::default()).unwrap(), Credentials::Anonymous);
    }

    #[test]
    fn test_parse_exec_credential_token() {
        let stdout = br#"{
            "kind": "ExecCredential",
            "apiVersion": "client.authentication.k8s.io/v1beta1",
            "status": {"token": "ya29.token", "expirationTimestamp": "2026-10-19T12:00:00Z"}
        }"#;
        assert_eq!(
            parse_exec_credential(stdout).unwrap(),
            Credentials::Bearer("ya29.token".to_string())
        );
    }

    #[test]
    fn test_parse_exec_credential_without_status() {
        assert!(parse_exec_credential(br#"{"kind": "ExecCredential"}"#).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_exec_plugin_runs_command() {
        let exec = ExecConfig {
            api_version: None,
            command: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                r#"printf '{"status":{"token":"%s"}}' "$PLUGIN_TOKEN""#.to_string(),
            ],
            env: vec![crate::config::kubeconfig::ExecEnvVar {
                name: "PLUGIN_TOKEN".to_string(),
                value: "exec-token".to_string(),
            }],
        };
        let user = AuthInfo {
            exec: Some(exec),
            ..Default::default()
        };
        assert_eq!(
            resolve(&user).unwrap(),
            Credentials::Bearer("exec-token".to_string())
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_exec_plugin_failure() {
        let user = AuthInfo {
            exec: Some(ExecConfig {
                command: "false".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(resolve(&user).is_err());
    }
}
