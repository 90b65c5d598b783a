// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Test helpers for rbac-lookup integration tests
//!
//! - Running the binary with a clean environment
//! - Writing throwaway kubeconfigs that point at a mock API server
//! - Canned Kubernetes list payloads

// Allow unused code - not every test binary uses every helper
// Allow deprecated - cargo_bin is standard for CLI testing
#![allow(dead_code, deprecated)]

use std::path::PathBuf;

use assert_cmd::Command;
use serde_json::{Value, json};
use tempfile::TempDir;

pub const TEST_TOKEN: &str = "test-token";

/// Get a Command for the rbac-lookup binary with no inherited environment
pub fn rbac_lookup_cmd() -> Command {
    let mut cmd = Command::cargo_bin("rbac-lookup").expect("Failed to find rbac-lookup binary");
    cmd.env_clear();
    cmd
}

/// A kubeconfig file living in its own temporary directory
pub struct TestKubeconfig {
    pub dir: TempDir,
    pub path: PathBuf,
}

/// Write a single-context kubeconfig for `server`
///
/// `user` is the YAML body of the user entry, indented by four spaces.
pub fn write_kubeconfig_with_user(server: &str, cluster_name: &str, user: &str) -> TestKubeconfig {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config");
    let content = format!(
        r#"apiVersion: v1
kind: Config
current-context: test
clusters:
- name: {cluster_name}
  cluster:
    server: {server}
contexts:
- name: test
  context:
    cluster: {cluster_name}
    user: tester
users:
- name: tester
  user:
{user}
"#
    );
    std::fs::write(&path, content).expect("Failed to write kubeconfig");
    TestKubeconfig { dir, path }
}

/// Write a kubeconfig that authenticates with [`TEST_TOKEN`]
pub fn write_kubeconfig(server: &str, cluster_name: &str) -> TestKubeconfig {
    write_kubeconfig_with_user(server, cluster_name, &format!("    token: {}", TEST_TOKEN))
}

pub fn role_binding(name: &str, namespace: &str, role_kind: &str, role: &str, subjects: Value) -> Value {
    json!({
        "metadata": {"name": name, "namespace": namespace},
        "roleRef": {"apiGroup": "rbac.authorization.k8s.io", "kind": role_kind, "name": role},
        "subjects": subjects,
    })
}

pub fn cluster_role_binding(name: &str, role: &str, subjects: Value) -> Value {
    json!({
        "metadata": {"name": name},
        "roleRef": {"apiGroup": "rbac.authorization.k8s.io", "kind": "ClusterRole", "name": role},
        "subjects": subjects,
    })
}

pub fn list(kind: &str, items: Vec<Value>) -> Value {
    json!({
        "kind": kind,
        "apiVersion": "rbac.authorization.k8s.io/v1",
        "metadata": {"resourceVersion": "1"},
        "items": items,
    })
}
