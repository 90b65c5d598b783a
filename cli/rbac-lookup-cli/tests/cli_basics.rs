// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Basic CLI tests that need no cluster

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::rbac_lookup_cmd;
use predicates::prelude::*;

#[test]
fn test_short_help() {
    rbac_lookup_cmd()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Show RBAC bindings by subject"));
}

#[test]
fn test_help() {
    rbac_lookup_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Lists the roles held by users, groups and service accounts",
        ))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--kind"))
        .stdout(predicate::str::contains("--gke"));
}

#[test]
fn test_help_hides_internal_flags() {
    rbac_lookup_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--gcp-api-url").not());
}

#[test]
fn test_version() {
    rbac_lookup_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rbac-lookup"));
}

#[test]
fn test_invalid_output_format() {
    rbac_lookup_cmd()
        .args(["-o", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'yaml'"));
}

#[test]
fn test_too_many_positionals() {
    rbac_lookup_cmd().args(["jane", "joe"]).assert().failure();
}

#[test]
fn test_missing_kubeconfig_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    rbac_lookup_cmd()
        .arg("--kubeconfig")
        .arg(dir.path().join("missing"))
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error loading kubeconfig"));
}

#[test]
fn test_unknown_context_is_config_error() {
    let config = common::write_kubeconfig("https://127.0.0.1:1", "kind-test");
    rbac_lookup_cmd()
        .arg("--kubeconfig")
        .arg(&config.path)
        .args(["--context", "nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Context 'nope' not found"));
}

#[test]
fn test_missing_token_file_is_client_error() {
    let config = common::write_kubeconfig_with_user(
        "https://127.0.0.1:1",
        "kind-test",
        "    tokenFile: does-not-exist",
    );
    rbac_lookup_cmd()
        .arg("--kubeconfig")
        .arg(&config.path)
        .assert()
        .code(2)
        .stderr(predicate::str::starts_with("Error creating client"))
        .stderr(predicate::str::contains("Failed to read token file"));
}

#[test]
fn test_kubeconfig_from_env_list() {
    let config = common::write_kubeconfig_with_user(
        "https://127.0.0.1:1",
        "kind-test",
        "    tokenFile: does-not-exist",
    );
    let list = std::env::join_paths([
        config.dir.path().join("missing"),
        config.path.clone(),
    ])
    .unwrap();

    // Reaching client construction shows the listed file was loaded
    rbac_lookup_cmd().env("KUBECONFIG", list).assert().code(2);
}
