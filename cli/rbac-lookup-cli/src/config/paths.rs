// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Kubeconfig path resolution

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Get the default kubeconfig location, `~/.kube/config`
pub fn default_kubeconfig() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".kube")
        .join("config")
}

/// Get the kubeconfig files to load, in merge order
///
/// Priority:
/// 1. --kubeconfig argument
/// 2. KUBECONFIG environment variable (a path list)
/// 3. ~/.kube/config
pub fn kubeconfig_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    resolve_paths(
        explicit,
        std::env::var_os("KUBECONFIG"),
        default_kubeconfig(),
    )
}

fn resolve_paths(explicit: Option<&Path>, env: Option<OsString>, default: PathBuf) -> Vec<PathBuf> {
    if let Some(path) = explicit {
        return vec![path.to_path_buf()];
    }

    if let Some(list) = env {
        let paths: Vec<PathBuf> = std::env::split_paths(&list)
            .filter(|p| !p.as_os_str().is_empty())
            .collect();
        if !paths.is_empty() {
            return paths;
        }
    }

    vec![default]
}
