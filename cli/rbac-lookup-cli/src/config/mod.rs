// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Configuration management

pub mod gke;
pub mod kubeconfig;
pub mod paths;

pub use gke::resolve_project;
pub use kubeconfig::{ClusterConnection, Kubeconfig};
pub use paths::kubeconfig_paths;
