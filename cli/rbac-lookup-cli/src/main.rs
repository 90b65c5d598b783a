// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! rbac-lookup - view Kubernetes RBAC and GKE IAM bindings by subject

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rbac_lookup::{IamPolicyProvider, Lister, LookupError, LookupOptions};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

mod client;
mod config;
mod output;

use client::gcp::{self, RESOURCE_MANAGER_URL};
use client::{KubeClient, ResourceManagerClient};
use config::Kubeconfig;
use output::OutputFormat;

const DEFAULT_LOG_FILTER: &str = "rbac_lookup=debug";

#[derive(Parser)]
#[command(
    name = "rbac-lookup",
    version,
    about = "Show RBAC bindings by subject",
    long_about = "Lists the roles held by users, groups and service accounts across \
                  RoleBindings, ClusterRoleBindings and, with --gke, the GCP project IAM policy"
)]
struct Cli {
    /// Only show subjects whose name contains this text
    subject: Option<String>,

    /// Output format
    #[arg(
        short,
        long,
        value_enum,
        default_value_t = OutputFormat::Normal,
        env = "RBAC_LOOKUP_OUTPUT"
    )]
    output: OutputFormat,

    /// Filter by subject kind (user, group, serviceaccount)
    #[arg(short, long)]
    kind: Option<String>,

    /// Kubeconfig file to use instead of KUBECONFIG or ~/.kube/config
    #[arg(long)]
    kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use
    #[arg(long)]
    context: Option<String>,

    /// Include IAM bindings from the cluster's GCP project
    #[arg(long)]
    gke: bool,

    /// GCP project used when the cluster name does not identify one
    #[arg(long, env = "CLOUDSDK_CORE_PROJECT")]
    gcp_project: Option<String>,

    /// OAuth access token for GCP (defaults to `gcloud auth print-access-token`)
    #[arg(long, env = "GOOGLE_OAUTH_ACCESS_TOKEN", hide_env_values = true)]
    gcp_access_token: Option<String>,

    #[arg(long, hide = true, default_value = RESOURCE_MANAGER_URL)]
    gcp_api_url: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// A failed run, tagged with the stage that failed
#[derive(Debug, Error)]
enum CliError {
    #[error("Error loading kubeconfig: {0:#}")]
    Config(anyhow::Error),

    #[error("Error creating client: {0:#}")]
    Client(anyhow::Error),

    #[error("Error reading cluster config: {0:#}")]
    RawConfig(anyhow::Error),

    #[error(transparent)]
    Load(#[from] LookupError),

    #[error("Error writing output: {0:#}")]
    Output(anyhow::Error),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::Config(_) | CliError::Output(_) => 1,
            CliError::Client(_) => 2,
            CliError::RawConfig(_) => 3,
            CliError::Load(_) => 4,
        }
    }
}

async fn run(cli: &Cli) -> Result<(), CliError> {
    let paths = config::kubeconfig_paths(cli.kubeconfig.as_deref());
    let kubeconfig = Kubeconfig::load(&paths).map_err(CliError::Config)?;
    let connection = kubeconfig
        .connection(cli.context.as_deref())
        .map_err(CliError::Config)?;

    let kube = KubeClient::new(&connection).map_err(CliError::Client)?;

    let gke_project = if cli.gke {
        config::resolve_project(
            &kubeconfig,
            cli.context.as_deref(),
            cli.gcp_project.as_deref(),
        )
        .map_err(CliError::RawConfig)?
    } else {
        None
    };

    let iam = match &gke_project {
        Some(project) => {
            tracing::debug!(project = %project, "including GCP IAM policy");
            let token =
                gcp::access_token(cli.gcp_access_token.as_deref()).map_err(CliError::Client)?;
            let client = ResourceManagerClient::new(&cli.gcp_api_url, token)
                .map_err(CliError::Client)?
                .with_fallback_project(cli.gcp_project.clone());
            Some(client)
        }
        None => {
            if cli.gke {
                tracing::warn!("no GCP project found for this cluster, skipping IAM policy");
            }
            None
        }
    };

    let mut lister = Lister::new(LookupOptions {
        name_filter: cli.subject.clone(),
        subject_kind: cli.kind.clone(),
        gke_project,
    });
    lister
        .load_all(&kube, iam.as_ref().map(|c| c as &dyn IamPolicyProvider))
        .await?;

    output::print_report(&lister, cli.output).map_err(CliError::Output)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
