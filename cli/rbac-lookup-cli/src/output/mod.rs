// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Output formatting utilities

use std::io::Write;

use anyhow::Context as _;
use clap::ValueEnum;
use rbac_lookup::{Lister, ReportFormat};
use serde::Serialize;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Subject, scope and role
    #[default]
    Normal,
    /// Adds the subject kind and the binding each role came from
    Wide,
    /// The aggregated subjects as JSON
    Json,
}

/// Print the lookup result to stdout
///
/// Write failures (a closed pipe, a full disk) are returned, not panicked on.
pub fn print_report(lister: &Lister, format: OutputFormat) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    write_report(&mut stdout, lister, format)?;
    stdout.flush().context("Failed to flush stdout")
}

pub fn write_report<W: Write>(
    out: &mut W,
    lister: &Lister,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Normal => writeln!(out, "{}", lister.render(ReportFormat::Normal))?,
        OutputFormat::Wide => writeln!(out, "{}", lister.render(ReportFormat::Wide))?,
        OutputFormat::Json => write_json(out, lister.subjects())?,
    }
    Ok(())
}

/// Write a value as pretty JSON
///
/// An empty map prints as `{}`.
pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> anyhow::Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}
