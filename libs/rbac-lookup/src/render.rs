// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Report rendering

use std::collections::BTreeMap;

use comfy_table::{Table, presets::NOTHING};

use crate::model::RbacSubject;

/// Printed instead of a table when nothing matched
pub const NO_BINDINGS_FOUND: &str = "No RBAC Bindings found";

/// Table layout for the report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Subject, scope and role
    #[default]
    Normal,
    /// Adds the subject kind and the source binding of each role
    Wide,
}

fn create_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_header(headers);
    table
}

/// Render subjects as a column-aligned table
///
/// Subjects come out in key order. Within a subject, scopes and roles keep
/// their ingestion order.
pub fn render_subjects(subjects: &BTreeMap<String, RbacSubject>, format: ReportFormat) -> String {
    if subjects.is_empty() {
        return NO_BINDINGS_FOUND.to_string();
    }

    let mut table = match format {
        ReportFormat::Normal => create_table(&["SUBJECT", "SCOPE", "ROLE"]),
        ReportFormat::Wide => create_table(&["SUBJECT", "SCOPE", "ROLE", "SOURCE"]),
    };

    for (key, subject) in subjects {
        for (scope, roles) in &subject.roles_by_scope {
            for role in roles {
                let role_column = format!("{}/{}", role.kind, role.name);
                match format {
                    ReportFormat::Normal => {
                        table.add_row(vec![key.clone(), scope.clone(), role_column]);
                    }
                    ReportFormat::Wide => {
                        table.add_row(vec![
                            format!("{}/{}", subject.kind, key),
                            scope.clone(),
                            role_column,
                            format!("{}/{}", role.source.kind, role.source.name),
                        ]);
                    }
                }
            }
        }
    }

    table.to_string()
}
