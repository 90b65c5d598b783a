// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Subject aggregation.
//!
//! A [`Lister`] accumulates grants from every binding source into one map
//! keyed by subject. Name and kind filters are applied uniformly to all
//! sources before a grant is recorded.

use std::collections::BTreeMap;

use crate::iam_roles;
use crate::model::{
    CLUSTER_ROLE_BINDING_SOURCE, CLUSTER_WIDE_SCOPE, PROJECT_WIDE_SCOPE, ROLE_BINDING_SOURCE,
    RbacSubject, SERVICE_ACCOUNT_KIND, SimpleRole,
};
use crate::render::{self, ReportFormat};
use crate::types::{ClusterRoleBinding, IamPolicy, RoleBinding, Subject};

/// Inputs that shape a lookup run
#[derive(Debug, Clone, Default)]
pub struct LookupOptions {
    /// Only subjects whose name contains this string (case-sensitive)
    pub name_filter: Option<String>,
    /// Only subjects of this kind (case-insensitive)
    pub subject_kind: Option<String>,
    /// Cloud project whose IAM policy is merged in; IAM is skipped when unset
    pub gke_project: Option<String>,
}

/// Aggregated RBAC state for one lookup run
#[derive(Debug, Default)]
pub struct Lister {
    name_filter: Option<String>,
    subject_kind: Option<String>,
    gke_project: Option<String>,
    subjects: BTreeMap<String, RbacSubject>,
}

impl Lister {
    pub fn new(options: LookupOptions) -> Self {
        Self {
            name_filter: options.name_filter.filter(|f| !f.is_empty()),
            subject_kind: options
                .subject_kind
                .filter(|k| !k.is_empty())
                .map(|k| k.to_lowercase()),
            gke_project: options.gke_project.filter(|p| !p.is_empty()),
            subjects: BTreeMap::new(),
        }
    }

    /// Project whose IAM policy will be merged, if any
    pub fn gke_project(&self) -> Option<&str> {
        self.gke_project.as_deref()
    }

    pub fn name_matches(&self, name: &str) -> bool {
        self.name_filter
            .as_deref()
            .is_none_or(|filter| name.contains(filter))
    }

    pub fn kind_matches(&self, kind: &str) -> bool {
        self.subject_kind
            .as_deref()
            .is_none_or(|filter| kind.to_lowercase() == filter)
    }

    fn matches(&self, name: &str, kind: &str) -> bool {
        self.name_matches(name) && self.kind_matches(kind)
    }

    /// Record every matching subject of each RoleBinding under the binding's
    /// namespace
    pub fn ingest_role_bindings(&mut self, bindings: &[RoleBinding]) {
        for binding in bindings {
            let role = SimpleRole::new(
                &binding.role_ref.kind,
                &binding.role_ref.name,
                ROLE_BINDING_SOURCE,
                &binding.metadata.name,
            );
            self.add_subjects(&binding.subjects, &binding.metadata.namespace, &role);
        }
    }

    /// Record every matching subject of each ClusterRoleBinding under the
    /// cluster-wide scope
    pub fn ingest_cluster_role_bindings(&mut self, bindings: &[ClusterRoleBinding]) {
        for binding in bindings {
            let role = SimpleRole::new(
                &binding.role_ref.kind,
                &binding.role_ref.name,
                CLUSTER_ROLE_BINDING_SOURCE,
                &binding.metadata.name,
            );
            self.add_subjects(&binding.subjects, CLUSTER_WIDE_SCOPE, &role);
        }
    }

    /// Record members of recognised IAM roles under the project-wide scope
    ///
    /// IAM members are always keyed by their bare identity, never by
    /// namespace. Roles missing from the translation table are skipped.
    pub fn ingest_iam_policy(&mut self, policy: &IamPolicy) {
        for binding in &policy.bindings {
            let Some(role) = iam_roles::translate(&binding.role) else {
                continue;
            };

            for member in &binding.members {
                let Some((kind, name)) = parse_member(member) else {
                    continue;
                };
                if !self.matches(name, &kind) {
                    continue;
                }

                self.subjects
                    .entry(name.to_string())
                    .or_insert_with(|| RbacSubject::new(kind))
                    .add_role(PROJECT_WIDE_SCOPE, role.clone());
            }
        }
    }

    fn add_subjects(&mut self, subjects: &[Subject], scope: &str, role: &SimpleRole) {
        for subject in subjects {
            if !self.matches(&subject.name, &subject.kind) {
                continue;
            }

            self.subjects
                .entry(subject_key(subject))
                .or_insert_with(|| RbacSubject::new(&subject.kind))
                .add_role(scope, role.clone());
        }
    }

    /// Aggregated subjects, sorted by key
    pub fn subjects(&self) -> &BTreeMap<String, RbacSubject> {
        &self.subjects
    }

    pub fn subject(&self, key: &str) -> Option<&RbacSubject> {
        self.subjects.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    /// Render the aggregated state as a text report
    pub fn render(&self, format: ReportFormat) -> String {
        render::render_subjects(&self.subjects, format)
    }
}

/// Aggregation key for a binding subject
///
/// ServiceAccounts are qualified by namespace so identically named accounts
/// in different namespaces stay distinct.
pub fn subject_key(subject: &Subject) -> String {
    if subject.kind == SERVICE_ACCOUNT_KIND {
        format!("{}:{}", subject.namespace, subject.name)
    } else {
        subject.name.clone()
    }
}

/// Split an IAM member into its title-cased kind and identity
///
/// `user:jane@example.com` becomes `("User", "jane@example.com")`. Only the
/// first colon separates, so `deleted:user:x` yields `("Deleted", "user:x")`.
/// Members without a prefix (`allUsers`) are their own kind. `None` when
/// either the prefix or the identity is empty.
pub fn parse_member(member: &str) -> Option<(String, &str)> {
    let (kind, name) = member.split_once(':').unwrap_or((member, member));
    if kind.is_empty() || name.is_empty() {
        return None;
    }
    Some((title_case(kind), name))
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn lister(name: Option<&str>, kind: Option<&str>) -> Lister {
        Lister::new(LookupOptions {
            name_filter: name.map(str::to_string),
            subject_kind: kind.map(str::to_string),
            gke_project: None,
        })
    }

    #[test_case(None, "anything", true ; "no filter")]
    #[test_case(Some("joe"), "joe", true ; "exact")]
    #[test_case(Some("oe"), "joe", true ; "substring")]
    #[test_case(Some("Joe"), "joe", false ; "case sensitive")]
    #[test_case(Some("sue"), "joe", false ; "no match")]
    #[test_case(Some(""), "joe", true ; "empty filter")]
    fn test_name_matches(filter: Option<&str>, name: &str, expected: bool) {
        assert_eq!(lister(filter, None).name_matches(name), expected);
    }

    #[test_case(None, "User", true ; "no filter")]
    #[test_case(Some("user"), "User", true ; "case insensitive")]
    #[test_case(Some("USER"), "user", true ; "upper filter")]
    #[test_case(Some("serviceaccount"), "ServiceAccount", true ; "service account")]
    #[test_case(Some("user"), "Users", false ; "exact only")]
    #[test_case(Some("group"), "User", false ; "different kind")]
    fn test_kind_matches(filter: Option<&str>, kind: &str, expected: bool) {
        assert_eq!(lister(None, filter).kind_matches(kind), expected);
    }

    #[test_case("user:jane@example.com", "User", "jane@example.com")]
    #[test_case("group:devs@example.com", "Group", "devs@example.com")]
    #[test_case("serviceAccount:ci@p.iam.gserviceaccount.com", "ServiceAccount", "ci@p.iam.gserviceaccount.com")]
    #[test_case("deleted:user:old@example.com?uid=1", "Deleted", "user:old@example.com?uid=1")]
    #[test_case("allUsers", "AllUsers", "allUsers")]
    fn test_parse_member(member: &str, kind: &str, name: &str) {
        assert_eq!(parse_member(member), Some((kind.to_string(), name)));
    }

    #[test_case("" ; "empty")]
    #[test_case(":jane@example.com" ; "empty prefix")]
    #[test_case("user:" ; "empty identity")]
    #[test_case(":" ; "bare colon")]
    fn test_parse_member_rejects_blank_parts(member: &str) {
        assert_eq!(parse_member(member), None);
    }

    #[test]
    fn test_iam_policy_skips_blank_members() {
        let mut l = lister(None, None);
        l.ingest_iam_policy(&IamPolicy {
            bindings: vec![crate::types::IamBinding {
                role: "roles/viewer".to_string(),
                members: vec![
                    String::new(),
                    ":x".to_string(),
                    "user:".to_string(),
                    "user:jane@example.com".to_string(),
                ],
            }],
        });

        assert_eq!(l.subjects().keys().collect::<Vec<_>>(), vec!["jane@example.com"]);
    }

    #[test]
    fn test_subject_key() {
        assert_eq!(subject_key(&Subject::new("User", "joe")), "joe");
        assert_eq!(subject_key(&Subject::new("Group", "devs")), "devs");
        assert_eq!(
            subject_key(&Subject::service_account("circleci", "deployer")),
            "circleci:deployer"
        );
    }

    #[test]
    fn test_options_normalised() {
        let l = Lister::new(LookupOptions {
            name_filter: Some(String::new()),
            subject_kind: Some("Group".to_string()),
            gke_project: Some(String::new()),
        });
        assert!(l.name_matches("anyone"));
        assert!(l.kind_matches("group"));
        assert_eq!(l.gke_project(), None);
    }
}
