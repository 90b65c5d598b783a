// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Upstream record types.
//!
//! These mirror the JSON shapes returned by the Kubernetes
//! `rbac.authorization.k8s.io/v1` list endpoints and the Cloud Resource
//! Manager `getIamPolicy` call. Only the fields the lookup reads are modeled;
//! everything else in the payload is ignored during deserialization.

use serde::{Deserialize, Serialize};

/// Object metadata shared by both binding kinds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub name: String,
    /// Empty for cluster-scoped objects
    #[serde(default)]
    pub namespace: String,
}

/// The role a binding grants
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRef {
    #[serde(default)]
    pub api_group: String,
    /// `Role` or `ClusterRole`
    pub kind: String,
    pub name: String,
}

/// A principal referenced by a binding
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// `User`, `Group` or `ServiceAccount`
    pub kind: String,
    pub name: String,
    /// Only meaningful for `ServiceAccount` subjects
    #[serde(default)]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_group: String,
}

impl Subject {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// A `ServiceAccount` subject living in `namespace`
    pub fn service_account(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: crate::model::SERVICE_ACCOUNT_KIND.to_string(),
            name: name.into(),
            namespace: namespace.into(),
            api_group: String::new(),
        }
    }
}

/// A namespace-scoped RoleBinding
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleBinding {
    pub metadata: ObjectMeta,
    pub role_ref: RoleRef,
    /// Kubernetes omits the field entirely for bindings with no subjects
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

/// A cluster-wide ClusterRoleBinding
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRoleBinding {
    pub metadata: ObjectMeta,
    pub role_ref: RoleRef,
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

/// Envelope of a Kubernetes list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectList<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// A cloud project IAM policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IamPolicy {
    #[serde(default)]
    pub bindings: Vec<IamBinding>,
}

/// One role within an IAM policy and the members holding it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IamBinding {
    /// Full role identifier, e.g. `roles/container.admin`
    pub role: String,
    /// Members formatted as `<kind>:<identity>`, e.g. `user:jane@example.com`
    #[serde(default)]
    pub members: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_role_binding_list_decodes_kubernetes_payload() {
        let payload = r#"{
            "kind": "RoleBindingList",
            "apiVersion": "rbac.authorization.k8s.io/v1",
            "metadata": {"resourceVersion": "1234"},
            "items": [{
                "metadata": {"name": "testing", "namespace": "foo", "uid": "abc"},
                "subjects": [
                    {"kind": "User", "apiGroup": "rbac.authorization.k8s.io", "name": "joe"},
                    {"kind": "ServiceAccount", "name": "deployer", "namespace": "ci"}
                ],
                "roleRef": {"apiGroup": "rbac.authorization.k8s.io", "kind": "Role", "name": "bar"}
            }]
        }"#;

        let list: ObjectList<RoleBinding> = serde_json::from_str(payload).unwrap();
        assert_eq!(list.items.len(), 1);

        let binding = &list.items[0];
        assert_eq!(binding.metadata.name, "testing");
        assert_eq!(binding.metadata.namespace, "foo");
        assert_eq!(binding.role_ref.kind, "Role");
        assert_eq!(binding.subjects[0].name, "joe");
        assert_eq!(binding.subjects[1], Subject::service_account("ci", "deployer"));
    }

    #[test]
    fn test_cluster_role_binding_without_subjects() {
        let payload = r#"{
            "items": [{
                "metadata": {"name": "system:basic-user"},
                "roleRef": {"apiGroup": "rbac.authorization.k8s.io", "kind": "ClusterRole", "name": "system:basic-user"}
            }]
        }"#;

        let list: ObjectList<ClusterRoleBinding> = serde_json::from_str(payload).unwrap();
        assert!(list.items[0].subjects.is_empty());
        assert_eq!(list.items[0].metadata.namespace, "");
    }

    #[test]
    fn test_iam_policy_decodes_resource_manager_payload() {
        let payload = r#"{
            "version": 1,
            "etag": "BwWKmjvelug=",
            "bindings": [
                {"role": "roles/owner", "members": ["user:jane@example.com"]}
            ]
        }"#;

        let policy: IamPolicy = serde_json::from_str(payload).unwrap();
        assert_eq!(
            policy.bindings,
            vec![IamBinding {
                role: "roles/owner".to_string(),
                members: vec!["user:jane@example.com".to_string()],
            }]
        );
    }
}
