//! Policy documents as operators write them (YAML/JSON).
//!
//! A document names its owning container by DN (`parent`) and may leave
//! scope/enabled/caption/keywords out; config defaults fill the gaps.

use serde::Deserialize;

use idgov_core::error::{IdGovError, Result};
use idgov_core::model::{OrganizationalContainer, PolicyEntitlements, PolicyScope, ProvisioningPolicy};

use crate::config::PolicyDefaults;
use crate::service::Directory;

/// `memberships` accepts a bare `"*"` as well as a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MemberList {
    One(String),
    Many(Vec<String>),
}

impl From<MemberList> for Vec<String> {
    fn from(m: MemberList) -> Self {
        match m {
            MemberList::One(s) => vec![s],
            MemberList::Many(v) => v,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyDocument {
    /// Set when the document describes an existing policy.
    #[serde(default)]
    pub dn: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Owning container DN.
    pub parent: String,
    #[serde(default)]
    pub entitlements: PolicyEntitlements,
    pub memberships: MemberList,
    pub priority: i32,
    #[serde(default)]
    pub scope: Option<PolicyScope>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
}

impl PolicyDocument {
    pub fn from_yaml(s: &str) -> Result<Self> {
        serde_yaml::from_str(s).map_err(|e| IdGovError::BadRequest(format!("invalid policy document: {e}")))
    }

    /// Build the in-memory policy for an already looked-up container.
    pub fn into_policy(self, container: OrganizationalContainer, defaults: &PolicyDefaults) -> ProvisioningPolicy {
        ProvisioningPolicy {
            dn: self.dn,
            name: self.name,
            description: self.description,
            container,
            entitlements: self.entitlements,
            memberships: self.memberships.into(),
            priority: self.priority,
            scope: self.scope.unwrap_or(defaults.scope),
            enabled: self.enabled.unwrap_or(defaults.enabled),
            caption: self.caption.unwrap_or_default(),
            keywords: self.keywords.unwrap_or_default(),
        }
    }

    /// Look the parent container up and build the policy.
    pub async fn resolve(
        self,
        directory: &dyn Directory,
        defaults: &PolicyDefaults,
    ) -> Result<ProvisioningPolicy> {
        let container = directory.lookup_container(&self.parent).await?;
        Ok(self.into_policy(container, defaults))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use idgov_core::model::{Enforcement, ParameterValue};

    const DOC: &str = r#"
name: test
description: test
parent: "erglobalid=00000000000000000000,ou=acme,dc=acme"
priority: 10000
memberships: "*"
entitlements:
  "*":
    automatic: false
  ADprofile:
    automatic: true
    workflow: Aprobacion Jefe
    parameters:
      ercompany:
        - { enforcement: Default, type: script, values: "return 'test';" }
        - { enforcement: Excluded, type: "null" }
        - { enforcement: Allowed, type: constant, values: [test1, test2] }
"#;

    fn container() -> OrganizationalContainer {
        OrganizationalContainer {
            dn: "erglobalid=00000000000000000000,ou=acme,dc=acme".into(),
            name: "acme".into(),
            profile: "Organization".into(),
        }
    }

    #[test]
    fn parses_and_applies_defaults() {
        let defaults = PolicyDefaults {
            scope: PolicyScope::OneLevel,
            enabled: false,
        };
        let p = PolicyDocument::from_yaml(DOC).unwrap().into_policy(container(), &defaults);

        assert_eq!(p.memberships, vec!["*"]);
        assert_eq!(p.scope, PolicyScope::OneLevel);
        assert!(!p.enabled);
        assert!(p.dn.is_none());

        let ad = &p.entitlements["ADprofile"];
        assert!(ad.automatic);
        assert_eq!(ad.workflow.as_deref(), Some("Aprobacion Jefe"));
        assert_eq!(ad.parameters["ercompany"].len(), 3);
        assert_eq!(
            ad.parameters["ercompany"][2],
            ParameterValue::constant(Enforcement::Allowed, ["test1", "test2"])
        );
    }

    #[test]
    fn bad_enforcement_is_a_document_error() {
        let doc = DOC.replace("Excluded", "Sometimes");
        let err = PolicyDocument::from_yaml(&doc).unwrap_err();
        assert_eq!(err.code().as_str(), "BAD_REQUEST");
        assert!(err.to_string().contains("Sometimes"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let doc = format!("{DOC}\nprioridad: 1\n");
        assert!(PolicyDocument::from_yaml(&doc).is_err());
    }
}
