//! Entitlements, service targets and the provisioning policy itself.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{IdGovError, Result};
use crate::model::parameter::ParameterValue;
use crate::wire::WSOrganizationalContainer;

/// Target key meaning "every service".
pub const ALL_SERVICES: &str = "*";

/// Entitlements keyed by target (service identifier, profile name or `*`).
/// Ordered so encoding is deterministic.
pub type PolicyEntitlements = BTreeMap<String, EntitlementSpec>;

/// Rule binding a target to attribute constraints and a provisioning mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntitlementSpec {
    pub automatic: bool,
    /// Account request workflow (friendly name on encode, process DN on decode).
    #[serde(default)]
    pub workflow: Option<String>,
    #[serde(default)]
    pub parameters: BTreeMap<String, Vec<ParameterValue>>,
}

impl EntitlementSpec {
    pub fn new(automatic: bool) -> Self {
        Self {
            automatic,
            workflow: None,
            parameters: BTreeMap::new(),
        }
    }
}

/// Entitlement scope, as encoded in `serviceTarget.type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Profile,
    Specific,
    All,
}

impl TargetKind {
    pub fn code(self) -> i32 {
        match self {
            TargetKind::Profile => 0,
            TargetKind::Specific => 1,
            TargetKind::All => 2,
        }
    }
}

/// Classified target: wire name plus scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceTarget {
    pub name: String,
    pub kind: TargetKind,
}

/// Policy scope within the owning container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum PolicyScope {
    OneLevel,
    #[default]
    Subtree,
}

impl PolicyScope {
    pub fn code(self) -> i32 {
        match self {
            PolicyScope::OneLevel => 1,
            PolicyScope::Subtree => 2,
        }
    }
}

impl TryFrom<i64> for PolicyScope {
    type Error = IdGovError;

    fn try_from(code: i64) -> Result<Self> {
        match code {
            1 => Ok(PolicyScope::OneLevel),
            2 => Ok(PolicyScope::Subtree),
            other => Err(IdGovError::InvalidScope(other)),
        }
    }
}

impl From<PolicyScope> for i64 {
    fn from(s: PolicyScope) -> i64 {
        i64::from(s.code())
    }
}

/// Handle to the organizational unit that owns a policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrganizationalContainer {
    pub dn: String,
    pub name: String,
    #[serde(default)]
    pub profile: String,
}

impl OrganizationalContainer {
    pub fn to_wire(&self) -> WSOrganizationalContainer {
        WSOrganizationalContainer {
            itim_dn: self.dn.clone(),
            name: self.name.clone(),
            profile_name: self.profile.clone(),
        }
    }

    pub fn from_wire(ws: &WSOrganizationalContainer) -> Self {
        Self {
            dn: ws.itim_dn.clone(),
            name: ws.name.clone(),
            profile: ws.profile_name.clone(),
        }
    }
}

/// In-memory provisioning policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProvisioningPolicy {
    /// Service-assigned identifier; `None` until the policy has been created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dn: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub container: OrganizationalContainer,
    #[serde(default)]
    pub entitlements: PolicyEntitlements,
    /// Role DNs, or `["*"]` for everyone.
    pub memberships: Vec<String>,
    pub priority: i32,
    #[serde(default)]
    pub scope: PolicyScope,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub keywords: String,
}

fn default_enabled() -> bool {
    true
}

impl ProvisioningPolicy {
    /// New policy with the default scope (subtree), enabled, empty caption/keywords.
    pub fn new(
        name: impl Into<String>,
        container: OrganizationalContainer,
        memberships: Vec<String>,
        priority: i32,
    ) -> Self {
        Self {
            dn: None,
            name: name.into(),
            description: String::new(),
            container,
            entitlements: PolicyEntitlements::new(),
            memberships,
            priority,
            scope: PolicyScope::default(),
            enabled: true,
            caption: String::new(),
            keywords: String::new(),
        }
    }

    /// Merge an operator change map onto this policy.
    pub fn apply(&mut self, patch: PolicyPatch) {
        let PolicyPatch {
            name,
            description,
            entitlements,
            memberships,
            priority,
            scope,
            enabled,
            caption,
            keywords,
        } = patch;

        if let Some(v) = name {
            self.name = v;
        }
        if let Some(v) = description {
            self.description = v;
        }
        if let Some(v) = entitlements {
            self.entitlements = v;
        }
        if let Some(v) = memberships {
            self.memberships = v;
        }
        if let Some(v) = priority {
            self.priority = v;
        }
        if let Some(v) = scope {
            self.scope = v;
        }
        if let Some(v) = enabled {
            self.enabled = v;
        }
        if let Some(v) = caption {
            self.caption = v;
        }
        if let Some(v) = keywords {
            self.keywords = v;
        }
    }
}

/// Field overrides for a modify call. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub entitlements: Option<PolicyEntitlements>,
    #[serde(default)]
    pub memberships: Option<Vec<String>>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub scope: Option<PolicyScope>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
}
