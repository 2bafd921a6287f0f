//! Policy, membership and container records.

use serde::{Deserialize, Serialize};

use super::{ArrayOf, WSProvisioningPolicyEntitlement};

/// `WSProvisioningPolicyMembership`: 2 = everyone, 3 = specific role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WSProvisioningPolicyMembership {
    pub name: String,
    #[serde(rename = "type")]
    pub membership_type: i32,
}

/// `WSOrganizationalContainer` (subset used by the policy API).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WSOrganizationalContainer {
    #[serde(rename = "itimDN")]
    pub itim_dn: String,
    pub name: String,
    #[serde(rename = "profileName", default)]
    pub profile_name: String,
}

/// `WSProvisioningPolicy`.
///
/// `itimDN` and `organizationalContainer` are omitted on create; the service
/// assigns the former and takes the container as a separate argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WSProvisioningPolicy {
    #[serde(rename = "itimDN", default, skip_serializing_if = "Option::is_none")]
    pub itim_dn: Option<String>,
    #[serde(
        rename = "organizationalContainer",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub organizational_container: Option<WSOrganizationalContainer>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub entitlements: ArrayOf<WSProvisioningPolicyEntitlement>,
    #[serde(default)]
    pub membership: ArrayOf<WSProvisioningPolicyMembership>,
    pub priority: i32,
    pub scope: i32,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
}
