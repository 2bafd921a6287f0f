//! Entitlement and parameter records.

use serde::{Deserialize, Serialize};

use super::ArrayOf;

/// The only ownership type the policy API accepts from this client.
pub const OWNERSHIP_INDIVIDUAL: &str = "Individual";

/// `WSServiceTarget`: 0 = profile, 1 = specific service, 2 = all services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WSServiceTarget {
    pub name: String,
    #[serde(rename = "type")]
    pub target_type: i32,
}

/// `WSServiceAttributeParameter`: three parallel arrays, one triple per index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WSServiceAttributeParameter {
    pub name: String,
    #[serde(default)]
    pub values: ArrayOf<String>,
    /// 0 = constant, 10 = script or null, 20 = regex.
    #[serde(default)]
    pub expression_types: ArrayOf<i32>,
    /// 0 = excluded, 1 = allowed, 2 = default, 3 = mandatory.
    #[serde(default)]
    pub enforcement_types: ArrayOf<i32>,
}

/// `WSProvisioningParameters`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WSProvisioningParameters {
    #[serde(default)]
    pub parameters: Option<ArrayOf<WSServiceAttributeParameter>>,
}

/// `WSProvisioningPolicyEntitlement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WSProvisioningPolicyEntitlement {
    #[serde(rename = "ownershipType")]
    pub ownership_type: String,
    /// 0 = manual, 1 = automatic. Not the service target's type.
    #[serde(rename = "type")]
    pub provisioning_type: i32,
    #[serde(rename = "serviceTarget")]
    pub service_target: WSServiceTarget,
    #[serde(default)]
    pub parameters: Option<WSProvisioningParameters>,
    #[serde(rename = "processDN", default)]
    pub process_dn: Option<String>,
}
