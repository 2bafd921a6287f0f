//! Wire records exchanged with the identity service's policy API.
//!
//! Field names are the protocol's literal names (`ownershipType`,
//! `serviceTarget`, `processDN`, `itimDN`, ...) and must not change. Arrays use
//! the SOAP `{ "item": [...] }` wrapper; a `null` item list reads as empty.

pub mod entitlement;
pub mod policy;

pub use entitlement::{
    WSProvisioningParameters, WSProvisioningPolicyEntitlement, WSServiceAttributeParameter,
    WSServiceTarget, OWNERSHIP_INDIVIDUAL,
};
pub use policy::{WSOrganizationalContainer, WSProvisioningPolicy, WSProvisioningPolicyMembership};

use serde::{Deserialize, Deserializer, Serialize};

/// SOAP array wrapper (`ArrayOf_xsd_string`, `ArrayOf_tns1_...`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ArrayOf<T> {
    #[serde(default = "Vec::new", deserialize_with = "nullable_items")]
    pub item: Vec<T>,
}

impl<T> ArrayOf<T> {
    pub fn new(item: Vec<T>) -> Self {
        Self { item }
    }

    pub fn is_empty(&self) -> bool {
        self.item.is_empty()
    }

    pub fn len(&self) -> usize {
        self.item.len()
    }
}

impl<T> Default for ArrayOf<T> {
    fn default() -> Self {
        Self { item: Vec::new() }
    }
}

impl<T> From<Vec<T>> for ArrayOf<T> {
    fn from(item: Vec<T>) -> Self {
        Self { item }
    }
}

fn nullable_items<'de, D, T>(de: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(de)?.unwrap_or_default())
}
