//! Membership codec: who a provisioning policy applies to.

use crate::error::{IdGovError, Result};
use crate::wire::{ArrayOf, WSProvisioningPolicyMembership};

/// Member key meaning "everyone".
pub const EVERYONE: &str = "*";

/// `WSProvisioningPolicyMembership.type` codes.
pub const MEMBERSHIP_EVERYONE: i32 = 2;
pub const MEMBERSHIP_ROLE: i32 = 3;

/// Encode `["*"]` as everyone, anything else as one role record per entry.
/// An empty list is an error.
pub fn encode(members: &[String]) -> Result<ArrayOf<WSProvisioningPolicyMembership>> {
    match members {
        [] => Err(IdGovError::EmptyMembership),
        [only] if only == EVERYONE => Ok(ArrayOf::new(vec![WSProvisioningPolicyMembership {
            name: EVERYONE.to_string(),
            membership_type: MEMBERSHIP_EVERYONE,
        }])),
        roles => Ok(ArrayOf::new(
            roles
                .iter()
                .map(|dn| WSProvisioningPolicyMembership {
                    name: dn.clone(),
                    membership_type: MEMBERSHIP_ROLE,
                })
                .collect(),
        )),
    }
}

pub fn decode(list: &ArrayOf<WSProvisioningPolicyMembership>) -> Vec<String> {
    list.item.iter().map(|m| m.name.clone()).collect()
}
