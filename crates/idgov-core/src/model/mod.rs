//! Domain model for provisioning policies.
//!
//! These are value objects built per call, either from a caller-authored
//! document (encode path) or from a fetched wire record (decode path).

pub mod parameter;
pub mod policy;

pub use parameter::{Enforcement, ParameterKind, ParameterValue, RawParameterValue, RawValues};
pub use policy::{
    EntitlementSpec, OrganizationalContainer, PolicyEntitlements, PolicyPatch, PolicyScope,
    ProvisioningPolicy, ServiceTarget, TargetKind,
};
