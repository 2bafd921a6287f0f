//! Policy assembler: full wire records for the policy API's add, modify and
//! delete calls, plus the decode path for fetched policies.
//!
//! Every call carries the local timestamp taken when it was assembled. The
//! timestamp is a transport argument only; it never enters the policy model.

use chrono::{DateTime, FixedOffset, Local, SecondsFormat};
use serde::Serialize;
use tracing::debug;

use crate::codec::resolve::Resolvers;
use crate::codec::{entitlement, membership};
use crate::error::{IdGovError, Result};
use crate::model::{OrganizationalContainer, PolicyScope, ProvisioningPolicy};
use crate::wire::{WSOrganizationalContainer, WSProvisioningPolicy};

/// Arguments of a create/modify call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyCall {
    pub container: WSOrganizationalContainer,
    pub policy: WSProvisioningPolicy,
    pub date: String,
}

/// Arguments of a delete call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteCall {
    pub container: WSOrganizationalContainer,
    pub dn: String,
    pub date: String,
}

/// Current local time with its offset.
pub fn local_timestamp() -> DateTime<FixedOffset> {
    Local::now().into()
}

fn format_date(now: DateTime<FixedOffset>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Micros, false)
}

fn encode_policy(
    policy: &ProvisioningPolicy,
    resolvers: Resolvers<'_>,
    itim_dn: Option<String>,
) -> Result<WSProvisioningPolicy> {
    let entitlements = entitlement::encode(&policy.entitlements, resolvers)?;
    let membership = membership::encode(&policy.memberships)?;

    Ok(WSProvisioningPolicy {
        itim_dn,
        // passed to the service as a separate argument
        organizational_container: None,
        name: policy.name.clone(),
        description: policy.description.clone(),
        entitlements,
        membership,
        priority: policy.priority,
        scope: policy.scope.code(),
        enabled: policy.enabled,
        caption: Some(policy.caption.clone()),
        keywords: Some(policy.keywords.clone()),
    })
}

/// Assemble a create call. The record has no identifier yet.
pub fn assemble_add(
    policy: &ProvisioningPolicy,
    resolvers: Resolvers<'_>,
    now: DateTime<FixedOffset>,
) -> Result<PolicyCall> {
    let wire = encode_policy(policy, resolvers, None)?;
    debug!(policy = %policy.name, entitlements = wire.entitlements.len(), "add assembled");
    Ok(PolicyCall {
        container: policy.container.to_wire(),
        policy: wire,
        date: format_date(now),
    })
}

/// Assemble a modify call for an existing policy.
pub fn assemble_modify(
    policy: &ProvisioningPolicy,
    resolvers: Resolvers<'_>,
    now: DateTime<FixedOffset>,
) -> Result<PolicyCall> {
    let dn = policy.dn.clone().ok_or(IdGovError::MissingIdentifier)?;
    let wire = encode_policy(policy, resolvers, Some(dn))?;
    debug!(policy = %policy.name, entitlements = wire.entitlements.len(), "modify assembled");
    Ok(PolicyCall {
        container: policy.container.to_wire(),
        policy: wire,
        date: format_date(now),
    })
}

pub fn assemble_delete(policy: &ProvisioningPolicy, now: DateTime<FixedOffset>) -> Result<DeleteCall> {
    let dn = policy.dn.clone().ok_or(IdGovError::MissingIdentifier)?;
    Ok(DeleteCall {
        container: policy.container.to_wire(),
        dn,
        date: format_date(now),
    })
}

/// Decode a fetched policy record.
///
/// Entitlement targets and workflows come back as the service stored them
/// (DNs), not as the friendly names they may have been created with.
pub fn decode_policy(wire: &WSProvisioningPolicy) -> Result<ProvisioningPolicy> {
    let container = wire
        .organizational_container
        .as_ref()
        .map(OrganizationalContainer::from_wire)
        .ok_or_else(|| {
            IdGovError::BadRequest(format!("policy {} has no organizationalContainer", wire.name))
        })?;

    Ok(ProvisioningPolicy {
        dn: wire.itim_dn.clone(),
        name: wire.name.clone(),
        description: wire.description.clone(),
        container,
        entitlements: entitlement::decode(&wire.entitlements)?,
        memberships: membership::decode(&wire.membership),
        priority: wire.priority,
        scope: PolicyScope::try_from(i64::from(wire.scope))?,
        enabled: wire.enabled,
        caption: wire.caption.clone().unwrap_or_default(),
        keywords: wire.keywords.clone().unwrap_or_default(),
    })
}
