//! In-process policy service.
//!
//! Stores wire records keyed by DN and assigns `erglobalid` identifiers the
//! way the identity service does. Used for offline runs and tests.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use idgov_core::codec::{DeleteCall, PolicyCall};
use idgov_core::error::{IdGovError, Result};
use idgov_core::wire::{WSOrganizationalContainer, WSProvisioningPolicy};

use super::{PolicyResponse, PolicyService};

pub struct InMemoryPolicyService {
    policies: DashMap<String, WSProvisioningPolicy>,
    next_id: AtomicU64,
}

impl Default for InMemoryPolicyService {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPolicyService {
    pub fn new() -> Self {
        Self {
            policies: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Stored record by DN.
    pub fn get(&self, dn: &str) -> Option<WSProvisioningPolicy> {
        self.policies.get(dn).map(|r| r.value().clone())
    }

    fn next(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn request(&self) -> PolicyResponse {
        PolicyResponse {
            request_id: Some(self.next().to_string()),
        }
    }
}

#[async_trait]
impl PolicyService for InMemoryPolicyService {
    async fn create_policy(&self, call: PolicyCall) -> Result<PolicyResponse> {
        if call.policy.itim_dn.is_some() {
            return Err(IdGovError::BadRequest("create must not carry itimDN".into()));
        }

        let dn = format!(
            "erglobalid={:019},ou=policies,{}",
            self.next(),
            call.container.itim_dn
        );

        let mut policy = call.policy;
        policy.itim_dn = Some(dn.clone());
        policy.organizational_container = Some(call.container);
        self.policies.insert(dn, policy);

        Ok(self.request())
    }

    async fn modify_policy(&self, call: PolicyCall) -> Result<PolicyResponse> {
        let dn = call
            .policy
            .itim_dn
            .clone()
            .ok_or_else(|| IdGovError::BadRequest("modify requires itimDN".into()))?;

        let mut entry = self
            .policies
            .get_mut(&dn)
            .ok_or_else(|| IdGovError::NotFound(format!("policy {dn}")))?;

        let mut policy = call.policy;
        policy.organizational_container = Some(call.container);
        *entry = policy;

        Ok(self.request())
    }

    async fn delete_policy(&self, call: DeleteCall) -> Result<PolicyResponse> {
        self.policies
            .remove(&call.dn)
            .ok_or_else(|| IdGovError::NotFound(format!("policy {}", call.dn)))?;
        Ok(self.request())
    }

    async fn get_policies(
        &self,
        container: &WSOrganizationalContainer,
        name: &str,
    ) -> Result<Vec<WSProvisioningPolicy>> {
        let mut out: Vec<WSProvisioningPolicy> = self
            .policies
            .iter()
            .filter(|r| {
                let p = r.value();
                p.name == name
                    && p.organizational_container
                        .as_ref()
                        .is_some_and(|c| c.itim_dn == container.itim_dn)
            })
            .map(|r| r.value().clone())
            .collect();
        out.sort_by(|a, b| a.itim_dn.cmp(&b.itim_dn));
        Ok(out)
    }
}
