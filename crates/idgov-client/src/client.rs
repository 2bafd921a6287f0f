//! Policy client: resolves references through the directory, runs the codec,
//! and dispatches to the policy service.
//!
//! Network lookups happen in [`PolicyClient::resolve_references`] before any
//! encoding starts, so the codec itself stays synchronous.

use std::sync::Arc;

use tracing::{debug, info};

use idgov_core::codec::{
    assemble_add, assemble_delete, assemble_modify, decode_policy, local_timestamp, DeleteCall,
    PolicyCall, ResolvedReferences, Resolvers,
};
use idgov_core::error::{IdGovError, Result};
use idgov_core::model::{OrganizationalContainer, PolicyPatch, ProvisioningPolicy};

use crate::service::{Directory, PolicyResponse, PolicyService};

/// A workflow reference that is already a DN (e.g. read back from a fetched
/// policy) is used as-is instead of being searched by name.
fn is_dn(reference: &str) -> bool {
    reference.contains('=')
}

#[derive(Clone)]
pub struct PolicyClient {
    service: Arc<dyn PolicyService>,
    directory: Arc<dyn Directory>,
}

impl PolicyClient {
    pub fn new(service: Arc<dyn PolicyService>, directory: Arc<dyn Directory>) -> Self {
        Self { service, directory }
    }

    pub fn directory(&self) -> Arc<dyn Directory> {
        Arc::clone(&self.directory)
    }

    pub async fn lookup_container(&self, dn: &str) -> Result<OrganizationalContainer> {
        self.directory.lookup_container(dn).await
    }

    /// Resolve every workflow named by the policy's entitlements.
    /// Lookups are scoped to the policy's organization.
    pub async fn resolve_references(&self, policy: &ProvisioningPolicy) -> Result<ResolvedReferences> {
        let mut refs = ResolvedReferences::new();

        for spec in policy.entitlements.values() {
            let Some(workflow) = spec.workflow.as_deref() else {
                continue;
            };
            if refs.has_workflow(workflow) {
                continue;
            }

            let process_dn = if is_dn(workflow) {
                workflow.to_string()
            } else {
                self.directory
                    .search_workflow(workflow, &policy.container.name)
                    .await?
            };
            debug!(%workflow, %process_dn, "workflow resolved");
            refs.insert_workflow(workflow, process_dn);
        }

        Ok(refs)
    }

    /// Resolve references and assemble a create call without sending it.
    pub async fn prepare_add(&self, policy: &ProvisioningPolicy) -> Result<PolicyCall> {
        let refs = self.resolve_references(policy).await?;
        assemble_add(policy, Resolvers::from_references(&refs), local_timestamp())
    }

    /// Resolve references and assemble a modify call without sending it.
    pub async fn prepare_modify(&self, policy: &ProvisioningPolicy) -> Result<PolicyCall> {
        let refs = self.resolve_references(policy).await?;
        assemble_modify(policy, Resolvers::from_references(&refs), local_timestamp())
    }

    pub async fn add(&self, policy: &ProvisioningPolicy) -> Result<PolicyResponse> {
        let call = self.prepare_add(policy).await?;
        info!(policy = %policy.name, container = %policy.container.dn, "creating provisioning policy");
        self.service.create_policy(call).await
    }

    /// Apply `patches` in order (last write wins per field), then send the
    /// whole policy. The in-memory policy keeps the patched values.
    pub async fn modify<I>(&self, policy: &mut ProvisioningPolicy, patches: I) -> Result<PolicyResponse>
    where
        I: IntoIterator<Item = PolicyPatch>,
    {
        for patch in patches {
            policy.apply(patch);
        }
        let call = self.prepare_modify(policy).await?;
        info!(policy = %policy.name, dn = ?policy.dn, "modifying provisioning policy");
        self.service.modify_policy(call).await
    }

    pub async fn delete(&self, policy: &ProvisioningPolicy) -> Result<PolicyResponse> {
        let call: DeleteCall = assemble_delete(policy, local_timestamp())?;
        info!(policy = %policy.name, dn = %call.dn, "deleting provisioning policy");
        self.service.delete_policy(call).await
    }

    /// Fetch and decode policies named `name` in `container`.
    pub async fn search(
        &self,
        container: &OrganizationalContainer,
        name: &str,
    ) -> Result<Vec<ProvisioningPolicy>> {
        let found = self.service.get_policies(&container.to_wire(), name).await?;
        debug!(%name, count = found.len(), "policies fetched");
        found.iter().map(decode_policy).collect()
    }

    /// Exactly one policy named `name` in `container`.
    pub async fn find_unique(
        &self,
        container: &OrganizationalContainer,
        name: &str,
    ) -> Result<ProvisioningPolicy> {
        let mut found = self.search(container, name).await?;
        match found.len() {
            0 => Err(IdGovError::NotFound(format!("provisioning policy {name}"))),
            1 => found
                .pop()
                .ok_or_else(|| IdGovError::Internal("policy list emptied".into())),
            n => Err(IdGovError::Ambiguous(format!(
                "{n} provisioning policies named {name}"
            ))),
        }
    }
}
