//! Collaborator seams for the identity service.
//!
//! `PolicyService` is the policy API (create/modify/delete/search);
//! `Directory` covers the lookups a policy needs before it can be encoded.
//! Both may block on network I/O, so they are async and never called from
//! inside the codec.

pub mod directory;
pub mod memory;

use async_trait::async_trait;
use serde::Serialize;

use idgov_core::codec::{DeleteCall, PolicyCall};
use idgov_core::error::Result;
use idgov_core::model::OrganizationalContainer;
use idgov_core::wire::{WSOrganizationalContainer, WSProvisioningPolicy};

pub use directory::StaticDirectory;
pub use memory::InMemoryPolicyService;

/// Answer to a policy call. Policy changes are processed asynchronously by
/// the service; the request id is how callers follow them up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyResponse {
    pub request_id: Option<String>,
}

/// The identity service's provisioning-policy API.
#[async_trait]
pub trait PolicyService: Send + Sync {
    async fn create_policy(&self, call: PolicyCall) -> Result<PolicyResponse>;
    async fn modify_policy(&self, call: PolicyCall) -> Result<PolicyResponse>;
    async fn delete_policy(&self, call: DeleteCall) -> Result<PolicyResponse>;
    /// Policies in `container` whose name matches `name`.
    async fn get_policies(
        &self,
        container: &WSOrganizationalContainer,
        name: &str,
    ) -> Result<Vec<WSProvisioningPolicy>>;
}

/// Organizational-unit and workflow lookups.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn lookup_container(&self, dn: &str) -> Result<OrganizationalContainer>;
    /// Process DN of the workflow named `name` in organization `org_name`.
    async fn search_workflow(&self, name: &str, org_name: &str) -> Result<String>;
}
