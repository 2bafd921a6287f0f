//! Directory backed by configuration tables.

use std::collections::HashMap;

use async_trait::async_trait;

use idgov_core::error::{IdGovError, Result};
use idgov_core::model::OrganizationalContainer;

use super::Directory;
use crate::config::ClientConfig;

/// Containers and workflows known up front (from config or tests).
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    containers: HashMap<String, OrganizationalContainer>,
    workflows: HashMap<String, String>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(cfg: &ClientConfig) -> Self {
        let mut dir = Self::new();
        for c in &cfg.containers {
            dir.add_container(c.to_container());
        }
        for (name, dn) in &cfg.workflows {
            dir.add_workflow(name.clone(), dn.clone());
        }
        dir
    }

    pub fn add_container(&mut self, container: OrganizationalContainer) {
        self.containers.insert(container.dn.clone(), container);
    }

    pub fn add_workflow(&mut self, name: impl Into<String>, process_dn: impl Into<String>) {
        self.workflows.insert(name.into(), process_dn.into());
    }
}

#[async_trait]
impl Directory for StaticDirectory {
    async fn lookup_container(&self, dn: &str) -> Result<OrganizationalContainer> {
        self.containers
            .get(dn)
            .cloned()
            .ok_or_else(|| IdGovError::NotFound(format!("container {dn}")))
    }

    async fn search_workflow(&self, name: &str, _org_name: &str) -> Result<String> {
        self.workflows
            .get(name)
            .cloned()
            .ok_or_else(|| IdGovError::UnresolvedReference(format!("workflow {name}")))
    }
}
