//! Reference resolution seams used while encoding entitlements.
//!
//! Lookups that need the identity service are performed by the caller before
//! encoding; the results are handed to the codec through these traits.

use std::collections::HashMap;

use crate::error::{IdGovError, Result};

/// Resolves a workflow name to a process reference (DN).
pub trait WorkflowResolver: Send + Sync {
    fn resolve_workflow(&self, name: &str) -> Result<String>;
}

/// Resolves a specific-service target to the identifier the service expects.
pub trait ServiceResolver: Send + Sync {
    fn resolve_service(&self, target: &str) -> Result<String>;
}

/// Treats every reference as already resolved.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl WorkflowResolver for PassThrough {
    fn resolve_workflow(&self, name: &str) -> Result<String> {
        Ok(name.to_string())
    }
}

impl ServiceResolver for PassThrough {
    fn resolve_service(&self, target: &str) -> Result<String> {
        Ok(target.to_string())
    }
}

/// Map-backed references, usually filled by a directory lookup pass.
///
/// Unknown workflows are an error; unknown services pass through unchanged
/// (specific targets are normally DNs already).
#[derive(Debug, Clone, Default)]
pub struct ResolvedReferences {
    workflows: HashMap<String, String>,
    services: HashMap<String, String>,
}

impl ResolvedReferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_workflow(&mut self, name: impl Into<String>, process_dn: impl Into<String>) {
        self.workflows.insert(name.into(), process_dn.into());
    }

    pub fn insert_service(&mut self, name: impl Into<String>, service_dn: impl Into<String>) {
        self.services.insert(name.into(), service_dn.into());
    }

    pub fn has_workflow(&self, name: &str) -> bool {
        self.workflows.contains_key(name)
    }
}

impl WorkflowResolver for ResolvedReferences {
    fn resolve_workflow(&self, name: &str) -> Result<String> {
        self.workflows
            .get(name)
            .cloned()
            .ok_or_else(|| IdGovError::UnresolvedReference(format!("workflow {name}")))
    }
}

impl ServiceResolver for ResolvedReferences {
    fn resolve_service(&self, target: &str) -> Result<String> {
        Ok(self
            .services
            .get(target)
            .cloned()
            .unwrap_or_else(|| target.to_string()))
    }
}

/// Pair of resolvers handed to the encoders.
#[derive(Clone, Copy)]
pub struct Resolvers<'a> {
    pub workflows: &'a dyn WorkflowResolver,
    pub services: &'a dyn ServiceResolver,
}

impl<'a> Resolvers<'a> {
    pub fn new(workflows: &'a dyn WorkflowResolver, services: &'a dyn ServiceResolver) -> Self {
        Self { workflows, services }
    }

    /// Both resolvers backed by the same map.
    pub fn from_references(refs: &'a ResolvedReferences) -> Self {
        Self::new(refs, refs)
    }

    pub fn pass_through() -> Resolvers<'static> {
        Resolvers::new(&PassThrough, &PassThrough)
    }
}
