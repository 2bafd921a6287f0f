use std::collections::BTreeMap;

use serde::Deserialize;

use idgov_core::error::{IdGovError, Result};
use idgov_core::model::{OrganizationalContainer, PolicyScope};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    #[serde(default)]
    pub defaults: PolicyDefaults,

    /// Workflow process name -> process DN.
    #[serde(default)]
    pub workflows: BTreeMap<String, String>,

    #[serde(default)]
    pub containers: Vec<ContainerConfig>,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(IdGovError::UnsupportedVersion);
        }

        for (name, dn) in &self.workflows {
            if name.trim().is_empty() || dn.trim().is_empty() {
                return Err(IdGovError::BadRequest(format!(
                    "workflows entry must have a name and a DN (got {name:?} -> {dn:?})"
                )));
            }
        }

        for c in &self.containers {
            c.validate()?;
        }

        Ok(())
    }
}

/// Values applied when a policy document leaves a field out.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyDefaults {
    #[serde(default)]
    pub scope: PolicyScope,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for PolicyDefaults {
    fn default() -> Self {
        Self {
            scope: PolicyScope::default(),
            enabled: default_enabled(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContainerConfig {
    pub dn: String,
    pub name: String,
    #[serde(default = "default_profile")]
    pub profile: String,
}

impl ContainerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.dn.trim().is_empty() {
            return Err(IdGovError::BadRequest("containers[].dn must not be empty".into()));
        }
        if self.name.trim().is_empty() {
            return Err(IdGovError::BadRequest(format!(
                "containers[].name must not be empty (dn={})",
                self.dn
            )));
        }
        Ok(())
    }

    pub fn to_container(&self) -> OrganizationalContainer {
        OrganizationalContainer {
            dn: self.dn.clone(),
            name: self.name.clone(),
            profile: self.profile.clone(),
        }
    }
}

fn default_profile() -> String {
    "OrganizationalUnit".into()
}
