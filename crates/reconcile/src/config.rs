//! Reconciler configuration.

use serde::{Deserialize, Serialize};

use grantsync_auth::Role;
use grantsync_core::{DomainError, DomainResult, Origin};

pub const ENV_ORIGIN: &str = "GRANTSYNC_ORIGIN";
pub const ENV_ROLE: &str = "GRANTSYNC_ROLE";
pub const ENV_CONTINUE_ON_CREATE_FAILURE: &str = "GRANTSYNC_CONTINUE_ON_CREATE_FAILURE";

/// Settings for a [`Reconciler`](crate::Reconciler).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// Origin under which candidates are resolved and provisioned.
    #[serde(default = "default_origin")]
    pub origin: Origin,
    /// Role being reconciled (reporting and logs only).
    #[serde(default)]
    pub role: Role,
    /// Skip candidates whose provisioning fails instead of aborting the pass.
    #[serde(default = "default_continue_on_create_failure")]
    pub continue_on_create_failure: bool,
}

fn default_origin() -> Origin {
    Origin::new("saml")
}

fn default_continue_on_create_failure() -> bool {
    true
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            role: Role::default(),
            continue_on_create_failure: default_continue_on_create_failure(),
        }
    }
}

impl ReconcileConfig {
    pub fn from_json_str(json: &str) -> DomainResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("reconcile config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read `GRANTSYNC_*` variables from the process environment.
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from a key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> DomainResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(origin) = lookup(ENV_ORIGIN) {
            config.origin = Origin::new(origin);
        }
        if let Some(role) = lookup(ENV_ROLE) {
            config.role = Role::new(role);
        }
        if let Some(raw) = lookup(ENV_CONTINUE_ON_CREATE_FAILURE) {
            config.continue_on_create_failure = parse_bool(ENV_CONTINUE_ON_CREATE_FAILURE, &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DomainResult<()> {
        Origin::parse(self.origin.as_str().to_string())?;
        if self.role.as_str().trim().is_empty() {
            return Err(DomainError::validation("role cannot be empty"));
        }
        Ok(())
    }
}

fn parse_bool(key: &str, raw: &str) -> DomainResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(DomainError::validation(format!(
            "{key}: expected a boolean, got '{other}'"
        ))),
    }
}
