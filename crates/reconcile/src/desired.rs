//! The reconciliation target: who should hold the role.

use std::collections::BTreeSet;

use tracing::warn;

use grantsync_auth::Role;
use grantsync_core::UserGuid;

/// Requests a role grant for a resolved identity.
///
/// Implemented by whatever talks to the role API. Errors abort the pass.
pub trait RoleGranter {
    fn grant(&mut self, username: &str, guid: UserGuid) -> anyhow::Result<()>;
}

impl<F> RoleGranter for F
where
    F: FnMut(&str, UserGuid) -> anyhow::Result<()>,
{
    fn grant(&mut self, username: &str, guid: UserGuid) -> anyhow::Result<()> {
        self(username, guid)
    }
}

/// Desired holders of `role`: members of any listed group plus explicitly
/// named users (typically emails).
#[derive(Debug, Clone)]
pub struct DesiredMembership<G> {
    role: Role,
    group_names: Vec<String>,
    users: Vec<String>,
    granter: G,
}

impl<G> DesiredMembership<G> {
    pub fn new(role: Role, granter: G) -> Self {
        Self {
            role,
            group_names: Vec::new(),
            users: Vec::new(),
            granter,
        }
    }

    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_names.extend(groups.into_iter().map(Into::into));
        self
    }

    pub fn with_users<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.users.extend(users.into_iter().map(Into::into));
        self
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    /// Group names, deduplicated, blanks dropped. Case-sensitive.
    pub fn unique_group_names(&self) -> BTreeSet<&str> {
        unique("group", &self.group_names)
    }

    /// Explicit user names, deduplicated, blanks dropped.
    pub fn unique_users(&self) -> BTreeSet<&str> {
        unique("user", &self.users)
    }

    pub fn granter(&self) -> &G {
        &self.granter
    }
}

impl<G: RoleGranter> DesiredMembership<G> {
    pub fn grant(&mut self, username: &str, guid: UserGuid) -> anyhow::Result<()> {
        self.granter.grant(username, guid)
    }
}

fn unique<'a>(kind: &'static str, values: &'a [String]) -> BTreeSet<&'a str> {
    let blanks = values.iter().filter(|v| v.trim().is_empty()).count();
    if blanks > 0 {
        warn!(kind, dropped = blanks, "ignoring blank desired names");
    }

    values
        .iter()
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
        .collect()
}
