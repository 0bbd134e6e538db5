//! Current holders of a role, keyed by (username, origin).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use grantsync_core::{Origin, UserGuid};

/// One identity currently holding the role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleUser {
    pub username: String,
    pub origin: Origin,
    pub guid: UserGuid,
}

/// Actual-state set of role holders.
///
/// Removing an entry does **not** revoke anything: it marks the holder as
/// still desired. Whatever remains after a reconciliation pass is the set of
/// revoke candidates.
#[derive(Debug, Clone, Default)]
pub struct RoleAssignments {
    // username -> holders of that name, at most one per origin
    users: BTreeMap<String, Vec<RoleUser>>,
}

impl RoleAssignments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a holder. A second entry for the same (username, origin)
    /// replaces the first.
    pub fn add_user(&mut self, user: RoleUser) {
        let holders = self.users.entry(user.username.clone()).or_default();
        holders.retain(|existing| existing.origin != user.origin);
        holders.push(user);
    }

    pub fn add_users(&mut self, users: impl IntoIterator<Item = RoleUser>) {
        for user in users {
            self.add_user(user);
        }
    }

    pub fn has_user_for_origin(&self, username: &str, origin: &Origin) -> bool {
        self.users
            .get(username)
            .is_some_and(|holders| holders.iter().any(|u| &u.origin == origin))
    }

    /// Mark (username, origin) as reconciled. Returns the removed entry, if any.
    pub fn remove_user_for_origin(&mut self, username: &str, origin: &Origin) -> Option<RoleUser> {
        let holders = self.users.get_mut(username)?;
        let idx = holders.iter().position(|u| &u.origin == origin)?;
        let removed = holders.remove(idx);
        if holders.is_empty() {
            self.users.remove(username);
        }
        tracing::trace!(username, origin = %origin, "role holder marked as still desired");
        Some(removed)
    }

    /// Entries not (yet) marked as desired, i.e. the revoke candidates.
    pub fn remaining(&self) -> impl Iterator<Item = &RoleUser> {
        self.users.values().flatten()
    }

    /// Same as [`RoleAssignments::remaining`], sorted by (username, origin).
    pub fn ordered_remaining(&self) -> Vec<&RoleUser> {
        let mut out: Vec<&RoleUser> = self.remaining().collect();
        out.sort_by(|a, b| (&a.username, &a.origin).cmp(&(&b.username, &b.origin)));
        out
    }

    pub fn len(&self) -> usize {
        self.users.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl FromIterator<RoleUser> for RoleAssignments {
    fn from_iter<I: IntoIterator<Item = RoleUser>>(iter: I) -> Self {
        let mut assignments = Self::new();
        assignments.add_users(iter);
        assignments
    }
}
