use serde::{Deserialize, Serialize};

use grantsync_core::{Origin, UserGuid};

/// A group the directory reports a user as member of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMembership {
    pub display: String,
}

impl GroupMembership {
    pub fn new(display: impl Into<String>) -> Self {
        Self {
            display: display.into(),
        }
    }
}

/// An external identity record.
///
/// `username` is unique within an `origin` only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryUser {
    pub username: String,
    pub email: String,
    pub external_id: String,
    pub origin: Origin,
    pub guid: UserGuid,
    #[serde(default)]
    pub groups: Vec<GroupMembership>,
}

impl DirectoryUser {
    /// Record for a user provisioned from an external identity provider,
    /// where username, email and external id are all the same value.
    pub fn external(name: impl Into<String>, origin: Origin, guid: UserGuid) -> Self {
        let name = name.into();
        Self {
            username: name.clone(),
            email: name.clone(),
            external_id: name,
            origin,
            guid,
            groups: Vec::new(),
        }
    }

    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = groups.into_iter().map(GroupMembership::new).collect();
        self
    }

    /// Group match is by exact (case-sensitive) display name.
    pub fn is_member_of(&self, group_name: &str) -> bool {
        self.groups.iter().any(|g| g.display == group_name)
    }
}
