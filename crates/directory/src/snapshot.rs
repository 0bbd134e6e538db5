//! In-memory view of directory users.

use grantsync_core::{Origin, UserGuid};

use crate::user::DirectoryUser;

/// Pre-loaded collection of directory users.
///
/// Owned by the caller. During a reconciliation pass it only grows: newly
/// provisioned users are appended so later lookups in the same pass see them.
#[derive(Debug, Clone, Default)]
pub struct DirectorySnapshot {
    users: Vec<DirectoryUser>,
}

impl DirectorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, user: DirectoryUser) {
        self.users.push(user);
    }

    pub fn list(&self) -> impl Iterator<Item = &DirectoryUser> {
        self.users.iter()
    }

    /// All records with this username, across every origin.
    pub fn get_by_name(&self, username: &str) -> Vec<&DirectoryUser> {
        self.users.iter().filter(|u| u.username == username).collect()
    }

    pub fn get_by_name_and_origin(&self, username: &str, origin: &Origin) -> Option<&DirectoryUser> {
        self.users
            .iter()
            .find(|u| u.username == username && &u.origin == origin)
    }

    pub fn get_by_id(&self, guid: &UserGuid) -> Option<&DirectoryUser> {
        self.users.iter().find(|u| &u.guid == guid)
    }

    pub fn get_by_external_id(&self, external_id: &str) -> Vec<&DirectoryUser> {
        self.users
            .iter()
            .filter(|u| u.external_id == external_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl FromIterator<DirectoryUser> for DirectorySnapshot {
    fn from_iter<I: IntoIterator<Item = DirectoryUser>>(iter: I) -> Self {
        Self {
            users: iter.into_iter().collect(),
        }
    }
}
