//! Write access to the directory: provisioning external users.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

use grantsync_core::{Origin, UserGuid};

/// Request to create a user that authenticates through an external origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExternalUser {
    pub username: String,
    pub email: String,
    pub external_id: String,
    pub origin: Origin,
}

impl NewExternalUser {
    /// Username, email and external id all set to `name`.
    pub fn from_name(name: &str, origin: Origin) -> Self {
        Self {
            username: name.to_string(),
            email: name.to_string(),
            external_id: name.to_string(),
            origin,
        }
    }
}

/// Failure to create a directory user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// The directory refused the request (conflict, validation, ...).
    #[error("directory rejected user '{username}': {reason}")]
    Rejected { username: String, reason: String },

    /// The directory could not be reached or failed internally.
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

/// Directory operations the reconciler depends on.
///
/// Implementations own their timeout and retry policy; a returned error is
/// final for the current pass.
pub trait DirectoryClient {
    fn create_external_user(&self, user: &NewExternalUser) -> Result<UserGuid, DirectoryError>;
}

impl<S> DirectoryClient for Arc<S>
where
    S: DirectoryClient + ?Sized,
{
    fn create_external_user(&self, user: &NewExternalUser) -> Result<UserGuid, DirectoryError> {
        (**self).create_external_user(user)
    }
}

impl<S> DirectoryClient for &S
where
    S: DirectoryClient + ?Sized,
{
    fn create_external_user(&self, user: &NewExternalUser) -> Result<UserGuid, DirectoryError> {
        (**self).create_external_user(user)
    }
}

/// In-memory directory client for tests/dev.
///
/// Issues fresh guids, records every request, and can be told to reject
/// specific usernames.
#[derive(Debug, Default)]
pub struct InMemoryDirectoryClient {
    created: RwLock<Vec<(NewExternalUser, UserGuid)>>,
    rejections: RwLock<HashMap<String, String>>,
    attempts: RwLock<Vec<NewExternalUser>>,
}

impl InMemoryDirectoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make creation of `username` fail with `reason`.
    pub fn reject(&self, username: impl Into<String>, reason: impl Into<String>) {
        if let Ok(mut map) = self.rejections.write() {
            map.insert(username.into(), reason.into());
        }
    }

    /// Every creation request received, successful or not.
    pub fn attempts(&self) -> Vec<NewExternalUser> {
        self.attempts.read().map(|a| a.clone()).unwrap_or_default()
    }

    /// Successfully created users with their issued guids.
    pub fn created(&self) -> Vec<(NewExternalUser, UserGuid)> {
        self.created.read().map(|c| c.clone()).unwrap_or_default()
    }
}

impl DirectoryClient for InMemoryDirectoryClient {
    fn create_external_user(&self, user: &NewExternalUser) -> Result<UserGuid, DirectoryError> {
        self.attempts
            .write()
            .map_err(|_| DirectoryError::Unavailable("lock poisoned".to_string()))?
            .push(user.clone());

        let rejection = self
            .rejections
            .read()
            .map_err(|_| DirectoryError::Unavailable("lock poisoned".to_string()))?
            .get(&user.username)
            .cloned();
        if let Some(reason) = rejection {
            return Err(DirectoryError::Rejected {
                username: user.username.clone(),
                reason,
            });
        }

        let guid = UserGuid::new();
        self.created
            .write()
            .map_err(|_| DirectoryError::Unavailable("lock poisoned".to_string()))?
            .push((user.clone(), guid));
        Ok(guid)
    }
}
