//! Identity resolution: make sure a candidate exists under the required origin.

use tracing::{debug, error, warn};

use grantsync_core::Origin;
use grantsync_directory::{
    DirectoryClient, DirectoryError, DirectorySnapshot, DirectoryUser, NewExternalUser,
};

use crate::error::{ReconcileError, ReconcileResult};

/// Result of resolving one candidate.
#[derive(Debug)]
pub enum Resolution<'d> {
    /// The origin-qualified record to act on. `created` is set when the
    /// record was provisioned during this resolution.
    Resolved { user: &'d DirectoryUser, created: bool },
    /// Provisioning failed; the candidate is left out of this pass.
    Skipped { reason: DirectoryError },
}

/// Looks candidates up in the snapshot, provisioning missing ones through a
/// [`DirectoryClient`].
#[derive(Debug)]
pub struct IdentityResolver<C> {
    client: C,
    origin: Origin,
    continue_on_create_failure: bool,
}

impl<C: DirectoryClient> IdentityResolver<C> {
    pub fn new(client: C, origin: Origin) -> Self {
        Self {
            client,
            origin,
            continue_on_create_failure: true,
        }
    }

    /// When `false`, a provisioning failure aborts the pass instead of
    /// skipping the candidate.
    pub fn continue_on_create_failure(mut self, enabled: bool) -> Self {
        self.continue_on_create_failure = enabled;
        self
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Resolve `candidate` to its record under the configured origin.
    ///
    /// A candidate with no record under *any* origin is created once (username,
    /// email and external id all set to the candidate name) and appended to
    /// `directory`. A candidate that exists only under other origins is an
    /// [`ReconcileError::OriginMismatch`].
    pub fn resolve<'d>(
        &self,
        candidate: &str,
        directory: &'d mut DirectorySnapshot,
    ) -> ReconcileResult<Resolution<'d>> {
        let mut created = false;

        if directory.get_by_name(candidate).is_empty() {
            debug!(
                username = candidate,
                origin = %self.origin,
                "user doesn't exist in directory, creating"
            );

            let request = NewExternalUser::from_name(candidate, self.origin.clone());
            match self.client.create_external_user(&request) {
                Ok(guid) => {
                    directory.add(DirectoryUser::external(candidate, self.origin.clone(), guid));
                    created = true;
                }
                Err(err) => {
                    error!(username = candidate, error = %err, "unable to create user");
                    if !self.continue_on_create_failure {
                        return Err(ReconcileError::Creation {
                            username: candidate.to_string(),
                            source: err,
                        });
                    }
                    return Ok(Resolution::Skipped { reason: err });
                }
            }
        }

        let directory: &'d DirectorySnapshot = directory;
        match directory.get_by_name_and_origin(candidate, &self.origin) {
            Some(user) => Ok(Resolution::Resolved { user, created }),
            None => {
                warn!(
                    username = candidate,
                    origin = %self.origin,
                    "user exists in directory but not for the required origin"
                );
                Err(ReconcileError::OriginMismatch {
                    username: candidate.to_string(),
                    origin: self.origin.clone(),
                })
            }
        }
    }
}
