//! The reconciliation pass.

use tracing::info;

use grantsync_auth::RoleAssignments;
use grantsync_core::{Origin, RunId};
use grantsync_directory::{DirectoryClient, DirectorySnapshot};

use crate::config::ReconcileConfig;
use crate::decision::{GrantDecision, decide_grant};
use crate::desired::{DesiredMembership, RoleGranter};
use crate::error::ReconcileResult;
use crate::report::{CandidateOutcome, ReconciliationReport};
use crate::resolver::{IdentityResolver, Resolution};
use crate::union::union_of_users_to_grant;

/// Converges holders of a role to a [`DesiredMembership`].
///
/// # Partial application
/// A pass is not atomic. If it fails, users provisioned so far stay in the
/// directory (and the snapshot), and holders already marked as desired stay
/// removed from the assignments.
#[derive(Debug)]
pub struct Reconciler<C> {
    resolver: IdentityResolver<C>,
}

impl<C: DirectoryClient> Reconciler<C> {
    pub fn new(client: C, origin: Origin) -> Self {
        Self {
            resolver: IdentityResolver::new(client, origin),
        }
    }

    /// Build from a config; fails if the config does not validate.
    pub fn from_config(client: C, config: &ReconcileConfig) -> ReconcileResult<Self> {
        config.validate()?;
        Ok(Self {
            resolver: IdentityResolver::new(client, config.origin.clone())
                .continue_on_create_failure(config.continue_on_create_failure),
        })
    }

    pub fn origin(&self) -> &Origin {
        self.resolver.origin()
    }

    /// Run one pass.
    ///
    /// - `assignments`: current holders of the role (actual state); on success
    ///   only the revoke candidates remain.
    /// - `directory`: users known to the directory; provisioned users are appended.
    /// - `desired`: who should hold the role, and how to grant it.
    pub fn sync_users<G: RoleGranter>(
        &self,
        assignments: &mut RoleAssignments,
        directory: &mut DirectorySnapshot,
        desired: &mut DesiredMembership<G>,
    ) -> ReconcileResult<ReconciliationReport> {
        let run_id = RunId::new();
        let span = tracing::info_span!(
            "sync_users",
            run_id = %run_id,
            origin = %self.origin(),
            role = %desired.role(),
        );
        let _entered = span.enter();

        let candidates = union_of_users_to_grant(directory, desired);
        info!(
            candidates = candidates.len(),
            current_holders = assignments.len(),
            "starting reconciliation pass"
        );

        let mut report =
            ReconciliationReport::start(run_id, desired.role().clone(), self.origin().clone());

        for candidate in &candidates {
            let outcome = self.reconcile_candidate(candidate, assignments, directory, desired)?;
            report.record(outcome);
        }

        report.finish(assignments.len());
        info!(
            granted = report.granted.len(),
            preserved = report.preserved.len(),
            created = report.created.len(),
            skipped = report.skipped.len(),
            revoke_candidates = report.revoke_candidates,
            "reconciliation pass complete"
        );

        Ok(report)
    }

    /// Resolve and decide a single candidate.
    pub fn reconcile_candidate<G: RoleGranter>(
        &self,
        candidate: &str,
        assignments: &mut RoleAssignments,
        directory: &mut DirectorySnapshot,
        desired: &mut DesiredMembership<G>,
    ) -> ReconcileResult<CandidateOutcome> {
        let (user, created) = match self.resolver.resolve(candidate, directory)? {
            Resolution::Resolved { user, created } => (user, created),
            Resolution::Skipped { reason } => {
                return Ok(CandidateOutcome::Skipped {
                    username: candidate.to_string(),
                    reason: reason.to_string(),
                });
            }
        };

        let username = user.username.clone();
        let outcome = match decide_grant(user, assignments, desired)? {
            GrantDecision::Granted => CandidateOutcome::Granted { username, created },
            GrantDecision::Preserved => CandidateOutcome::Preserved { username, created },
        };
        Ok(outcome)
    }
}
