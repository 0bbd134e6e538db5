//! Grant decision: request a grant or preserve the existing one.

use tracing::debug;

use grantsync_auth::RoleAssignments;
use grantsync_directory::DirectoryUser;

use crate::desired::{DesiredMembership, RoleGranter};
use crate::error::{ReconcileError, ReconcileResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantDecision {
    /// A grant was requested through the granter.
    Granted,
    /// The user already held the role; its entry was removed from the
    /// current assignments so it is not revoked.
    Preserved,
}

/// Decide and apply grant-vs-preserve for a resolved, origin-qualified user.
pub fn decide_grant<G: RoleGranter>(
    user: &DirectoryUser,
    assignments: &mut RoleAssignments,
    desired: &mut DesiredMembership<G>,
) -> ReconcileResult<GrantDecision> {
    if assignments.has_user_for_origin(&user.username, &user.origin) {
        assignments.remove_user_for_origin(&user.username, &user.origin);
        return Ok(GrantDecision::Preserved);
    }

    debug!(
        username = %user.username,
        origin = %user.origin,
        role = %desired.role(),
        "granting role"
    );
    desired
        .grant(&user.username, user.guid)
        .map_err(|source| ReconcileError::Grant {
            username: user.username.clone(),
            origin: user.origin.clone(),
            source,
        })?;

    Ok(GrantDecision::Granted)
}
