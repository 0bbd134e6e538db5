//! Reconciliation error model.

use thiserror::Error;

use grantsync_core::{DomainError, Origin};
use grantsync_directory::DirectoryError;

pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Failures that abort a reconciliation pass.
///
/// Mutations applied before the failure (provisioned users, preserved
/// holders) stay applied.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The candidate exists in the directory, but not under the required origin.
    #[error("unable to find user {username} for origin {origin}")]
    OriginMismatch { username: String, origin: Origin },

    /// The role API refused the grant.
    #[error("user {username} with origin {origin}: {source}")]
    Grant {
        username: String,
        origin: Origin,
        #[source]
        source: anyhow::Error,
    },

    /// Provisioning failed and the reconciler is configured not to tolerate it.
    #[error("unable to create user {username}")]
    Creation {
        username: String,
        #[source]
        source: DirectoryError,
    },

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] DomainError),
}
