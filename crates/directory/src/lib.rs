//! `grantsync-directory` — the external identity directory, as seen by the reconciler.
//!
//! [`DirectorySnapshot`] is a pre-loaded, in-memory view of the directory's
//! users. [`DirectoryClient`] is the one write operation the reconciler needs
//! (creating an external user); the network client behind it lives elsewhere.

pub mod client;
pub mod snapshot;
pub mod user;

pub use client::{DirectoryClient, DirectoryError, InMemoryDirectoryClient, NewExternalUser};
pub use snapshot::DirectorySnapshot;
pub use user::{DirectoryUser, GroupMembership};
