//! `grantsync-auth` — roles and the actual-state set of role holders.
//!
//! Nothing here talks to the role API. Callers load current holders into a
//! [`RoleAssignments`] and hand it to the reconciler, which marks entries that
//! are still desired by removing them.

pub mod assignment;
pub mod roles;

pub use assignment::{RoleAssignments, RoleUser};
pub use roles::Role;
