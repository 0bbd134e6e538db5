//! `grantsync-core` — shared primitives for identity-grant reconciliation.
//!
//! This crate has no IO and no knowledge of directories or role APIs; it only
//! carries the identifiers and error vocabulary the other crates agree on.

pub mod error;
pub mod id;
pub mod origin;

pub use error::{DomainError, DomainResult};
pub use id::{RunId, UserGuid};
pub use origin::Origin;
