//! `grantsync-reconcile` — converge role grants to the desired membership.
//!
//! A pass runs three steps per candidate identity:
//!
//! 1. **union** — directory members of any desired group plus explicitly named users,
//! 2. **resolve** — make sure the identity exists under the configured origin,
//!    provisioning it in the directory if it is missing entirely,
//! 3. **decide** — request a grant, or mark the existing grant as still desired.
//!
//! Entries left in [`RoleAssignments`](grantsync_auth::RoleAssignments) after a
//! successful pass are the revoke candidates; revoking them is the caller's job.

pub mod config;
pub mod decision;
pub mod desired;
pub mod engine;
pub mod error;
pub mod report;
pub mod resolver;
pub mod union;

pub use config::ReconcileConfig;
pub use decision::{GrantDecision, decide_grant};
pub use desired::{DesiredMembership, RoleGranter};
pub use engine::Reconciler;
pub use error::{ReconcileError, ReconcileResult};
pub use report::{CandidateOutcome, ReconciliationReport, SkippedCandidate};
pub use resolver::{IdentityResolver, Resolution};
pub use union::union_of_users_to_grant;
