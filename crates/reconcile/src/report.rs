//! What a reconciliation pass did.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use grantsync_auth::Role;
use grantsync_core::{Origin, RunId};

/// Terminal state of one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CandidateOutcome {
    Granted { username: String, created: bool },
    Preserved { username: String, created: bool },
    Skipped { username: String, reason: String },
}

impl CandidateOutcome {
    pub fn username(&self) -> &str {
        match self {
            CandidateOutcome::Granted { username, .. }
            | CandidateOutcome::Preserved { username, .. }
            | CandidateOutcome::Skipped { username, .. } => username,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedCandidate {
    pub username: String,
    pub reason: String,
}

/// Summary of a successful pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub run_id: RunId,
    pub role: Role,
    pub origin: Origin,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Candidates a grant was requested for.
    pub granted: Vec<String>,
    /// Candidates that already held the role.
    pub preserved: Vec<String>,
    /// Candidates provisioned in the directory during the pass.
    pub created: Vec<String>,
    pub skipped: Vec<SkippedCandidate>,
    /// Holders left unmarked after the pass.
    pub revoke_candidates: usize,
}

impl ReconciliationReport {
    pub fn start(run_id: RunId, role: Role, origin: Origin) -> Self {
        Self {
            run_id,
            role,
            origin,
            started_at: Utc::now(),
            finished_at: None,
            granted: Vec::new(),
            preserved: Vec::new(),
            created: Vec::new(),
            skipped: Vec::new(),
            revoke_candidates: 0,
        }
    }

    pub fn record(&mut self, outcome: CandidateOutcome) {
        match outcome {
            CandidateOutcome::Granted { username, created } => {
                if created {
                    self.created.push(username.clone());
                }
                self.granted.push(username);
            }
            CandidateOutcome::Preserved { username, created } => {
                if created {
                    self.created.push(username.clone());
                }
                self.preserved.push(username);
            }
            CandidateOutcome::Skipped { username, reason } => {
                self.skipped.push(SkippedCandidate { username, reason });
            }
        }
    }

    pub fn finish(&mut self, revoke_candidates: usize) {
        self.revoke_candidates = revoke_candidates;
        self.finished_at = Some(Utc::now());
        self.granted.sort();
        self.preserved.sort();
        self.created.sort();
        self.skipped.sort_by(|a, b| a.username.cmp(&b.username));
    }

    /// Number of candidates that reached a terminal state.
    pub fn processed(&self) -> usize {
        self.granted.len() + self.preserved.len() + self.skipped.len()
    }

    /// True when no candidate had to be skipped.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}
