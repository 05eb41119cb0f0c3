//! User domain models.

use serde::{Deserialize, Serialize};

use crate::error::{XcaError, XcaResult};

/// A user's attribute record, keyed by `id` in both stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    pub fn new(id: impl Into<String>, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Reject records that cannot serve as a document key or vertex id.
    pub fn validate(&self) -> XcaResult<()> {
        if self.id.trim().is_empty() {
            return Err(XcaError::validation("user id must not be empty"));
        }
        Ok(())
    }
}

/// A directed `follows` relation. Duplicates are not prevented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowEdge {
    pub follower_id: String,
    pub followee_id: String,
}

impl FollowEdge {
    pub fn new(follower_id: impl Into<String>, followee_id: impl Into<String>) -> Self {
        Self {
            follower_id: follower_id.into(),
            followee_id: followee_id.into(),
        }
    }
}

/// Combined view of a user's attributes and graph neighbourhood.
///
/// Derived on every query and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedUserView {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub followers: Vec<String>,
    pub following: Vec<String>,
}

impl AggregatedUserView {
    pub fn from_user(user: User, followers: Vec<String>, following: Vec<String>) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            followers,
            following,
        }
    }
}

/// Whether an upsert inserted a new record or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    Created,
    Updated,
}

impl UpsertOutcome {
    pub fn created(self) -> bool {
        matches!(self, Self::Created)
    }
}

/// A graph write that failed or returned nothing.
///
/// Leaves the document store and the graph store out of step; the run
/// continues and the warning is handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WriteWarning {
    VertexNotCreated {
        user_id: String,
        reason: String,
    },
    EdgeNotCreated {
        follower_id: String,
        followee_id: String,
        reason: String,
    },
}

impl std::fmt::Display for WriteWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VertexNotCreated { user_id, reason } => {
                write!(f, "vertex '{}' not created: {}", user_id, reason)
            }
            Self::EdgeNotCreated { follower_id, followee_id, reason } => {
                write!(f, "edge '{}' -> '{}' not created: {}", follower_id, followee_id, reason)
            }
        }
    }
}

/// Overall status of a synchronization phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    Complete,
    Partial,
}

/// Result of a sync operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncResult {
    pub users_created: usize,
    pub users_updated: usize,
    pub vertices_created: usize,
    pub edges_created: usize,
    pub warnings: Vec<WriteWarning>,
}

impl SyncResult {
    pub fn merge(&mut self, other: SyncResult) {
        self.users_created += other.users_created;
        self.users_updated += other.users_updated;
        self.vertices_created += other.vertices_created;
        self.edges_created += other.edges_created;
        self.warnings.extend(other.warnings);
    }

    pub fn status(&self) -> SyncStatus {
        if self.warnings.is_empty() {
            SyncStatus::Complete
        } else {
            SyncStatus::Partial
        }
    }
}
