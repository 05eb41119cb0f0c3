//! # XCA Graph
//!
//! Gremlin graph integration for XCA.
//!
//! Provides the [`GraphStore`] seam with Gremlin and in-memory backends,
//! synchronization of users and follow relations from the document store,
//! and the follower/following queries behind the combined user view.

pub mod client;
pub mod gremlin;
pub mod memory;
pub mod queries;
pub mod sync;
pub mod traversal;

#[cfg(test)]
mod testing;

pub use client::{Direction, GraphCounts, GraphError, GraphResult, GraphStore};
pub use gremlin::{GremlinConfig, GremlinStore};
pub use memory::MemoryGraph;
pub use queries::{get_all_users, get_followers, get_following, AggregateResult, SkippedUser};
pub use sync::{run_full_sync, SyncError, SyncOutcome};
