//! Follower and following lookups.
//!
//! Result order is whatever the graph store's traversal yields. A user with
//! no edges, or one with no vertex at all, gets an empty list.

use xca_core::user::{FOLLOWS_LABEL, USER_LABEL};

use crate::client::{Direction, GraphResult, GraphStore};

/// Ids of the users who follow `user_id` (inbound `follows` edges).
pub async fn get_followers(graph: &dyn GraphStore, user_id: &str) -> GraphResult<Vec<String>> {
    graph
        .neighbor_ids(user_id, Direction::In, FOLLOWS_LABEL, USER_LABEL)
        .await
}

/// Ids of the users `user_id` follows (outbound `follows` edges).
pub async fn get_following(graph: &dyn GraphStore, user_id: &str) -> GraphResult<Vec<String>> {
    graph
        .neighbor_ids(user_id, Direction::Out, FOLLOWS_LABEL, USER_LABEL)
        .await
}
