//! Follow relationship synchronization.
//!
//! Creates `(:user)-[:follows]->(:user)` edges. There is no existence check,
//! so syncing the same table twice without provisioning duplicates edges.

use tracing::{info, warn};

use xca_core::user::FOLLOWS_LABEL;
use xca_core::{FollowEdge, FollowList, SyncResult, WriteWarning};

use crate::client::GraphStore;

/// Create one `follows` edge. Returns a warning instead of an error when the
/// write fails or produces nothing.
pub async fn add_follow_edge(graph: &dyn GraphStore, edge: &FollowEdge) -> Option<WriteWarning> {
    let reason = match graph
        .add_edge(FOLLOWS_LABEL, &edge.follower_id, &edge.followee_id)
        .await
    {
        Ok(0) => "traversal returned no edge".to_string(),
        Ok(_) => {
            info!(from = %edge.follower_id, to = %edge.followee_id, "Inserted follows edge");
            return None;
        }
        Err(e) => e.to_string(),
    };

    warn!(from = %edge.follower_id, to = %edge.followee_id, %reason, "Edge not created");
    Some(WriteWarning::EdgeNotCreated {
        follower_id: edge.follower_id.clone(),
        followee_id: edge.followee_id.clone(),
        reason,
    })
}

/// Sync every list in the follow table.
pub async fn sync_follows(graph: &dyn GraphStore, follows: &[FollowList]) -> SyncResult {
    let mut result = SyncResult::default();

    for list in follows {
        if list.followees.is_empty() {
            info!(id = %list.follower_id, "Follows no one");
            continue;
        }

        for edge in list.edges() {
            match add_follow_edge(graph, &edge).await {
                None => result.edges_created += 1,
                Some(warning) => result.warnings.push(warning),
            }
        }
    }

    result
}
