use anyhow::Result;

use super::Stores;
use crate::output;

/// Show both directions of the follow relation for one user.
pub async fn execute(user_id: &str, stores: &Stores) -> Result<()> {
    let graph = stores.graph.as_ref();
    let followers = xca_graph::get_followers(graph, user_id).await?;
    let following = xca_graph::get_following(graph, user_id).await?;

    output::print_follows(user_id, &followers, &following);
    Ok(())
}
