use anyhow::Result;

use super::Stores;
use crate::output;

/// Show document and graph counts.
pub async fn execute(stores: &Stores) -> Result<()> {
    let users = stores.docs.count_users().await?;
    let counts = stores.graph.counts().await?;

    output::print_status(users, &counts);
    Ok(())
}
