use anyhow::Result;
use colored::Colorize;

use super::Stores;

/// Drop and recreate both stores.
pub async fn execute(stores: &Stores) -> Result<()> {
    xca_graph::sync::provision_stores(stores.docs.as_ref(), stores.graph.as_ref()).await?;
    println!("{}", "Both stores reset.".green());
    Ok(())
}
