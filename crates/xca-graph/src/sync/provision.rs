//! Reset both stores to an empty state before a run.
//!
//! Destructive. Any failure here is fatal: everything downstream assumes
//! clean stores.

use tracing::info;

use xca_docs::DocumentStore;

use crate::client::GraphStore;
use super::{SyncError, SyncOutcome};

/// Drop and recreate the document database and its collection.
pub async fn reset_document_store(docs: &dyn DocumentStore) -> SyncOutcome<()> {
    docs.reset().await.map_err(SyncError::ProvisionDocuments)?;
    info!("Document store reset");
    Ok(())
}

/// Drop every vertex (and, by cascade, every edge).
pub async fn reset_graph_store(graph: &dyn GraphStore) -> SyncOutcome<()> {
    graph.drop_all().await.map_err(SyncError::ProvisionGraph)?;
    info!("Graph store reset");
    Ok(())
}

/// Reset the graph first so a half-provisioned run never leaves documents
/// without matching vertices behind.
pub async fn provision_stores(docs: &dyn DocumentStore, graph: &dyn GraphStore) -> SyncOutcome<()> {
    reset_graph_store(graph).await?;
    reset_document_store(docs).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGraph;
    use xca_core::User;
    use xca_docs::MemoryStore;

    #[tokio::test]
    async fn test_provision_empties_both_stores() {
        let docs = MemoryStore::new();
        let graph = MemoryGraph::new();
        docs.upsert_user(&User::new("a", "A", "A")).await.unwrap();
        graph.add_vertex("user", "a", "pk").await.unwrap();

        provision_stores(&docs, &graph).await.unwrap();

        assert_eq!(docs.count_users().await.unwrap(), 0);
        assert_eq!(graph.counts().await.unwrap().vertices, 0);
    }

    #[tokio::test]
    async fn test_provision_on_empty_stores_is_a_no_op() {
        let docs = MemoryStore::new();
        let graph = MemoryGraph::new();
        provision_stores(&docs, &graph).await.unwrap();
        provision_stores(&docs, &graph).await.unwrap();
    }
}
