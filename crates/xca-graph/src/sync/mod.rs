//! Document store to graph store synchronization pipeline.
//!
//! Provisions both stores, upserts users into the document store with a
//! vertex for each new one, then adds the follow edges. Graph write failures
//! do not stop the pipeline; they come back as [`WriteWarning`]s inside the
//! [`SyncResult`].

pub mod follow_sync;
pub mod provision;
pub mod user_sync;

use thiserror::Error;
use tracing::info;

use xca_core::{FollowList, SyncResult, User, XcaError};
use xca_docs::{DocError, DocumentStore};

use crate::client::{GraphError, GraphStore};

pub use follow_sync::{add_follow_edge, sync_follows};
pub use provision::{provision_stores, reset_document_store, reset_graph_store};
pub use user_sync::{sync_users, upsert_user, UserSyncOutcome};

/// Errors that stop a synchronization or aggregation run.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Document store provisioning failed: {0}")]
    ProvisionDocuments(#[source] DocError),

    #[error("Graph store provisioning failed: {0}")]
    ProvisionGraph(#[source] GraphError),

    #[error(transparent)]
    Invalid(#[from] XcaError),

    #[error("Document store error: {0}")]
    Document(#[from] DocError),

    #[error("Graph query failed for user '{user_id}': {source}")]
    Query {
        user_id: String,
        #[source]
        source: GraphError,
    },
}

/// Result type for sync operations.
pub type SyncOutcome<T> = Result<T, SyncError>;

/// Run the full pipeline: provision, users, then follow edges.
pub async fn run_full_sync(
    docs: &dyn DocumentStore,
    graph: &dyn GraphStore,
    users: &[User],
    follows: &[FollowList],
    partition_key: &str,
) -> SyncOutcome<SyncResult> {
    info!(users = users.len(), follow_lists = follows.len(), "Starting full sync");

    provision_stores(docs, graph).await?;

    let mut total = sync_users(docs, graph, users, partition_key).await?;
    info!(
        created = total.users_created,
        updated = total.users_updated,
        vertices = total.vertices_created,
        "Users synced"
    );

    let follow_result = sync_follows(graph, follows).await;
    info!(edges = follow_result.edges_created, "Follows synced");
    total.merge(follow_result);

    info!(
        users_created = total.users_created,
        edges_created = total.edges_created,
        warnings = total.warnings.len(),
        status = ?total.status(),
        "Full sync complete"
    );

    Ok(total)
}
