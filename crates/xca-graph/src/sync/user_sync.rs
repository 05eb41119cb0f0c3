//! User synchronization: document upsert plus a vertex for new users.

use tracing::{info, warn};

use xca_core::user::USER_LABEL;
use xca_core::{SyncResult, UpsertOutcome, User, WriteWarning};
use xca_docs::DocumentStore;

use crate::client::GraphStore;
use super::SyncOutcome;

/// What happened to one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSyncOutcome {
    pub upsert: UpsertOutcome,
    /// Set when the user was created but its vertex was not.
    pub warning: Option<WriteWarning>,
}

impl UserSyncOutcome {
    pub fn created(&self) -> bool {
        self.upsert.created()
    }
}

/// Upsert one user and, only when it is new, create its vertex.
///
/// Updates never touch the graph. A failed or empty vertex write is reported
/// as a warning, not an error; the document stays written.
pub async fn upsert_user(
    docs: &dyn DocumentStore,
    graph: &dyn GraphStore,
    user: &User,
    partition_key: &str,
) -> SyncOutcome<UserSyncOutcome> {
    user.validate()?;

    let upsert = docs.upsert_user(user).await?;
    info!(id = %user.id, created = upsert.created(), "Upserted user");

    if !upsert.created() {
        return Ok(UserSyncOutcome { upsert, warning: None });
    }

    let reason = match graph.add_vertex(USER_LABEL, &user.id, partition_key).await {
        Ok(0) => Some("traversal returned no vertex".to_string()),
        Ok(_) => {
            info!(id = %user.id, "Inserted user vertex");
            None
        }
        Err(e) => Some(e.to_string()),
    };

    let warning = reason.map(|reason| {
        warn!(id = %user.id, %reason, "Vertex not created; stores have diverged");
        WriteWarning::VertexNotCreated {
            user_id: user.id.clone(),
            reason,
        }
    });

    Ok(UserSyncOutcome { upsert, warning })
}

/// Sync a list of users in order.
pub async fn sync_users(
    docs: &dyn DocumentStore,
    graph: &dyn GraphStore,
    users: &[User],
    partition_key: &str,
) -> SyncOutcome<SyncResult> {
    let mut result = SyncResult::default();

    for user in users {
        let outcome = upsert_user(docs, graph, user, partition_key).await?;
        match (outcome.upsert, outcome.warning) {
            (UpsertOutcome::Updated, _) => result.users_updated += 1,
            (UpsertOutcome::Created, None) => {
                result.users_created += 1;
                result.vertices_created += 1;
            }
            (UpsertOutcome::Created, Some(warning)) => {
                result.users_created += 1;
                result.warnings.push(warning);
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGraph;
    use crate::sync::SyncError;
    use crate::testing::{FlakyGraph, LogCapture};
    use xca_core::SyncStatus;
    use xca_docs::MemoryStore;

    #[tokio::test]
    async fn test_first_run_creates_second_run_updates() {
        let docs = MemoryStore::new();
        let graph = MemoryGraph::new();
        let users = xca_core::seed::users();

        let first = sync_users(&docs, &graph, &users, "pk").await.unwrap();
        assert_eq!(first.users_created, 5);
        assert_eq!(first.users_updated, 0);
        assert_eq!(first.vertices_created, 5);

        let second = sync_users(&docs, &graph, &users, "pk").await.unwrap();
        assert_eq!(second.users_created, 0);
        assert_eq!(second.users_updated, 5);
        assert_eq!(second.vertices_created, 0);
        assert_eq!(second.status(), SyncStatus::Complete);

        assert_eq!(graph.counts().await.unwrap().vertices, 5);
    }

    #[tokio::test]
    async fn test_each_user_reports_created_once() {
        let docs = MemoryStore::new();
        let graph = MemoryGraph::new();
        let user = User::new("dhulam", "Ajit", "Dhulam");

        assert!(upsert_user(&docs, &graph, &user, "pk").await.unwrap().created());
        assert!(!upsert_user(&docs, &graph, &user, "pk").await.unwrap().created());
    }

    #[tokio::test]
    async fn test_vertex_insert_is_logged() {
        let logs = LogCapture::new();
        let _guard = logs.install();
        let docs = MemoryStore::new();
        let graph = MemoryGraph::new();
        let user = User::new("dhulam", "Ajit", "Dhulam");

        upsert_user(&docs, &graph, &user, "pk").await.unwrap();
        let first = logs.contents();
        assert!(first.contains("Inserted user vertex"), "{}", first);
        assert!(first.contains("id=dhulam"), "{}", first);

        upsert_user(&docs, &graph, &user, "pk").await.unwrap();
        assert_eq!(logs.contents().matches("Inserted user vertex").count(), 1);
    }

    #[tokio::test]
    async fn test_empty_id_touches_no_store() {
        let docs = MemoryStore::new();
        let graph = MemoryGraph::new();

        let err = upsert_user(&docs, &graph, &User::new("", "No", "Body"), "pk")
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Invalid(_)));
        assert_eq!(docs.count_users().await.unwrap(), 0);
        assert_eq!(graph.counts().await.unwrap().vertices, 0);
    }

    #[tokio::test]
    async fn test_vertex_failure_is_a_warning() {
        let docs = MemoryStore::new();
        let graph = FlakyGraph::new().fail_vertex("sypherv").empty_vertex("dhulam");

        let result = sync_users(&docs, &graph, &xca_core::seed::users(), "pk").await.unwrap();

        assert_eq!(result.users_created, 5);
        assert_eq!(result.vertices_created, 3);
        assert_eq!(result.status(), SyncStatus::Partial);
        let failed: Vec<_> = result
            .warnings
            .iter()
            .map(|w| match w {
                WriteWarning::VertexNotCreated { user_id, .. } => user_id.as_str(),
                other => panic!("unexpected warning {:?}", other),
            })
            .collect();
        assert_eq!(failed, vec!["sypherv", "dhulam"]);

        // The documents were written regardless.
        assert_eq!(docs.count_users().await.unwrap(), 5);
    }
}
