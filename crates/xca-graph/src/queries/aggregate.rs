//! Combined user view: document attributes plus graph neighbourhood.
//!
//! One collection scan, then a followers and a following traversal per user.
//! Per-user lookups are independent, so they run through a bounded stream of
//! `fan_out` in-flight users; results keep the scan order.

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, info, warn};

use xca_core::{AggregateOptions, AggregatedUserView, QueryErrorPolicy, User};
use xca_docs::DocumentStore;

use crate::client::GraphStore;
use crate::sync::{SyncError, SyncOutcome};
use super::follows::{get_followers, get_following};

/// A user left out of the result under [`QueryErrorPolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedUser {
    pub user_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregateResult {
    pub users: Vec<AggregatedUserView>,
    pub skipped: Vec<SkippedUser>,
}

/// Every user in the document store with their followers and following.
pub async fn get_all_users(
    docs: &dyn DocumentStore,
    graph: &dyn GraphStore,
    options: &AggregateOptions,
) -> SyncOutcome<AggregateResult> {
    let users = docs.list_users().await?;
    let fan_out = options.fan_out.max(1);
    info!(users = users.len(), fan_out, policy = %options.on_query_error, "Aggregating users");

    let mut lookups = std::pin::pin!(stream::iter(users)
        .map(|user| aggregate_user(graph, user))
        .buffered(fan_out));

    let mut result = AggregateResult::default();
    while let Some(lookup) = lookups.next().await {
        match lookup {
            Ok(view) => result.users.push(view),
            Err(SyncError::Query { user_id, source }) if options.on_query_error == QueryErrorPolicy::Skip => {
                warn!(%user_id, error = %source, "Skipping user after failed graph query");
                result.skipped.push(SkippedUser {
                    user_id,
                    reason: source.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    Ok(result)
}

async fn aggregate_user(graph: &dyn GraphStore, user: User) -> SyncOutcome<AggregatedUserView> {
    let followers = get_followers(graph, &user.id)
        .await
        .map_err(|source| SyncError::Query {
            user_id: user.id.clone(),
            source,
        })?;
    let following = get_following(graph, &user.id)
        .await
        .map_err(|source| SyncError::Query {
            user_id: user.id.clone(),
            source,
        })?;

    debug!(id = %user.id, followers = followers.len(), following = following.len(), "Aggregated user");
    Ok(AggregatedUserView::from_user(user, followers, following))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGraph;
    use crate::sync::run_full_sync;
    use crate::testing::FlakyGraph;
    use std::collections::HashSet;
    use xca_docs::MemoryStore;

    async fn seed(docs: &MemoryStore, graph: &dyn GraphStore) {
        run_full_sync(docs, graph, &xca_core::seed::users(), &xca_core::seed::follows(), "pk")
            .await
            .unwrap();
    }

    fn set(ids: &[String]) -> HashSet<&str> {
        ids.iter().map(String::as_str).collect()
    }

    #[tokio::test]
    async fn test_end_to_end_view() {
        let docs = MemoryStore::new();
        let graph = MemoryGraph::new();
        seed(&docs, &graph).await;

        let result = get_all_users(&docs, &graph, &AggregateOptions::default()).await.unwrap();
        assert!(result.skipped.is_empty());
        assert_eq!(result.users.len(), 5);

        let expected: &[(&str, &str, &str, &[&str], &[&str])] = &[
            ("ash2shukla", "Ashish", "Shukla", &["message_aj", "tusharsr"], &["message_aj"]),
            ("message_aj", "Ayush", "Jaiswal", &["ash2shukla", "tusharsr"], &["ash2shukla", "tusharsr"]),
            ("sypherv", "Ravi", "Goel", &["tusharsr"], &[]),
            ("tusharsr", "Tushar", "Srivastava", &["message_aj"], &["ash2shukla", "message_aj", "sypherv"]),
            ("dhulam", "Ajit", "Dhulam", &[], &[]),
        ];

        for (view, (id, first, last, followers, following)) in result.users.iter().zip(expected) {
            assert_eq!(view.id, *id);
            assert_eq!(view.first_name, *first);
            assert_eq!(view.last_name, *last);
            assert_eq!(set(&view.followers), followers.iter().copied().collect::<HashSet<_>>(), "followers of {}", id);
            assert_eq!(set(&view.following), following.iter().copied().collect::<HashSet<_>>(), "following of {}", id);
        }
    }

    #[tokio::test]
    async fn test_parallel_fan_out_keeps_scan_order() {
        let docs = MemoryStore::new();
        let graph = MemoryGraph::new();
        seed(&docs, &graph).await;

        let sequential = get_all_users(&docs, &graph, &AggregateOptions::default()).await.unwrap();
        let parallel = get_all_users(
            &docs,
            &graph,
            &AggregateOptions {
                fan_out: 3,
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(sequential.users, parallel.users);
    }

    #[tokio::test]
    async fn test_empty_store_yields_no_users() {
        let docs = MemoryStore::new();
        let graph = MemoryGraph::new();
        let result = get_all_users(&docs, &graph, &AggregateOptions::default()).await.unwrap();
        assert!(result.users.is_empty());
    }

    #[tokio::test]
    async fn test_query_failure_aborts_by_default() {
        let docs = MemoryStore::new();
        let graph = FlakyGraph::new().fail_neighbors("sypherv");
        seed(&docs, &graph).await;

        let err = get_all_users(&docs, &graph, &AggregateOptions::default()).await.unwrap_err();
        match err {
            SyncError::Query { user_id, .. } => assert_eq!(user_id, "sypherv"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_query_failure_skips_user_when_configured() {
        let docs = MemoryStore::new();
        let graph = FlakyGraph::new().fail_neighbors("sypherv");
        seed(&docs, &graph).await;

        let options = AggregateOptions {
            fan_out: 2,
            on_query_error: QueryErrorPolicy::Skip,
        };
        let result = get_all_users(&docs, &graph, &options).await.unwrap();

        let ids: Vec<_> = result.users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["ash2shukla", "message_aj", "tusharsr", "dhulam"]);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].user_id, "sypherv");
    }
}
