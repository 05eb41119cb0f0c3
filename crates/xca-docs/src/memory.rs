//! In-process document store.
//!
//! Keeps records in insertion order, which is also the order a fresh
//! collection scan returns them from a real account.

use async_trait::async_trait;
use tokio::sync::RwLock;

use xca_core::{UpsertOutcome, User};

use crate::store::{DocResult, DocumentStore};

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn reset(&self) -> DocResult<()> {
        self.users.write().await.clear();
        Ok(())
    }

    async fn upsert_user(&self, user: &User) -> DocResult<UpsertOutcome> {
        user.validate()?;

        let mut users = self.users.write().await;
        match users.iter_mut().find(|existing| existing.id == user.id) {
            Some(existing) => {
                existing.first_name = user.first_name.clone();
                existing.last_name = user.last_name.clone();
                Ok(UpsertOutcome::Updated)
            }
            None => {
                users.push(user.clone());
                Ok(UpsertOutcome::Created)
            }
        }
    }

    async fn list_users(&self) -> DocResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn count_users(&self) -> DocResult<u64> {
        Ok(self.users.read().await.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocError;

    #[tokio::test]
    async fn test_upsert_creates_then_updates() {
        let store = MemoryStore::new();
        let user = User::new("sypherv", "Ravi", "Goyal");

        assert_eq!(store.upsert_user(&user).await.unwrap(), UpsertOutcome::Created);

        let renamed = User::new("sypherv", "Ravi", "Goel");
        assert_eq!(store.upsert_user(&renamed).await.unwrap(), UpsertOutcome::Updated);

        assert_eq!(store.list_users().await.unwrap(), vec![renamed]);
        assert_eq!(store.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_empty_id_is_rejected() {
        let store = MemoryStore::new();
        let err = store.upsert_user(&User::new("", "No", "Body")).await.unwrap_err();
        assert!(matches!(err, DocError::Invalid(_)));
        assert_eq!(store.count_users().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_reset_empties_the_collection() {
        let store = MemoryStore::new();
        for user in xca_core::seed::users() {
            store.upsert_user(&user).await.unwrap();
        }
        assert_eq!(store.count_users().await.unwrap(), 5);

        store.reset().await.unwrap();
        assert!(store.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = MemoryStore::new();
        let seed = xca_core::seed::users();
        for user in &seed {
            store.upsert_user(user).await.unwrap();
        }
        assert_eq!(store.list_users().await.unwrap(), seed);
    }
}
