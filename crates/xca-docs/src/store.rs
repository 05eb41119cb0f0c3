//! The document store interface.

use async_trait::async_trait;
use thiserror::Error;

use xca_core::{UpsertOutcome, User, XcaError};

/// Document store error types.
#[derive(Error, Debug)]
pub enum DocError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error(transparent)]
    Invalid(#[from] XcaError),
}

/// Result type for document store operations.
pub type DocResult<T> = Result<T, DocError>;

/// A keyed collection of user attribute records.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Drop the database if present and recreate it with an empty collection.
    async fn reset(&self) -> DocResult<()>;

    /// Insert or replace the record whose `id` matches `user.id`.
    async fn upsert_user(&self, user: &User) -> DocResult<UpsertOutcome>;

    /// Every stored record, projected to `id`, `first_name` and `last_name`.
    async fn list_users(&self) -> DocResult<Vec<User>>;

    async fn count_users(&self) -> DocResult<u64>;
}
