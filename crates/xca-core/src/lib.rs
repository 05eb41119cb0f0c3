//! XCA Core Library
//!
//! Domain models, seed dataset and settings for the XCA social-graph sync.

pub mod config;
pub mod error;
pub mod seed;
pub mod user;

pub use config::{
    AggregateOptions, DocumentFlavor, DocumentSettings, GraphSettings, QueryErrorPolicy, Settings,
};
pub use error::{XcaError, XcaResult};
pub use seed::FollowList;
pub use user::model::{
    AggregatedUserView, FollowEdge, SyncResult, SyncStatus, UpsertOutcome, User, WriteWarning,
};
