//! Read-side queries across both stores.

pub mod aggregate;
pub mod follows;

pub use aggregate::{get_all_users, AggregateResult, SkippedUser};
pub use follows::{get_followers, get_following};
