//! # XCA Docs
//!
//! User attribute records in a MongoDB-compatible document store.
//!
//! [`DocumentStore`] is the seam the synchronizers work against;
//! [`MongoStore`] talks to a live account and [`MemoryStore`] keeps
//! everything in process.

pub mod memory;
pub mod mongo;
pub mod store;

pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use store::{DocError, DocResult, DocumentStore};
