//! Graph store interface and error types.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Graph store error types.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Gremlin error: {0}")]
    Gremlin(#[from] gremlin_client::GremlinError),

    #[error("Invalid Gremlin endpoint '{0}'")]
    InvalidEndpoint(String),

    #[error("Unexpected value in traversal result: {0}")]
    UnexpectedValue(String),

    #[error("Vertex already exists: {0}")]
    VertexExists(String),

    #[error("Vertex not found: {0}")]
    VertexNotFound(String),
}

/// Result type for graph store operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Which way to walk an edge from a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Edges pointing at the vertex.
    In,
    /// Edges leaving the vertex.
    Out,
}

/// Vertex and edge counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphCounts {
    pub vertices: usize,
    pub edges: usize,
}

/// A property graph reachable through Gremlin-style operations.
///
/// Write methods return the number of elements the traversal produced;
/// zero means the store accepted the request but wrote nothing.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Remove every vertex, and with them every edge.
    async fn drop_all(&self) -> GraphResult<()>;

    async fn add_vertex(&self, label: &'static str, id: &str, partition_key: &str) -> GraphResult<usize>;

    async fn add_edge(&self, label: &'static str, from_id: &str, to_id: &str) -> GraphResult<usize>;

    /// Ids of the `vertex_label` vertices one `edge_label` hop away from `id`.
    async fn neighbor_ids(
        &self,
        id: &str,
        direction: Direction,
        edge_label: &'static str,
        vertex_label: &'static str,
    ) -> GraphResult<Vec<String>>;

    async fn counts(&self) -> GraphResult<GraphCounts>;
}
