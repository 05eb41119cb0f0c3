//! In-process property graph.
//!
//! Mirrors what a Gremlin server does for the handful of traversals XCA
//! issues: vertex ids are unique, edges are not, `g.V(missing).addE(..)`
//! writes nothing, and a missing `to()` target is an error.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::client::{Direction, GraphCounts, GraphError, GraphResult, GraphStore};

#[derive(Debug, Clone)]
struct Vertex {
    id: String,
    label: &'static str,
}

#[derive(Debug, Clone)]
struct Edge {
    label: &'static str,
    from: String,
    to: String,
}

#[derive(Default)]
struct Inner {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
}

#[derive(Default)]
pub struct MemoryGraph {
    inner: RwLock<Inner>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GraphStore for MemoryGraph {
    async fn drop_all(&self) -> GraphResult<()> {
        let mut inner = self.inner.write().await;
        inner.vertices.clear();
        inner.edges.clear();
        Ok(())
    }

    async fn add_vertex(&self, label: &'static str, id: &str, _partition_key: &str) -> GraphResult<usize> {
        let mut inner = self.inner.write().await;
        if inner.vertices.iter().any(|v| v.id == id) {
            return Err(GraphError::VertexExists(id.to_string()));
        }
        inner.vertices.push(Vertex { id: id.to_string(), label });
        Ok(1)
    }

    async fn add_edge(&self, label: &'static str, from_id: &str, to_id: &str) -> GraphResult<usize> {
        let mut inner = self.inner.write().await;
        if !inner.vertices.iter().any(|v| v.id == from_id) {
            return Ok(0);
        }
        if !inner.vertices.iter().any(|v| v.id == to_id) {
            return Err(GraphError::VertexNotFound(to_id.to_string()));
        }
        inner.edges.push(Edge {
            label,
            from: from_id.to_string(),
            to: to_id.to_string(),
        });
        Ok(1)
    }

    async fn neighbor_ids(
        &self,
        id: &str,
        direction: Direction,
        edge_label: &'static str,
        vertex_label: &'static str,
    ) -> GraphResult<Vec<String>> {
        let inner = self.inner.read().await;
        let has_label = |vid: &str| {
            inner
                .vertices
                .iter()
                .any(|v| v.id == vid && v.label == vertex_label)
        };

        let ids = inner
            .edges
            .iter()
            .filter(|e| e.label == edge_label)
            .filter_map(|e| match direction {
                Direction::In if e.to == id => Some(e.from.as_str()),
                Direction::Out if e.from == id => Some(e.to.as_str()),
                _ => None,
            })
            .filter(|vid| has_label(vid))
            .map(str::to_string)
            .collect();
        Ok(ids)
    }

    async fn counts(&self) -> GraphResult<GraphCounts> {
        let inner = self.inner.read().await;
        Ok(GraphCounts {
            vertices: inner.vertices.len(),
            edges: inner.edges.len(),
        })
    }
}
