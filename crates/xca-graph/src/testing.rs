//! Fault-injecting graph store and log capture for tests.

use std::collections::HashSet;
use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::client::{Direction, GraphCounts, GraphError, GraphResult, GraphStore};
use crate::memory::MemoryGraph;

/// A [`MemoryGraph`] that fails chosen operations.
#[derive(Default)]
pub struct FlakyGraph {
    inner: MemoryGraph,
    fail_drop: bool,
    fail_vertex: HashSet<String>,
    empty_vertex: HashSet<String>,
    fail_edge_from: HashSet<String>,
    fail_neighbors: HashSet<String>,
}

impl FlakyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_drop(mut self) -> Self {
        self.fail_drop = true;
        self
    }

    pub fn fail_vertex(mut self, id: &str) -> Self {
        self.fail_vertex.insert(id.to_string());
        self
    }

    /// Accept the vertex write but return no element.
    pub fn empty_vertex(mut self, id: &str) -> Self {
        self.empty_vertex.insert(id.to_string());
        self
    }

    pub fn fail_edge(mut self, from_id: &str) -> Self {
        self.fail_edge_from.insert(from_id.to_string());
        self
    }

    pub fn fail_neighbors(mut self, id: &str) -> Self {
        self.fail_neighbors.insert(id.to_string());
        self
    }
}

fn injected(what: &str) -> GraphError {
    GraphError::UnexpectedValue(format!("injected failure: {}", what))
}

#[async_trait]
impl GraphStore for FlakyGraph {
    async fn drop_all(&self) -> GraphResult<()> {
        if self.fail_drop {
            return Err(injected("drop"));
        }
        self.inner.drop_all().await
    }

    async fn add_vertex(&self, label: &'static str, id: &str, partition_key: &str) -> GraphResult<usize> {
        if self.fail_vertex.contains(id) {
            return Err(injected(id));
        }
        if self.empty_vertex.contains(id) {
            return Ok(0);
        }
        self.inner.add_vertex(label, id, partition_key).await
    }

    async fn add_edge(&self, label: &'static str, from_id: &str, to_id: &str) -> GraphResult<usize> {
        if self.fail_edge_from.contains(from_id) {
            return Err(injected(from_id));
        }
        self.inner.add_edge(label, from_id, to_id).await
    }

    async fn neighbor_ids(
        &self,
        id: &str,
        direction: Direction,
        edge_label: &'static str,
        vertex_label: &'static str,
    ) -> GraphResult<Vec<String>> {
        if self.fail_neighbors.contains(id) {
            return Err(injected(id));
        }
        self.inner.neighbor_ids(id, direction, edge_label, vertex_label).await
    }

    async fn counts(&self) -> GraphResult<GraphCounts> {
        self.inner.counts().await
    }
}

/// Collects formatted log lines emitted on the current thread.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route this thread's events here until the guard drops.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
