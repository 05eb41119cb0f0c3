//! Gremlin server connection client.

use async_trait::async_trait;
use futures::TryStreamExt;
use gremlin_client::aio::GremlinClient;
use gremlin_client::{ConnectionOptions, GValue, GraphSON, ToGValue};
use tracing::{debug, info};

use xca_core::GraphSettings;

use crate::client::{Direction, GraphCounts, GraphError, GraphResult, GraphStore};
use crate::traversal::Traversal;

const DEFAULT_TLS_PORT: u16 = 443;
const DEFAULT_PLAIN_PORT: u16 = 8182;

/// Configuration for connecting to a Gremlin server.
#[derive(Clone)]
pub struct GremlinConfig {
    pub host: String,
    pub port: u16,
    pub ssl: bool,
    pub username: String,
    pub password: String,
    pub pool_size: u32,
}

impl std::fmt::Debug for GremlinConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GremlinConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("ssl", &self.ssl)
            .field("username", &self.username)
            .field("pool_size", &self.pool_size)
            .finish()
    }
}

impl GremlinConfig {
    /// Build from settings, splitting an endpoint such as
    /// `wss://account.gremlin.cosmos.azure.com:443/` into host, port and TLS.
    pub fn from_settings(settings: &GraphSettings) -> GraphResult<Self> {
        let (host, port, ssl) = parse_endpoint(&settings.endpoint)?;
        Ok(Self {
            host,
            port,
            ssl,
            username: settings.username.clone(),
            password: settings.primary_key.clone(),
            pool_size: 4,
        })
    }
}

fn parse_endpoint(endpoint: &str) -> GraphResult<(String, u16, bool)> {
    let invalid = || GraphError::InvalidEndpoint(endpoint.to_string());

    let trimmed = endpoint.trim();
    let (rest, ssl) = if let Some(rest) = trimmed.strip_prefix("wss://") {
        (rest, true)
    } else if let Some(rest) = trimmed.strip_prefix("ws://") {
        (rest, false)
    } else if trimmed.contains("://") {
        return Err(invalid());
    } else {
        (trimmed, false)
    };

    let authority = rest.split('/').next().unwrap_or_default();
    let (host, port) = match authority.rsplit_once(':') {
        Some((host, port)) => (host, port.parse::<u16>().map_err(|_| invalid())?),
        None => (authority, if ssl { DEFAULT_TLS_PORT } else { DEFAULT_PLAIN_PORT }),
    };

    if host.is_empty() {
        return Err(invalid());
    }
    Ok((host.to_string(), port, ssl))
}

/// Graph store backed by a Gremlin server (e.g. Cosmos DB for Gremlin).
#[derive(Clone)]
pub struct GremlinStore {
    client: GremlinClient,
}

impl GremlinStore {
    /// Open the connection pool and run a trivial traversal so an
    /// unreachable or misconfigured endpoint fails here.
    pub async fn connect(config: &GremlinConfig) -> GraphResult<Self> {
        let options = ConnectionOptions::builder()
            .host(config.host.clone())
            .port(config.port)
            .pool_size(config.pool_size)
            .ssl(config.ssl)
            .credentials(&config.username, &config.password)
            .serializer(GraphSON::V2)
            .deserializer(GraphSON::V2)
            .build();

        let client = GremlinClient::connect(options).await?;
        let store = Self { client };

        store.submit(&Traversal::vertices().limit(1).count()).await?;
        info!(host = %config.host, port = config.port, "Connected to graph store");

        Ok(store)
    }

    /// Submit a traversal and wait for every result.
    pub async fn submit(&self, traversal: &Traversal) -> GraphResult<Vec<GValue>> {
        let script = traversal.render();
        debug!(script = %script.text, bindings = ?script.bindings, "Submitting traversal");

        let params: Vec<(&str, &dyn ToGValue)> = script
            .bindings
            .iter()
            .map(|(name, value)| (name.as_str(), value as &dyn ToGValue))
            .collect();

        let results = self.client.execute(script.text.as_str(), &params).await?;
        Ok(results.try_collect::<Vec<GValue>>().await?)
    }

    async fn count(&self, traversal: Traversal) -> GraphResult<usize> {
        decode_count(self.submit(&traversal).await?)
    }
}

/// Read the first result of a `count()` traversal. No result means zero.
fn decode_count(values: Vec<GValue>) -> GraphResult<usize> {
    match values.into_iter().next() {
        Some(GValue::Int64(n)) => Ok(n.max(0) as usize),
        Some(GValue::Int32(n)) => Ok(n.max(0) as usize),
        Some(other) => Err(GraphError::UnexpectedValue(format!("{:?}", other))),
        None => Ok(0),
    }
}

/// Read the results of a `values('id')` traversal.
fn decode_ids(values: Vec<GValue>) -> GraphResult<Vec<String>> {
    values
        .into_iter()
        .map(|value| match value {
            GValue::String(s) => Ok(s),
            other => Err(GraphError::UnexpectedValue(format!("{:?}", other))),
        })
        .collect()
}

#[async_trait]
impl GraphStore for GremlinStore {
    async fn drop_all(&self) -> GraphResult<()> {
        self.submit(&Traversal::vertices().drop()).await?;
        Ok(())
    }

    async fn add_vertex(&self, label: &'static str, id: &str, partition_key: &str) -> GraphResult<usize> {
        let traversal = Traversal::add_vertex(label)
            .property(xca_core::user::ID_PROPERTY, id)
            .property(xca_core::user::PARTITION_PROPERTY, partition_key);
        Ok(self.submit(&traversal).await?.len())
    }

    async fn add_edge(&self, label: &'static str, from_id: &str, to_id: &str) -> GraphResult<usize> {
        let traversal = Traversal::vertex(from_id)
            .add_edge(label)
            .to(Traversal::vertex(to_id));
        Ok(self.submit(&traversal).await?.len())
    }

    async fn neighbor_ids(
        &self,
        id: &str,
        direction: Direction,
        edge_label: &'static str,
        vertex_label: &'static str,
    ) -> GraphResult<Vec<String>> {
        let start = Traversal::vertex(id);
        let traversal = match direction {
            Direction::In => start.in_(edge_label),
            Direction::Out => start.out(edge_label),
        }
        .has_label(vertex_label)
        .values(xca_core::user::ID_PROPERTY);

        decode_ids(self.submit(&traversal).await?)
    }

    async fn counts(&self) -> GraphResult<GraphCounts> {
        Ok(GraphCounts {
            vertices: self.count(Traversal::vertices().count()).await?,
            edges: self.count(Traversal::edges().count()).await?,
        })
    }
}
