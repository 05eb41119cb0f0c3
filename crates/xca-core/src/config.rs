//! Process settings, read from environment variables.
//!
//! The four connection settings are required; everything else has a default.
//! A missing required value is a configuration error up front rather than a
//! failure deep inside the first remote call.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{XcaError, XcaResult};

pub const ENV_MONGO_CONNECTION_STRING: &str = "COSMOS_MONGO_CONNECTION_STRING";
pub const ENV_GREMLIN_ENDPOINT: &str = "GREMLIN_ENDPOINT";
pub const ENV_GREMLIN_USERNAME: &str = "GREMLIN_USERNAME";
pub const ENV_GREMLIN_PRIMARY_KEY: &str = "GREMLIN_PRIMARY_KEY";
pub const ENV_DATABASE: &str = "XCA_DATABASE";
pub const ENV_COLLECTION: &str = "XCA_COLLECTION";
pub const ENV_DOCUMENT_FLAVOR: &str = "XCA_DOCUMENT_FLAVOR";
pub const ENV_PARTITION_KEY: &str = "XCA_PARTITION_KEY";
pub const ENV_FAN_OUT: &str = "XCA_FAN_OUT";
pub const ENV_ON_QUERY_ERROR: &str = "XCA_ON_QUERY_ERROR";

pub const DEFAULT_DATABASE: &str = "xca";
pub const DEFAULT_COLLECTION: &str = "users";
pub const DEFAULT_PARTITION_KEY: &str = "pk";

/// Which provisioning commands the document store understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFlavor {
    /// Cosmos DB for MongoDB: databases and collections are created through
    /// `customAction` commands.
    Cosmos,
    /// Plain MongoDB.
    Mongo,
}

impl DocumentFlavor {
    /// Guess the flavor from the account host in a connection string.
    ///
    /// Only RU-based accounts accept `customAction`; vCore clusters
    /// (`*.mongocluster.cosmos.azure.com`) behave like plain MongoDB.
    pub fn detect(connection_string: &str) -> Self {
        if connection_string.contains(".mongo.cosmos.azure.com") || connection_string.contains(".documents.azure.com") {
            Self::Cosmos
        } else {
            Self::Mongo
        }
    }
}

impl FromStr for DocumentFlavor {
    type Err = XcaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cosmos" => Ok(Self::Cosmos),
            "mongo" | "mongodb" => Ok(Self::Mongo),
            other => Err(XcaError::config(format!("unknown document flavor '{}'", other))),
        }
    }
}

/// What the aggregator does when a follower/following query fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryErrorPolicy {
    /// Fail the whole aggregation.
    #[default]
    Abort,
    /// Leave the affected user out and keep going.
    Skip,
}

impl FromStr for QueryErrorPolicy {
    type Err = XcaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            other => Err(XcaError::config(format!(
                "unknown query error policy '{}' (expected 'abort' or 'skip')",
                other
            ))),
        }
    }
}

impl fmt::Display for QueryErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Abort => f.write_str("abort"),
            Self::Skip => f.write_str("skip"),
        }
    }
}

/// Document store connection settings.
#[derive(Clone)]
pub struct DocumentSettings {
    pub connection_string: String,
    pub database: String,
    pub collection: String,
    pub flavor: DocumentFlavor,
}

impl fmt::Debug for DocumentSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Connection strings embed the account key.
        f.debug_struct("DocumentSettings")
            .field("connection_string", &"<redacted>")
            .field("database", &self.database)
            .field("collection", &self.collection)
            .field("flavor", &self.flavor)
            .finish()
    }
}

/// Graph store connection settings.
#[derive(Clone)]
pub struct GraphSettings {
    pub endpoint: String,
    pub username: String,
    pub primary_key: String,
    pub partition_key: String,
}

impl fmt::Debug for GraphSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphSettings")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("primary_key", &"<redacted>")
            .field("partition_key", &self.partition_key)
            .finish()
    }
}

/// Aggregator tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateOptions {
    /// Maximum number of users whose follower/following lookups run at once.
    pub fan_out: usize,
    pub on_query_error: QueryErrorPolicy,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            fan_out: 1,
            on_query_error: QueryErrorPolicy::Abort,
        }
    }
}

impl AggregateOptions {
    /// Read the optional aggregator settings.
    pub fn from_lookup<F>(lookup: F) -> XcaResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();

        if let Some(raw) = optional(&lookup, ENV_FAN_OUT) {
            let fan_out: usize = raw
                .parse()
                .map_err(|_| XcaError::config(format!("{} must be a positive integer, got '{}'", ENV_FAN_OUT, raw)))?;
            if fan_out == 0 {
                return Err(XcaError::config(format!("{} must be at least 1", ENV_FAN_OUT)));
            }
            options.fan_out = fan_out;
        }

        if let Some(raw) = optional(&lookup, ENV_ON_QUERY_ERROR) {
            options.on_query_error = raw.parse()?;
        }

        Ok(options)
    }

    pub fn from_env() -> XcaResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

/// Everything needed to talk to both stores.
#[derive(Debug, Clone)]
pub struct Settings {
    pub documents: DocumentSettings,
    pub graph: GraphSettings,
    pub aggregate: AggregateOptions,
}

impl Settings {
    /// Build settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> XcaResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let connection_string = required(&lookup, ENV_MONGO_CONNECTION_STRING)?;
        let endpoint = required(&lookup, ENV_GREMLIN_ENDPOINT)?;
        let username = required(&lookup, ENV_GREMLIN_USERNAME)?;
        let primary_key = required(&lookup, ENV_GREMLIN_PRIMARY_KEY)?;

        let flavor = match optional(&lookup, ENV_DOCUMENT_FLAVOR) {
            Some(raw) => raw.parse()?,
            None => DocumentFlavor::detect(&connection_string),
        };

        Ok(Self {
            documents: DocumentSettings {
                connection_string,
                database: optional(&lookup, ENV_DATABASE).unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
                collection: optional(&lookup, ENV_COLLECTION).unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
                flavor,
            },
            graph: GraphSettings {
                endpoint,
                username,
                primary_key,
                partition_key: optional(&lookup, ENV_PARTITION_KEY)
                    .unwrap_or_else(|| DEFAULT_PARTITION_KEY.to_string()),
            },
            aggregate: AggregateOptions::from_lookup(&lookup)?,
        })
    }

    /// Build settings from the process environment.
    pub fn from_env() -> XcaResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

fn required<F>(lookup: &F, key: &str) -> XcaResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).ok_or_else(|| XcaError::config(format!("missing required setting {}", key)))
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
