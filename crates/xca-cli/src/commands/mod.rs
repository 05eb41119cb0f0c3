//! CLI command definitions and handlers.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use xca_core::config::DEFAULT_PARTITION_KEY;
use xca_core::{AggregateOptions, QueryErrorPolicy, Settings};
use xca_docs::{DocumentStore, MemoryStore, MongoStore};
use xca_graph::{GraphStore, GremlinConfig, GremlinStore, MemoryGraph};

pub mod follows;
pub mod reset;
pub mod run;
pub mod status;
pub mod users;

/// XCA - user attributes in a document store, follow relations in a graph
#[derive(Parser)]
#[command(name = "xca")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also append logs to this file
    #[arg(long, global = true)]
    pub log: Option<PathBuf>,

    /// Use in-process stores instead of the configured accounts (run only;
    /// the stores are discarded when the process exits)
    #[arg(long, global = true)]
    pub in_memory: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Provision both stores, load the sample users and follows, print the combined view
    Run(run::RunArgs),

    /// Drop and recreate both stores
    Reset,

    /// Print every user with followers and following
    Users(users::UsersArgs),

    /// Show who a user follows and who follows them
    Follows {
        /// User id
        user_id: String,
    },

    /// Show document and graph counts
    Status,
}

/// Aggregation flags shared by `run` and `users`.
#[derive(Args, Debug, Clone, Default)]
pub struct AggregateArgs {
    /// Users looked up concurrently [env: XCA_FAN_OUT]
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub fan_out: Option<u16>,

    /// What to do when a follower query fails: abort or skip [env: XCA_ON_QUERY_ERROR]
    #[arg(long)]
    pub on_query_error: Option<QueryErrorPolicy>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl AggregateArgs {
    /// Flags win over environment settings.
    pub fn resolve(&self, base: AggregateOptions) -> AggregateOptions {
        AggregateOptions {
            fan_out: self.fan_out.map(usize::from).unwrap_or(base.fan_out),
            on_query_error: self.on_query_error.unwrap_or(base.on_query_error),
        }
    }
}

/// The two store clients for this process, built once and passed down.
pub struct Stores {
    pub docs: Box<dyn DocumentStore>,
    pub graph: Box<dyn GraphStore>,
    pub partition_key: String,
    pub aggregate: AggregateOptions,
}

impl Stores {
    pub async fn open(in_memory: bool) -> Result<Self> {
        if in_memory {
            info!("Using in-memory stores");
            return Ok(Self {
                docs: Box::new(MemoryStore::new()),
                graph: Box::new(MemoryGraph::new()),
                partition_key: DEFAULT_PARTITION_KEY.to_string(),
                aggregate: AggregateOptions::from_env()?,
            });
        }

        let settings = Settings::from_env()?;

        let docs = MongoStore::connect(&settings.documents)
            .await
            .context("Failed to connect to the document store")?;

        let graph_config = GremlinConfig::from_settings(&settings.graph)?;
        let graph = GremlinStore::connect(&graph_config)
            .await
            .context("Failed to connect to the graph store")?;

        Ok(Self {
            docs: Box::new(docs),
            graph: Box::new(graph),
            partition_key: settings.graph.partition_key,
            aggregate: settings.aggregate,
        })
    }
}

impl Cli {
    /// Run the selected command and return the process exit code.
    pub async fn execute(self) -> Result<i32> {
        self.check_in_memory()?;
        let stores = Stores::open(self.in_memory).await?;

        match self.command {
            Commands::Run(args) => run::execute(args, &stores).await,
            Commands::Reset => reset::execute(&stores).await.map(|_| 0),
            Commands::Users(args) => users::execute(args, &stores).await.map(|_| 0),
            Commands::Follows { user_id } => follows::execute(&user_id, &stores).await.map(|_| 0),
            Commands::Status => status::execute(&stores).await.map(|_| 0),
        }
    }

    /// In-memory stores live for one process, so only `run` can fill and
    /// read them in the same invocation.
    fn check_in_memory(&self) -> Result<()> {
        if self.in_memory && !matches!(self.command, Commands::Run(_)) {
            bail!("--in-memory only applies to `run`; other commands would see empty stores");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_environment() {
        let cli = Cli::try_parse_from(["xca", "users", "--fan-out", "8", "--on-query-error", "skip"]).unwrap();
        let Commands::Users(args) = cli.command else {
            panic!("expected users command");
        };
        let resolved = args.aggregate.resolve(AggregateOptions::default());
        assert_eq!(resolved.fan_out, 8);
        assert_eq!(resolved.on_query_error, QueryErrorPolicy::Skip);
    }

    #[test]
    fn test_in_memory_is_limited_to_run() {
        let run = Cli::try_parse_from(["xca", "--in-memory", "run"]).unwrap();
        assert!(run.check_in_memory().is_ok());

        for command in [vec!["users"], vec!["follows", "tusharsr"], vec!["status"], vec!["reset"]] {
            let mut argv = vec!["xca", "--in-memory"];
            argv.extend(command);
            let cli = Cli::try_parse_from(argv.clone()).unwrap();
            assert!(cli.check_in_memory().is_err(), "{:?}", argv);
        }

        let live = Cli::try_parse_from(["xca", "status"]).unwrap();
        assert!(live.check_in_memory().is_ok());
    }

    #[test]
    fn test_zero_fan_out_is_rejected() {
        assert!(Cli::try_parse_from(["xca", "run", "--fan-out", "0"]).is_err());
    }

    #[test]
    fn test_unset_flags_keep_environment_values() {
        let base = AggregateOptions {
            fan_out: 3,
            on_query_error: QueryErrorPolicy::Skip,
        };
        assert_eq!(AggregateArgs::default().resolve(base), base);
    }
}
