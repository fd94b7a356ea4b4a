use crate::aggregation::AggregationMode;
use crate::io::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod setup;

pub use setup::{configure_thread_pool, init_logging, log_level_for};

#[derive(Parser, Debug)]
#[command(name = "apicov")]
#[command(about = "Per-API line coverage for gcov-instrumented C libraries", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to the nearest .apicov.toml)
    #[arg(long, global = true, env = "APICOV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Worker threads (0 = all cores, overrides [tool] jobs)
    #[arg(short, long, global = true, env = "APICOV_JOBS")]
    pub jobs: Option<usize>,

    /// Hide progress bars
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the coverage tool over every coverage-notes artifact and write logs
    Collect {
        /// Library root to search for artifacts
        root: PathBuf,
    },

    /// Compute per-API coverage from the logs under a library root
    Analyze {
        /// Library root holding artifacts and logs
        root: PathBuf,

        /// API list: {"apis": [...]}, a JSON array, or one name per line
        #[arg(short, long)]
        apis: PathBuf,

        /// Attribution mode
        #[arg(short, long, value_enum, default_value = "entry")]
        mode: AggregationMode,

        /// Call graph as JSON {"fn": ["callee", ...]} (required for full mode)
        #[arg(long = "call-graph")]
        call_graph: Option<PathBuf>,

        /// Also probe each API under its macro-wrapped name
        #[arg(long)]
        macro_wrapped: bool,

        /// Reuse existing logs instead of running the coverage tool
        #[arg(long)]
        no_collect: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a default .apicov.toml into the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Directory used for config discovery.
    pub fn project_dir(&self) -> PathBuf {
        match &self.command {
            Commands::Collect { root } | Commands::Analyze { root, .. } => root.clone(),
            Commands::Init { .. } => PathBuf::from("."),
        }
    }
}
