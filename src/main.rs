use anyhow::Result;
use apicov::cli::{configure_thread_pool, init_logging, Cli, Commands};
use apicov::commands::{self, AnalyzeConfig, CollectConfig};
use apicov::config::{load_config, ApicovConfig};
use clap::Parser;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let project_dir = cli.project_dir();
    let explicit_config = cli.config.clone();
    let jobs = cli.jobs;
    let show_progress = !cli.quiet;
    let load = |dir: &Path| -> Result<ApicovConfig> {
        let config = load_config(explicit_config.as_deref(), dir)?;
        configure_thread_pool(jobs.unwrap_or(config.tool.jobs));
        Ok(config)
    };

    match cli.command {
        Commands::Init { force } => commands::init_config(Path::new("."), force),
        Commands::Collect { root } => commands::handle_collect(CollectConfig {
            config: load(&project_dir)?,
            root,
            show_progress,
        }),
        Commands::Analyze {
            root,
            apis,
            mode,
            call_graph,
            macro_wrapped,
            no_collect,
            format,
            output,
        } => commands::handle_analyze(AnalyzeConfig {
            config: load(&project_dir)?,
            root,
            apis,
            call_graph,
            mode,
            macro_wrapped,
            collect: !no_collect,
            format,
            output,
            show_progress,
        }),
    }
}
