use crate::config::ApicovConfig;
use crate::gcov::{CollectSummary, CoverageTool, CoverageToolRunner, GcovTool};
use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

pub struct CollectConfig {
    pub root: PathBuf,
    pub config: ApicovConfig,
    pub show_progress: bool,
}

pub(crate) fn progress_bar(show: bool) -> ProgressBar {
    if !show || !std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(0);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner} {msg} [{bar:40}] {pos}/{len} directories ({eta})")
    {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}

/// Run the coverage tool stage with an explicit tool.
pub fn collect_with<T: CoverageTool>(
    tool: &T,
    config: &CollectConfig,
) -> Result<CollectSummary> {
    CoverageToolRunner::new(&config.root, tool, config.config.artifacts.clone())
        .with_progress(progress_bar(config.show_progress))
        .run()
        .with_context(|| format!("Failed to collect coverage under {}", config.root.display()))
}

/// Run the configured coverage tool over a library root.
pub fn collect(config: &CollectConfig) -> Result<CollectSummary> {
    let tool = GcovTool::from_config(&config.config.tool);
    collect_with(&tool, config)
}

pub fn handle_collect(config: CollectConfig) -> Result<()> {
    let summary = collect(&config)?;

    println!(
        "{} {} artifacts, {} logs written, {} listing files",
        "Collected:".green().bold(),
        summary.artifacts.len(),
        summary.logs.len(),
        summary.listings.len()
    );
    for failure in &summary.failures {
        println!(
            "  {} {}: {}",
            "failed".yellow(),
            failure.artifact.display(),
            failure.reason
        );
    }
    Ok(())
}
