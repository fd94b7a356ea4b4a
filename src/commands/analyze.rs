use super::collect::{collect_with, CollectConfig};
use crate::aggregation::{
    AggregationMode, CallGraph, CoverageTable, EntryCoverageAggregator, FullCoverageAggregator,
};
use crate::config::ApicovConfig;
use crate::gcov::{CoverageTool, GcovTool};
use crate::io::{self, create_writer, load_api_list, CoverageReport, OutputFormat};
use crate::report::ReportCorpus;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct AnalyzeConfig {
    /// Library root holding the coverage-notes artifacts
    pub root: PathBuf,
    /// API list file
    pub apis: PathBuf,
    pub call_graph: Option<PathBuf>,
    pub mode: AggregationMode,
    /// Also probe `<api><macro_suffix>` for every API
    pub macro_wrapped: bool,
    /// Run the coverage tool before reading logs
    pub collect: bool,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub config: ApicovConfig,
    pub show_progress: bool,
}

pub fn analyze(config: &AnalyzeConfig) -> Result<CoverageReport> {
    let tool = GcovTool::from_config(&config.config.tool);
    analyze_with(&tool, config)
}

/// Collect (optionally), then aggregate per-API coverage.
pub fn analyze_with<T: CoverageTool>(tool: &T, config: &AnalyzeConfig) -> Result<CoverageReport> {
    let apis = load_api_list(&config.apis)
        .with_context(|| format!("Failed to read API list {}", config.apis.display()))?;
    let graph = match (config.mode, &config.call_graph) {
        (AggregationMode::Full, Some(path)) => Some(
            CallGraph::load(path)
                .with_context(|| format!("Failed to read call graph {}", path.display()))?,
        ),
        (AggregationMode::Full, None) => {
            anyhow::bail!("Full coverage requires a call graph (--call-graph <file>)")
        }
        (AggregationMode::Entry, _) => None,
    };

    let collection = if config.collect {
        let collect_config = CollectConfig {
            root: config.root.clone(),
            config: config.config.clone(),
            show_progress: config.show_progress,
        };
        Some(collect_with(tool, &collect_config)?)
    } else {
        None
    };

    let report_config = &config.config.report;
    let corpus = ReportCorpus::load(
        &config.root,
        &config.config.artifacts.log_extension,
        &report_config.unresolved_source_marker,
    )
    .with_context(|| format!("Failed to load coverage logs under {}", config.root.display()))?;
    log::info!(
        "Loaded {} report blocks from {} logs ({} unparsable)",
        corpus.len(),
        corpus.sources().len(),
        corpus.parse_failures()
    );

    let suffix = config
        .macro_wrapped
        .then(|| report_config.macro_suffix.clone());
    let table: CoverageTable = match &graph {
        Some(graph) => FullCoverageAggregator::new(&corpus, graph)
            .with_macro_suffix(suffix)
            .aggregate(&apis),
        None => EntryCoverageAggregator::new(&corpus)
            .with_macro_suffix(suffix)
            .aggregate(&apis),
    };

    let report = CoverageReport::new(config.mode, &table);
    Ok(match &collection {
        Some(summary) => report.with_collection(summary),
        None => report,
    })
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    let report = analyze(&config)?;

    match &config.output {
        Some(path) => {
            let mut buffer = Vec::new();
            create_writer(config.format, Box::new(&mut buffer)).write_report(&report)?;
            io::write_file(path, &String::from_utf8_lossy(&buffer))?;
            log::info!("Wrote coverage report to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            create_writer(config.format, Box::new(stdout.lock())).write_report(&report)?;
        }
    }
    Ok(())
}
