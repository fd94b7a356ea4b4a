use crate::aggregation::{ratio_percent, AggregationMode, CoverageTable};
use crate::gcov::CollectSummary;
use clap::ValueEnum;
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

/// Coverage numbers of one API as written to `api_coverage.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiEntry {
    pub full_size: u64,
    pub covered_lines: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub apis_requested: usize,
    pub apis_resolved: usize,
    pub total_lines: u64,
    pub covered_lines: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionStats {
    pub artifacts: usize,
    pub logs: usize,
    pub listings: usize,
    pub failed_artifacts: Vec<String>,
}

/// Everything a run reports to its caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageReport {
    pub mode: AggregationMode,
    pub apis: BTreeMap<String, ApiEntry>,
    pub failed_apis: Vec<String>,
    pub summary: ReportSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<CollectionStats>,
}

impl CoverageReport {
    pub fn new(mode: AggregationMode, table: &CoverageTable) -> Self {
        let apis = table
            .entries()
            .iter()
            .map(|e| {
                (
                    e.api_name.clone(),
                    ApiEntry {
                        full_size: e.size,
                        covered_lines: e.covered,
                        percentage: e.percentage(),
                    },
                )
            })
            .collect();

        let total_lines = table.total_size();
        let covered_lines = table.total_covered();
        Self {
            mode,
            apis,
            failed_apis: table.failed_apis().to_vec(),
            summary: ReportSummary {
                apis_requested: table.len() + table.failed_apis().len(),
                apis_resolved: table.len(),
                total_lines,
                covered_lines,
                percentage: ratio_percent(covered_lines, total_lines),
            },
            collection: None,
        }
    }

    pub fn with_collection(mut self, summary: &CollectSummary) -> Self {
        self.collection = Some(CollectionStats {
            artifacts: summary.artifacts.len(),
            logs: summary.logs.len(),
            listings: summary.listings.len(),
            failed_artifacts: summary
                .failures
                .iter()
                .map(|f| f.artifact.display().to_string())
                .collect(),
        });
        self
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &CoverageReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &CoverageReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_table(&mut self, report: &CoverageReport) -> anyhow::Result<()> {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["API", "Lines", "Covered", "%"]);

        for (api, entry) in &report.apis {
            table.add_row(vec![
                Cell::new(api),
                Cell::new(entry.full_size).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.2}", entry.covered_lines)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.2}", entry.percentage)).set_alignment(CellAlignment::Right),
            ]);
        }

        writeln!(self.writer, "{table}")?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &CoverageReport) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{}",
            format!("API coverage ({} mode)", report.mode).bold().cyan()
        )?;

        if let Some(collection) = &report.collection {
            writeln!(
                self.writer,
                "Coverage tool: {} artifacts, {} logs, {} listings, {} failed",
                collection.artifacts,
                collection.logs,
                collection.listings,
                collection.failed_artifacts.len()
            )?;
        }

        if !report.apis.is_empty() {
            self.write_table(report)?;
        }

        let summary = &report.summary;
        writeln!(
            self.writer,
            "{} {}/{} APIs resolved, {:.2} of {} lines covered ({:.2}%)",
            "Summary:".bold(),
            summary.apis_resolved,
            summary.apis_requested,
            summary.covered_lines,
            summary.total_lines,
            summary.percentage
        )?;

        if !report.failed_apis.is_empty() {
            writeln!(
                self.writer,
                "{} {}",
                "No size found for:".yellow(),
                report.failed_apis.join(", ")
            )?;
        }
        Ok(())
    }
}

pub fn create_writer<'a>(
    format: OutputFormat,
    writer: Box<dyn Write + 'a>,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}
