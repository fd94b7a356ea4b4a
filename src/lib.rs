//! Per-API line coverage for C libraries built with gcov instrumentation.
//!
//! The pipeline has three stages:
//!
//! 1. [`gcov`] runs the coverage tool over every `.gcno` below a library
//!    root and leaves a filtered log beside each one.
//! 2. [`report`] parses those logs into typed blocks and folds them into
//!    per-function records.
//! 3. [`aggregation`] attributes function records to exported APIs, either
//!    by the API body alone or by everything it can reach.

pub mod aggregation;
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod gcov;
pub mod io;
pub mod report;

pub use crate::aggregation::{
    AggregationMode, ApiCoverage, CallGraph, CoverageTable, EntryCoverageAggregator,
    FullCoverageAggregator,
};
pub use crate::config::ApicovConfig;
pub use crate::errors::{Error, Result};
pub use crate::gcov::{CollectSummary, CoverageTool, CoverageToolRunner, GcovTool};
pub use crate::io::output::{create_writer, CoverageReport, OutputFormat, OutputWriter};
pub use crate::report::{CoverageSource, FunctionCoverage, ReportCorpus};
