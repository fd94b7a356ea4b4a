//! Materialising gcov report text for a library.
//!
//! [`CoverageToolRunner`] finds every `.gcno` below a library root, runs a
//! [`CoverageTool`] on it from inside the artifact's directory, strips
//! lookup noise and writes the text to a sibling `.gcov_log`. The logs are
//! what [`crate::report::ReportCorpus`] later reads; the tool is never run
//! again during aggregation.

pub mod discovery;
pub mod filter;
pub mod runner;
pub mod tool;

pub use discovery::{collect_listings, discover_artifacts, log_path_for};
pub use filter::filter_noise;
pub use runner::{CollectSummary, CoverageToolRunner, ToolFailure};
pub use tool::{CoverageTool, GcovTool};
