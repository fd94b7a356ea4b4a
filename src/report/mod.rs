//! gcov report parsing and per-function coverage resolution.
//!
//! # Module Structure
//!
//! - [`types`] - Report blocks and the folded per-function record (pure data)
//! - [`scanner`] - Two-line report grammar (pure functions)
//! - [`corpus`] - Loading logs from disk and indexing blocks (I/O boundary)
//! - [`resolve`] - Folding every block that names a function
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::Path;
//! use apicov::report::{resolve_function, ReportCorpus};
//!
//! let corpus = ReportCorpus::load(Path::new("build"), "gcov_log", "Cannot")?;
//! let record = resolve_function(&corpus, "vorbis_encode_init");
//! println!("{:.1} of {} lines", record.covered_lines(), record.total_lines());
//! ```

pub mod corpus;
pub mod resolve;
pub mod scanner;
pub mod types;

pub use corpus::{contains_word, ReportCorpus};
pub use resolve::{resolve_function, CoverageSource};
pub use scanner::{parse_marker, parse_summary, scan_report, ScanOutput};
pub use types::{BlockKind, BlockSummary, FunctionCoverage, RawReportBlock};
