//! Per-API coverage aggregation.
//!
//! Two policies share one output shape ([`CoverageTable`]):
//!
//! - [`EntryCoverageAggregator`] - the API's own body only
//! - [`FullCoverageAggregator`] - the API plus its call-graph closure
//!
//! Both read a [`crate::report::CoverageSource`] and never run the
//! coverage tool. All merges are maxima or sums over sets, so neither the
//! order of logs nor the order of blocks changes a result.

pub mod call_graph;
pub mod entry;
pub mod full;
pub mod types;

pub use call_graph::CallGraph;
pub use entry::EntryCoverageAggregator;
pub use full::{FullCoverageAggregator, ReachableCoverage};
pub use types::{ratio_percent, AggregationMode, ApiCoverage, CoverageTable};
