//! Full coverage: an API plus everything it can reach in the call graph.
//!
//! # Algorithm
//!
//! 1. Collect the reachable set of the API by depth-first traversal of the
//!    call graph (each node once, cycles allowed).
//! 2. Resolve `(covered, total)` for every node, memoised for the lifetime
//!    of the aggregator. APIs of one library share most of their reachable
//!    sets, so the same helpers are asked for over and over.
//! 3. Sum covered and total lines over the set.
//! 4. With a macro suffix, repeat from the decorated name and max-merge.
//!
//! Callees without any report (libc, other libraries) add nothing to either
//! sum. An API is only a resolution failure if no node of its reachable set
//! resolved.

use super::call_graph::CallGraph;
use super::entry::probe_names;
use super::types::{ApiCoverage, CoverageTable};
use crate::report::{CoverageSource, FunctionCoverage};
use dashmap::DashMap;
use rayon::prelude::*;

/// Per-API sums over a reachable set, before macro-suffix merging.
#[derive(Debug, Clone, PartialEq)]
pub struct ReachableCoverage {
    pub root: String,
    pub reachable: Vec<String>,
    pub resolved_nodes: usize,
    pub total: u64,
    pub covered: f64,
}

impl ReachableCoverage {
    pub fn is_resolved(&self) -> bool {
        self.resolved_nodes > 0
    }
}

/// Transitive coverage per API over a supplied call graph.
///
/// Safe to share across threads; the memo is a concurrent map.
pub struct FullCoverageAggregator<'a, S: CoverageSource> {
    source: &'a S,
    graph: &'a CallGraph,
    macro_suffix: Option<String>,
    memo: DashMap<String, FunctionCoverage>,
}

impl<'a, S: CoverageSource> FullCoverageAggregator<'a, S> {
    pub fn new(source: &'a S, graph: &'a CallGraph) -> Self {
        Self {
            source,
            graph,
            macro_suffix: None,
            memo: DashMap::new(),
        }
    }

    pub fn with_macro_suffix(mut self, suffix: Option<String>) -> Self {
        self.macro_suffix = suffix.filter(|s| !s.is_empty());
        self
    }

    /// Memoised per-function record.
    pub fn function_coverage(&self, name: &str) -> FunctionCoverage {
        if let Some(hit) = self.memo.get(name) {
            return hit.value().clone();
        }
        let record = self.source.function_coverage(name);
        self.memo
            .entry(name.to_string())
            .or_insert(record)
            .value()
            .clone()
    }

    /// Number of distinct functions resolved so far
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    /// Sum coverage over everything reachable from `root`.
    pub fn reachable_coverage(&self, root: &str) -> ReachableCoverage {
        let reachable = self.graph.reachable_from(root);
        let mut result = ReachableCoverage {
            root: root.to_string(),
            reachable: Vec::with_capacity(reachable.len()),
            resolved_nodes: 0,
            total: 0,
            covered: 0.0,
        };

        for node in reachable {
            let record = self.function_coverage(&node);
            if record.is_resolved() {
                result.resolved_nodes += 1;
                result.total += record.total_lines();
                result.covered += record.covered_lines();
            }
            result.reachable.push(node);
        }

        // An API outside the graph with no report of its own reaches nothing.
        if !result.is_resolved() && !self.graph.contains(root) {
            result.reachable.clear();
        }
        result
    }

    /// Coverage of one API, or `None` when nothing it reaches resolved.
    pub fn api_coverage(&self, api: &str) -> Option<ApiCoverage> {
        let merged = probe_names(api, self.macro_suffix.as_deref())
            .into_iter()
            .map(|name| self.reachable_coverage(&name))
            .filter(ReachableCoverage::is_resolved)
            .map(|sums| ApiCoverage::new(api, sums.total, sums.covered))
            .reduce(|mut acc, probe| {
                acc.merge(&probe);
                acc
            });

        match &merged {
            None => log::warn!("No reachable coverage for {}; listed as without size", api),
            Some(coverage) if coverage.size == 0 => {
                log::warn!("Reachable set of {} has no lines; coverage is 0.0", api)
            }
            Some(_) => {}
        }
        merged
    }

    /// Coverage of every API, in input order.
    pub fn aggregate(&self, apis: &[String]) -> CoverageTable {
        let results: Vec<(String, Option<ApiCoverage>)> = apis
            .par_iter()
            .map(|api| (api.clone(), self.api_coverage(api)))
            .collect();

        let table = CoverageTable::from_results(results);
        for api in table.failed_apis() {
            log::error!("Failed to find size for API: {}", api);
        }
        log::debug!("Resolved {} distinct functions", self.memo_len());
        table
    }
}
