use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// How coverage is attributed to an API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMode {
    /// The API's own function body only
    Entry,
    /// The API plus everything reachable from it in the call graph
    Full,
}

impl std::fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Entry => write!(f, "entry"),
            Self::Full => write!(f, "full"),
        }
    }
}

/// Line coverage attributed to one API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiCoverage {
    pub api_name: String,
    /// Total lines
    pub size: u64,
    /// Covered lines, never above `size`
    pub covered: f64,
}

impl ApiCoverage {
    pub fn new(api_name: impl Into<String>, size: u64, covered: f64) -> Self {
        Self {
            api_name: api_name.into(),
            size,
            covered,
        }
    }

    /// Covered share in percent. Zero lines means zero coverage.
    pub fn percentage(&self) -> f64 {
        ratio_percent(self.covered, self.size)
    }

    /// Max-merge another probe of the same API into this one. Size and
    /// covered lines are combined independently.
    pub fn merge(&mut self, other: &ApiCoverage) {
        self.size = self.size.max(other.size);
        self.covered = self.covered.max(other.covered);
    }
}

/// `covered / total * 100`, with an empty total resolved to `0.0`.
pub fn ratio_percent(covered: f64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        covered / total as f64 * 100.0
    }
}

/// Per-API results of one aggregation run, in input order, plus the APIs
/// for which no size could be resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoverageTable {
    entries: Vec<ApiCoverage>,
    failed_apis: Vec<String>,
}

impl CoverageTable {
    /// Build a table from `(api, result)` pairs. Repeated APIs are
    /// max-merged; an API is only a failure if none of its pairs resolved.
    pub fn from_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = (String, Option<ApiCoverage>)>,
    {
        let mut table = Self::default();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut failed: HashSet<String> = HashSet::new();
        let mut failed_order = Vec::new();

        for (api, result) in results {
            match result {
                Some(coverage) => {
                    if let Some(&idx) = index.get(&api) {
                        table.entries[idx].merge(&coverage);
                    } else {
                        index.insert(api, table.entries.len());
                        table.entries.push(coverage);
                    }
                }
                None => {
                    if failed.insert(api.clone()) {
                        failed_order.push(api);
                    }
                }
            }
        }

        table.failed_apis = failed_order
            .into_iter()
            .filter(|api| !index.contains_key(api))
            .collect();
        table
    }

    pub fn get(&self, api: &str) -> Option<&ApiCoverage> {
        self.entries.iter().find(|e| e.api_name == api)
    }

    pub fn entries(&self) -> &[ApiCoverage] {
        &self.entries
    }

    /// APIs that matched no report, in input order
    pub fn failed_apis(&self) -> &[String] {
        &self.failed_apis
    }

    /// API name → total lines
    pub fn sizes(&self) -> HashMap<String, u64> {
        self.entries
            .iter()
            .map(|e| (e.api_name.clone(), e.size))
            .collect()
    }

    /// API name → covered lines
    pub fn covered(&self) -> HashMap<String, f64> {
        self.entries
            .iter()
            .map(|e| (e.api_name.clone(), e.covered))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }

    pub fn total_covered(&self) -> f64 {
        self.entries.iter().map(|e| e.covered).sum()
    }
}
