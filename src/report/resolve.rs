//! Per-function resolution over a [`ReportCorpus`].

use super::corpus::ReportCorpus;
use super::types::FunctionCoverage;

/// Look up something that can answer "how covered is this function".
///
/// The aggregators only need this seam, so tests can supply fixed records
/// and callers can layer caches over the corpus.
pub trait CoverageSource: Sync {
    fn function_coverage(&self, name: &str) -> FunctionCoverage;
}

impl CoverageSource for ReportCorpus {
    fn function_coverage(&self, name: &str) -> FunctionCoverage {
        resolve_function(self, name)
    }
}

/// Fold every block naming `name` into a single record.
///
/// A record that ends up with no size is unresolved; it reads as `(0, 0)`
/// and the caller decides how to report it.
pub fn resolve_function(corpus: &ReportCorpus, name: &str) -> FunctionCoverage {
    let mut record = FunctionCoverage::unresolved(name);
    let mut matched = 0usize;
    for block in corpus.function_blocks(name) {
        record.observe(block);
        matched += 1;
    }

    if !record.is_resolved() {
        log::error!("Zero size for function: {}", name);
    } else if record.is_overcounted() {
        log::debug!(
            "Coverage greater than 100% for {} ({:.2}% over {} blocks)",
            name,
            record.best_percent(),
            matched
        );
    }

    record
}
