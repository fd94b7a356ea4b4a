//! Entry coverage: each API judged by its own function body.

use super::types::{ApiCoverage, CoverageTable};
use crate::report::{CoverageSource, FunctionCoverage};
use rayon::prelude::*;

/// Direct, non-transitive coverage per API.
///
/// With a macro suffix set, both `api` and `api{suffix}` are probed and
/// max-merged under `api`. Some libraries (SDL is the usual example) export
/// only a preprocessor wrapper under the public name and compile the real
/// body under the decorated one.
pub struct EntryCoverageAggregator<'a, S: CoverageSource> {
    source: &'a S,
    macro_suffix: Option<String>,
}

impl<'a, S: CoverageSource> EntryCoverageAggregator<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            macro_suffix: None,
        }
    }

    pub fn with_macro_suffix(mut self, suffix: Option<String>) -> Self {
        self.macro_suffix = suffix.filter(|s| !s.is_empty());
        self
    }

    /// Coverage of one API, or `None` if no probe found a size.
    pub fn api_coverage(&self, api: &str) -> Option<ApiCoverage> {
        probe_names(api, self.macro_suffix.as_deref())
            .into_iter()
            .map(|name| self.source.function_coverage(&name))
            .filter(FunctionCoverage::is_resolved)
            .map(|record| ApiCoverage::new(api, record.total_lines(), record.covered_lines()))
            .reduce(|mut acc, probe| {
                acc.merge(&probe);
                acc
            })
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
        table
    }
}

/// Names under which an API's body may have been compiled.
pub(crate) fn probe_names(api: &str, macro_suffix: Option<&str>) -> Vec<String> {
    match macro_suffix {
        Some(suffix) if !api.ends_with(suffix) => vec![api.to_string(), format!("{api}{suffix}")],
        _ => vec![api.to_string()],
    }
}
