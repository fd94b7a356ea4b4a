//! Core data types for gcov report text.
//!
//! All types here are plain data; the scanner produces them and the
//! resolver folds them, neither of which performs I/O.

use serde::Serialize;

/// What a report block summarises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BlockKind {
    /// `Function '<name>'`
    Function,
    /// `File '<path>'`
    File,
}

/// Second line of a report block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum BlockSummary {
    /// `Lines executed:P% of N`. Either number is `None` when its text
    /// could not be converted.
    Executed {
        percent: Option<f64>,
        total: Option<u64>,
    },
    /// `No executable lines`
    NoExecutableLines,
}

/// One two-line unit of gcov output: a marker line followed by its summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawReportBlock {
    pub kind: BlockKind,
    /// Function name or source path exactly as printed between the quotes
    pub name: String,
    pub summary: BlockSummary,
}

impl RawReportBlock {
    pub fn function(name: impl Into<String>, summary: BlockSummary) -> Self {
        Self {
            kind: BlockKind::Function,
            name: name.into(),
            summary,
        }
    }

    /// Total line count carried by this block, if any.
    ///
    /// A function without executable lines reports a size of zero.
    pub fn total_lines(&self) -> Option<u64> {
        match self.summary {
            BlockSummary::Executed { total, .. } => total,
            BlockSummary::NoExecutableLines => Some(0),
        }
    }

    /// Executed percentage usable as evidence. Zero, negative and
    /// unparsable values carry no information and are dropped.
    pub fn usable_percent(&self) -> Option<f64> {
        match self.summary {
            BlockSummary::Executed {
                percent: Some(p), ..
            } if p.is_finite() && p > 0.0 => Some(p),
            _ => None,
        }
    }
}

/// Coverage of a single function, folded from every report block that
/// names it.
///
/// The best percentage and the best size are tracked independently: one
/// compilation unit may see more lines of a function while another
/// executes a larger share of them. Both folds are maxima, so the record
/// is independent of the order blocks arrive in and absorbing the same
/// block twice changes nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionCoverage {
    pub name: String,
    best_percent: f64,
    best_total: Option<u64>,
}

impl FunctionCoverage {
    /// A record with no evidence yet.
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            best_percent: 0.0,
            best_total: None,
        }
    }

    /// Record built from a known percentage and size.
    pub fn from_parts(name: impl Into<String>, percent: f64, total: u64) -> Self {
        let mut record = Self::unresolved(name);
        record.observe_parts(Some(percent), Some(total));
        record
    }

    /// Fold one report block into the record.
    pub fn observe(&mut self, block: &RawReportBlock) {
        self.observe_parts(block.usable_percent(), block.total_lines());
    }

    fn observe_parts(&mut self, percent: Option<f64>, total: Option<u64>) {
        if let Some(p) = percent.filter(|p| p.is_finite() && *p > 0.0) {
            self.best_percent = self.best_percent.max(p);
        }
        if let Some(t) = total {
            self.best_total = Some(self.best_total.map_or(t, |cur| cur.max(t)));
        }
    }

    /// Whether any block supplied a size.
    pub fn is_resolved(&self) -> bool {
        self.best_total.is_some()
    }

    pub fn total_lines(&self) -> u64 {
        self.best_total.unwrap_or(0)
    }

    /// Highest executed percentage seen, unclamped.
    pub fn best_percent(&self) -> f64 {
        self.best_percent
    }

    /// Whether the tool reported more than 100% for this function, which
    /// happens when it counts duplicated lines twice.
    pub fn is_overcounted(&self) -> bool {
        self.best_percent > 100.0
    }

    /// Covered lines, never more than [`total_lines`](Self::total_lines).
    pub fn covered_lines(&self) -> f64 {
        let total = self.total_lines() as f64;
        if self.is_overcounted() {
            total
        } else {
            (self.best_percent / 100.0) * total
        }
    }
}
