//! Scanner for the textual report gcov prints with `-f`.
//!
//! # Grammar
//!
//! ```text
//! Function 'vorbis_encode_init'
//! Lines executed:85.71% of 14
//!
//! File '../../lib/vorbisenc.c'
//! Lines executed:61.05% of 344
//! Creating 'vorbisenc.c.gcov'
//!
//! Cannot open source file ../../lib/os.h
//! ```
//!
//! A block is a marker line immediately followed by a summary line. Any
//! other line (creation notices, blank lines, diagnostics) is skipped, and a
//! marker with no summary after it produces nothing.

use super::types::{BlockKind, BlockSummary, RawReportBlock};
use once_cell::sync::Lazy;
use regex::Regex;

static MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(Function|File)\s+'(.+)'\s*$").expect("marker pattern is valid")
});

const EXECUTED_PHRASE: &str = "lines executed";
const NO_EXECUTABLE_PHRASE: &str = "no executable lines";

/// Blocks found in a piece of report text plus bookkeeping about what was
/// dropped.
#[derive(Debug, Clone, Default)]
pub struct ScanOutput {
    pub blocks: Vec<RawReportBlock>,
    /// Blocks whose percentage or size text did not convert
    pub parse_failures: usize,
    /// Lines dropped because they carried the unresolved-source diagnostic
    pub diagnostic_lines: usize,
}

/// Scan report text into typed blocks.
///
/// Lines containing `unresolved_marker` are discarded before they can take
/// part in a block. An empty marker disables that filter.
pub fn scan_report(text: &str, unresolved_marker: &str) -> ScanOutput {
    let mut output = ScanOutput::default();
    let is_diagnostic =
        |line: &str| !unresolved_marker.is_empty() && line.contains(unresolved_marker);

    let mut lines = text.lines().peekable();
    while let Some(line) = lines.next() {
        if is_diagnostic(line) {
            output.diagnostic_lines += 1;
            continue;
        }
        let Some((kind, name)) = parse_marker(line) else {
            continue;
        };
        let Some(&next) = lines.peek() else {
            break;
        };
        if is_diagnostic(next) {
            continue;
        }
        if let Some(summary) = parse_summary(next) {
            lines.next();
            if summary_has_failure(&summary) {
                output.parse_failures += 1;
                log::debug!("Unparsable summary for '{}': {}", name, next.trim());
            }
            output.blocks.push(RawReportBlock {
                kind,
                name: name.to_string(),
                summary,
            });
        }
    }

    output
}

/// Parse a `Function '...'` or `File '...'` line.
pub fn parse_marker(line: &str) -> Option<(BlockKind, &str)> {
    let caps = MARKER.captures(line)?;
    let kind = match caps.get(1)?.as_str() {
        "Function" => BlockKind::Function,
        _ => BlockKind::File,
    };
    Some((kind, caps.get(2)?.as_str()))
}

/// Parse a summary line.
///
/// The percentage is the text between the executed phrase and the first
/// `%`, taken after the last `:`. The size is the integer after the last
/// `of`. Each converts independently; a failure leaves that field `None`.
pub fn parse_summary(line: &str) -> Option<BlockSummary> {
    let trimmed = line.trim();
    let lower = trimmed.to_ascii_lowercase();

    if lower.starts_with(NO_EXECUTABLE_PHRASE) {
        return Some(BlockSummary::NoExecutableLines);
    }

    let start = lower.find(EXECUTED_PHRASE)? + EXECUTED_PHRASE.len();
    let rest = &trimmed[start..];

    let (percent_text, after_percent) = match rest.split_once('%') {
        Some((p, a)) => (Some(p), a),
        None => (None, rest),
    };
    let percent = percent_text
        .and_then(|p| p.rsplit(':').next())
        .and_then(|p| p.trim().parse::<f64>().ok())
        .filter(|p| p.is_finite());

    let total = after_percent
        .rsplit_once("of")
        .and_then(|(_, size)| size.trim().parse::<u64>().ok());

    Some(BlockSummary::Executed { percent, total })
}

fn summary_has_failure(summary: &BlockSummary) -> bool {
    matches!(
        summary,
        BlockSummary::Executed { percent: None, .. } | BlockSummary::Executed { total: None, .. }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scan_function_and_file_blocks() {
        let text = indoc! {"
            Function 'vorbis_encode_init'
            Lines executed:85.71% of 14

            File '../../lib/vorbisenc.c'
            Lines executed:61.05% of 344
            Creating 'vorbisenc.c.gcov'
        "};

        let output = scan_report(text, "Cannot");
        assert_eq!(output.blocks.len(), 2);
        assert_eq!(
            output.blocks[0],
            RawReportBlock::function(
                "vorbis_encode_init",
                BlockSummary::Executed {
                    percent: Some(85.71),
                    total: Some(14)
                }
            )
        );
        assert_eq!(output.blocks[1].kind, BlockKind::File);
        assert_eq!(output.blocks[1].name, "../../lib/vorbisenc.c");
        assert_eq!(output.parse_failures, 0);
    }

    #[test]
    fn test_diagnostic_lines_are_dropped() {
        let text = indoc! {"
            Cannot open source file ../../lib/os.h
            Function 'ov_ilog'
            Lines executed:100.00% of 5
        "};

        let output = scan_report(text, "Cannot");
        assert_eq!(output.diagnostic_lines, 1);
        assert_eq!(output.blocks.len(), 1);
        assert_eq!(output.blocks[0].name, "ov_ilog");
    }

    #[test]
    fn test_marker_without_summary_is_ignored() {
        let text = indoc! {"
            Function 'orphan'
            Function 'real'
            Lines executed:50.00% of 4
        "};

        let output = scan_report(text, "Cannot");
        assert_eq!(output.blocks.len(), 1);
        assert_eq!(output.blocks[0].name, "real");
    }

    #[test]
    fn test_diagnostic_between_marker_and_summary_drops_the_block() {
        let text = indoc! {"
            Function 'split'
            ../os.h:Cannot open source file
            Lines executed:50.00% of 4
            Function 'next'
            Lines executed:25.00% of 8
            Function 'last'
            Lines executed:xx% of 2
        "};

        let output = scan_report(text, "Cannot");
        let names: Vec<_> = output.blocks.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["next", "last"]);
        assert_eq!(output.parse_failures, 1);
        assert_eq!(output.diagnostic_lines, 1);
    }

    #[test]
    fn test_corrupt_summary_is_counted() {
        let text = "Function 'broken'\nLines executed:xx% of yy\n";
        let output = scan_report(text, "Cannot");
        assert_eq!(output.parse_failures, 1);
        assert_eq!(
            output.blocks[0].summary,
            BlockSummary::Executed {
                percent: None,
                total: None
            }
        );
    }

    #[test]
    fn test_no_executable_lines() {
        let text = "Function 'empty'\nNo executable lines\n";
        let output = scan_report(text, "Cannot");
        assert_eq!(output.blocks[0].summary, BlockSummary::NoExecutableLines);
    }

    #[test]
    fn test_parse_summary_variants() {
        assert_eq!(
            parse_summary("Lines executed: 7.50% of 40"),
            Some(BlockSummary::Executed {
                percent: Some(7.5),
                total: Some(40)
            })
        );
        assert_eq!(
            parse_summary("lines executed:101.00% of 3"),
            Some(BlockSummary::Executed {
                percent: Some(101.0),
                total: Some(3)
            })
        );
        assert_eq!(parse_summary("Creating 'x.c.gcov'"), None);
    }

    #[test]
    fn test_parse_marker_keeps_signature_text() {
        assert_eq!(
            parse_marker("Function 'ns::encode(int, char*)'"),
            Some((BlockKind::Function, "ns::encode(int, char*)"))
        );
        assert_eq!(parse_marker("Functional 'x'"), None);
    }
}
