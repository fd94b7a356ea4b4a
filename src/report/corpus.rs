//! The report corpus: every filtered log under a library root, scanned once
//! and indexed by identifier word.

use super::scanner::scan_report;
use super::types::{BlockKind, RawReportBlock};
use crate::errors::{IoResultExt, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Scanned report blocks with a lookup index over function names.
///
/// A function name matches a block when it occurs in the block's marker as
/// a whole word, the way `grep -w` matches: `encode` matches
/// `Function 'encode'` and `Function 'encode(int)'` but not
/// `Function 'encode_block'`.
#[derive(Debug, Clone, Default)]
pub struct ReportCorpus {
    blocks: Vec<RawReportBlock>,
    word_index: HashMap<String, Vec<usize>>,
    parse_failures: usize,
    sources: Vec<PathBuf>,
}

impl ReportCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus from in-memory report text.
    pub fn from_text(text: &str, unresolved_marker: &str) -> Self {
        let mut corpus = Self::new();
        corpus.add_text(text, unresolved_marker);
        corpus
    }

    /// Read every file ending in `.{log_extension}` below `root`.
    pub fn load(root: &Path, log_extension: &str, unresolved_marker: &str) -> Result<Self> {
        let mut logs: Vec<PathBuf> = WalkDir::new(root)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::debug!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| path.extension().is_some_and(|ext| ext == log_extension))
            .collect();
        logs.sort();

        let mut corpus = Self::new();
        for path in logs {
            let bytes = std::fs::read(&path).with_path(&path)?;
            corpus.add_text(&String::from_utf8_lossy(&bytes), unresolved_marker);
            corpus.sources.push(path);
        }

        log::debug!(
            "Loaded {} report blocks from {} logs ({} unparsable)",
            corpus.blocks.len(),
            corpus.sources.len(),
            corpus.parse_failures
        );
        Ok(corpus)
    }

    /// Scan more report text into the corpus.
    pub fn add_text(&mut self, text: &str, unresolved_marker: &str) {
        let output = scan_report(text, unresolved_marker);
        self.parse_failures += output.parse_failures;
        for block in output.blocks {
            self.push_block(block);
        }
    }

    fn push_block(&mut self, block: RawReportBlock) {
        let idx = self.blocks.len();
        if block.kind == BlockKind::Function {
            let mut words: Vec<&str> = identifier_words(&block.name).collect();
            words.sort_unstable();
            words.dedup();
            for word in words {
                self.word_index
                    .entry(word.to_string())
                    .or_default()
                    .push(idx);
            }
        }
        self.blocks.push(block);
    }

    /// Function blocks whose marker names `function` as a whole word.
    pub fn function_blocks<'a>(
        &'a self,
        function: &'a str,
    ) -> Box<dyn Iterator<Item = &'a RawReportBlock> + 'a> {
        if is_identifier(function) {
            let hits = self
                .word_index
                .get(function)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            Box::new(hits.iter().map(move |&idx| &self.blocks[idx]))
        } else {
            Box::new(self.blocks.iter().filter(move |block| {
                block.kind == BlockKind::Function && contains_word(&block.name, function)
            }))
        }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Blocks whose summary text did not fully convert
    pub fn parse_failures(&self) -> usize {
        self.parse_failures
    }

    /// Log files the corpus was loaded from
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_word_char)
}

/// Maximal runs of identifier characters.
fn identifier_words(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| !is_word_char(c)).filter(|w| !w.is_empty())
}

/// Whether `needle` occurs in `haystack` bounded by non-word characters.
pub fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(start, _)| {
        let end = start + needle.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !is_word_char(c));
        let after_ok = haystack[end..].chars().next().is_none_or(|c| !is_word_char(c));
        before_ok && after_ok
    })
}
