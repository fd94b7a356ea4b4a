//! Running the coverage tool over every artifact of a library.

use super::discovery::{collect_listings, discover_artifacts, group_by_directory, log_path_for};
use super::filter::filter_noise;
use super::tool::CoverageTool;
use crate::config::ArtifactConfig;
use crate::errors::Result;
use indicatif::{ParallelProgressIterator, ProgressBar};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// An artifact whose invocation produced no usable text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolFailure {
    pub artifact: PathBuf,
    pub reason: String,
}

/// What a collection pass produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CollectSummary {
    /// Every artifact the tool was run against
    pub artifacts: Vec<PathBuf>,
    /// Filtered logs written, one per artifact
    pub logs: Vec<PathBuf>,
    /// Per-source listing files found beside the artifacts, for packaging
    pub listings: Vec<PathBuf>,
    /// Artifacts that contribute nothing to the corpus
    pub failures: Vec<ToolFailure>,
}

#[derive(Debug, Default)]
struct DirectoryOutcome {
    logs: Vec<PathBuf>,
    listings: Vec<PathBuf>,
    failures: Vec<ToolFailure>,
}

/// Runs a [`CoverageTool`] once per coverage-notes artifact below a root
/// and persists the filtered output beside each artifact.
///
/// Directories are processed in parallel on the global rayon pool;
/// artifacts inside one directory run one after another. Reruns
/// overwrite every log, including those of artifacts that now fail.
pub struct CoverageToolRunner<'a, T: CoverageTool> {
    root: PathBuf,
    tool: &'a T,
    artifacts: ArtifactConfig,
    progress: ProgressBar,
}

impl<'a, T: CoverageTool> CoverageToolRunner<'a, T> {
    pub fn new(root: impl Into<PathBuf>, tool: &'a T, artifacts: ArtifactConfig) -> Self {
        Self {
            root: root.into(),
            tool,
            artifacts,
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn run(&self) -> Result<CollectSummary> {
        let artifacts = discover_artifacts(&self.root, &self.artifacts.notes_extension)?;
        log::info!(
            "Found {} .{} files under {}",
            artifacts.len(),
            self.artifacts.notes_extension,
            self.root.display()
        );

        let groups = group_by_directory(&artifacts);
        self.progress.set_length(groups.len() as u64);
        self.progress.set_message("Running coverage tool");

        let outcomes: Vec<DirectoryOutcome> = groups
            .par_iter()
            .progress_with(self.progress.clone())
            .map(|(dir, members)| self.process_directory(dir, members))
            .collect();
        self.progress.finish_and_clear();

        let mut summary = CollectSummary {
            artifacts,
            ..CollectSummary::default()
        };
        let mut listings = BTreeSet::new();
        for outcome in outcomes {
            summary.logs.extend(outcome.logs);
            summary.failures.extend(outcome.failures);
            listings.extend(outcome.listings);
        }
        summary.listings = listings.into_iter().collect();

        if !summary.failures.is_empty() {
            log::warn!(
                "{} of {} artifacts produced no coverage report",
                summary.failures.len(),
                summary.artifacts.len()
            );
        }
        Ok(summary)
    }

    fn process_directory(&self, dir: &Path, members: &[PathBuf]) -> DirectoryOutcome {
        let mut outcome = DirectoryOutcome::default();
        for artifact in members {
            log::debug!("Processing {}", artifact.display());
            match self.process_artifact(artifact) {
                Ok(log_path) => outcome.logs.push(log_path),
                Err(failure) => outcome.failures.push(failure),
            }
        }
        outcome.listings = collect_listings(dir, &self.artifacts.listing_extension);
        outcome
    }

    fn process_artifact(&self, artifact: &Path) -> std::result::Result<PathBuf, ToolFailure> {
        let log_path = log_path_for(artifact, &self.artifacts.log_extension);

        let (text, failure) = match self.tool.run(artifact) {
            Ok(raw) => {
                let filtered = filter_noise(&raw, &self.artifacts.noise_patterns);
                if filtered.trim().is_empty() {
                    (String::new(), Some("tool produced no output".to_string()))
                } else {
                    (filtered, None)
                }
            }
            Err(e) => {
                log::warn!("{}", e);
                (String::new(), Some(e.to_string()))
            }
        };

        if let Err(e) = std::fs::write(&log_path, &text) {
            log::warn!("Failed to write {}: {}", log_path.display(), e);
            return Err(ToolFailure {
                artifact: artifact.to_path_buf(),
                reason: format!("cannot write {}: {}", log_path.display(), e),
            });
        }

        match failure {
            None => Ok(log_path),
            Some(reason) => Err(ToolFailure {
                artifact: artifact.to_path_buf(),
                reason,
            }),
        }
    }
}
