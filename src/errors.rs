//! Shared error types for the application
//!
//! Only failures that make a command meaningless surface as [`Error`]:
//! unreadable configuration, a malformed API list or call graph, or an
//! output that cannot be written. Failures of individual tool invocations
//! and unparsable report lines degrade to zero/absent values instead and
//! are reported through the summaries returned by the engine.

use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Main error type for apicov operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The coverage tool could not be started or exited abnormally
    #[error("coverage tool failed on {}: {message}", artifact.display())]
    Tool { artifact: PathBuf, message: String },

    /// The coverage tool exceeded its deadline and was killed
    #[error("coverage tool timed out after {timeout:?} on {}", artifact.display())]
    Timeout { artifact: PathBuf, timeout: Duration },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Call graph input errors
    #[error("Call graph error: {0}")]
    CallGraph(String),

    /// API list input errors
    #[error("API list error: {0}")]
    ApiList(String),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create an I/O error carrying the path it happened on
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a tool failure for an artifact
    pub fn tool(artifact: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Tool {
            artifact: artifact.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait attaching a path to raw I/O results
pub trait IoResultExt<T> {
    fn with_path(self, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|e| Error::io(path, e))
    }
}
