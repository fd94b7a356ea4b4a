use serde::{Deserialize, Serialize};

/// Root configuration structure for apicov
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ApicovConfig {
    /// External coverage tool invocation
    #[serde(default)]
    pub tool: ToolConfig,

    /// File naming of artifacts, logs and listings
    #[serde(default)]
    pub artifacts: ArtifactConfig,

    /// Report interpretation
    #[serde(default)]
    pub report: ReportConfig,
}

/// How the coverage tool is run against each coverage-notes artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Program to execute (looked up on PATH)
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments placed before the artifact file name.
    /// `-f` is required for per-function summaries, `-l` keeps listing
    /// files of different translation units apart.
    #[serde(default = "default_args")]
    pub args: Vec<String>,

    /// Deadline per invocation; a timeout counts as a failed invocation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Worker threads for tool invocations (0 = all cores)
    #[serde(default)]
    pub jobs: usize,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            timeout_secs: None,
            jobs: 0,
        }
    }
}

/// Extensions of the files consumed and produced beside each artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactConfig {
    #[serde(default = "default_notes_extension")]
    pub notes_extension: String,

    #[serde(default = "default_log_extension")]
    pub log_extension: String,

    #[serde(default = "default_listing_extension")]
    pub listing_extension: String,

    /// Tool output lines containing any of these are dropped before the
    /// log is written
    #[serde(default = "default_noise_patterns")]
    pub noise_patterns: Vec<String>,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            notes_extension: default_notes_extension(),
            log_extension: default_log_extension(),
            listing_extension: default_listing_extension(),
            noise_patterns: default_noise_patterns(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Marker of the diagnostic the tool prints when it cannot open a source
    #[serde(default = "default_unresolved_source_marker")]
    pub unresolved_source_marker: String,

    /// Suffix under which macro-wrapped libraries export the real body
    #[serde(default = "default_macro_suffix")]
    pub macro_suffix: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            unresolved_source_marker: default_unresolved_source_marker(),
            macro_suffix: default_macro_suffix(),
        }
    }
}

pub fn default_program() -> String {
    "gcov".to_string()
}

pub fn default_args() -> Vec<String> {
    vec!["-l".to_string(), "-f".to_string()]
}

pub fn default_notes_extension() -> String {
    "gcno".to_string()
}

pub fn default_log_extension() -> String {
    "gcov_log".to_string()
}

pub fn default_listing_extension() -> String {
    "gcov".to_string()
}

pub fn default_noise_patterns() -> Vec<String> {
    vec![
        "No such file or directory".to_string(),
        "Not a directory".to_string(),
    ]
}

pub fn default_unresolved_source_marker() -> String {
    "Cannot".to_string()
}

pub fn default_macro_suffix() -> String {
    "_REAL".to_string()
}
