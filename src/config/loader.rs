use std::fs;
use std::path::{Path, PathBuf};

use super::core::ApicovConfig;
use crate::errors::{Error, IoResultExt, Result};

pub const CONFIG_FILE_NAME: &str = ".apicov.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to parse config from TOML string
pub fn parse_config(contents: &str) -> Result<ApicovConfig> {
    let config = toml::from_str::<ApicovConfig>(contents)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &ApicovConfig) -> Result<()> {
    if config.tool.program.trim().is_empty() {
        return Err(Error::Config("tool.program must not be empty".into()));
    }
    if config.artifacts.notes_extension == config.artifacts.log_extension {
        return Err(Error::Config(
            "artifacts.log_extension must differ from artifacts.notes_extension".into(),
        ));
    }
    if config.artifacts.noise_patterns.iter().any(|p| p.is_empty()) {
        return Err(Error::Config(
            "artifacts.noise_patterns must not contain empty patterns".into(),
        ));
    }
    if config.tool.timeout_secs == Some(0) {
        return Err(Error::Config("tool.timeout_secs must be positive".into()));
    }
    Ok(())
}

/// Load an explicitly requested config file. Any failure is an error.
pub fn load_config_file(path: &Path) -> Result<ApicovConfig> {
    let contents = fs::read_to_string(path).with_path(path)?;
    let config = parse_config(&contents)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Pure function to try loading config from a specific path
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<ApicovConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            // Only log actual errors, not "file not found"
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!(
                    "Failed to read config file {}: {}",
                    config_path.display(),
                    e
                );
            }
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!(
                "Ignoring {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            None
        }
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.apicov.toml`.
pub fn discover_config(start: &Path) -> ApicovConfig {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            ApicovConfig::default()
        })
}

/// Resolve the effective configuration: explicit file, then discovery
/// from the project directory, then defaults.
pub fn load_config(explicit: Option<&Path>, project_dir: &Path) -> Result<ApicovConfig> {
    match explicit {
        Some(path) => load_config_file(path),
        None => {
            let start = project_dir
                .canonicalize()
                .unwrap_or_else(|_| project_dir.to_path_buf());
            Ok(discover_config(&start))
        }
    }
}

/// Render the default configuration as TOML, for `apicov init`.
pub fn default_config_toml() -> Result<String> {
    toml::to_string_pretty(&ApicovConfig::default())
        .map_err(|e| Error::Config(format!("failed to render default config: {}", e)))
}
