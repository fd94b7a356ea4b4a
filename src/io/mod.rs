pub mod api_list;
pub mod output;

pub use api_list::{load_api_list, parse_api_list};
pub use output::{
    create_writer, CoverageReport, JsonWriter, OutputFormat, OutputWriter, TerminalWriter,
};

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
