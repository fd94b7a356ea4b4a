//! Configuration loading for apicov.
//!
//! Settings live in an optional `.apicov.toml`; every field has a default
//! matching a stock gcc/gcov toolchain, so most projects need no file.

mod core;
mod loader;

pub use self::core::{ApicovConfig, ArtifactConfig, ReportConfig, ToolConfig};
pub use loader::{
    default_config_toml, directory_ancestors, discover_config, load_config, load_config_file,
    parse_config, CONFIG_FILE_NAME,
};
