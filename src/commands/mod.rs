pub mod analyze;
pub mod collect;
pub mod init;

pub use analyze::{analyze, analyze_with, handle_analyze, AnalyzeConfig};
pub use collect::{collect, collect_with, handle_collect, CollectConfig};
pub use init::init_config;
