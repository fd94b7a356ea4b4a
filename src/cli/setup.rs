//! Runtime setup: logging and the global thread pool.

use log::LevelFilter;

/// Configure rayon global thread pool once at startup
pub fn configure_thread_pool(jobs: usize) {
    let mut builder = rayon::ThreadPoolBuilder::new();

    if jobs > 0 {
        builder = builder.num_threads(jobs);
    }

    if let Err(e) = builder.build_global() {
        log::debug!("Thread pool already configured: {}", e);
    }
}

pub fn log_level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install `env_logger`. `RUST_LOG` wins over the `-v` count.
pub fn init_logging(verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log_level_for(verbosity))
        .format_timestamp(None)
        .parse_default_env();
    // Tests may install a logger first
    let _ = builder.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(log_level_for(0), LevelFilter::Info);
        assert_eq!(log_level_for(1), LevelFilter::Debug);
        assert_eq!(log_level_for(5), LevelFilter::Trace);
    }
}
