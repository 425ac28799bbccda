//! Logging utilities and structured logging support

use std::io::Write;

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system writing into `sink`
///
/// Used by front ends that own the terminal (raw mode) and cannot let log
/// lines interleave with frame output. `RUST_LOG` still overrides the level.
pub fn init_with_sink(sink: Box<dyn Write + Send>) {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Pipe(sink))
        .init();
}
