//! Process-wide logging to an append-only file.
//!
//! Lines look like `INFO:ddpg::trainer:step:200 | Loss: 1187.3`. The level
//! defaults to `info` and can be overridden through `RUST_LOG`.

use log::LevelFilter;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::{DdpgError, Result};

/// Install the global logger, appending to `path`.
///
/// Fails if the file cannot be opened or a logger is already installed.
pub fn init_file_logger<P: AsRef<Path>>(path: P) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_env("RUST_LOG")
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| writeln!(buf, "{}:{}:{}", record.level(), record.target(), record.args()))
        .try_init()
        .map_err(|e| DdpgError::LoggingError(e.to_string()))
}
