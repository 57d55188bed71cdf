//! # gpu-info
//!
//! Prints the CUDA devices visible to this process: count, name, compute
//! capability, memory, runtime version and multiprocessor count.

use anyhow::{Context, Result};
use std::io;
use tracing::debug;

use gpu_info::{
    cli::{parse_args, setup_logging},
    default_provider, DeviceReporter,
};

fn main() -> Result<()> {
    let config = parse_args()?;
    setup_logging(&config.log_level)?;

    debug!(
        "Starting gpu-info v{} (format: {})",
        env!("CARGO_PKG_VERSION"),
        config.format
    );

    let reporter = DeviceReporter::new(default_provider());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    reporter
        .write(config.format, &mut out)
        .context("Failed to report GPU devices")
}
