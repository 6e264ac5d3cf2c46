//! Logger bootstrap for the command line tool
//!
//! The library only emits through `log` macros; the binary decides where the
//! records go. Records are written to stderr so stdout stays clean for output.

use anyhow::{Context, Result};
use flexi_logger::{Logger, LoggerHandle};

/// Level used when neither `RUST_LOG` nor an explicit level is given
pub const DEFAULT_LEVEL: &str = "warn";

/// Start logging to stderr
///
/// `RUST_LOG` takes precedence over `level`. Keep the returned handle alive
/// for as long as records should be written.
pub fn init_logging(level: Option<&str>) -> Result<LoggerHandle> {
    let spec = level.unwrap_or(DEFAULT_LEVEL);
    Logger::try_with_env_or_str(spec)
        .with_context(|| format!("Invalid log level '{}'", spec))?
        .format(flexi_logger::default_format)
        .start()
        .context("Failed to start logger")
}
