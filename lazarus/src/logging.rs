//! File-backed tracing setup.
//!
//! The alternate screen owns the terminal, so log records go to
//! `.lazarus/lazarus.log` in the working directory. The filter comes from
//! `LAZARUS_LOG` (EnvFilter syntax) and defaults to `info`.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Env var holding the log filter directive.
pub const LOG_ENV: &str = "LAZARUS_LOG";

/// Installs the global subscriber, appending to `dir/lazarus.log`.
pub fn init_logging(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let file = OpenOptions::new().create(true).append(true).open(dir.join("lazarus.log"))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(std::io::Error::other)?;
    Ok(())
}
