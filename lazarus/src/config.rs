//! Locating and loading `config.toml`.

use std::path::{Path, PathBuf};

use lazarus_core::config::LazarusConfig;

/// Returns the path to the lazarus config file.
///
/// Prefers `$XDG_CONFIG_HOME/lazarus/config.toml`; falls back to
/// `~/.config/lazarus/config.toml` when the env var is absent.
pub fn config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join("lazarus").join("config.toml")
}

/// Loads the config at `path`, falling back to defaults on any error.
///
/// Errors are soft failures: logged at `warn` and never fatal at startup.
pub fn load_config(path: &Path) -> LazarusConfig {
    match LazarusConfig::load(path) {
        Ok(cfg) => {
            tracing::info!(path = %path.display(), base_url = %cfg.backend.base_url, "config loaded");
            cfg
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "config error, using defaults");
            LazarusConfig::default()
        }
    }
}
