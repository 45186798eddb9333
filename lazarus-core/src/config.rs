//! Configuration schema for the lazarus client.
//!
//! Every key is optional. An empty file, or no file at all, produces
//! [`LazarusConfig::default`].

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Default theme name used when the config does not set one.
pub const DEFAULT_THEME: &str = "github-dark";

/// Top-level contents of `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LazarusConfig {
    pub theme: String,
    pub backend: BackendConfig,
    pub pacing: PacingConfig,
}

impl Default for LazarusConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_owned(),
            backend: BackendConfig::default(),
            pacing: PacingConfig::default(),
        }
    }
}

/// `[backend]` table: where the agent service lives and what it should process.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub legacy_file: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_owned(),
            legacy_file: "old_payroll.py".to_owned(),
        }
    }
}

/// `[pacing]` table, all values in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub bootstrap_ms: u64,
    pub ingest_ms: u64,
    pub failure_ms: u64,
    pub attempt_ms: u64,
    pub line_ms: u64,
    pub reveal_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            bootstrap_ms: 800,
            ingest_ms: 1000,
            failure_ms: 2000,
            attempt_ms: 1000,
            line_ms: 500,
            reveal_ms: 1000,
        }
    }
}

impl LazarusConfig {
    /// Parses config from TOML text.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Loads config from `path`.
    ///
    /// A file that does not exist yields the defaults. Any other read failure,
    /// and any parse failure, is returned to the caller.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::parse(&raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = LazarusConfig::parse("").unwrap();
        assert_eq!(cfg, LazarusConfig::default());
        assert_eq!(cfg.backend.legacy_file, "old_payroll.py");
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let cfg = LazarusConfig::parse(
            "theme = \"dark\"\n[backend]\nbase_url = \"http://agent:9000\"\n[pacing]\nline_ms = 10\n",
        )
        .unwrap();
        assert_eq!(cfg.theme, "dark");
        assert_eq!(cfg.backend.base_url, "http://agent:9000");
        assert_eq!(cfg.backend.legacy_file, "old_payroll.py");
        assert_eq!(cfg.pacing.line_ms, 10);
        assert_eq!(cfg.pacing.failure_ms, 2000);
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = LazarusConfig::parse("theme = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let cfg = LazarusConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, LazarusConfig::default());
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[pacing]\nbootstrap_ms = 5\n").unwrap();
        let cfg = LazarusConfig::load(&path).unwrap();
        assert_eq!(cfg.pacing.bootstrap_ms, 5);
    }
}
