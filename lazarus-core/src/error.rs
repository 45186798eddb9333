//! Error types for lazarus-core.

use thiserror::Error;

/// Failure of a single backend request.
///
/// The variants exist for logging. The orchestrator treats all of them as the
/// same user-visible condition and renders one fixed log line.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned HTTP {0}")]
    Status(u16),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failure to read or parse the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
