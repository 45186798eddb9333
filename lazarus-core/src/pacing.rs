//! Cosmetic pauses between replayed steps.
//!
//! None of these delays correspond to real work. They only control how fast
//! the agent log is revealed.

use std::time::Duration;

use crate::config::PacingConfig;

/// Substring that marks a failed verification round in the agent log.
pub const FAILURE_MARKER: &str = "FAILURE";
/// Substring that marks the start of a refactoring attempt in the agent log.
pub const ATTEMPT_MARKER: &str = "Attempt";

/// Pause durations for every suspension point of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// After each bootstrap message.
    pub bootstrap: Duration,
    /// After the legacy code is shown.
    pub ingest: Duration,
    /// After a log line containing [`FAILURE_MARKER`].
    pub failure: Duration,
    /// After a log line containing [`ATTEMPT_MARKER`].
    pub attempt: Duration,
    /// After any other log line.
    pub line: Duration,
    /// After the modern code and metrics are shown.
    pub reveal: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self::from(&PacingConfig::default())
    }
}

impl From<&PacingConfig> for Pacing {
    fn from(cfg: &PacingConfig) -> Self {
        Self {
            bootstrap: Duration::from_millis(cfg.bootstrap_ms),
            ingest: Duration::from_millis(cfg.ingest_ms),
            failure: Duration::from_millis(cfg.failure_ms),
            attempt: Duration::from_millis(cfg.attempt_ms),
            line: Duration::from_millis(cfg.line_ms),
            reveal: Duration::from_millis(cfg.reveal_ms),
        }
    }
}

impl Pacing {
    /// No pauses at all.
    pub fn instant() -> Self {
        Self {
            bootstrap: Duration::ZERO,
            ingest: Duration::ZERO,
            failure: Duration::ZERO,
            attempt: Duration::ZERO,
            line: Duration::ZERO,
            reveal: Duration::ZERO,
        }
    }

    /// Pause that follows a replayed agent log line.
    ///
    /// The failure marker wins over the attempt marker when a line has both.
    pub fn after_line(&self, line: &str) -> Duration {
        if line.contains(FAILURE_MARKER) {
            self.failure
        } else if line.contains(ATTEMPT_MARKER) {
            self.attempt
        } else {
            self.line
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_timings() {
        let p = Pacing::default();
        assert_eq!(p.bootstrap, Duration::from_millis(800));
        assert_eq!(p.ingest, Duration::from_millis(1000));
        assert_eq!(p.reveal, Duration::from_millis(1000));
    }

    #[test]
    fn line_pause_depends_on_marker() {
        let p = Pacing::default();
        assert_eq!(p.after_line("FAILURE: 2 tests failed."), Duration::from_millis(2000));
        assert_eq!(p.after_line("--- Attempt 2/3 ---"), Duration::from_millis(1000));
        assert_eq!(p.after_line("SUCCESS: Parity Achieved."), Duration::from_millis(500));
        assert_eq!(p.after_line("  [x] Failed on [40, 20]"), Duration::from_millis(500));
    }

    #[test]
    fn failure_marker_takes_precedence() {
        let p = Pacing::default();
        assert_eq!(p.after_line("Attempt 3 FAILURE"), p.failure);
    }
}
