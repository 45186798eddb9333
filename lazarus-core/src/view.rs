//! Transient view state for one client instance.
//!
//! `ViewState` is changed in exactly two ways: [`ViewState::begin_run`] when a
//! run is launched, and [`ViewState::apply`] for every [`RunEvent`] the running
//! orchestrator emits. Rendering code only ever holds `&ViewState`.

use crate::types::{Metrics, VerificationResult};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every step ran and the verification results were stored.
    Completed,
    /// A request failed; the error line was appended and later steps skipped.
    Failed,
}

/// State change produced by a running orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    /// Append one line to the agent log.
    Log(String),
    LegacyCode(String),
    ModernCode(String),
    /// `None` when the backend omitted the metrics object.
    Metrics(Option<Metrics>),
    Results(Vec<VerificationResult>),
    /// Terminal event of every run. Clears the busy flag.
    Finished(RunOutcome),
}

/// Everything the presentation layer renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub logs: Vec<String>,
    pub legacy_code: String,
    pub modern_code: String,
    pub metrics: Option<Metrics>,
    pub results: Vec<VerificationResult>,
    /// True from launch until the run's `Finished` event is applied.
    pub busy: bool,
}

impl ViewState {
    /// Clears all run data and marks the client busy.
    ///
    /// Returns `false` without touching anything if a run is already active.
    pub fn begin_run(&mut self) -> bool {
        if self.busy {
            return false;
        }
        *self = Self { busy: true, ..Self::default() };
        true
    }

    /// Folds one orchestrator event into the state.
    pub fn apply(&mut self, event: RunEvent) {
        match event {
            RunEvent::Log(line) => self.logs.push(line),
            RunEvent::LegacyCode(code) => self.legacy_code = code,
            RunEvent::ModernCode(code) => self.modern_code = code,
            RunEvent::Metrics(metrics) => self.metrics = metrics,
            RunEvent::Results(results) => self.results = results,
            RunEvent::Finished(_) => self.busy = false,
        }
    }
}
