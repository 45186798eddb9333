//! Paced run orchestration.
//!
//! A run is an explicit state machine. [`Orchestrator::advance`] executes one
//! [`Step`] including its suspension point (a pause or a network call) and
//! returns the next step. All state changes leave the task as [`RunEvent`]s on
//! an unbounded channel; the receiving side folds them into its `ViewState`.
//!
//! Pauses go through `tokio::time::sleep`, so a paused tokio clock fast-forwards
//! a whole run in tests.

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;

use crate::backend::Backend;
use crate::error::RequestError;
use crate::pacing::Pacing;
use crate::types::Metrics;
use crate::view::{RunEvent, RunOutcome, ViewState};

/// Log lines shown before the first request, each followed by a bootstrap pause.
pub const BOOTSTRAP_MESSAGES: [&str; 2] =
    ["> Initializing Agent Environment...", "> Mounting Legacy Container..."];
/// Appended once the legacy source has been received.
pub const INGESTED_MESSAGE: &str = "> Legacy Code Ingested.";
/// Appended right before the mirror-test request.
pub const VERIFY_MESSAGE: &str = "> Running Final Verification...";
/// The single user-visible error, whatever went wrong.
pub const ERROR_MESSAGE: &str = "Critical Error: Backend unreachable.";

/// Analysis output still waiting to be revealed.
#[derive(Debug)]
pub struct Pending {
    logs: Vec<String>,
    modern_code: String,
    metrics: Option<Metrics>,
}

/// One position in the run sequence.
#[derive(Debug)]
pub enum Step {
    /// Show bootstrap message `i` and pause.
    Bootstrap(usize),
    /// Request the analysis.
    Analyze,
    /// Show the legacy source and the ingestion line, then pause.
    Ingest { legacy_code: String, pending: Pending },
    /// Replay agent log line `next`, then pause according to its content.
    Replay { pending: Pending, next: usize },
    /// Show modern source and metrics, then pause.
    Reveal(Pending),
    /// Request the mirror test and store its results.
    Verify,
    /// Terminal step.
    Done(RunOutcome),
}

/// Drives one run against a [`Backend`].
pub struct Orchestrator<B> {
    backend: B,
    pacing: Pacing,
    legacy_file: String,
    tx: UnboundedSender<RunEvent>,
}

impl<B: Backend> Orchestrator<B> {
    pub fn new(
        backend: B,
        pacing: Pacing,
        legacy_file: impl Into<String>,
        tx: UnboundedSender<RunEvent>,
    ) -> Self {
        Self { backend, pacing, legacy_file: legacy_file.into(), tx }
    }

    /// Runs every step to completion and emits the closing `Finished` event.
    pub async fn run(self) -> RunOutcome {
        let mut step = Step::Bootstrap(0);
        let outcome = loop {
            step = match step {
                Step::Done(outcome) => break outcome,
                other => self.advance(other).await,
            };
        };
        tracing::info!(?outcome, "run finished");
        self.emit(RunEvent::Finished(outcome));
        outcome
    }

    /// Executes `step` and returns its successor.
    pub async fn advance(&self, step: Step) -> Step {
        match step {
            Step::Bootstrap(i) => match BOOTSTRAP_MESSAGES.get(i) {
                Some(msg) => {
                    self.log(*msg);
                    tokio::time::sleep(self.pacing.bootstrap).await;
                    Step::Bootstrap(i + 1)
                }
                None => Step::Analyze,
            },
            Step::Analyze => match self.backend.analyze(&self.legacy_file).await {
                Ok(resp) => {
                    tracing::info!(log_lines = resp.logs.len(), "analysis received");
                    Step::Ingest {
                        legacy_code: resp.legacy_code,
                        pending: Pending {
                            logs: resp.logs,
                            modern_code: resp.modern_code,
                            metrics: resp.metrics,
                        },
                    }
                }
                Err(e) => self.fail("analyze-and-refactor", e),
            },
            Step::Ingest { legacy_code, pending } => {
                self.emit(RunEvent::LegacyCode(legacy_code));
                self.log(INGESTED_MESSAGE);
                tokio::time::sleep(self.pacing.ingest).await;
                Step::Replay { pending, next: 0 }
            }
            Step::Replay { pending, next } => {
                let Some(line) = pending.logs.get(next).cloned() else {
                    return Step::Reveal(pending);
                };
                let pause = self.pacing.after_line(&line);
                self.log(line);
                tokio::time::sleep(pause).await;
                Step::Replay { pending, next: next + 1 }
            }
            Step::Reveal(pending) => {
                self.emit(RunEvent::ModernCode(pending.modern_code));
                self.emit(RunEvent::Metrics(pending.metrics));
                tokio::time::sleep(self.pacing.reveal).await;
                Step::Verify
            }
            Step::Verify => {
                self.log(VERIFY_MESSAGE);
                match self.backend.mirror_test().await {
                    Ok(resp) => {
                        tracing::info!(results = resp.results.len(), "mirror test received");
                        self.emit(RunEvent::Results(resp.results));
                        Step::Done(RunOutcome::Completed)
                    }
                    Err(e) => self.fail("mirror-test", e),
                }
            }
            Step::Done(outcome) => Step::Done(outcome),
        }
    }

    fn fail(&self, endpoint: &str, err: RequestError) -> Step {
        tracing::warn!(endpoint, error = %err, "request failed");
        self.log(ERROR_MESSAGE);
        Step::Done(RunOutcome::Failed)
    }

    fn log(&self, line: impl Into<String>) {
        self.emit(RunEvent::Log(line.into()));
    }

    fn emit(&self, event: RunEvent) {
        // Receiver gone means the UI is shutting down.
        let _ = self.tx.send(event);
    }
}

/// Handle on a spawned run.
#[derive(Debug)]
pub struct RunHandle {
    id: Uuid,
    task: JoinHandle<RunOutcome>,
}

impl RunHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stops the run at its current suspension point. Used on shutdown.
    pub fn abort(&self) {
        self.task.abort();
    }

    /// Waits for the run to end. Returns `None` if it was aborted.
    pub async fn join(self) -> Option<RunOutcome> {
        self.task.await.ok()
    }
}

/// Starts a run if `view` is idle.
///
/// Resets `view` and sets its busy flag synchronously, so a second trigger
/// arriving before the task's first event is already refused. Returns `None`
/// when a run is active. Must be called from within a tokio runtime.
pub fn launch<B>(
    view: &mut ViewState,
    backend: B,
    pacing: Pacing,
    legacy_file: &str,
    tx: UnboundedSender<RunEvent>,
) -> Option<RunHandle>
where
    B: Backend + 'static,
{
    if !view.begin_run() {
        tracing::debug!("launch ignored, run already active");
        return None;
    }
    let id = Uuid::new_v4();
    let span = tracing::info_span!("run", run_id = %id, legacy_file);
    tracing::info!(parent: &span, "run started");
    let orchestrator = Orchestrator::new(backend, pacing, legacy_file, tx);
    let task = tokio::spawn(orchestrator.run().instrument(span));
    Some(RunHandle { id, task })
}
