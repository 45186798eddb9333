//! Central application state for lazarus.
//!
//! `AppState` wraps the core [`ViewState`] together with terminal-only state:
//! focus, scroll offsets, the code view mode, and the latest highlight result.
//! The run data inside `view` changes only through `orchestrator::launch` and
//! [`AppState::apply_run_event`]; renderers take `&AppState`.

use std::path::Path;

use lazarus_core::backend::Backend;
use lazarus_core::orchestrator::{self, RunHandle};
use lazarus_core::pacing::Pacing;
use lazarus_core::view::{RunEvent, ViewState};
use tokio::sync::mpsc::UnboundedSender;

use crate::highlight::types::{HighlightPayload, HighlightRequest};

/// Which keybinding set is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Full-screen help overlay above all panels.
    HelpOverlay,
}

/// Which panel receives scroll keys.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    #[default]
    Code,
    Log,
    Results,
}

impl PanelFocus {
    /// Cycle order: `Code` → `Log` → `Results` → `Code`.
    pub fn next(self) -> Self {
        match self {
            PanelFocus::Code => PanelFocus::Log,
            PanelFocus::Log => PanelFocus::Results,
            PanelFocus::Results => PanelFocus::Code,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            PanelFocus::Code => PanelFocus::Results,
            PanelFocus::Log => PanelFocus::Code,
            PanelFocus::Results => PanelFocus::Log,
        }
    }
}

/// How the code panel presents the two snapshots.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CodeView {
    /// Legacy source above generated modern source.
    #[default]
    Split,
    /// Unified legacy→modern diff.
    Diff,
}

impl CodeView {
    pub fn toggle(self) -> Self {
        match self {
            CodeView::Split => CodeView::Diff,
            CodeView::Diff => CodeView::Split,
        }
    }
}

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// All state read by the renderer and mutated by the event loop.
#[derive(Debug, Default)]
pub struct AppState {
    /// Run data produced by the orchestrator.
    pub view: ViewState,
    pub mode: Mode,
    pub focus: PanelFocus,
    pub code_view: CodeView,

    pub code_scroll: u16,
    pub log_scroll: u16,
    /// First visible verification row.
    pub results_offset: usize,
    pub help_scroll: u16,
    /// Keep the agent log pinned to its newest line. Cleared by manual scrolling.
    pub follow_log: bool,

    /// Inner panel heights cached by the last render, for page scrolling.
    pub code_viewport_height: u16,
    pub log_viewport_height: u16,
    pub results_viewport_height: u16,

    /// Latest highlight result; stale generations are discarded.
    pub highlighted: HighlightPayload,
    /// Generation of the most recent highlight request.
    pub highlight_generation: u64,

    pub spinner_frame: usize,
    /// The active or most recently finished run.
    pub run: Option<RunHandle>,
}

impl AppState {
    pub fn new() -> Self {
        Self { follow_log: true, ..Self::default() }
    }

    /// Starts a run unless one is already active.
    ///
    /// On success the view has been reset and marked busy, and all per-run
    /// terminal state (scroll offsets, highlighted code) is cleared too.
    pub fn activate<B>(
        &mut self,
        backend: B,
        pacing: Pacing,
        legacy_file: &str,
        tx: UnboundedSender<RunEvent>,
    ) -> bool
    where
        B: Backend + 'static,
    {
        let Some(handle) = orchestrator::launch(&mut self.view, backend, pacing, legacy_file, tx)
        else {
            return false;
        };
        tracing::info!(run_id = %handle.id(), "activated");
        self.run = Some(handle);
        self.code_scroll = 0;
        self.log_scroll = 0;
        self.results_offset = 0;
        self.follow_log = true;
        self.highlighted = HighlightPayload::default();
        // Results still in flight for the previous run are now stale.
        self.highlight_generation += 1;
        true
    }

    /// Applies one orchestrator event.
    ///
    /// Returns `true` when a code snapshot changed and needs re-highlighting.
    pub fn apply_run_event(&mut self, event: RunEvent) -> bool {
        let code_changed = matches!(event, RunEvent::LegacyCode(_) | RunEvent::ModernCode(_));
        self.view.apply(event);
        code_changed
    }

    /// Builds the next highlight request from the current snapshots.
    pub fn highlight_request(&mut self, legacy_file: &str) -> HighlightRequest {
        self.highlight_generation += 1;
        HighlightRequest {
            generation: self.highlight_generation,
            extension: file_extension(legacy_file).to_owned(),
            legacy: self.view.legacy_code.clone(),
            modern: self.view.modern_code.clone(),
        }
    }

    /// Stores a highlight result unless a newer request has been issued since.
    pub fn apply_highlight(&mut self, payload: HighlightPayload) {
        if payload.generation == self.highlight_generation {
            self.highlighted = payload;
        }
    }

    /// Advances the busy spinner.
    pub fn tick(&mut self) {
        if self.view.busy {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER.len();
        }
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER[self.spinner_frame % SPINNER.len()]
    }

    /// Aborts a still-running orchestrator task. Called on shutdown.
    pub fn shutdown(&mut self) {
        if let Some(run) = self.run.take() {
            if !run.is_finished() {
                tracing::info!(run_id = %run.id(), "aborting run on exit");
                run.abort();
            }
        }
    }

    pub fn scroll_down(&mut self, lines: u16) {
        match self.focus {
            PanelFocus::Code => self.code_scroll = self.code_scroll.saturating_add(lines),
            PanelFocus::Log => {
                self.follow_log = false;
                let last = u16::try_from(self.view.logs.len().saturating_sub(1)).unwrap_or(u16::MAX);
                self.log_scroll = self.log_scroll.saturating_add(lines).min(last);
            }
            PanelFocus::Results => {
                let last = self.view.results.len().saturating_sub(1);
                self.results_offset = (self.results_offset + lines as usize).min(last);
            }
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        match self.focus {
            PanelFocus::Code => self.code_scroll = self.code_scroll.saturating_sub(lines),
            PanelFocus::Log => {
                self.follow_log = false;
                self.log_scroll = self.log_scroll.saturating_sub(lines);
            }
            PanelFocus::Results => {
                self.results_offset = self.results_offset.saturating_sub(lines as usize);
            }
        }
    }

    pub fn scroll_top(&mut self) {
        match self.focus {
            PanelFocus::Code => self.code_scroll = 0,
            PanelFocus::Log => {
                self.follow_log = false;
                self.log_scroll = 0;
            }
            PanelFocus::Results => self.results_offset = 0,
        }
    }

    /// Jumps to the end. On the log panel this re-enables tail following.
    pub fn scroll_bottom(&mut self) {
        match self.focus {
            PanelFocus::Code => {
                let len = match self.code_view {
                    CodeView::Split => self.highlighted.legacy.len().max(self.highlighted.modern.len()),
                    CodeView::Diff => self.highlighted.diff.len(),
                };
                self.code_scroll = u16::try_from(len.saturating_sub(1)).unwrap_or(u16::MAX);
            }
            PanelFocus::Log => self.follow_log = true,
            PanelFocus::Results => {
                self.results_offset = self.view.results.len().saturating_sub(1);
            }
        }
    }

    fn viewport_height(&self) -> u16 {
        match self.focus {
            PanelFocus::Code => self.code_viewport_height,
            PanelFocus::Log => self.log_viewport_height,
            PanelFocus::Results => self.results_viewport_height,
        }
    }

    pub fn half_page_down(&mut self) {
        self.scroll_down((self.viewport_height() / 2).max(1));
    }

    pub fn half_page_up(&mut self) {
        self.scroll_up((self.viewport_height() / 2).max(1));
    }
}

/// Extension used to choose the syntax for both code panels.
fn file_extension(file: &str) -> &str {
    Path::new(file).extension().and_then(|e| e.to_str()).unwrap_or("txt")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazarus_core::error::RequestError;
    use lazarus_core::types::{AnalyzeResponse, MirrorTestResponse};
    use lazarus_core::view::RunOutcome;
    use ratatui::text::Line;

    /// Backend whose analysis always fails.
    #[derive(Clone)]
    struct Offline;

    impl Backend for Offline {
        async fn analyze(&self, _legacy_file: &str) -> Result<AnalyzeResponse, RequestError> {
            Err(RequestError::Status(503))
        }

        async fn mirror_test(&self) -> Result<MirrorTestResponse, RequestError> {
            Err(RequestError::Status(503))
        }
    }

    #[test]
    fn focus_cycles_both_ways() {
        let f = PanelFocus::Code;
        assert_eq!(f.next().next().next(), f);
        assert_eq!(f.prev(), PanelFocus::Results);
        assert_eq!(f.next().prev(), f);
    }

    #[test]
    fn code_events_request_highlighting() {
        let mut state = AppState::new();
        assert!(state.apply_run_event(RunEvent::LegacyCode("x = 1".into())));
        assert!(!state.apply_run_event(RunEvent::Log("line".into())));
        let req = state.highlight_request("old_payroll.py");
        assert_eq!(req.extension, "py");
        assert_eq!(req.legacy, "x = 1");
        assert_eq!(req.generation, 1);
    }

    #[test]
    fn stale_highlights_are_dropped() {
        let mut state = AppState::new();
        let _ = state.highlight_request("a.py");
        let _ = state.highlight_request("a.py");
        state.apply_highlight(HighlightPayload {
            generation: 1,
            legacy: vec![Line::raw("old")],
            ..HighlightPayload::default()
        });
        assert!(state.highlighted.legacy.is_empty());
        state.apply_highlight(HighlightPayload {
            generation: 2,
            legacy: vec![Line::raw("new")],
            ..HighlightPayload::default()
        });
        assert_eq!(state.highlighted.legacy.len(), 1);
    }

    #[test]
    fn manual_log_scroll_stops_following_until_bottom() {
        let mut state = AppState::new();
        state.focus = PanelFocus::Log;
        assert!(state.follow_log);
        state.scroll_up(1);
        assert!(!state.follow_log);
        state.scroll_bottom();
        assert!(state.follow_log);
    }

    #[test]
    fn log_scroll_stops_at_the_last_line() {
        let mut state = AppState::new();
        state.focus = PanelFocus::Log;
        state.view.logs = vec!["a".into(), "b".into(), "c".into()];
        state.scroll_down(10);
        assert_eq!(state.log_scroll, 2);
        state.view.logs.clear();
        state.scroll_down(1);
        assert_eq!(state.log_scroll, 0);
    }

    #[test]
    fn spinner_only_turns_while_busy() {
        let mut state = AppState::new();
        state.tick();
        assert_eq!(state.spinner_frame, 0);
        state.view.busy = true;
        state.tick();
        assert_eq!(state.spinner(), "/");
    }

    #[tokio::test(start_paused = true)]
    async fn activate_resets_and_refuses_reentry() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut state = AppState::new();
        state.view.logs.push("previous".into());
        state.code_scroll = 9;

        assert!(state.activate(Offline, Pacing::instant(), "old_payroll.py", tx.clone()));
        assert!(state.view.busy);
        assert!(state.view.logs.is_empty());
        assert_eq!(state.code_scroll, 0);
        assert!(!state.activate(Offline, Pacing::instant(), "old_payroll.py", tx));

        while let Some(event) = rx.recv().await {
            let done = matches!(event, RunEvent::Finished(RunOutcome::Failed));
            state.apply_run_event(event);
            if done {
                break;
            }
        }
        assert!(!state.view.busy);
        assert_eq!(state.view.logs.last().map(String::as_str), Some(orchestrator::ERROR_MESSAGE));
    }

    #[tokio::test(start_paused = true)]
    async fn highlight_from_previous_run_is_dropped_after_activation() {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let mut state = AppState::new();
        let previous = state.highlight_request("old_payroll.py");

        assert!(state.activate(Offline, Pacing::instant(), "old_payroll.py", tx));
        state.apply_highlight(HighlightPayload {
            generation: previous.generation,
            diff: vec![Line::raw("-old")],
            ..HighlightPayload::default()
        });
        assert!(state.highlighted.diff.is_empty());
        state.shutdown();
    }
}
