//! Owned, `Send` data exchanged with the highlight worker.

use ratatui::text::Line;

/// Snapshot of both code panels to highlight.
#[derive(Debug, Clone)]
pub struct HighlightRequest {
    /// Monotonic counter; the UI ignores payloads older than its latest request.
    pub generation: u64,
    /// File extension used to pick the syntax, e.g. `"py"`.
    pub extension: String,
    pub legacy: String,
    pub modern: String,
}

/// Highlighted lines for the split view and the legacy→modern diff view.
///
/// `'static` lines own their text so they can be stored in `AppState` and
/// re-rendered every frame without re-highlighting.
#[derive(Debug, Default)]
pub struct HighlightPayload {
    pub generation: u64,
    pub legacy: Vec<Line<'static>>,
    pub modern: Vec<Line<'static>>,
    /// Empty while either side is still missing.
    pub diff: Vec<Line<'static>>,
}
