//! UI rendering for lazarus.
//!
//! [`render`] is the single entry point called from `terminal.draw()`. Layout
//! arithmetic lives in `layout.rs`; each panel has its own module.

pub mod code_view;
pub mod controls;
pub mod help;
pub mod keybindings;
mod layout;
pub mod log_view;
pub mod results;

use ratatui::Frame;

use crate::app::{AppState, Mode};
use crate::theme::Theme;
use layout::{compute_layout, inner_rect, render_status_bar};

/// Renders one complete frame.
///
/// Viewport heights are written back into `state` before the panels draw so
/// that page-scroll keys pressed before the next frame use current sizes.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme, base_url: &str) {
    let l = compute_layout(frame.area(), state.view.results.len());

    state.code_viewport_height = inner_rect(l.code).height;
    state.log_viewport_height = inner_rect(l.log).height;
    state.results_viewport_height = inner_rect(l.results).height.saturating_sub(1);

    let state = &*state;
    controls::render_controls(frame, l.controls, state, theme);
    code_view::render_code(frame, l.code, state, theme);
    log_view::render_log(frame, l.log, state, theme);
    results::render_results(frame, l.results, state, theme);
    render_status_bar(frame, l.status_bar, state, base_url, theme);

    if state.mode == Mode::HelpOverlay {
        help::render_help_overlay(frame, theme, state.help_scroll);
    }
}
