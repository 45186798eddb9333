//! Final verification table.

use lazarus_core::presentation;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::{AppState, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

/// Renders one row per verification result, starting at `results_offset`.
pub fn render_results(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let rows = presentation::result_rows(&state.view);
    let title = if rows.is_empty() {
        "Final Verification".to_owned()
    } else {
        let passed = rows.iter().filter(|r| r.badge == presentation::Badge::Match).count();
        format!("Final Verification ({passed}/{})", rows.len())
    };
    let block = panel_block(title, state.focus == PanelFocus::Results, theme);

    if rows.is_empty() {
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new(Line::styled(" No verification run yet", Style::default().fg(theme.muted))),
            inner_rect(area),
        );
        return;
    }

    let header = Row::new(["Input", "Legacy", "Modern", "Status"])
        .style(Style::default().fg(theme.table_header).add_modifier(Modifier::BOLD));

    let body: Vec<Row> = rows
        .into_iter()
        .skip(state.results_offset)
        .map(|r| {
            let badge = Span::styled(
                r.badge.label(),
                Style::default().fg(theme.badge(r.badge)).add_modifier(Modifier::BOLD),
            );
            Row::new(vec![
                Cell::from(r.input),
                Cell::from(r.legacy),
                Cell::from(r.modern),
                Cell::from(badge),
            ])
        })
        .collect();

    let widths = [
        Constraint::Percentage(30),
        Constraint::Percentage(28),
        Constraint::Percentage(28),
        Constraint::Length(6),
    ];
    frame.render_widget(Table::new(body, widths).header(header).block(block), area);
}
