//! Help overlay renderer for lazarus.
//!
//! Drawn inside the same `terminal.draw()` closure as the panels: `Clear`
//! erases the area first, then a bordered `Paragraph` goes on top.

use ratatui::{
    layout::Constraint,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme::Theme;

/// Renders the centred help modal, scrolled by `help_scroll` rows.
///
/// Skipped below 60 columns, where the centred area would collapse.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 60 {
        return;
    }

    let overlay_area = frame.area().centered(Constraint::Percentage(70), Constraint::Percentage(70));
    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help  (j/k scroll, ? or Esc to dismiss) ")
        .border_style(ratatui::style::Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

fn build_help_text() -> Text<'static> {
    Text::from(vec![
        Line::from("Agent"),
        Line::from("  Enter / r     Activate the refactoring agent (ignored while running)"),
        Line::from(""),
        Line::from("Navigation"),
        Line::from("  Tab / S-Tab   Move focus: code -> log -> verification"),
        Line::from("  j / k         Scroll focused panel down / up"),
        Line::from("  g / G         Jump to top / bottom (G on the log resumes following)"),
        Line::from("  Ctrl-d / u    Scroll half page down / up"),
        Line::from(""),
        Line::from("Code Panel"),
        Line::from("  d             Toggle split view / legacy -> modern diff"),
        Line::from(""),
        Line::from("Log Colors"),
        Line::from("  red           FAILURE rounds and [x] test details"),
        Line::from("  green         SUCCESS"),
        Line::from(""),
        Line::from("General"),
        Line::from("  ?             Open / close this help"),
        Line::from("  q / Esc       Quit (a running agent sequence is abandoned)"),
    ])
}
