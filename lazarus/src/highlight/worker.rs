//! Background thread that owns the syntect syntax and theme sets.
//!
//! Requests arrive on a crossbeam channel; results go back to the main loop
//! as `AppEvent::Highlighted`. When several requests queue up during a fast
//! replay only the newest one is processed.

use std::sync::LazyLock;

use crossbeam_channel::Receiver;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use similar::{ChangeTag, DiffOp, TextDiff};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use tokio::sync::mpsc::UnboundedSender;

use crate::event::AppEvent;
use crate::highlight::types::{HighlightPayload, HighlightRequest};

static PS: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static TS: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const CONTEXT_LINES: usize = 3;

/// Entry point of the highlight thread. Returns when the request channel closes.
pub fn highlight_worker_loop(rx: Receiver<HighlightRequest>, event_tx: UnboundedSender<AppEvent>) {
    // Load syntect data before the first request arrives.
    let _ = &*PS;
    let _ = &*TS;

    while let Ok(first) = rx.recv() {
        let request = rx.try_iter().last().unwrap_or(first);
        let payload = highlight(&request);
        if event_tx.send(AppEvent::Highlighted(Box::new(payload))).is_err() {
            return;
        }
    }
    tracing::debug!("highlight worker stopped");
}

/// Highlights both snapshots and, when both are present, their diff.
pub fn highlight(request: &HighlightRequest) -> HighlightPayload {
    let syntax = PS
        .find_syntax_by_extension(&request.extension)
        .unwrap_or_else(|| PS.find_syntax_plain_text());
    let theme = TS.themes.get("base16-ocean.dark").or_else(|| TS.themes.values().next());

    let diff = if request.legacy.is_empty() || request.modern.is_empty() {
        Vec::new()
    } else {
        diff_lines(&request.legacy, &request.modern)
    };

    HighlightPayload {
        generation: request.generation,
        legacy: code_lines(&request.legacy, syntax, theme),
        modern: code_lines(&request.modern, syntax, theme),
        diff,
    }
}

/// Line-numbered, syntax-highlighted lines for one source file.
fn code_lines(code: &str, syntax: &SyntaxReference, theme: Option<&Theme>) -> Vec<Line<'static>> {
    let mut h = theme.map(|t| HighlightLines::new(syntax, t));
    LinesWithEndings::from(code)
        .enumerate()
        .map(|(i, line)| {
            let mut spans =
                vec![Span::styled(format!("{:>3} ", i + 1), Style::default().fg(Color::DarkGray))];
            match h.as_mut() {
                Some(h) => spans.extend(syntect_spans(line, h)),
                None => spans.push(Span::raw(line.trim_end_matches('\n').to_owned())),
            }
            Line::from(spans)
        })
        .collect()
}

fn syntect_spans(line: &str, h: &mut HighlightLines) -> Vec<Span<'static>> {
    let ranges = h.highlight_line(line, &PS).unwrap_or_default();
    let spans: Vec<Span<'static>> = ranges
        .into_iter()
        .map(|(style, text)| syntect_to_span(style, text.trim_end_matches('\n')))
        .filter(|s| !s.content.is_empty())
        .collect();
    if spans.is_empty() {
        vec![Span::raw(line.trim_end_matches('\n').to_owned())]
    } else {
        spans
    }
}

/// Rebuilds a syntect style as a ratatui style. Background colors are dropped
/// so the panel background shows through.
fn syntect_to_span(style: syntect::highlighting::Style, content: &str) -> Span<'static> {
    use syntect::highlighting::FontStyle;
    let fg = style.foreground;
    let mut ratatui_style = Style::default();
    if fg.a > 0 {
        ratatui_style = ratatui_style.fg(Color::Rgb(fg.r, fg.g, fg.b));
    }
    if style.font_style.contains(FontStyle::BOLD) {
        ratatui_style = ratatui_style.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        ratatui_style = ratatui_style.add_modifier(Modifier::ITALIC);
    }
    Span::styled(content.to_owned(), ratatui_style)
}

/// Unified legacy→modern diff with word-level emphasis inside changed lines.
fn diff_lines(legacy: &str, modern: &str) -> Vec<Line<'static>> {
    let diff = TextDiff::from_lines(legacy, modern);
    let mut out = Vec::new();

    for group in diff.grouped_ops(CONTEXT_LINES) {
        out.push(hunk_header(&group));
        for op in &group {
            for change in diff.iter_inline_changes(op) {
                let (sign, color) = match change.tag() {
                    ChangeTag::Delete => ("- ", Color::Red),
                    ChangeTag::Insert => ("+ ", Color::Green),
                    ChangeTag::Equal => ("  ", Color::DarkGray),
                };
                let base = Style::default().fg(color);
                let mut spans = vec![Span::styled(sign, base)];
                for (emphasized, value) in change.iter_strings_lossy() {
                    let text = value.trim_end_matches('\n').to_owned();
                    if text.is_empty() {
                        continue;
                    }
                    let style = if emphasized { base.add_modifier(Modifier::BOLD) } else { base };
                    spans.push(Span::styled(text, style));
                }
                out.push(Line::from(spans));
            }
        }
    }
    out
}

/// `@@ -a,b +c,d @@` header covering every op of `group`.
fn hunk_header(group: &[DiffOp]) -> Line<'static> {
    let (Some(first), Some(last)) = (group.first(), group.last()) else {
        return Line::default();
    };
    let old_start = first.old_range().start;
    let new_start = first.new_range().start;
    let old_len = last.old_range().end - old_start;
    let new_len = last.new_range().end - new_start;
    let text = format!("@@ -{},{} +{},{} @@", old_start + 1, old_len, new_start + 1, new_len);
    Line::from(Span::styled(text, Style::default().fg(Color::Cyan)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn request(legacy: &str, modern: &str) -> HighlightRequest {
        HighlightRequest {
            generation: 7,
            extension: "py".to_owned(),
            legacy: legacy.to_owned(),
            modern: modern.to_owned(),
        }
    }

    #[test]
    fn code_lines_are_numbered_and_keep_text() {
        let payload = highlight(&request("a = 1\nb = 2\n", ""));
        assert_eq!(payload.generation, 7);
        assert_eq!(payload.legacy.len(), 2);
        assert_eq!(plain(&payload.legacy[0]), "  1 a = 1");
        assert_eq!(plain(&payload.legacy[1]), "  2 b = 2");
        assert!(payload.modern.is_empty());
    }

    #[test]
    fn diff_waits_for_both_sides() {
        assert!(highlight(&request("x = 1\n", "")).diff.is_empty());
    }

    #[test]
    fn diff_marks_removed_and_added_lines() {
        let payload = highlight(&request("x = 1\ny = 2\n", "x = 1\ny = 3\n"));
        let text: Vec<String> = payload.diff.iter().map(plain).collect();
        assert_eq!(text[0], "@@ -1,2 +1,2 @@");
        assert!(text.contains(&"  x = 1".to_owned()));
        assert!(text.contains(&"- y = 2".to_owned()));
        assert!(text.contains(&"+ y = 3".to_owned()));
    }

    #[test]
    fn unknown_extension_still_highlights_as_plain_text() {
        let mut req = request("hello\n", "");
        req.extension = "zzz".to_owned();
        let payload = highlight(&req);
        assert_eq!(plain(&payload.legacy[0]), "  1 hello");
    }
}
