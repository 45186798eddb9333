//! Pure presentation rules.
//!
//! Functions here derive display values from a `&ViewState` and never mutate
//! it. The terminal frontend turns the results into widgets and colors.

use serde_json::{Number, Value};

use crate::types::{Metrics, VerificationResult};
use crate::view::ViewState;

/// Caption of the trigger control while idle.
pub const IDLE_CAPTION: &str = "ACTIVATE LAZARUS AGENT";
/// Caption of the trigger control while a run is active.
pub const BUSY_CAPTION: &str = "EXECUTING REFACTORING LOOP...";

/// Marker of a failed verification round.
pub const FAILURE_MARKER: &str = crate::pacing::FAILURE_MARKER;
/// Marker of a per-test error detail line.
pub const DETAIL_MARKER: &str = "[x]";
/// Marker of a successful verification round.
pub const SUCCESS_MARKER: &str = "SUCCESS";

/// State of the trigger control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    pub enabled: bool,
    pub caption: &'static str,
}

pub fn trigger(view: &ViewState) -> Trigger {
    if view.busy {
        Trigger { enabled: false, caption: BUSY_CAPTION }
    } else {
        Trigger { enabled: true, caption: IDLE_CAPTION }
    }
}

/// Contents of the metrics panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsPanel {
    pub legacy: String,
    pub modern: String,
    /// Improvement label from the backend followed by `" Cleaner"`.
    pub badge: String,
}

/// Metrics panel, present only once metrics have been received.
pub fn metrics_panel(view: &ViewState) -> Option<MetricsPanel> {
    view.metrics.as_ref().map(|m| MetricsPanel {
        legacy: complexity_text(m.legacy_complexity.as_ref()),
        modern: complexity_text(m.modern_complexity.as_ref()),
        badge: format!("{} Cleaner", m.improvement),
    })
}

/// Which side of the refactoring a code panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Legacy,
    Modern,
}

/// Code panel title including that side's complexity, or `-` when unknown.
pub fn code_title(side: Side, metrics: Option<&Metrics>) -> String {
    let (label, score) = match side {
        Side::Legacy => ("Legacy Source", metrics.and_then(|m| m.legacy_complexity.as_ref())),
        Side::Modern => {
            ("Generated Modern Source", metrics.and_then(|m| m.modern_complexity.as_ref()))
        }
    };
    format!("{label} (Cyclomatic: {})", complexity_text(score))
}

fn complexity_text(score: Option<&Number>) -> String {
    score.map_or_else(|| "-".to_owned(), Number::to_string)
}

/// Color class of an agent log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Alert,
    Success,
    Neutral,
}

/// Horizontal offset of an agent log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Default,
    Nested,
}

impl Indent {
    /// Leading columns for this indentation level.
    pub fn columns(self) -> usize {
        match self {
            Indent::Default => 1,
            Indent::Nested => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogStyle {
    pub tone: Tone,
    pub indent: Indent,
}

/// Classifies a log line by substring tests on its own text.
pub fn classify(line: &str) -> LogStyle {
    let detail = line.contains(DETAIL_MARKER);
    let tone = if line.contains(FAILURE_MARKER) || detail {
        Tone::Alert
    } else if line.contains(SUCCESS_MARKER) {
        Tone::Success
    } else {
        Tone::Neutral
    };
    let indent = if detail { Indent::Nested } else { Indent::Default };
    LogStyle { tone, indent }
}

/// Pass/fail badge of a verification row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Match,
    Fail,
}

impl Badge {
    pub fn label(self) -> &'static str {
        match self {
            Badge::Match => "MATCH",
            Badge::Fail => "FAIL",
        }
    }
}

impl From<bool> for Badge {
    fn from(matched: bool) -> Self {
        if matched { Badge::Match } else { Badge::Fail }
    }
}

/// One row of the verification table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    /// Input rendered as compact JSON.
    pub input: String,
    pub legacy: String,
    pub modern: String,
    pub badge: Badge,
}

impl From<&VerificationResult> for ResultRow {
    fn from(r: &VerificationResult) -> Self {
        Self {
            input: r.input_data.to_string(),
            legacy: output_text(&r.legacy_output),
            modern: output_text(&r.modern_output),
            badge: Badge::from(r.matched),
        }
    }
}

/// Verification rows in received order.
pub fn result_rows(view: &ViewState) -> Vec<ResultRow> {
    view.results.iter().map(ResultRow::from).collect()
}

/// Program output as displayed: strings unquoted, null blank, anything else as JSON.
fn output_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metrics(legacy: u64, modern: u64, improvement: &str) -> Metrics {
        Metrics {
            legacy_complexity: Some(legacy.into()),
            modern_complexity: Some(modern.into()),
            improvement: improvement.to_owned(),
        }
    }

    #[test]
    fn trigger_follows_busy_flag() {
        let mut view = ViewState::default();
        assert_eq!(trigger(&view), Trigger { enabled: true, caption: IDLE_CAPTION });
        view.busy = true;
        assert_eq!(trigger(&view), Trigger { enabled: false, caption: BUSY_CAPTION });
    }

    #[test]
    fn metrics_panel_absent_until_metrics_arrive() {
        let mut view = ViewState::default();
        assert!(metrics_panel(&view).is_none());
        view.metrics = Some(metrics(13, 5, "62%"));
        let panel = metrics_panel(&view).unwrap();
        assert_eq!(panel.legacy, "13");
        assert_eq!(panel.modern, "5");
        assert_eq!(panel.badge, "62% Cleaner");
    }

    #[test]
    fn code_titles_fall_back_to_dash() {
        assert_eq!(code_title(Side::Legacy, None), "Legacy Source (Cyclomatic: -)");
        let m = metrics(13, 5, "62%");
        assert_eq!(
            code_title(Side::Modern, Some(&m)),
            "Generated Modern Source (Cyclomatic: 5)"
        );
    }

    #[test]
    fn failure_lines_are_alert_anywhere() {
        assert_eq!(classify("FAILURE: 2 tests failed.").tone, Tone::Alert);
        assert_eq!(classify("round 2 ended in FAILURE").tone, Tone::Alert);
        assert_eq!(classify("FAILURE: x").indent, Indent::Default);
    }

    #[test]
    fn detail_lines_are_alert_and_nested() {
        let style = classify("  [x] Failed on [40, 20]. Expected '800', Got ''");
        assert_eq!(style, LogStyle { tone: Tone::Alert, indent: Indent::Nested });
    }

    #[test]
    fn success_and_neutral_lines() {
        assert_eq!(classify("SUCCESS: Parity Achieved.").tone, Tone::Success);
        let plain = classify("--- Attempt 1/3 ---");
        assert_eq!(plain, LogStyle { tone: Tone::Neutral, indent: Indent::Default });
    }

    #[test]
    fn rows_keep_order_and_match_flags() {
        let view = ViewState {
            results: vec![
                VerificationResult {
                    input_data: json!([30, 20]),
                    legacy_output: json!("600"),
                    modern_output: json!("600"),
                    matched: true,
                },
                VerificationResult {
                    input_data: json!([40, 20]),
                    legacy_output: json!(800),
                    modern_output: Value::Null,
                    matched: false,
                },
            ],
            ..ViewState::default()
        };
        let rows = result_rows(&view);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].input, "[30,20]");
        assert_eq!(rows[0].badge, Badge::Match);
        assert_eq!(rows[1].legacy, "800");
        assert_eq!(rows[1].modern, "");
        assert_eq!(rows[1].badge.label(), "FAIL");
    }
}
