//! Text rendering of controller state and history.
//!
//! Pure functions of their inputs.

use chrono::Local;

use crate::logic::classify::{score_percent, ClassificationResult};
use crate::logic::controller::CheckState;
use crate::logic::history::CheckRecord;

pub const NO_RESULT: &str = "No result yet. Enter a payload or URL and click check.";
pub const NO_REASONS: &str = "No heuristic reasons provided";
pub const NO_HISTORY: &str = "No history yet.";
pub const CHECKING: &str = "Checking...";

const METER_WIDTH: usize = 20;
const INPUT_COLUMN_WIDTH: usize = 48;

/// Confidence meter for one result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeterView {
    pub label: String,
    pub percent: i64,
    pub danger: bool,
}

impl MeterView {
    pub fn from_result(result: &ClassificationResult) -> Self {
        let label = if result.label.is_empty() {
            "UNKNOWN".to_string()
        } else {
            result.label.to_uppercase()
        };

        Self {
            label,
            percent: result.percent(),
            danger: result.is_dangerous(),
        }
    }

    /// `[#########-----------]`, filled proportionally and clamped to the track
    pub fn bar(&self) -> String {
        let filled = (self.percent.clamp(0, 100) as usize * METER_WIDTH + 50) / 100;
        let fill = if self.danger { '!' } else { '#' };
        format!(
            "[{}{}]",
            fill.to_string().repeat(filled),
            "-".repeat(METER_WIDTH - filled)
        )
    }
}

/// Bulleted reasons, or the placeholder line when there are none
pub fn reason_lines(result: &ClassificationResult) -> Vec<String> {
    if result.reasons.is_empty() {
        vec![NO_REASONS.to_string()]
    } else {
        result.reasons.iter().map(|r| format!("• {}", r)).collect()
    }
}

pub fn render_result(result: &ClassificationResult) -> String {
    let meter = MeterView::from_result(result);
    let mut out = format!(
        "Result: {}\n{} {}% confidence{}\nReasons:",
        meter.label,
        meter.bar(),
        meter.percent,
        if meter.danger { "  [DANGER]" } else { "" }
    );

    for line in reason_lines(result) {
        out.push_str("\n  ");
        out.push_str(&line);
    }
    out
}

pub fn render_state(state: &CheckState) -> String {
    match state {
        CheckState::Idle { error: None } => NO_RESULT.to_string(),
        CheckState::Idle { error: Some(e) } => format!("Check failed: {}\n{}", e, NO_RESULT),
        CheckState::Loading { .. } => CHECKING.to_string(),
        CheckState::ResultReady(result) => render_result(result),
    }
}

/// One history table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub time: String,
    pub kind: String,
    pub input: String,
    pub label: String,
    pub score: String,
}

impl HistoryRow {
    pub fn from_record(record: &CheckRecord) -> Self {
        Self {
            time: record
                .timestamp
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            kind: record.kind.as_str().to_uppercase(),
            input: record.input.clone(),
            label: record.label().unwrap_or_default().to_string(),
            score: format!("{}%", score_percent(record.score())),
        }
    }
}

pub fn render_history(records: &[CheckRecord], limit: Option<usize>) -> String {
    let mut out = format!("History: {}\n", records.len());

    if records.is_empty() {
        out.push_str(NO_HISTORY);
        return out;
    }

    out.push_str(&format!(
        "{:<19}  {:<4}  {:<width$}  {:<10}  {:>5}",
        "Time", "Type", "Input", "Label", "Score",
        width = INPUT_COLUMN_WIDTH
    ));

    let shown = limit.unwrap_or(records.len());
    for row in records.iter().take(shown).map(HistoryRow::from_record) {
        out.push_str(&format!(
            "\n{:<19}  {:<4}  {:<width$}  {:<10}  {:>5}",
            row.time,
            row.kind,
            truncate(&single_line(&row.input), INPUT_COLUMN_WIDTH),
            row.label,
            row.score,
            width = INPUT_COLUMN_WIDTH
        ));
    }
    out
}

fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars - 1).collect();
        format!("{}…", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::classify::CheckKind;

    #[test]
    fn test_malicious_meter() {
        let result = ClassificationResult::new("malicious", 0.93, vec!["script tag detected".into()]);
        let meter = MeterView::from_result(&result);

        assert_eq!(meter, MeterView { label: "MALICIOUS".into(), percent: 93, danger: true });
        assert_eq!(meter.bar(), format!("[{}{}]", "!".repeat(19), "-"));

        let text = render_result(&result);
        assert!(text.contains("93% confidence  [DANGER]"));
        assert!(text.contains("• script tag detected"));
    }

    #[test]
    fn test_benign_without_reasons() {
        let result = ClassificationResult::new("benign", 0.02, vec![]);
        let meter = MeterView::from_result(&result);

        assert!(!meter.danger);
        assert_eq!(meter.percent, 2);
        assert_eq!(reason_lines(&result), vec![NO_REASONS.to_string()]);
        assert!(!render_result(&result).contains("[DANGER]"));
    }

    #[test]
    fn test_empty_label_is_unknown() {
        let meter = MeterView::from_result(&ClassificationResult::new("", 0.0, vec![]));
        assert_eq!(meter.label, "UNKNOWN");
        assert_eq!(meter.bar(), format!("[{}]", "-".repeat(20)));
    }

    #[test]
    fn test_out_of_range_score_keeps_bar_on_track() {
        let meter = MeterView::from_result(&ClassificationResult::new("x", 1.7, vec![]));
        assert_eq!(meter.percent, 170);
        assert_eq!(meter.bar(), format!("[{}]", "!".repeat(20)));
    }

    #[test]
    fn test_state_rendering() {
        assert_eq!(render_state(&CheckState::default()), NO_RESULT);
        assert_eq!(render_state(&CheckState::Loading { kind: CheckKind::Url }), CHECKING);
        assert!(render_state(&CheckState::Idle { error: Some("500 boom".into()) })
            .starts_with("Check failed: 500 boom"));
    }

    #[test]
    fn test_history_rendering() {
        assert_eq!(render_history(&[], None), format!("History: 0\n{}", NO_HISTORY));

        let records = vec![
            CheckRecord::completed(
                CheckKind::Url,
                "http://safe.example.com",
                ClassificationResult::new("benign", 0.02, vec![]),
            ),
            CheckRecord::completed(
                CheckKind::Xss,
                "<script>\nalert(1)</script>",
                ClassificationResult::new("malicious", 0.93, vec![]),
            ),
        ];

        let row = HistoryRow::from_record(&records[0]);
        assert_eq!(row.kind, "URL");
        assert_eq!(row.label, "benign");
        assert_eq!(row.score, "2%");

        let text = render_history(&records, Some(1));
        assert!(text.starts_with("History: 2\n"));
        assert!(text.contains("http://safe.example.com"));
        assert!(!text.contains("alert(1)"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_truncate_is_char_safe() {
        let long = "é".repeat(60);
        let cut = truncate(&long, 10);
        assert_eq!(cut.chars().count(), 10);
        assert!(cut.ends_with('…'));
    }
}
