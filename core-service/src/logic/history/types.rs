use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::classify::{CheckKind, ClassificationResult};

/// One completed check. Field names match the persisted log format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckRecord {
    #[serde(rename = "type")]
    pub kind: CheckKind,

    /// Literal payload or URL as submitted
    pub input: String,

    #[serde(rename = "res", default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ClassificationResult>,

    #[serde(rename = "ts", with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl CheckRecord {
    /// Record for a check that just completed. Stamped at millisecond
    /// precision, the resolution the log is persisted at.
    pub fn completed(kind: CheckKind, input: impl Into<String>, result: ClassificationResult) -> Self {
        Self {
            kind,
            input: input.into(),
            result: Some(result),
            timestamp: Utc::now().trunc_subsecs(3),
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.result.as_ref().map(|r| r.label.as_str())
    }

    pub fn score(&self) -> f64 {
        self.result.as_ref().map(|r| r.score).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persisted_field_names() {
        let record = CheckRecord {
            kind: CheckKind::Xss,
            input: "<script>".to_string(),
            result: Some(ClassificationResult::new("malicious", 0.9, vec!["script tag".into()])),
            timestamp: DateTime::from_timestamp_millis(1_700_000_000_123).unwrap(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "xss");
        assert_eq!(value["input"], "<script>");
        assert_eq!(value["res"]["label"], "malicious");
        assert_eq!(value["ts"], 1_700_000_000_123i64);
    }

    #[test]
    fn test_reads_record_written_by_browser_client() {
        let raw = r#"{"type":"url","input":"http://a.b","res":{"label":"benign","score":0.02,"reasons":[]},"ts":1700000000000}"#;
        let record: CheckRecord = serde_json::from_str(raw).unwrap();

        assert_eq!(record.kind, CheckKind::Url);
        assert_eq!(record.label(), Some("benign"));
        assert_eq!(record.timestamp.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_completed_record_survives_roundtrip_unchanged() {
        let record = CheckRecord::completed(
            CheckKind::Url,
            "http://a.b",
            ClassificationResult::new("benign", 0.02, vec![]),
        );
        assert_eq!(record.timestamp.timestamp_subsec_nanos() % 1_000_000, 0);

        let json = serde_json::to_string(&record).unwrap();
        let reloaded: CheckRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, record);
    }

    #[test]
    fn test_missing_result_is_tolerated() {
        let record: CheckRecord =
            serde_json::from_str(r#"{"type":"xss","input":"x","ts":0}"#).unwrap();
        assert_eq!(record.label(), None);
        assert_eq!(record.score(), 0.0);
    }
}
