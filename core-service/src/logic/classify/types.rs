//! Classification types shared by the client, history and views.

use serde::{Deserialize, Serialize};

/// Which classifier a check goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckKind {
    /// Script-injection heuristics over a text payload
    Xss,
    /// Phishing heuristics over a URL
    Url,
}

impl CheckKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xss => "xss",
            Self::Url => "url",
        }
    }

    /// Path of the classifier endpoint for this kind
    pub fn path(&self) -> &'static str {
        match self {
            Self::Xss => crate::constants::XSS_PATH,
            Self::Url => crate::constants::URL_PATH,
        }
    }

    /// JSON body sent to the classifier
    pub fn request_body<'a>(&self, input: &'a str) -> CheckRequest<'a> {
        match self {
            Self::Xss => CheckRequest::Xss { payload: input },
            Self::Url => CheckRequest::Url { url: input },
        }
    }
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CheckKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xss" => Ok(Self::Xss),
            "url" | "phishing" => Ok(Self::Url),
            other => Err(format!("unknown check kind '{}' (expected xss or url)", other)),
        }
    }
}

/// Request body, untagged so each kind serializes as its own single field
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CheckRequest<'a> {
    Xss { payload: &'a str },
    Url { url: &'a str },
}

/// Result returned by the classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Short category, e.g. "malicious" or "benign"
    pub label: String,

    /// Confidence, nominally within [0, 1]
    pub score: f64,

    /// Human-readable explanations, possibly empty
    #[serde(default)]
    pub reasons: Vec<String>,
}

impl ClassificationResult {
    pub fn new(label: impl Into<String>, score: f64, reasons: Vec<String>) -> Self {
        Self {
            label: label.into(),
            score,
            reasons,
        }
    }

    /// Score as a rounded percentage
    pub fn percent(&self) -> i64 {
        score_percent(self.score)
    }

    pub fn is_dangerous(&self) -> bool {
        self.score > crate::constants::DANGER_THRESHOLD
    }
}

/// round(score * 100), with non-finite scores treated as zero
pub fn score_percent(score: f64) -> i64 {
    if score.is_finite() {
        (score * 100.0).round() as i64
    } else {
        0
    }
}

/// Health endpoint response
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_bodies() {
        let xss = serde_json::to_value(CheckKind::Xss.request_body("<b>")).unwrap();
        assert_eq!(xss, serde_json::json!({ "payload": "<b>" }));

        let url = serde_json::to_value(CheckKind::Url.request_body("http://a.b")).unwrap();
        assert_eq!(url, serde_json::json!({ "url": "http://a.b" }));
    }

    #[test]
    fn test_request_body_borrows_input_not_kind() {
        let input = String::from("<svg onload=alert(1)>");
        let body = {
            let kind = CheckKind::Xss;
            kind.request_body(&input)
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["payload"], "<svg onload=alert(1)>");
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("XSS".parse::<CheckKind>().unwrap(), CheckKind::Xss);
        assert_eq!("phishing".parse::<CheckKind>().unwrap(), CheckKind::Url);
        assert!("sql".parse::<CheckKind>().is_err());
    }

    #[test]
    fn test_reasons_default_to_empty() {
        let r: ClassificationResult =
            serde_json::from_str(r#"{"label":"benign","score":0.02}"#).unwrap();
        assert!(r.reasons.is_empty());
        assert_eq!(r.percent(), 2);
        assert!(!r.is_dangerous());
    }

    #[test]
    fn test_danger_boundary() {
        assert!(!ClassificationResult::new("x", 0.5, vec![]).is_dangerous());
        assert!(ClassificationResult::new("x", 0.51, vec![]).is_dangerous());
        assert_eq!(ClassificationResult::new("x", 0.93, vec![]).percent(), 93);
    }
}
