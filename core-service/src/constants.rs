//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To point the client at another classifier, set `RAKSHAK_API_BASE`
//! instead of editing this file.

use std::path::PathBuf;

/// Default classification API base URL
///
/// Matches the local development server.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Storage key holding the serialized history log
pub const HISTORY_STORAGE_KEY: &str = "rakshak_history";

/// Maximum number of records kept in history
pub const MAX_HISTORY: usize = 200;

/// Number of records produced by "export" when no count is given
pub const DEFAULT_EXPORT_COUNT: usize = 50;

/// Scores strictly above this are rendered as dangerous
pub const DANGER_THRESHOLD: f64 = 0.5;

/// Path for XSS checks
pub const XSS_PATH: &str = "/predict/xss";

/// Path for phishing URL checks
pub const URL_PATH: &str = "/predict/url";

/// Path for the health endpoint
pub const HEALTH_PATH: &str = "/health";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Rakshak";

/// Data directory name under the platform's local data dir
const DATA_DIR_NAME: &str = "rakshak";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get API base URL from environment or use default
pub fn get_api_base() -> String {
    std::env::var("RAKSHAK_API_BASE")
        .unwrap_or_else(|_| DEFAULT_API_BASE.to_string())
}

/// Get data directory from environment or use the platform default
pub fn get_data_dir() -> PathBuf {
    std::env::var("RAKSHAK_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(DATA_DIR_NAME)
        })
}

/// Get request timeout from environment. `None` means wait indefinitely.
pub fn get_timeout_secs() -> Option<u64> {
    std::env::var("RAKSHAK_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|secs| *secs > 0)
}
