//! Command handlers
//!
//! Shared by the one-shot CLI and the interactive shell. Each handler drives
//! the controller and returns the rendered text.

use std::path::Path;

use thiserror::Error;

use super::view;
use crate::logic::classify::{ApiClient, CheckKind};
use crate::logic::controller::{CheckController, SubmitOutcome};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Rendered command output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub text: String,
    pub ok: bool,
}

impl Report {
    fn ok(text: impl Into<String>) -> Self {
        Self { text: text.into(), ok: true }
    }

    fn failed(text: impl Into<String>) -> Self {
        Self { text: text.into(), ok: false }
    }
}

/// Switch to `kind`, fill its input and run the check
pub async fn check(controller: &mut CheckController, kind: CheckKind, input: &str) -> Report {
    controller.set_tab(kind);
    controller.set_input(kind, input);
    run_active(controller).await
}

/// Run the check for the active tab with whatever input it holds
pub async fn run_active(controller: &mut CheckController) -> Report {
    match controller.submit_active().await {
        SubmitOutcome::Recorded(result) => Report::ok(view::render_result(&result)),
        SubmitOutcome::Failed(_) => Report::failed(view::render_state(controller.state())),
        SubmitOutcome::EmptyInput => Report::ok(view::render_state(controller.state())),
        SubmitOutcome::Busy => Report::failed(view::CHECKING),
    }
}

pub fn history(controller: &CheckController, limit: Option<usize>) -> Report {
    Report::ok(view::render_history(controller.history().records(), limit))
}

/// Export the newest `count` records: compact JSON to stdout, or pretty JSON to a file
pub fn export(
    controller: &CheckController,
    count: usize,
    output: Option<&Path>,
) -> Result<Report, CommandError> {
    match output {
        None => Ok(Report::ok(controller.export_json(count)?)),
        Some(path) => {
            let records = controller.export_recent(count);
            let json = serde_json::to_string_pretty(&records)?;
            std::fs::write(path, json)?;
            Ok(Report::ok(format!(
                "Exported {} records to {}",
                records.len(),
                path.display()
            )))
        }
    }
}

pub fn clear_history(controller: &mut CheckController) -> Report {
    match controller.clear_history() {
        Ok(()) => Report::ok(view::render_history(controller.history().records(), None)),
        Err(e) => Report::failed(format!("Failed to clear history: {}", e)),
    }
}

pub async fn health(client: &ApiClient) -> Report {
    match client.health().await {
        Ok(health) => Report::ok(format!("{}: {}", client.base_url(), health.status)),
        Err(e) => Report::failed(format!("{}: unreachable ({})", client.base_url(), e)),
    }
}
