//! Check Controller - orchestrates user actions against the classifier and history
//!
//! State machine:
//! - `Idle { error }` -> `Loading` on submit with non-empty input
//! - `Loading` -> `ResultReady` on success (record appended to history)
//! - `Loading` -> `Idle { error: Some(..) }` on failure (history untouched)
//!
//! Only one check may be in flight; `begin` refuses while `Loading`.

use crate::logic::classify::{CheckKind, ClassificationResult, Classifier, ClassifyError};
use crate::logic::history::{CheckRecord, HistoryStore, StorageError};

#[derive(Debug, Clone, PartialEq)]
pub enum CheckState {
    Idle { error: Option<String> },
    Loading { kind: CheckKind },
    ResultReady(ClassificationResult),
}

impl Default for CheckState {
    fn default() -> Self {
        Self::Idle { error: None }
    }
}

/// Outcome of a submit action
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Input field was empty; nothing sent
    EmptyInput,
    /// Another check is still in flight
    Busy,
    /// Check succeeded and was added to history
    Recorded(ClassificationResult),
    /// Check failed; history unchanged
    Failed(ClassifyError),
}

/// A check that has left `Idle` and awaits its classifier response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCheck {
    pub kind: CheckKind,
    pub input: String,
}

pub struct CheckController {
    classifier: Box<dyn Classifier>,
    history: HistoryStore,
    active: CheckKind,
    payload: String,
    url: String,
    state: CheckState,
}

impl CheckController {
    pub fn new(classifier: Box<dyn Classifier>, history: HistoryStore) -> Self {
        Self {
            classifier,
            history,
            active: CheckKind::Xss,
            payload: String::new(),
            url: String::new(),
            state: CheckState::default(),
        }
    }

    // ------------------------------------------------------------------
    // Inputs
    // ------------------------------------------------------------------

    pub fn active_tab(&self) -> CheckKind {
        self.active
    }

    pub fn set_tab(&mut self, kind: CheckKind) {
        self.active = kind;
    }

    pub fn input(&self, kind: CheckKind) -> &str {
        match kind {
            CheckKind::Xss => &self.payload,
            CheckKind::Url => &self.url,
        }
    }

    pub fn set_input(&mut self, kind: CheckKind, text: impl Into<String>) {
        *self.input_mut(kind) = text.into();
    }

    fn input_mut(&mut self, kind: CheckKind) -> &mut String {
        match kind {
            CheckKind::Xss => &mut self.payload,
            CheckKind::Url => &mut self.url,
        }
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    pub fn state(&self) -> &CheckState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, CheckState::Loading { .. })
    }

    pub fn current_result(&self) -> Option<&ClassificationResult> {
        match &self.state {
            CheckState::ResultReady(result) => Some(result),
            _ => None,
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        match &self.state {
            CheckState::Idle { error } => error.as_deref(),
            _ => None,
        }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// `Idle`/`ResultReady` -> `Loading`. Clears the current result.
    pub fn begin(&mut self, kind: CheckKind) -> Result<PendingCheck, SubmitOutcome> {
        if self.is_loading() {
            return Err(SubmitOutcome::Busy);
        }

        let input = self.input(kind);
        if input.is_empty() {
            return Err(SubmitOutcome::EmptyInput);
        }

        let pending = PendingCheck {
            kind,
            input: input.to_string(),
        };
        self.state = CheckState::Loading { kind };
        Ok(pending)
    }

    /// `Loading` -> `ResultReady` or `Idle { error }`
    pub fn complete(
        &mut self,
        pending: PendingCheck,
        outcome: Result<ClassificationResult, ClassifyError>,
    ) -> SubmitOutcome {
        match outcome {
            Ok(result) => {
                tracing::info!(
                    "{} check: {} ({}%)",
                    pending.kind,
                    result.label,
                    result.percent()
                );
                self.history.append(CheckRecord::completed(pending.kind, pending.input, result.clone()));
                self.state = CheckState::ResultReady(result.clone());
                SubmitOutcome::Recorded(result)
            }
            Err(e) => {
                tracing::warn!("{} check failed: {}", pending.kind, e);
                self.state = CheckState::Idle {
                    error: Some(e.to_string()),
                };
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// Run a full check for `kind` using its current input
    pub async fn submit(&mut self, kind: CheckKind) -> SubmitOutcome {
        let pending = match self.begin(kind) {
            Ok(pending) => pending,
            Err(outcome) => return outcome,
        };

        let outcome = self.classifier.check(pending.kind, &pending.input).await;
        self.complete(pending, outcome)
    }

    /// Submit whichever tab is active
    pub async fn submit_active(&mut self) -> SubmitOutcome {
        self.submit(self.active).await
    }

    /// Reset the input for `kind` and the current result. History is untouched.
    pub fn clear(&mut self, kind: CheckKind) {
        self.input_mut(kind).clear();
        if !self.is_loading() {
            self.state = CheckState::default();
        }
    }

    /// Wipe persisted history and reinitialise from the (now empty) store.
    /// Nothing changes if the stored log cannot be removed.
    pub fn clear_history(&mut self) -> Result<(), StorageError> {
        self.history.clear()?;
        self.history.load();

        self.payload.clear();
        self.url.clear();
        self.active = CheckKind::Xss;
        self.state = CheckState::default();
        Ok(())
    }

    /// Most recent `n` records
    pub fn export_recent(&self, n: usize) -> Vec<CheckRecord> {
        self.history.export_recent(n)
    }

    /// Most recent `n` records as a copyable JSON array
    pub fn export_json(&self, n: usize) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.export_recent(n))
    }
}
