//! crates/wastewise_core/src/screens.rs
//!
//! The two screen controllers. Each one owns its state exclusively, calls the
//! API port for its single primary action and hands the outcome to the
//! normalizer. Taking `&mut self` across the await means one request per screen
//! is in flight at a time.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::domain::{InsightsState, LoadStatus, SubmissionState};
use crate::normalizer::{
    begin_insights_load, begin_submission, normalize_insights, normalize_submission,
    prepare_submission, Diagnostic, Normalized,
};
use crate::ports::WastewiseApi;

fn emit(diagnostic: &Diagnostic) {
    error!(
        status = diagnostic.failure.status,
        kind = ?diagnostic.failure.kind(),
        "{}: {:?}",
        diagnostic.context,
        diagnostic.failure
    );
}

fn settle<S>(normalized: Normalized<S>) -> S {
    if let Some(diagnostic) = &normalized.diagnostic {
        emit(diagnostic);
    }
    normalized.state
}

//=========================================================================================
// Save Entry Screen
//=========================================================================================

pub struct SaveEntryScreen {
    api: Arc<dyn WastewiseApi>,
    state: SubmissionState,
}

impl SaveEntryScreen {
    pub fn new(api: Arc<dyn WastewiseApi>) -> Self {
        Self {
            api,
            state: SubmissionState::default(),
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Replaces the entry text, as the view does on every keystroke.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.input_text = text.into();
    }

    /// Sends the trimmed entry. Empty entries are not blocked.
    pub async fn submit(&mut self) -> LoadStatus {
        let payload = prepare_submission(&self.state.input_text);
        self.state = begin_submission(&self.state);
        debug!(bytes = payload.len(), "Submitting waste-log entry");

        let outcome = self.api.save_entry(&payload).await;
        self.state = settle(normalize_submission(&self.state, &outcome));
        if self.state.status == LoadStatus::Succeeded {
            info!("Entry saved");
        }
        self.state.status
    }
}

//=========================================================================================
// Monthly Insights Screen
//=========================================================================================

pub struct InsightsScreen {
    api: Arc<dyn WastewiseApi>,
    state: InsightsState,
}

impl InsightsScreen {
    /// Creates the screen in its initial loading state. Nothing is fetched until
    /// `open` is called.
    pub fn new(api: Arc<dyn WastewiseApi>) -> Self {
        Self {
            api,
            state: InsightsState::default(),
        }
    }

    pub fn state(&self) -> &InsightsState {
        &self.state
    }

    /// Performs the initial load.
    pub async fn open(&mut self) -> LoadStatus {
        self.load().await
    }

    pub async fn load(&mut self) -> LoadStatus {
        self.state = begin_insights_load(&self.state);
        debug!("Loading monthly insights");

        let outcome = self.api.get_insights().await;
        self.state = settle(normalize_insights(&self.state, &outcome));
        self.state.status()
    }

    /// Reloads after a failure. Never blocked, whatever the current state.
    pub async fn retry(&mut self) -> LoadStatus {
        info!("Retrying monthly insights");
        self.load().await
    }
}
