//! services/client/src/view.rs
//!
//! Renders screen state for the terminal. Rendering is pure: callers decide
//! where the text goes.

use console::style;
use wastewise_core::domain::{InsightsState, LoadStatus, SubmissionState};

pub fn render_insights(state: &InsightsState) -> String {
    let mut lines = Vec::new();
    match state {
        InsightsState::Pending { .. } => {
            lines.push(style("Loading insights...").dim().to_string());
        }
        InsightsState::Succeeded { insights } => {
            lines.push(style("Monthly insights").bold().to_string());
            lines.push(insights.clone());
        }
        InsightsState::Failed { error, .. } => {
            lines.push(format!("{} {}", style("Error:").red().bold(), error));
            lines.push(style("Retry to load your insights again.").yellow().to_string());
        }
    }
    // Whatever was on screen before stays visible while loading or after a failure.
    if !matches!(state, InsightsState::Succeeded { .. }) {
        if let Some(stale) = state.insights() {
            lines.push(style("Previously loaded:").dim().to_string());
            lines.push(stale.to_string());
        }
    }
    lines.join("\n")
}

pub fn render_submission(state: &SubmissionState) -> String {
    match state.status {
        LoadStatus::Idle => String::new(),
        LoadStatus::Pending => style("Saving entry...").dim().to_string(),
        LoadStatus::Succeeded => style("Entry saved.").green().to_string(),
        // No error text on this screen; the entry is kept so it can be sent again.
        LoadStatus::Failed => format!(
            "{} {:?}",
            style("Entry kept:").yellow(),
            state.input_text
        ),
    }
}
