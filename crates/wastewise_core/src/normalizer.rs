//! crates/wastewise_core/src/normalizer.rs
//!
//! Maps the outcome of an API call, together with the screen's prior state, to
//! the screen's next state. Everything here is a pure function: logging the
//! diagnostic attached to a failure is left to the caller.

use crate::domain::{ApiFailure, ApiOutcome, InsightsState, LoadStatus, SubmissionState};

/// Shown when a failed insights load carries no usable error text at all.
pub const INSIGHTS_FALLBACK_ERROR: &str = "Failed to load insights";

pub const INSIGHTS_DIAGNOSTIC: &str = "Error loading insights";
pub const SUBMISSION_DIAGNOSTIC: &str = "Failed to save entry";

/// A failure worth logging, with the context it happened in.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub context: &'static str,
    pub failure: ApiFailure,
}

/// The next state of a screen, plus the diagnostic to emit if the call failed.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<S> {
    pub state: S,
    pub diagnostic: Option<Diagnostic>,
}

impl<S> Normalized<S> {
    fn clean(state: S) -> Self {
        Self {
            state,
            diagnostic: None,
        }
    }

    fn with_diagnostic(state: S, context: &'static str, failure: &ApiFailure) -> Self {
        Self {
            state,
            diagnostic: Some(Diagnostic {
                context,
                failure: failure.clone(),
            }),
        }
    }
}

//=========================================================================================
// Monthly Insights
//=========================================================================================

/// Enters the loading state: any previous error is dropped, previous insights stay.
pub fn begin_insights_load(prior: &InsightsState) -> InsightsState {
    InsightsState::Pending {
        stale: prior.insights().map(str::to_owned),
    }
}

/// Success shows `response`, else `message`, else the whole body as JSON.
/// Failure shows the best error text available and keeps the prior insights.
pub fn normalize_insights(prior: &InsightsState, outcome: &ApiOutcome) -> Normalized<InsightsState> {
    match outcome {
        ApiOutcome::Success(body) => {
            let insights = body
                .response
                .clone()
                .or_else(|| body.message.clone())
                .unwrap_or_else(|| body.to_json_string());
            Normalized::clean(InsightsState::Succeeded { insights })
        }
        ApiOutcome::Failure(failure) => Normalized::with_diagnostic(
            InsightsState::Failed {
                error: insights_error_text(failure),
                stale: prior.insights().map(str::to_owned),
            },
            INSIGHTS_DIAGNOSTIC,
            failure,
        ),
    }
}

/// `detail` from the error body, then its `message`, then the failure's own
/// message, then the fixed fallback.
fn insights_error_text(failure: &ApiFailure) -> String {
    let body = failure.error_body.as_ref();
    body.and_then(|b| b.detail.clone())
        .or_else(|| body.and_then(|b| b.message.clone()))
        .or_else(|| Some(failure.message.clone()).filter(|m| !m.is_empty()))
        .unwrap_or_else(|| INSIGHTS_FALLBACK_ERROR.to_string())
}

//=========================================================================================
// Entry Submission
//=========================================================================================

/// The text actually sent for an entry: leading and trailing whitespace removed,
/// line breaks and tabs included. An empty result is still sent.
pub fn prepare_submission(input: &str) -> String {
    input
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .to_string()
}

pub fn begin_submission(prior: &SubmissionState) -> SubmissionState {
    SubmissionState {
        input_text: prior.input_text.clone(),
        status: LoadStatus::Pending,
    }
}

/// Success clears the input. Failure leaves the input exactly as typed and only
/// produces a diagnostic; this screen has no error text of its own.
pub fn normalize_submission(
    prior: &SubmissionState,
    outcome: &ApiOutcome,
) -> Normalized<SubmissionState> {
    match outcome {
        ApiOutcome::Success(_) => Normalized::clean(SubmissionState {
            input_text: String::new(),
            status: LoadStatus::Succeeded,
        }),
        ApiOutcome::Failure(failure) => Normalized::with_diagnostic(
            SubmissionState {
                input_text: prior.input_text.clone(),
                status: LoadStatus::Failed,
            },
            SUBMISSION_DIAGNOSTIC,
            failure,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ApiBody;
    use serde_json::{json, Value};

    fn success(body: Value) -> ApiOutcome {
        ApiOutcome::Success(ApiBody::from_json(body))
    }

    fn failure(status: u16, status_text: &str, body: Option<Value>, message: &str) -> ApiOutcome {
        ApiOutcome::Failure(ApiFailure::new(
            status,
            status_text,
            body.map(ApiBody::from_json),
            message,
        ))
    }

    fn server_error(body: Option<Value>) -> ApiOutcome {
        failure(
            500,
            "Internal Server Error",
            body,
            "Http failure response for http://localhost:8000/insights: 500 Internal Server Error",
        )
    }

    #[test]
    fn success_prefers_response_field() {
        let next = normalize_insights(
            &InsightsState::default(),
            &success(json!({"message": "Insights generated", "response": "You wasted 3kg of bread"})),
        );
        assert_eq!(next.state.insights(), Some("You wasted 3kg of bread"));
        assert_eq!(next.state.error(), None);
        assert!(!next.state.is_loading());
        assert!(next.diagnostic.is_none());
    }

    #[test]
    fn success_falls_back_to_message() {
        let next = normalize_insights(
            &InsightsState::default(),
            &success(json!({"message": "No entries found for this month"})),
        );
        assert_eq!(next.state.insights(), Some("No entries found for this month"));
    }

    #[test]
    fn empty_response_falls_through_to_message() {
        let next = normalize_insights(
            &InsightsState::default(),
            &success(json!({"response": "", "message": "Get insights endpoint"})),
        );
        assert_eq!(next.state.insights(), Some("Get insights endpoint"));
    }

    #[test]
    fn unknown_shape_is_serialized() {
        let next = normalize_insights(
            &InsightsState::default(),
            &success(json!({"someOtherField": "x"})),
        );
        assert_eq!(next.state.insights(), Some(r#"{"someOtherField":"x"}"#));
        assert_eq!(next.state.status(), LoadStatus::Succeeded);
    }

    #[test]
    fn empty_fields_everywhere_are_serialized_too() {
        let next = normalize_insights(
            &InsightsState::default(),
            &success(json!({"response": "", "message": ""})),
        );
        assert_eq!(next.state.insights(), Some(r#"{"response":"","message":""}"#));
    }

    #[test]
    fn failure_uses_detail_verbatim() {
        let next = normalize_insights(
            &InsightsState::default(),
            &server_error(Some(json!({"detail": "Error retrieving entries: DB down"}))),
        );
        assert_eq!(next.state.error(), Some("Error retrieving entries: DB down"));
        assert!(!next.state.is_loading());
    }

    #[test]
    fn failure_detail_wins_over_body_message() {
        let next = normalize_insights(
            &InsightsState::default(),
            &server_error(Some(json!({"message": "generic", "detail": "specific"}))),
        );
        assert_eq!(next.state.error(), Some("specific"));
    }

    #[test]
    fn failure_uses_body_message_without_detail() {
        let next = normalize_insights(
            &InsightsState::default(),
            &server_error(Some(json!({"message": "Model quota exceeded"}))),
        );
        assert_eq!(next.state.error(), Some("Model quota exceeded"));
    }

    #[test]
    fn failure_without_body_uses_outcome_message() {
        let next = normalize_insights(&InsightsState::default(), &server_error(None));
        let error = next.state.error().unwrap();
        assert!(error.contains("500 Internal Server Error"));
    }

    #[test]
    fn failure_with_unhelpful_body_uses_outcome_message() {
        let next = normalize_insights(
            &InsightsState::default(),
            &server_error(Some(json!({"detail": "", "errors": []}))),
        );
        assert!(next.state.error().unwrap().starts_with("Http failure response for"));
    }

    #[test]
    fn failure_with_nothing_uses_fallback() {
        let next = normalize_insights(&InsightsState::default(), &failure(0, "", None, ""));
        assert_eq!(next.state.error(), Some(INSIGHTS_FALLBACK_ERROR));
    }

    #[test]
    fn failure_keeps_prior_insights_and_reports_diagnostic() {
        let prior = InsightsState::Succeeded {
            insights: "Last month: less plastic".to_string(),
        };
        let outcome = server_error(None);
        let next = normalize_insights(&prior, &outcome);
        assert_eq!(next.state.insights(), Some("Last month: less plastic"));
        let diagnostic = next.diagnostic.unwrap();
        assert_eq!(diagnostic.context, INSIGHTS_DIAGNOSTIC);
        assert_eq!(diagnostic.failure.status, 500);
    }

    #[test]
    fn second_success_replaces_first() {
        let first = normalize_insights(
            &InsightsState::default(),
            &success(json!({"response": "first"})),
        );
        let pending = begin_insights_load(&first.state);
        let second = normalize_insights(&pending, &success(json!({"message": "second"})));
        assert_eq!(second.state.insights(), Some("second"));
    }

    #[test]
    fn retry_after_failure_clears_error() {
        let failed = normalize_insights(&InsightsState::default(), &server_error(None));
        let pending = begin_insights_load(&failed.state);
        assert!(pending.is_loading());
        assert_eq!(pending.error(), None);

        let recovered = normalize_insights(&pending, &success(json!({"response": "back"})));
        assert_eq!(recovered.state.error(), None);
        assert_eq!(recovered.state.insights(), Some("back"));
    }

    #[test]
    fn loading_keeps_stale_insights() {
        let prior = InsightsState::Succeeded {
            insights: "old".to_string(),
        };
        let pending = begin_insights_load(&prior);
        assert!(pending.is_loading());
        assert_eq!(pending.insights(), Some("old"));
    }

    #[test]
    fn trims_surrounding_whitespace_once() {
        assert_eq!(prepare_submission("  x  "), "x");
        assert_eq!(prepare_submission("\n\n  hi  \n\n"), "hi");
        assert_eq!(prepare_submission("\t a  b \t"), "a  b");
        assert_eq!(prepare_submission("   "), "");
    }

    #[test]
    fn submission_success_clears_input() {
        let prior = begin_submission(&SubmissionState {
            input_text: "  x  ".to_string(),
            status: LoadStatus::Idle,
        });
        assert!(prior.is_submitting());
        let next = normalize_submission(&prior, &success(json!({"message": "ok"})));
        assert_eq!(next.state.input_text, "");
        assert_eq!(next.state.status, LoadStatus::Succeeded);
        assert!(next.diagnostic.is_none());
    }

    #[test]
    fn submission_failure_keeps_untrimmed_input() {
        let prior = begin_submission(&SubmissionState {
            input_text: "  x  ".to_string(),
            status: LoadStatus::Idle,
        });
        let next = normalize_submission(&prior, &failure(0, "Unknown Error", None, "offline"));
        assert_eq!(next.state.input_text, "  x  ");
        assert_eq!(next.state.status, LoadStatus::Failed);
        assert_eq!(next.diagnostic.unwrap().context, SUBMISSION_DIAGNOSTIC);
    }
}
