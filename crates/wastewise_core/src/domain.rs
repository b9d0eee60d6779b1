//! crates/wastewise_core/src/domain.rs
//!
//! Defines the pure, core data structures for the client: the decoded shape of
//! API bodies, the outcome of one API call, and the per-screen state.
//! These types are independent of any transport or terminal.

use serde_json::Value;

//=========================================================================================
// API Bodies and Outcomes
//=========================================================================================

/// A JSON body of unknown shape, decoded into the handful of fields the screens
/// care about.
///
/// A field is only populated when the server sent a *truthy* value for it: a
/// non-empty string, `true`, a non-zero number, an array or an object. Present but
/// falsy values (`""`, `0`, `false`, `null`) read as absent. Non-string values are
/// carried as their compact JSON text.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiBody {
    pub response: Option<String>,
    pub message: Option<String>,
    pub detail: Option<String>,
    raw: Value,
}

impl ApiBody {
    /// Decodes an arbitrary JSON value. Never fails: a body that is not an object
    /// simply has none of the known fields.
    pub fn from_json(raw: Value) -> Self {
        Self {
            response: truthy_text(raw.get("response")),
            message: truthy_text(raw.get("message")),
            detail: truthy_text(raw.get("detail")),
            raw,
        }
    }

    /// The body exactly as it was received.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Compact JSON serialization of the whole body, keys in received order.
    pub fn to_json_string(&self) -> String {
        self.raw.to_string()
    }
}

impl From<Value> for ApiBody {
    fn from(raw: Value) -> Self {
        Self::from_json(raw)
    }
}

fn truthy_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// The two broad ways a call can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The server was never reached (status 0).
    Transport,
    /// The server answered, but not with a usable success.
    Server,
}

/// Structured details of a failed API call.
///
/// `message` conventionally embeds the status and status text, e.g.
/// `Http failure response for <url>: 500 Internal Server Error`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ApiFailure {
    pub status: u16,
    pub status_text: String,
    pub error_body: Option<ApiBody>,
    pub message: String,
}

impl ApiFailure {
    pub fn new(
        status: u16,
        status_text: impl Into<String>,
        error_body: Option<ApiBody>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            error_body,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        if self.status == 0 {
            FailureKind::Transport
        } else {
            FailureKind::Server
        }
    }
}

/// The result of one API call, as handed to the normalizers.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome {
    Success(ApiBody),
    Failure(ApiFailure),
}

impl ApiOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiOutcome::Success(_))
    }
}

impl From<Result<ApiBody, ApiFailure>> for ApiOutcome {
    fn from(result: Result<ApiBody, ApiFailure>) -> Self {
        match result {
            Ok(body) => ApiOutcome::Success(body),
            Err(failure) => ApiOutcome::Failure(failure),
        }
    }
}

//=========================================================================================
// Screen State
//=========================================================================================

/// Where a screen is in its request cycle.
///
/// `Idle -> Pending -> {Succeeded, Failed}`, and either end state goes back to
/// `Pending` on the next user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// State of the monthly insights screen.
///
/// The screen is created already loading. A failure keeps whatever insights were
/// shown before, and a load in flight never carries an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightsState {
    Pending { stale: Option<String> },
    Succeeded { insights: String },
    Failed { error: String, stale: Option<String> },
}

impl Default for InsightsState {
    fn default() -> Self {
        InsightsState::Pending { stale: None }
    }
}

impl InsightsState {
    pub fn status(&self) -> LoadStatus {
        match self {
            InsightsState::Pending { .. } => LoadStatus::Pending,
            InsightsState::Succeeded { .. } => LoadStatus::Succeeded,
            InsightsState::Failed { .. } => LoadStatus::Failed,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, InsightsState::Pending { .. })
    }

    /// The insights text currently on screen, possibly left over from an earlier load.
    pub fn insights(&self) -> Option<&str> {
        match self {
            InsightsState::Succeeded { insights } => Some(insights),
            InsightsState::Pending { stale } | InsightsState::Failed { stale, .. } => {
                stale.as_deref()
            }
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            InsightsState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// State of the save-entry screen.
///
/// A failed submission has no user-facing error text; the entry is left in
/// place so it can be corrected and sent again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionState {
    pub input_text: String,
    pub status: LoadStatus,
}

impl Default for SubmissionState {
    fn default() -> Self {
        Self {
            input_text: String::new(),
            status: LoadStatus::Idle,
        }
    }
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        self.status == LoadStatus::Pending
    }
}
