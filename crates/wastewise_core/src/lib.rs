pub mod domain;
pub mod normalizer;
pub mod ports;
pub mod screens;

pub use domain::{
    ApiBody, ApiFailure, ApiOutcome, FailureKind, InsightsState, LoadStatus, SubmissionState,
};
pub use normalizer::{Diagnostic, Normalized, INSIGHTS_FALLBACK_ERROR};
pub use ports::WastewiseApi;
pub use screens::{InsightsScreen, SaveEntryScreen};
