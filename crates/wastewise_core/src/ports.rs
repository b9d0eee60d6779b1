//! crates/wastewise_core/src/ports.rs
//!
//! Defines the service contract the screens drive. This trait is the boundary
//! of the core, keeping it independent of the HTTP transport that implements it.

use async_trait::async_trait;

use crate::domain::ApiOutcome;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The remote WasteWise API.
///
/// Implementations report every problem, transport errors included, as an
/// `ApiOutcome::Failure` rather than out of band.
#[async_trait]
pub trait WastewiseApi: Send + Sync {
    /// Stores one free-text waste-log entry. `text` is sent as-is.
    async fn save_entry(&self, text: &str) -> ApiOutcome;

    /// Fetches the AI-generated insights for the current month.
    async fn get_insights(&self) -> ApiOutcome;
}
