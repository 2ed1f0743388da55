//! # Suggestion Requester
//!
//! The contract between the wizard and whatever service turns an
//! incompletely-covered node into an index suggestion.
//!
//! Requests are fire-and-forget: the wizard never reads a response, never
//! retries, and a failed request is logged and dropped.
//!
//! ## Implementations
//!
//! | Requester | Module | Description |
//! |-----------|--------|-------------|
//! | `NoopRequester` | here | Drops every request |
//! | `MemoryRequester` | `memory` | Records requests for tests/embedding |
//! | `HttpRequester` | `http` | POSTs to the web service (feature `http`) |

pub mod memory;
#[cfg(feature = "http")]
pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::ShallowNode;
use crate::Result;

pub use memory::MemoryRequester;
#[cfg(feature = "http")]
pub use http::HttpRequester;

// ============================================================================
// Request
// ============================================================================

/// Ask for a supplemental index covering `qual`'s predicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    /// Database whose endpoint receives the request.
    #[serde(skip)]
    pub database: String,
    pub qual: ShallowNode,
}

impl SuggestionRequest {
    pub fn new(database: impl Into<String>, qual: ShallowNode) -> Self {
        Self { database: database.into(), qual }
    }

    /// Endpoint path relative to the service root.
    pub fn path(&self) -> String {
        format!("/database/{}/suggest/", self.database)
    }

    /// JSON body: `{"qual": {...}}`.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

// ============================================================================
// SuggestionRequester Trait
// ============================================================================

/// Where deferred links send their suggestion requests.
///
/// `notify` must return promptly: implementations hand the request off
/// (spawn, queue, record) rather than wait for the service.
#[async_trait]
pub trait SuggestionRequester: Send + Sync + 'static {
    /// Hand off one request. An `Err` is logged by the caller, never retried.
    async fn notify(&self, request: SuggestionRequest) -> Result<()>;

    /// Short name for log lines.
    fn name(&self) -> &'static str {
        "requester"
    }
}

/// Requester that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRequester;

#[async_trait]
impl SuggestionRequester for NoopRequester {
    async fn notify(&self, request: SuggestionRequest) -> Result<()> {
        tracing::trace!(qual = %request.qual.id, "suggestion request dropped");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}
