//! In-memory suggestion requester.
//!
//! Records every request instead of sending it. Clones share the same
//! buffer, so a test can keep a handle while the wizard owns another.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{SuggestionRequest, SuggestionRequester};
use crate::Result;

/// Recording requester.
#[derive(Debug, Clone, Default)]
pub struct MemoryRequester {
    inner: Arc<Mutex<Vec<SuggestionRequest>>>,
}

impl MemoryRequester {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<SuggestionRequest> {
        self.inner.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Take and clear the recorded requests.
    pub fn drain(&self) -> Vec<SuggestionRequest> {
        std::mem::take(&mut *self.inner.lock())
    }
}

#[async_trait]
impl SuggestionRequester for MemoryRequester {
    async fn notify(&self, request: SuggestionRequest) -> Result<()> {
        self.inner.lock().push(request);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
