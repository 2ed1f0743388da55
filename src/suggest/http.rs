//! HTTP suggestion requester.
//!
//! POSTs `{"qual": ...}` to `{base_url}/database/{db}/suggest/` on a spawned
//! tokio task and returns immediately. The response is never read beyond
//! its status, which is only logged.

use async_trait::async_trait;

use super::{SuggestionRequest, SuggestionRequester};
use crate::{Error, Result};

/// Fire-and-forget HTTP requester. Needs a running tokio runtime.
#[derive(Debug, Clone)]
pub struct HttpRequester {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRequester {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn url(&self, request: &SuggestionRequest) -> String {
        format!("{}{}", self.base_url, request.path())
    }
}

#[async_trait]
impl SuggestionRequester for HttpRequester {
    async fn notify(&self, request: SuggestionRequest) -> Result<()> {
        let handle = tokio::runtime::Handle::try_current()
            .map_err(|e| Error::Suggest(format!("no tokio runtime: {e}")))?;
        let url = self.url(&request);
        let post = self.client.post(url.clone()).json(&request);

        handle.spawn(async move {
            match post.send().await {
                Ok(resp) => tracing::debug!(%url, status = %resp.status(), "suggestion request sent"),
                Err(err) => tracing::debug!(%url, error = %err, "suggestion request failed"),
            }
        });
        Ok(())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
