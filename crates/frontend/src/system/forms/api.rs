use async_trait::async_trait;
use contracts::system::forms::{is_success_status, ApiReply, FormSubmission};
use gloo_net::http::Request;

/// A response that arrived and whose body parsed as JSON
#[derive(Debug, Clone, PartialEq)]
pub struct TransportReply {
    pub status: u16,
    pub reply: ApiReply,
}

impl TransportReply {
    pub fn ok(&self) -> bool {
        is_success_status(self.status)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// No response was obtained
    #[error("failed to send request: {0}")]
    Send(String),
    /// A response arrived but its body is not the expected JSON
    #[error("failed to parse response: {0}")]
    Decode(String),
}

/// Sends a form submission to the backend.
#[async_trait(?Send)]
pub trait Transport {
    async fn post_json(
        &self,
        url: &str,
        body: &FormSubmission,
    ) -> Result<TransportReply, TransportError>;
}

/// `fetch`-backed transport used in the browser
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTransport;

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &FormSubmission,
    ) -> Result<TransportReply, TransportError> {
        // `.json()` also sets `Content-Type: application/json`
        let response = Request::post(url)
            .json(body)
            .map_err(|e| TransportError::Send(format!("failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(|e| TransportError::Send(e.to_string()))?;

        let status = response.status();
        let reply = response
            .json::<ApiReply>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;

        Ok(TransportReply { status, reply })
    }
}
