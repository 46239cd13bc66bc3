use async_trait::async_trait;
use gloo_net::http::Request;

use super::*;

/// Posts pad requests to the configured endpoint with `fetch`.
#[derive(Debug, Clone)]
pub(super) struct GlooPadTransport {
    endpoint: String,
}

impl GlooPadTransport {
    pub(super) fn new(endpoint: String) -> Self {
        Self { endpoint }
    }
}

#[async_trait(?Send)]
impl PadTransport for GlooPadTransport {
    async fn post_json(&self, request: &PadRequest) -> Result<PadReply, PadError> {
        let body = serde_json::to_string(request).map_err(|error| {
            PadError::network(format!("failed to serialize request body: {error}"))
        })?;
        let response = Request::post(&self.endpoint)
            .header("content-type", "application/json")
            .body(body)
            .map_err(|error| PadError::network(format!("failed to build request body: {error}")))?
            .send()
            .await
            .map_err(map_network_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| PadError::network(format!("failed to read response: {error}")))?;
        Ok(PadReply { status, body })
    }
}

fn map_network_error(error: gloo_net::Error) -> PadError {
    PadError::network(error.to_string())
}
