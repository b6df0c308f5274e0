//! HTTP transport for dae's GraphQL API.

use async_trait::async_trait;
use daed_core::graphql::authorization_header;
use daed_core::{CoreError, GraphQlRequest, GraphQlTransport};
use gloo_net::http::Request;
use serde_json::Value;
use tracing::debug;

/// [`GraphQlTransport`] over the browser fetch API.
#[derive(Debug, Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl GraphQlTransport for FetchTransport {
    async fn post(
        &self,
        endpoint: &str,
        token: &str,
        request: &GraphQlRequest,
    ) -> Result<Value, CoreError> {
        let mut builder = Request::post(endpoint);
        if let Some(auth) = authorization_header(token) {
            builder = builder.header("Authorization", &auth);
        }

        let response = builder
            .json(request)
            .map_err(|e| CoreError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| CoreError::Transport(e.to_string()))?;

        debug!(endpoint, status = response.status(), "GraphQL response");
        if !response.ok() {
            return Err(CoreError::Transport(format!(
                "HTTP {} {}",
                response.status(),
                response.status_text()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| CoreError::Decode(e.to_string()))
    }
}
