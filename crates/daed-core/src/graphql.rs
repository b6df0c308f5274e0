//! GraphQL client for the dae control API.
//!
//! Only two operations are needed by the sidebar: reading whether dae is
//! running and asking it to start or stop. The HTTP side is injected as a
//! [`GraphQlTransport`] so the same client runs in the browser and in tests.

use std::rc::Rc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::store::Session;

pub const RUNNING_QUERY: &str = "query Running { general { dae { running } } }";

/// `dry: true` stops dae without applying a configuration.
pub const RUN_MUTATION: &str = "mutation Run($dry: Boolean!) { run(dry: $dry) }";

/// Body of a GraphQL POST.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest {
    pub query: String,
    pub operation_name: Option<String>,
    pub variables: Value,
}

impl GraphQlRequest {
    pub fn running() -> Self {
        Self {
            query: RUNNING_QUERY.to_string(),
            operation_name: Some("Running".to_string()),
            variables: json!({}),
        }
    }

    /// Mutation that leaves dae in the `desired_running` state.
    pub fn run(desired_running: bool) -> Self {
        Self {
            query: RUN_MUTATION.to_string(),
            operation_name: Some("Run".to_string()),
            variables: json!({ "dry": !desired_running }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorEntry {
    message: String,
}

/// Unwrap a `{ data, errors }` envelope into `T`.
pub fn decode_response<T: DeserializeOwned>(body: Value) -> Result<T, CoreError> {
    let response: GraphQlResponse = serde_json::from_value(body)?;

    if !response.errors.is_empty() {
        let messages: Vec<_> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(CoreError::GraphQl(messages.join("; ")));
    }

    let data = response
        .data
        .ok_or_else(|| CoreError::Decode("response has no data".to_string()))?;
    Ok(serde_json::from_value(data)?)
}

#[derive(Debug, Deserialize)]
struct RunningData {
    general: GeneralData,
}

#[derive(Debug, Deserialize)]
struct GeneralData {
    dae: DaeData,
}

#[derive(Debug, Deserialize)]
struct DaeData {
    running: bool,
}

/// Value of the `Authorization` header for `token`, if any.
pub fn authorization_header(token: &str) -> Option<String> {
    (!token.is_empty()).then(|| format!("Bearer {token}"))
}

/// Sends a GraphQL request and returns the raw JSON body.
#[async_trait(?Send)]
pub trait GraphQlTransport {
    async fn post(
        &self,
        endpoint: &str,
        token: &str,
        request: &GraphQlRequest,
    ) -> Result<Value, CoreError>;
}

/// Remote control over the proxy's running state.
#[async_trait(?Send)]
pub trait ProxyControl {
    /// Whether dae is currently running.
    async fn fetch_running(&self) -> Result<bool, CoreError>;

    /// Ask dae to start (`true`) or stop (`false`).
    async fn set_running(&self, desired: bool) -> Result<(), CoreError>;
}

/// [`ProxyControl`] over GraphQL, addressed by the current session.
pub struct DaeClient {
    transport: Rc<dyn GraphQlTransport>,
    session: Session,
}

impl DaeClient {
    pub fn new(transport: Rc<dyn GraphQlTransport>, session: Session) -> Self {
        Self { transport, session }
    }

    /// Send `request` to the stored endpoint.
    ///
    /// The endpoint and token are read at call time, so a session reset takes
    /// effect on the next request.
    pub async fn execute(&self, request: &GraphQlRequest) -> Result<Value, CoreError> {
        let endpoint = self.session.endpoint_url();
        if endpoint.is_empty() {
            return Err(CoreError::NotConfigured);
        }

        debug!(
            endpoint = %endpoint,
            operation = request.operation_name.as_deref().unwrap_or("anonymous"),
            "GraphQL request"
        );
        self.transport
            .post(&endpoint, &self.session.token(), request)
            .await
    }
}

#[async_trait(?Send)]
impl ProxyControl for DaeClient {
    async fn fetch_running(&self) -> Result<bool, CoreError> {
        let body = self.execute(&GraphQlRequest::running()).await?;
        let data: RunningData = decode_response(body)?;
        Ok(data.general.dae.running)
    }

    async fn set_running(&self, desired: bool) -> Result<(), CoreError> {
        let body = self.execute(&GraphQlRequest::run(desired)).await?;
        if let Err(e) = decode_response::<Value>(body) {
            warn!(desired, error = %e, "Run mutation rejected");
            return Err(e);
        }
        Ok(())
    }
}
