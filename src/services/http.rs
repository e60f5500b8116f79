//! Shared HTTP plumbing: agent, auth header, error mapping.

use std::sync::OnceLock;
use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const READ_TIMEOUT: Duration = Duration::from_secs(30);
const WRITE_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared HTTP agent with consistent timeouts.
pub(crate) fn agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout_read(READ_TIMEOUT)
            .timeout_write(WRITE_TIMEOUT)
            .build()
    })
}

/// Errors from the POI/category service calls.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The server answered with a non-success status. `message` carries the
    /// `error` field of the JSON error body when one was present.
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ServiceError {
    /// The user-facing message supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ServiceError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub(crate) fn from_ureq(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => {
                let message = response
                    .into_json::<serde_json::Value>()
                    .ok()
                    .and_then(|body| {
                        body.get("error")
                            .and_then(|value| value.as_str())
                            .map(str::to_string)
                    });
                ServiceError::Status { status, message }
            }
            ureq::Error::Transport(transport) => ServiceError::Transport(transport.to_string()),
        }
    }
}

/// Attach the bearer credential when one is present.
pub(crate) fn authorize(request: ureq::Request, token: Option<&str>) -> ureq::Request {
    match token {
        Some(token) => request.set("Authorization", &format!("Bearer {token}")),
        None => request,
    }
}

pub(crate) fn into_json<T: DeserializeOwned>(response: ureq::Response) -> Result<T, ServiceError> {
    response
        .into_json()
        .map_err(|err| ServiceError::Decode(err.to_string()))
}
