//! Common error type and result alias.
use std::time::Duration;

use thiserror::Error;

use crate::image::response::TaskResult;

#[derive(Debug, Error)]
pub enum AppError {
    /// The outgoing request could not be built, e.g. an unparsable endpoint URL.
    #[error("create request: {0}")]
    RequestBuild(#[source] reqwest::Error),

    /// Network failure while sending or reading the response.
    #[error("send request: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered with something other than 200 OK.
    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Submission returned `[]`.
    #[error("empty response from image service")]
    EmptyResponse,

    #[error("no prompt_id in response")]
    MissingPromptId,

    /// The generation graph rejected the request; carries the `node_errors` JSON.
    #[error("node errors in response: {0}")]
    NodeErrors(String),

    /// A caller-side wait ran out of time; `last` is the final `processing` result.
    #[error("task {} still processing after {:?}", .last.task_id(), .timeout)]
    PollTimeout { timeout: Duration, last: TaskResult },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
