//! Interpretation of the service's array-wrapped JSON responses.
//!
//! Both endpoints answer with a JSON array and only element 0 is ever
//! looked at. An empty array is an error for submission but means "not
//! ready yet" for a status query.
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

/// Missing and `null` fields both decode to the type's empty value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One element of the generate endpoint's response array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub prompt_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub number: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub node_errors: Map<String, Value>,
}

/// One element of the query endpoint's response array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub urls: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Processing,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Processing => "processing",
            TaskStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized state of one generation task.
///
/// Only built through [`TaskResult::processing`] and
/// [`TaskResult::completed`], so `completed`, `status` and `image_url`
/// always agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskResult {
    task_id: String,
    status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    completed: bool,
}

impl TaskResult {
    pub fn processing(task_id: impl Into<String>) -> Self {
        TaskResult {
            task_id: task_id.into(),
            status: TaskStatus::Processing,
            image_url: None,
            completed: false,
        }
    }

    pub fn completed(task_id: impl Into<String>, image_url: impl Into<String>) -> Self {
        TaskResult {
            task_id: task_id.into(),
            status: TaskStatus::Completed,
            image_url: Some(image_url.into()),
            completed: true,
        }
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

/// Interpret a generate endpoint body.
pub fn interpret_generate(body: &str) -> AppResult<TaskResult> {
    let results: Vec<GenerateResponse> = serde_json::from_str(body)?;
    let first = results.into_iter().next().ok_or(AppError::EmptyResponse)?;

    if first.prompt_id.is_empty() {
        return Err(AppError::MissingPromptId);
    }
    if !first.node_errors.is_empty() {
        return Err(AppError::NodeErrors(Value::Object(first.node_errors).to_string()));
    }

    Ok(TaskResult::processing(first.prompt_id))
}

/// Interpret a query endpoint body for `task_id`.
pub fn interpret_query(task_id: &str, body: &str) -> AppResult<TaskResult> {
    let results: Vec<QueryResponse> = serde_json::from_str(body)?;
    let Some(first) = results.into_iter().next() else {
        return Ok(TaskResult::processing(task_id));
    };
    if first.count == 0 {
        return Ok(TaskResult::processing(task_id));
    }
    // Only the first image is surfaced.
    match first.urls.into_iter().next() {
        Some(url) => Ok(TaskResult::completed(task_id, url)),
        None => Ok(TaskResult::processing(task_id)),
    }
}
