//! Thin HTTP client for the text-to-image webhook pair.
//!
//! - `generate_image` submits a prompt and returns the task id as a
//!   `processing` result.
//! - `get_task_status` polls one task id once.
//! - `download_image` fetches the bytes behind a completed image URL.
//!
//! Every request is a GET with URL-encoded query parameters and is bounded
//! by the fixed timeout from [`ClientConfig`]. Nothing is retried.
use reqwest::{Client, RequestBuilder, Response, StatusCode};

use crate::config::ClientConfig;
use crate::error::{AppError, AppResult};
use crate::image::options::{GenerationOptions, ImageOption};
use crate::image::response::{interpret_generate, interpret_query, TaskResult};

#[derive(Debug, Clone)]
pub struct HuixingImageClient {
    client: Client,
    config: ClientConfig,
}

/// Query parameters for a submission, in the order the service documents them.
///
/// The height goes out as `high`; that is the service's parameter name.
pub fn generate_params(
    prompt: &str,
    options: &GenerationOptions,
    port: &str,
) -> Vec<(&'static str, String)> {
    vec![
        ("prompt", prompt.to_string()),
        ("width", options.width.to_string()),
        ("high", options.height.to_string()),
        ("size", options.count().to_string()),
        ("port", port.to_string()),
    ]
}

pub fn query_params(task_id: &str, port: &str) -> Vec<(&'static str, String)> {
    vec![("prompt_id", task_id.to_string()), ("port", port.to_string())]
}

impl HuixingImageClient {
    pub fn new(config: ClientConfig) -> Self {
        HuixingImageClient {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Submit a generation task.
    ///
    /// Returns as soon as the service has accepted the prompt; the result is
    /// always `processing`. Poll [`Self::get_task_status`] with its task id.
    pub async fn generate_image<I>(&self, prompt: &str, overrides: I) -> AppResult<TaskResult>
    where
        I: IntoIterator<Item = ImageOption>,
    {
        let options = GenerationOptions::from_overrides(overrides);
        let params = generate_params(prompt, &options, self.config.port());
        let body = self.fetch_text(self.config.generate_endpoint(), &params).await?;
        let result = interpret_generate(&body)?;
        tracing::info!(task_id = result.task_id(), "Submitted generation task");
        Ok(result)
    }

    /// Query a task once. An image that is not ready yet is `processing`, not an error.
    pub async fn get_task_status(&self, task_id: &str) -> AppResult<TaskResult> {
        let params = query_params(task_id, self.config.port());
        let body = self.fetch_text(self.config.query_endpoint(), &params).await?;
        let result = interpret_query(task_id, &body)?;
        tracing::info!(task_id, status = %result.status(), "Queried task status");
        Ok(result)
    }

    /// Fetch image bytes from a URL reported by a completed task.
    pub async fn download_image(&self, url: &str) -> AppResult<Vec<u8>> {
        let response = self.send_checked(self.client.get(url)).await?;
        let bytes = response.bytes().await.map_err(AppError::Transport)?;
        Ok(bytes.to_vec())
    }

    async fn fetch_text(
        &self,
        endpoint: &str,
        params: &[(&'static str, String)],
    ) -> AppResult<String> {
        let builder = self.client.get(endpoint).query(params);
        let response = self.send_checked(builder).await?;
        let body = response.text().await.map_err(AppError::Transport)?;
        tracing::debug!("Response body: {}", body);
        Ok(body)
    }

    async fn send_checked(&self, builder: RequestBuilder) -> AppResult<Response> {
        let request = builder
            .timeout(self.config.timeout())
            .build()
            .map_err(AppError::RequestBuild)?;
        tracing::info!("Request URL: {}", request.url());

        let response = self.client.execute(request).await.map_err(AppError::Transport)?;
        let status = response.status();
        if status == StatusCode::OK {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_else(|e| {
            tracing::debug!("Failed to read error body: {}", e);
            "Unable to read error body".to_string()
        });
        tracing::error!("Image service returned status {}: {}", status, body);
        Err(AppError::Api { status: status.as_u16(), body })
    }
}
