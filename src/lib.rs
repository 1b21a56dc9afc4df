//! Client for a webhook-fronted ComfyUI text-to-image service.
//!
//! Modules:
//! - `image`: the HTTP client, generation options, response interpretation,
//!   and an opt-in caller-side polling helper.
//! - `config`: Env-driven configuration loader and the immutable client config.
//! - `error`: Common error type and alias.
//!
//! Re-exports are provided for common types: `Config`, `ClientConfig`,
//! `HuixingImageClient`, `TaskResult`, and the option helpers.
pub mod config;
pub mod error;
pub mod image;

pub use config::{ClientConfig, Config};
pub use error::{AppError, AppResult};
pub use image::client::HuixingImageClient;
pub use image::options::{with_height, with_width, GenerationOptions, ImageOption};
pub use image::poll::{wait_for_completion, PollPolicy};
pub use image::response::{TaskResult, TaskStatus};
