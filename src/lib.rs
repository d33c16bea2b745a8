//! # quiz-studio
//!
//! A terminal client for turning study documents into quizzes.
//!
//! Documents are uploaded to a quiz generation backend, which extracts their
//! text and generates questions. Quizzes can then be taken in study or test
//! mode, reviewed, edited, duplicated and deleted.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_studio::{ClientConfig, StudioError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), StudioError> {
//!     let config = ClientConfig::from_env()?;
//!     quiz_studio::run(&config).await
//! }
//! ```

pub mod api;
pub mod app;
pub mod collection;
pub mod config;
pub mod editor;
pub mod logger;
pub mod models;
pub mod protocol;
pub mod runtime;
pub mod session;
pub mod terminal;
mod ui;
pub mod upload;

use std::io;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

pub use api::{ApiError, HttpApiClient, QuizApi};
pub use app::App;
pub use config::{ClientConfig, ConfigError};
pub use logger::Logger;

/// Error type at the crate boundary.
#[derive(Debug, Error)]
pub enum StudioError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Run the interactive client against the configured backend.
pub async fn run(config: &ClientConfig) -> Result<(), StudioError> {
    info!(api = %config.api_base_url, "starting quiz studio");
    let api: Arc<dyn QuizApi> = Arc::new(HttpApiClient::new(config));
    runtime::run_tui(api).await?;
    Ok(())
}
