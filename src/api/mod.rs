//! Backend API access.
//!
//! [`QuizApi`] is the capability the rest of the crate depends on;
//! [`HttpApiClient`] is the production implementation over HTTP.

mod error;
mod http;
mod multipart;

use async_trait::async_trait;

pub use error::ApiError;
pub use http::HttpApiClient;
pub use multipart::MultipartBody;

use crate::models::{
    FileInfo, HealthStatus, Quiz, QuizGenerationRequest, QuizUpdateRequest, TextExtractionResult,
    UploadResponse,
};

pub type ApiResult<T> = Result<T, ApiError>;

/// A document ready to be sent to `POST /upload`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPayload {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Every operation issues exactly one request against the backend.
#[async_trait]
pub trait QuizApi: Send + Sync {
    async fn upload_file(&self, payload: UploadPayload) -> ApiResult<UploadResponse>;

    async fn list_files(&self) -> ApiResult<Vec<FileInfo>>;

    async fn get_file(&self, file_id: &str) -> ApiResult<FileInfo>;

    async fn get_extracted_text(&self, file_id: &str) -> ApiResult<TextExtractionResult>;

    async fn delete_file(&self, file_id: &str) -> ApiResult<()>;

    /// Synchronous from the caller's point of view; may take minutes.
    async fn generate_quiz(&self, request: QuizGenerationRequest) -> ApiResult<Quiz>;

    async fn list_quizzes(&self, file_id: Option<&str>) -> ApiResult<Vec<Quiz>>;

    async fn get_quiz(&self, quiz_id: &str) -> ApiResult<Quiz>;

    async fn update_quiz(&self, quiz_id: &str, update: QuizUpdateRequest) -> ApiResult<Quiz>;

    async fn delete_quiz(&self, quiz_id: &str) -> ApiResult<()>;

    async fn duplicate_quiz(&self, quiz_id: &str) -> ApiResult<Quiz>;

    async fn health(&self) -> ApiResult<HealthStatus>;
}
