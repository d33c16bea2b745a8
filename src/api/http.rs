//! [`QuizApi`] over HTTP using a blocking `ureq` agent on tokio's blocking pool.

use std::borrow::Cow;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use ureq::{Agent, AgentBuilder};

use super::{ApiError, ApiResult, MultipartBody, QuizApi, UploadPayload};
use crate::config::ClientConfig;
use crate::models::{
    FileInfo, HealthStatus, ProcessingStatus, Quiz, QuizGenerationRequest, QuizGenerationResponse,
    QuizUpdateRequest, TextExtractionResult, UploadResponse,
};

const UPLOAD_FIELD: &str = "file";
const GENERATION_FAILED: &str = "Quiz generation failed";

#[derive(Clone)]
pub struct HttpApiClient {
    agent: Agent,
    base_url: String,
    health_url: String,
    generation_timeout: Duration,
}

impl HttpApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        let agent = AgentBuilder::new()
            .timeout(config.request_timeout)
            .user_agent(concat!("quiz-studio/", env!("CARGO_PKG_VERSION")))
            .build();

        Self {
            agent,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            health_url: config.health_url(),
            generation_timeout: config.generation_timeout,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn blocking<T, F>(&self, f: F) -> ApiResult<T>
    where
        T: Send + 'static,
        F: FnOnce(Agent) -> ApiResult<T> + Send + 'static,
    {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || f(agent))
            .await
            .map_err(ApiError::network)?
    }
}

/// Percent-encodes an id for use as one path segment.
fn segment(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}

fn log_request(method: &str, url: &str) {
    info!(method, url, "API request");
}

fn read_json<T: DeserializeOwned>(
    method: &str,
    url: &str,
    result: Result<ureq::Response, ureq::Error>,
) -> ApiResult<T> {
    let response = check(method, url, result)?;
    response
        .into_json::<T>()
        .map_err(|e| ApiError::Decode(format!("Invalid response from server: {}", e)))
}

fn check(
    method: &str,
    url: &str,
    result: Result<ureq::Response, ureq::Error>,
) -> ApiResult<ureq::Response> {
    match result {
        Ok(response) => {
            info!(method, url, status = response.status(), "API response");
            Ok(response)
        }
        Err(ureq::Error::Status(status, response)) => {
            let body = response.into_string().unwrap_or_default();
            let err = ApiError::from_response(status, &body);
            warn!(method, url, status, error = %err, "API error");
            Err(err)
        }
        Err(ureq::Error::Transport(transport)) => {
            let err = ApiError::network(&transport);
            warn!(method, url, error = %err, "API transport error");
            Err(err)
        }
    }
}

/// Unwraps a generation response into its quiz.
pub(crate) fn completed_quiz(response: QuizGenerationResponse) -> ApiResult<Quiz> {
    match (response.status, response.quiz) {
        (ProcessingStatus::Completed, Some(quiz)) => Ok(quiz),
        (status, _) => {
            debug!(quiz_id = %response.quiz_id, ?status, "generation did not complete");
            if response.message.is_empty() {
                Err(ApiError::Generation(GENERATION_FAILED.to_string()))
            } else {
                Err(ApiError::Generation(response.message))
            }
        }
    }
}

#[async_trait]
impl QuizApi for HttpApiClient {
    async fn upload_file(&self, payload: UploadPayload) -> ApiResult<UploadResponse> {
        let url = self.url("/upload");
        self.blocking(move |agent| {
            log_request("POST", &url);
            let body = MultipartBody::single_file(
                UPLOAD_FIELD,
                &payload.filename,
                &payload.content_type,
                &payload.data,
            );
            let result = agent
                .post(&url)
                .set("Content-Type", &body.content_type())
                .send_bytes(body.bytes());
            read_json("POST", &url, result)
        })
        .await
    }

    async fn list_files(&self) -> ApiResult<Vec<FileInfo>> {
        let url = self.url("/files");
        self.blocking(move |agent| {
            log_request("GET", &url);
            read_json("GET", &url, agent.get(&url).call())
        })
        .await
    }

    async fn get_file(&self, file_id: &str) -> ApiResult<FileInfo> {
        let url = self.url(&format!("/files/{}", segment(file_id)));
        self.blocking(move |agent| {
            log_request("GET", &url);
            read_json("GET", &url, agent.get(&url).call())
        })
        .await
    }

    async fn get_extracted_text(&self, file_id: &str) -> ApiResult<TextExtractionResult> {
        let url = self.url(&format!("/files/{}/text", segment(file_id)));
        self.blocking(move |agent| {
            log_request("GET", &url);
            read_json("GET", &url, agent.get(&url).call())
        })
        .await
    }

    async fn delete_file(&self, file_id: &str) -> ApiResult<()> {
        let url = self.url(&format!("/files/{}", segment(file_id)));
        self.blocking(move |agent| {
            log_request("DELETE", &url);
            check("DELETE", &url, agent.delete(&url).call()).map(|_| ())
        })
        .await
    }

    async fn generate_quiz(&self, request: QuizGenerationRequest) -> ApiResult<Quiz> {
        let url = self.url("/generate-quiz");
        let timeout = self.generation_timeout;
        self.blocking(move |agent| {
            log_request("POST", &url);
            let result = agent.post(&url).timeout(timeout).send_json(&request);
            let response: QuizGenerationResponse = read_json("POST", &url, result)?;
            completed_quiz(response)
        })
        .await
    }

    async fn list_quizzes(&self, file_id: Option<&str>) -> ApiResult<Vec<Quiz>> {
        let url = self.url("/quizzes");
        let file_id = file_id.map(str::to_string);
        self.blocking(move |agent| {
            log_request("GET", &url);
            let mut request = agent.get(&url);
            if let Some(file_id) = &file_id {
                request = request.query("file_id", file_id);
            }
            read_json("GET", &url, request.call())
        })
        .await
    }

    async fn get_quiz(&self, quiz_id: &str) -> ApiResult<Quiz> {
        let url = self.url(&format!("/quizzes/{}", segment(quiz_id)));
        self.blocking(move |agent| {
            log_request("GET", &url);
            read_json("GET", &url, agent.get(&url).call())
        })
        .await
    }

    async fn update_quiz(&self, quiz_id: &str, update: QuizUpdateRequest) -> ApiResult<Quiz> {
        let url = self.url(&format!("/quizzes/{}", segment(quiz_id)));
        self.blocking(move |agent| {
            log_request("PUT", &url);
            read_json("PUT", &url, agent.put(&url).send_json(&update))
        })
        .await
    }

    async fn delete_quiz(&self, quiz_id: &str) -> ApiResult<()> {
        let url = self.url(&format!("/quizzes/{}", segment(quiz_id)));
        self.blocking(move |agent| {
            log_request("DELETE", &url);
            check("DELETE", &url, agent.delete(&url).call()).map(|_| ())
        })
        .await
    }

    async fn duplicate_quiz(&self, quiz_id: &str) -> ApiResult<Quiz> {
        let url = self.url(&format!("/quizzes/{}/duplicate", segment(quiz_id)));
        self.blocking(move |agent| {
            log_request("POST", &url);
            read_json("POST", &url, agent.post(&url).call())
        })
        .await
    }

    async fn health(&self) -> ApiResult<HealthStatus> {
        let url = self.health_url.clone();
        self.blocking(move |agent| {
            log_request("GET", &url);
            read_json("GET", &url, agent.get(&url).call())
        })
        .await
    }
}
