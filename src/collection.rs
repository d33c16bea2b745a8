//! Quiz collection manager.
//!
//! Owns the authoritative in-memory quiz list. Every operation marks the
//! collection as loading, clears the previous error, performs one API call
//! and applies the result. A failed `load` is only recorded; failed
//! mutations are recorded and also handed back to the caller.

use tracing::{debug, warn};

use crate::api::{ApiError, ApiResult, QuizApi};
use crate::models::{Quiz, QuizGenerationRequest, QuizUpdateRequest};

/// A successful change to the list.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent {
    Loaded(Vec<Quiz>),
    Generated(Quiz),
    Updated { id: String, quiz: Quiz },
    Deleted(String),
    Duplicated(Quiz),
}

/// Applies a list event. Pure; no network involved.
pub fn apply_event(quizzes: &mut Vec<Quiz>, event: ListEvent) {
    match event {
        ListEvent::Loaded(list) => *quizzes = list,
        ListEvent::Generated(quiz) | ListEvent::Duplicated(quiz) => quizzes.insert(0, quiz),
        ListEvent::Updated { id, quiz } => {
            for entry in quizzes.iter_mut().filter(|q| q.id == id) {
                *entry = quiz.clone();
            }
        }
        ListEvent::Deleted(id) => quizzes.retain(|q| q.id != id),
    }
}

#[derive(Debug, Default)]
pub struct QuizCollection {
    quizzes: Vec<Quiz>,
    loading: bool,
    error: Option<String>,
    /// The recorded error came from a background load.
    load_failed: bool,
}

impl QuizCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quizzes(&self) -> &[Quiz] {
        &self.quizzes
    }

    pub fn get(&self, quiz_id: &str) -> Option<&Quiz> {
        self.quizzes.iter().find(|q| q.id == quiz_id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Error of the last load, if it failed. Mutation errors are reported
    /// to the caller and not shown here.
    pub fn load_error(&self) -> Option<&str> {
        self.error.as_deref().filter(|_| self.load_failed)
    }

    pub fn clear_error(&mut self) {
        self.error = None;
        self.load_failed = false;
    }

    /// Marks the start of an operation.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
        self.load_failed = false;
    }

    fn finish<T>(&mut self, result: ApiResult<T>, on_success: impl FnOnce(&T) -> ListEvent) -> ApiResult<T> {
        self.loading = false;
        match result {
            Ok(value) => {
                apply_event(&mut self.quizzes, on_success(&value));
                Ok(value)
            }
            Err(err) => {
                warn!(error = %err, "quiz collection operation failed");
                self.error = Some(err.message());
                self.load_failed = false;
                Err(err)
            }
        }
    }

    /// Completes a load. Errors are recorded, never returned.
    pub fn finish_load(&mut self, result: ApiResult<Vec<Quiz>>) {
        self.loading = false;
        match result {
            Ok(list) => {
                debug!(count = list.len(), "quizzes loaded");
                apply_event(&mut self.quizzes, ListEvent::Loaded(list));
            }
            Err(err) => {
                warn!(error = %err, "failed to load quizzes");
                self.error = Some(err.message());
                self.load_failed = true;
            }
        }
    }

    pub fn finish_generate(&mut self, result: ApiResult<Quiz>) -> ApiResult<Quiz> {
        self.finish(result, |quiz| ListEvent::Generated(quiz.clone()))
    }

    pub fn finish_update(&mut self, quiz_id: &str, result: ApiResult<Quiz>) -> ApiResult<Quiz> {
        self.finish(result, |quiz| ListEvent::Updated {
            id: quiz_id.to_string(),
            quiz: quiz.clone(),
        })
    }

    pub fn finish_delete(&mut self, quiz_id: &str, result: ApiResult<()>) -> ApiResult<()> {
        self.finish(result, |_| ListEvent::Deleted(quiz_id.to_string()))
    }

    pub fn finish_duplicate(&mut self, result: ApiResult<Quiz>) -> ApiResult<Quiz> {
        self.finish(result, |quiz| ListEvent::Duplicated(quiz.clone()))
    }

    pub async fn load<A: QuizApi + ?Sized>(&mut self, api: &A) {
        self.begin();
        let result = api.list_quizzes(None).await;
        self.finish_load(result);
    }

    pub async fn generate<A: QuizApi + ?Sized>(
        &mut self,
        api: &A,
        request: QuizGenerationRequest,
    ) -> Result<Quiz, ApiError> {
        self.begin();
        let result = api.generate_quiz(request).await;
        self.finish_generate(result)
    }

    pub async fn update<A: QuizApi + ?Sized>(
        &mut self,
        api: &A,
        quiz_id: &str,
        update: QuizUpdateRequest,
    ) -> Result<Quiz, ApiError> {
        self.begin();
        let result = api.update_quiz(quiz_id, update).await;
        self.finish_update(quiz_id, result)
    }

    pub async fn delete<A: QuizApi + ?Sized>(&mut self, api: &A, quiz_id: &str) -> Result<(), ApiError> {
        self.begin();
        let result = api.delete_quiz(quiz_id).await;
        self.finish_delete(quiz_id, result)
    }

    pub async fn duplicate<A: QuizApi + ?Sized>(
        &mut self,
        api: &A,
        quiz_id: &str,
    ) -> Result<Quiz, ApiError> {
        self.begin();
        let result = api.duplicate_quiz(quiz_id).await;
        self.finish_duplicate(result)
    }
}
