//! Messages between the controller and the runtime.
//!
//! The controller never calls the backend itself: it emits [`Request`]s,
//! the runtime performs them, and each completion comes back as exactly
//! one [`Outcome`].

use std::path::PathBuf;

use crate::api::ApiResult;
use crate::models::{
    FileInfo, Quiz, QuizGenerationRequest, QuizUpdateRequest, TextExtractionResult, UploadResponse,
};
use crate::upload::UploadCandidate;

/// Work the controller wants done against the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Background refresh of the uploaded file list.
    LoadFiles,

    /// Background refresh of the quiz list.
    LoadQuizzes,

    /// Upload a validated local file.
    Upload {
        path: PathBuf,
        candidate: UploadCandidate,
    },

    DeleteFile(String),

    /// Fetch extracted text for a preview.
    FetchText(String),

    Generate(QuizGenerationRequest),

    UpdateQuiz {
        quiz_id: String,
        update: QuizUpdateRequest,
    },

    DeleteQuiz(String),

    DuplicateQuiz(String),
}

/// Completion of a [`Request`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    FilesLoaded(ApiResult<Vec<FileInfo>>),
    QuizzesLoaded(ApiResult<Vec<Quiz>>),
    Uploaded(ApiResult<UploadResponse>),
    FileDeleted {
        file_id: String,
        result: ApiResult<()>,
    },
    TextFetched {
        file_id: String,
        result: ApiResult<TextExtractionResult>,
    },
    Generated(ApiResult<Quiz>),
    QuizUpdated {
        quiz_id: String,
        result: ApiResult<Quiz>,
    },
    QuizDeleted {
        quiz_id: String,
        result: ApiResult<()>,
    },
    QuizDuplicated(ApiResult<Quiz>),
}

impl Request {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadFiles => "load_files",
            Self::LoadQuizzes => "load_quizzes",
            Self::Upload { .. } => "upload",
            Self::DeleteFile(_) => "delete_file",
            Self::FetchText(_) => "fetch_text",
            Self::Generate(_) => "generate",
            Self::UpdateQuiz { .. } => "update_quiz",
            Self::DeleteQuiz(_) => "delete_quiz",
            Self::DuplicateQuiz(_) => "duplicate_quiz",
        }
    }

    /// Requests that go through the quiz collection's loading flag.
    pub fn uses_collection(&self) -> bool {
        matches!(
            self,
            Self::LoadQuizzes
                | Self::Generate(_)
                | Self::UpdateQuiz { .. }
                | Self::DeleteQuiz(_)
                | Self::DuplicateQuiz(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_requests() {
        assert!(Request::LoadQuizzes.uses_collection());
        assert!(Request::DeleteQuiz("q".to_string()).uses_collection());
        assert!(!Request::LoadFiles.uses_collection());
        assert!(!Request::FetchText("f".to_string()).uses_collection());
    }
}
