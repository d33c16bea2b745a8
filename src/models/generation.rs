use serde::{Deserialize, Serialize};

use super::file::ProcessingStatus;
use super::quiz::{QuestionType, Quiz};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    pub fn cycle(&self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }
}

/// Body of `POST /generate-quiz`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizGenerationRequest {
    pub file_id: String,
    pub num_questions: u32,
    pub question_types: Vec<QuestionType>,
    pub difficulty_level: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_topics: Option<Vec<String>>,
}

/// `quiz` is only present when `status` is completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizGenerationResponse {
    pub quiz_id: String,
    pub status: ProcessingStatus,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub quiz: Option<Quiz>,
}
