use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
}

impl QuestionType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::MultipleChoice => "Multiple Choice",
            Self::TrueFalse => "True/False",
            Self::ShortAnswer => "Short Answer",
        }
    }

    /// Next type in display order, wrapping around.
    pub fn cycle(&self) -> Self {
        match self {
            Self::MultipleChoice => Self::TrueFalse,
            Self::TrueFalse => Self::ShortAnswer,
            Self::ShortAnswer => Self::MultipleChoice,
        }
    }

    pub fn has_options(&self) -> bool {
        !matches!(self, Self::ShortAnswer)
    }
}

/// A single generated question.
///
/// For choice questions `correct_answer` must be one of `options`. For short
/// answers there are no options and `correct_answer` is only a suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub question: String,
    pub question_type: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

impl QuizQuestion {
    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or_default()
    }

    pub fn has_valid_answer(&self) -> bool {
        if self.question_type.has_options() {
            self.options().iter().any(|o| *o == self.correct_answer)
        } else {
            self.options.is_none()
        }
    }

    /// Exact, case-sensitive comparison against the recorded answer.
    pub fn is_correct(&self, answer: &str) -> bool {
        answer == self.correct_answer
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub source_file_id: String,
    pub questions: Vec<QuizQuestion>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl Quiz {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

/// Partial update for `PUT /quizzes/{id}`. Omitted fields stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<QuizQuestion>>,
}

impl QuizUpdateRequest {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Applies the update the way the backend does: present fields replace,
    /// absent fields are kept.
    pub fn apply_to(&self, quiz: &mut Quiz) {
        if let Some(title) = &self.title {
            quiz.title = title.clone();
        }
        if let Some(description) = &self.description {
            quiz.description = Some(description.clone());
        }
        if let Some(questions) = &self.questions {
            quiz.questions = questions.clone();
        }
    }
}
