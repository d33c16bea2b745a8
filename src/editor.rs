//! Quiz editing buffer.
//!
//! A detached working copy of a quiz. Nothing here talks to the backend:
//! the buffer is turned into a full [`QuizUpdateRequest`] on save, or
//! simply dropped on cancel.

use thiserror::Error;
use uuid::Uuid;

use crate::models::{Difficulty, QuestionType, Quiz, QuizQuestion, QuizUpdateRequest};

const TRUE: &str = "True";
const FALSE: &str = "False";
const DEFAULT_OPTIONS: [&str; 4] = ["Option A", "Option B", "Option C", "Option D"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("Quiz must have at least one question")]
    LastQuestion,
    #[error("No question with id {0}")]
    UnknownQuestion(String),
}

fn default_options() -> Vec<String> {
    DEFAULT_OPTIONS.iter().map(|o| o.to_string()).collect()
}

fn new_question_id() -> String {
    format!("q_{}", Uuid::new_v4().simple())
}

pub struct QuizEditor {
    quiz_id: String,
    title: String,
    description: String,
    questions: Vec<QuizQuestion>,
    /// Question currently expanded for editing.
    editing_question: Option<String>,
    selected: usize,
    option_cursor: usize,
    dirty: bool,
}

impl QuizEditor {
    pub fn new(quiz: &Quiz) -> Self {
        Self {
            quiz_id: quiz.id.clone(),
            title: quiz.title.clone(),
            description: quiz.description.clone().unwrap_or_default(),
            questions: quiz.questions.clone(),
            editing_question: None,
            selected: 0,
            option_cursor: 0,
            dirty: false,
        }
    }

    pub fn quiz_id(&self) -> &str {
        &self.quiz_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Cancelling only needs confirmation when something was changed.
    pub fn needs_cancel_confirmation(&self) -> bool {
        self.dirty
    }

    pub fn editing_question(&self) -> Option<&str> {
        self.editing_question.as_deref()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.selected)
    }

    pub fn option_cursor(&self) -> usize {
        self.option_cursor
    }

    pub fn select_next(&mut self) {
        if !self.questions.is_empty() {
            self.selected = (self.selected + 1).min(self.questions.len() - 1);
            self.option_cursor = 0;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.option_cursor = 0;
    }

    /// Expands the selected question, or collapses it if already expanded.
    pub fn toggle_expanded(&mut self) {
        let Some(id) = self.selected_question().map(|q| q.id.clone()) else {
            return;
        };
        if self.editing_question.as_deref() == Some(id.as_str()) {
            self.editing_question = None;
        } else {
            self.editing_question = Some(id);
        }
        self.option_cursor = 0;
    }

    pub fn cycle_option_cursor(&mut self) {
        let count = self.selected_question().map_or(0, |q| q.options().len());
        if count > 0 {
            self.option_cursor = (self.option_cursor + 1) % count;
        }
    }

    fn mark_changed(&mut self) {
        self.dirty = true;
    }

    fn question_mut(&mut self, question_id: &str) -> Result<&mut QuizQuestion, EditError> {
        self.questions
            .iter_mut()
            .find(|q| q.id == question_id)
            .ok_or_else(|| EditError::UnknownQuestion(question_id.to_string()))
    }

    fn position(&self, question_id: &str) -> Result<usize, EditError> {
        self.questions
            .iter()
            .position(|q| q.id == question_id)
            .ok_or_else(|| EditError::UnknownQuestion(question_id.to_string()))
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.mark_changed();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.mark_changed();
    }

    pub fn set_question_text(&mut self, question_id: &str, text: impl Into<String>) -> Result<(), EditError> {
        self.question_mut(question_id)?.question = text.into();
        self.mark_changed();
        Ok(())
    }

    /// Renaming the option that is the correct answer renames the answer too.
    pub fn set_option(
        &mut self,
        question_id: &str,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), EditError> {
        let text = text.into();
        let question = self.question_mut(question_id)?;
        let Some(option) = question.options.as_mut().and_then(|o| o.get_mut(index)) else {
            return Ok(());
        };
        if *option == question.correct_answer {
            question.correct_answer = text.clone();
        }
        *option = text;
        self.mark_changed();
        Ok(())
    }

    pub fn set_correct_answer(&mut self, question_id: &str, answer: impl Into<String>) -> Result<(), EditError> {
        self.question_mut(question_id)?.correct_answer = answer.into();
        self.mark_changed();
        Ok(())
    }

    pub fn set_explanation(&mut self, question_id: &str, explanation: impl Into<String>) -> Result<(), EditError> {
        self.question_mut(question_id)?.explanation = Some(explanation.into());
        self.mark_changed();
        Ok(())
    }

    pub fn set_difficulty(&mut self, question_id: &str, difficulty: Difficulty) -> Result<(), EditError> {
        self.question_mut(question_id)?.difficulty = Some(difficulty.as_str().to_string());
        self.mark_changed();
        Ok(())
    }

    pub fn cycle_difficulty(&mut self, question_id: &str) -> Result<(), EditError> {
        let current = match self.question_mut(question_id)?.difficulty.as_deref() {
            Some("easy") => Difficulty::Easy,
            Some("hard") => Difficulty::Hard,
            _ => Difficulty::Medium,
        };
        self.set_difficulty(question_id, current.cycle())
    }

    /// Switches type and resets options/answer to fit the new type.
    pub fn change_type(&mut self, question_id: &str, new_type: QuestionType) -> Result<(), EditError> {
        let question = self.question_mut(question_id)?;
        match new_type {
            QuestionType::TrueFalse => {
                question.options = Some(vec![TRUE.to_string(), FALSE.to_string()]);
                question.correct_answer = TRUE.to_string();
            }
            QuestionType::ShortAnswer => {
                question.options = None;
            }
            QuestionType::MultipleChoice => {
                if question.options.is_none() {
                    question.options = Some(default_options());
                    question.correct_answer = DEFAULT_OPTIONS[0].to_string();
                }
            }
        }
        question.question_type = new_type;
        self.option_cursor = 0;
        self.mark_changed();
        Ok(())
    }

    /// Appends a placeholder question and opens it for editing.
    pub fn add_question(&mut self) -> String {
        let id = new_question_id();
        self.questions.push(QuizQuestion {
            id: id.clone(),
            question: "New question".to_string(),
            question_type: QuestionType::MultipleChoice,
            options: Some(default_options()),
            correct_answer: DEFAULT_OPTIONS[0].to_string(),
            explanation: Some(String::new()),
            difficulty: Some(Difficulty::Medium.as_str().to_string()),
        });
        self.selected = self.questions.len() - 1;
        self.editing_question = Some(id.clone());
        self.option_cursor = 0;
        self.mark_changed();
        id
    }

    /// Checks whether a question may be deleted, without deleting it.
    pub fn can_delete(&self, question_id: &str) -> Result<(), EditError> {
        self.position(question_id)?;
        if self.questions.len() <= 1 {
            return Err(EditError::LastQuestion);
        }
        Ok(())
    }

    /// Removes a question. The last remaining question cannot be removed.
    pub fn delete_question(&mut self, question_id: &str) -> Result<(), EditError> {
        self.can_delete(question_id)?;
        let index = self.position(question_id)?;
        self.questions.remove(index);
        if self.editing_question.as_deref() == Some(question_id) {
            self.editing_question = None;
        }
        self.selected = self.selected.min(self.questions.len() - 1);
        self.option_cursor = 0;
        self.mark_changed();
        Ok(())
    }

    pub fn move_up(&mut self, question_id: &str) -> Result<(), EditError> {
        let index = self.position(question_id)?;
        if index == 0 {
            return Ok(());
        }
        self.swap(index, index - 1);
        Ok(())
    }

    pub fn move_down(&mut self, question_id: &str) -> Result<(), EditError> {
        let index = self.position(question_id)?;
        if index + 1 >= self.questions.len() {
            return Ok(());
        }
        self.swap(index, index + 1);
        Ok(())
    }

    fn swap(&mut self, from: usize, to: usize) {
        self.questions.swap(from, to);
        if self.selected == from {
            self.selected = to;
        } else if self.selected == to {
            self.selected = from;
        }
        self.mark_changed();
    }

    /// The whole buffer; on save it fully replaces the server copy.
    pub fn to_update_request(&self) -> QuizUpdateRequest {
        QuizUpdateRequest {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            questions: Some(self.questions.clone()),
        }
    }
}
