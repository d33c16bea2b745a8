//! Quiz taking state machine.
//!
//! Study mode shows correctness and explanations as soon as a question is
//! answered. Test mode hides them until the quiz is finished.

use std::collections::HashMap;

use crate::models::{QuestionType, Quiz, QuizQuestion};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizMode {
    Study,
    Test,
}

impl QuizMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Study => "Study Mode",
            Self::Test => "Test Mode",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
    pub percentage: f64,
}

impl Score {
    pub fn new(correct: usize, total: usize) -> Self {
        let percentage = if total > 0 {
            correct as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Self {
            correct,
            total,
            percentage,
        }
    }

    pub fn rounded_percentage(&self) -> u32 {
        self.percentage.round() as u32
    }
}

pub struct QuizSession {
    quiz: Quiz,
    mode: QuizMode,
    current_question_index: usize,
    selected_option: usize,
    answers: HashMap<String, String>,
    show_results: bool,
    /// Set once results were reached; lets a test-mode review show feedback.
    finished: bool,
}

impl QuizSession {
    pub fn new(quiz: Quiz) -> Self {
        Self {
            quiz,
            mode: QuizMode::Study,
            current_question_index: 0,
            selected_option: 0,
            answers: HashMap::new(),
            show_results: false,
            finished: false,
        }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    pub fn show_results(&self) -> bool {
        self.show_results
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.quiz.questions.get(self.current_question_index)
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    pub fn current_question_number(&self) -> usize {
        self.current_question_index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.quiz.questions.len()
    }

    pub fn is_last_question(&self) -> bool {
        self.current_question_index + 1 >= self.total_questions()
    }

    pub fn progress_percent(&self) -> f64 {
        if self.total_questions() == 0 {
            return 0.0;
        }
        self.current_question_number() as f64 / self.total_questions() as f64 * 100.0
    }

    pub fn answers(&self) -> &HashMap<String, String> {
        &self.answers
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    /// Mode can only change while the quiz is being taken.
    pub fn toggle_mode(&mut self) {
        if self.show_results {
            return;
        }
        self.mode = match self.mode {
            QuizMode::Study => QuizMode::Test,
            QuizMode::Test => QuizMode::Study,
        };
    }

    pub fn can_answer(&self) -> bool {
        !self.show_results && !self.finished
    }

    /// Records an answer, replacing any previous one for the question.
    pub fn answer(&mut self, question_id: &str, answer: impl Into<String>) {
        if !self.can_answer() {
            return;
        }
        self.answers.insert(question_id.to_string(), answer.into());
    }

    pub fn can_go_next(&self) -> bool {
        if self.show_results || self.total_questions() == 0 {
            return false;
        }
        match self.mode {
            QuizMode::Study => !self.is_last_question(),
            QuizMode::Test => true,
        }
    }

    pub fn can_go_previous(&self) -> bool {
        !self.show_results && self.current_question_index > 0
    }

    /// In test mode, "next" on the last question finishes the quiz.
    pub fn next(&mut self) {
        if !self.can_go_next() {
            return;
        }
        if !self.is_last_question() {
            self.current_question_index += 1;
            self.sync_cursor();
        } else if self.mode == QuizMode::Test {
            self.enter_results();
        }
    }

    pub fn previous(&mut self) {
        if self.can_go_previous() {
            self.current_question_index -= 1;
            self.sync_cursor();
        }
    }

    /// Only available in test mode, from any question.
    pub fn finish(&mut self) {
        if self.mode == QuizMode::Test && !self.show_results {
            self.enter_results();
        }
    }

    fn enter_results(&mut self) {
        self.show_results = true;
        self.finished = true;
    }

    pub fn retake(&mut self) {
        if !self.show_results {
            return;
        }
        self.show_results = false;
        self.finished = false;
        self.current_question_index = 0;
        self.answers.clear();
        self.sync_cursor();
    }

    pub fn review(&mut self) {
        if !self.show_results {
            return;
        }
        self.show_results = false;
    }

    pub fn feedback_visible(&self) -> bool {
        self.mode == QuizMode::Study || self.show_results || self.finished
    }

    pub fn is_answered_correctly(&self, question: &QuizQuestion) -> bool {
        self.answer_for(&question.id)
            .is_some_and(|answer| question.is_correct(answer))
    }

    pub fn score(&self) -> Score {
        let correct = self
            .quiz
            .questions
            .iter()
            .filter(|q| self.is_answered_correctly(q))
            .count();
        Score::new(correct, self.total_questions())
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    fn option_count(&self) -> usize {
        self.current_question().map_or(0, |q| q.options().len())
    }

    pub fn select_next_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.selected_option = (self.selected_option + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.selected_option = (self.selected_option + count - 1) % count;
        }
    }

    /// Records the option under the cursor for the current question.
    pub fn submit_selected_option(&mut self) {
        let Some(question) = self.current_question() else {
            return;
        };
        if !question.question_type.has_options() {
            return;
        }
        if let Some(option) = question.options().get(self.selected_option).cloned() {
            let id = question.id.clone();
            self.answer(&id, option);
        }
    }

    /// Appends typed text to a short answer.
    pub fn type_char(&mut self, c: char) {
        let Some(question) = self.current_question() else {
            return;
        };
        if question.question_type != QuestionType::ShortAnswer {
            return;
        }
        let id = question.id.clone();
        let mut text = self.answer_for(&id).unwrap_or_default().to_string();
        text.push(c);
        self.answer(&id, text);
    }

    pub fn backspace(&mut self) {
        let Some(question) = self.current_question() else {
            return;
        };
        if question.question_type != QuestionType::ShortAnswer {
            return;
        }
        let id = question.id.clone();
        if let Some(mut text) = self.answer_for(&id).map(str::to_string) {
            text.pop();
            self.answer(&id, text);
        }
    }

    /// Puts the option cursor on the recorded answer, or the first option.
    fn sync_cursor(&mut self) {
        self.selected_option = self
            .current_question()
            .and_then(|q| {
                let answer = self.answer_for(&q.id)?;
                q.options().iter().position(|o| o == answer)
            })
            .unwrap_or(0);
    }
}
