//! Top-level controller.
//!
//! Owns the active view, the global error banner and every prompt. Key
//! presses and network completions are the only inputs; requests for the
//! backend are the only outputs.

use std::path::PathBuf;

use crossterm::event::KeyCode;
use tracing::{debug, info};

use crate::collection::QuizCollection;
use crate::editor::QuizEditor;
use crate::models::{QuestionType, Quiz};
use crate::protocol::{Outcome, Request};
use crate::session::QuizSession;
use crate::upload::{OptionField, TextPreview, UploadCandidate, UploadPanel};

/// The screen being shown. Each variant carries exactly what it needs.
pub enum View {
    Upload,
    QuizList,
    QuizView(QuizSession),
    QuizEdit(QuizEditor),
}

impl View {
    /// Id of the quiz this view is showing, if any.
    pub fn quiz_id(&self) -> Option<&str> {
        match self {
            Self::QuizView(session) => Some(&session.quiz().id),
            Self::QuizEdit(editor) => Some(editor.quiz_id()),
            _ => None,
        }
    }
}

/// Actions that wait for a yes/no answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirm {
    DeleteQuiz { quiz_id: String, title: String },
    DeleteQuestion(String),
    DeleteFile { file_id: String, filename: String },
    DiscardEdits,
}

impl Confirm {
    pub fn prompt(&self) -> String {
        match self {
            Self::DeleteQuiz { title, .. } => {
                format!("Are you sure you want to delete the quiz \"{}\"?", title)
            }
            Self::DeleteQuestion(_) => "Are you sure you want to delete this question?".to_string(),
            Self::DeleteFile { filename, .. } => {
                format!("Are you sure you want to delete {}?", filename)
            }
            Self::DiscardEdits => {
                "You have unsaved changes. Are you sure you want to cancel?".to_string()
            }
        }
    }
}

/// Where a line of typed text ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputTarget {
    UploadPath,
    FocusTopics,
    Title,
    Description,
    QuestionText(String),
    Option { question_id: String, index: usize },
    SuggestedAnswer(String),
    Explanation(String),
}

impl InputTarget {
    pub fn label(&self) -> String {
        match self {
            Self::UploadPath => "Path to a PDF, DOCX or TXT file".to_string(),
            Self::FocusTopics => "Focus topics (comma separated)".to_string(),
            Self::Title => "Quiz title".to_string(),
            Self::Description => "Quiz description".to_string(),
            Self::QuestionText(_) => "Question".to_string(),
            Self::Option { index, .. } => format!("Option {}", option_label(*index)),
            Self::SuggestedAnswer(_) => "Suggested answer".to_string(),
            Self::Explanation(_) => "Explanation".to_string(),
        }
    }
}

pub const BUSY_NOTICE: &str = "Please wait for the current operation to finish.";

pub fn option_label(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    pub target: InputTarget,
    pub buffer: String,
}

pub struct App {
    pub view: View,
    pub upload: UploadPanel,
    pub collection: QuizCollection,
    banner: Option<String>,
    /// Inline message for the quiz and editor views.
    notice: Option<String>,
    /// A user-initiated file operation is in flight.
    busy: bool,
    busy_message: Option<&'static str>,
    confirm: Option<Confirm>,
    input: Option<TextInput>,
    /// Typing a short answer in the quiz view.
    answering: bool,
    list_cursor: usize,
    result_scroll: usize,
    pub should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            view: View::Upload,
            upload: UploadPanel::default(),
            collection: QuizCollection::new(),
            banner: None,
            notice: None,
            busy: false,
            busy_message: None,
            confirm: None,
            input: None,
            answering: false,
            list_cursor: 0,
            result_scroll: 0,
            should_quit: false,
        }
    }

    /// Initial background loads.
    pub fn startup(&mut self) -> Vec<Request> {
        self.collection.begin();
        vec![Request::LoadFiles, Request::LoadQuizzes]
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn confirm(&self) -> Option<&Confirm> {
        self.confirm.as_ref()
    }

    pub fn input(&self) -> Option<&TextInput> {
        self.input.as_ref()
    }

    pub fn is_answering(&self) -> bool {
        self.answering
    }

    pub fn list_cursor(&self) -> usize {
        self.list_cursor
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    /// True while any request that blocks new actions is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy || self.collection.is_loading()
    }

    pub fn busy_message(&self) -> Option<&'static str> {
        if self.busy_message.is_some() {
            self.busy_message
        } else if self.is_busy() {
            Some("Processing...")
        } else {
            None
        }
    }

    pub fn selected_quiz(&self) -> Option<&Quiz> {
        self.collection.quizzes().get(self.list_cursor)
    }

    fn show_banner(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!(%message, "showing error banner");
        self.banner = Some(message);
    }

    fn go_to(&mut self, view: View) {
        self.view = view;
        self.notice = None;
        self.answering = false;
        self.result_scroll = 0;
    }

    fn go_to_quiz(&mut self, quiz: Quiz) {
        self.go_to(View::QuizView(QuizSession::new(quiz)));
    }

    fn clamp_list_cursor(&mut self) {
        let len = self.collection.quizzes().len();
        self.list_cursor = self.list_cursor.min(len.saturating_sub(1));
    }

    /// Tells the user why an action did nothing.
    fn refuse_while_busy(&mut self, request: &Request) -> Vec<Request> {
        debug!(request = request.name(), "ignored while busy");
        let notice = Some(BUSY_NOTICE.to_string());
        if matches!(self.view, View::Upload) {
            self.upload.notice = notice;
        } else {
            self.notice = notice;
        }
        Vec::new()
    }

    /// Issues a collection request unless something is already in flight.
    fn collection_request(&mut self, request: Request, message: &'static str) -> Vec<Request> {
        if self.is_busy() {
            return self.refuse_while_busy(&request);
        }
        self.collection.begin();
        self.busy_message = Some(message);
        vec![request]
    }

    /// Issues a file request unless something is already in flight.
    fn file_request(&mut self, request: Request, message: &'static str) -> Vec<Request> {
        if self.is_busy() {
            return self.refuse_while_busy(&request);
        }
        self.busy = true;
        self.busy_message = Some(message);
        self.banner = None;
        vec![request]
    }

    fn reload_quizzes(&mut self) -> Vec<Request> {
        self.collection.begin();
        vec![Request::LoadQuizzes]
    }

    // ---- outcomes -------------------------------------------------------

    /// Applies a completed request; may ask for follow-up requests.
    pub fn apply_outcome(&mut self, outcome: Outcome) -> Vec<Request> {
        match outcome {
            Outcome::FilesLoaded(Ok(files)) => {
                self.upload.set_files(files);
                Vec::new()
            }
            Outcome::FilesLoaded(Err(_)) => {
                self.show_banner("Failed to load files");
                Vec::new()
            }
            Outcome::QuizzesLoaded(result) => {
                self.busy_message = None;
                self.collection.finish_load(result);
                self.clamp_list_cursor();
                Vec::new()
            }
            Outcome::Uploaded(result) => {
                self.busy = false;
                self.busy_message = None;
                match result {
                    Ok(response) => {
                        info!(file_id = %response.file_id, status = ?response.status, "file uploaded");
                        self.upload.notice = None;
                        if matches!(self.view, View::Upload) {
                            self.go_to(View::QuizList);
                        }
                        vec![Request::LoadFiles]
                    }
                    Err(err) => {
                        self.show_banner(err.message());
                        Vec::new()
                    }
                }
            }
            Outcome::FileDeleted { file_id, result } => {
                self.busy = false;
                self.busy_message = None;
                match result {
                    Ok(()) => {
                        if self.upload.preview.as_ref().is_some_and(|p| p.file_id == file_id) {
                            self.upload.preview = None;
                        }
                        vec![Request::LoadFiles]
                    }
                    Err(err) => {
                        self.show_banner(err.message());
                        Vec::new()
                    }
                }
            }
            Outcome::TextFetched { file_id, result } => {
                self.busy = false;
                self.busy_message = None;
                match result {
                    Ok(text) => {
                        self.upload.preview =
                            Some(TextPreview::new(file_id, text.word_count, &text.text_content));
                    }
                    Err(err) => self.show_banner(err.message()),
                }
                Vec::new()
            }
            Outcome::Generated(result) => {
                self.busy_message = None;
                match self.collection.finish_generate(result) {
                    Ok(quiz) => {
                        let form_open = self
                            .upload
                            .form
                            .as_ref()
                            .is_some_and(|form| form.file_id == quiz.source_file_id);
                        // Only open the quiz if its options form is still on screen.
                        let waiting = form_open && matches!(self.view, View::Upload);
                        if form_open {
                            self.upload.close_options();
                        }
                        if waiting {
                            self.list_cursor = 0;
                            self.go_to_quiz(quiz);
                        } else {
                            info!(quiz_id = %quiz.id, "generated quiz added in the background");
                        }
                        self.reload_quizzes()
                    }
                    Err(err) => {
                        self.show_banner(err.message());
                        Vec::new()
                    }
                }
            }
            Outcome::QuizUpdated { quiz_id, result } => {
                self.busy_message = None;
                match self.collection.finish_update(&quiz_id, result) {
                    Ok(quiz) => {
                        // Only leave the editor if the user is still in it.
                        let editing = matches!(&self.view, View::QuizEdit(e) if e.quiz_id() == quiz_id);
                        if editing {
                            self.go_to_quiz(quiz);
                        }
                        self.reload_quizzes()
                    }
                    Err(err) => {
                        self.show_banner(err.message());
                        Vec::new()
                    }
                }
            }
            Outcome::QuizDeleted { quiz_id, result } => {
                self.busy_message = None;
                match self.collection.finish_delete(&quiz_id, result) {
                    Ok(()) => {
                        if self.view.quiz_id() == Some(quiz_id.as_str()) {
                            self.go_to(View::QuizList);
                        }
                        self.clamp_list_cursor();
                        self.reload_quizzes()
                    }
                    Err(err) => {
                        self.show_banner(err.message());
                        Vec::new()
                    }
                }
            }
            Outcome::QuizDuplicated(result) => {
                self.busy_message = None;
                match self.collection.finish_duplicate(result) {
                    Ok(_) => {
                        self.list_cursor = 0;
                        self.reload_quizzes()
                    }
                    Err(err) => {
                        self.show_banner(err.message());
                        Vec::new()
                    }
                }
            }
        }
    }

    // ---- keys -----------------------------------------------------------

    /// Handles one key press.
    pub fn handle_key(&mut self, key: KeyCode) -> Vec<Request> {
        if self.confirm.is_some() {
            return self.handle_confirm_key(key);
        }
        if self.input.is_some() {
            return self.handle_input_key(key);
        }
        if key == KeyCode::Esc && self.banner.is_some() && !self.answering {
            self.dismiss_banner();
            return Vec::new();
        }

        match &self.view {
            View::Upload => self.handle_upload_key(key),
            View::QuizList => self.handle_list_key(key),
            View::QuizView(_) => self.handle_quiz_key(key),
            View::QuizEdit(_) => self.handle_editor_key(key),
        }
    }

    fn handle_confirm_key(&mut self, key: KeyCode) -> Vec<Request> {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                let Some(confirm) = self.confirm.take() else {
                    return Vec::new();
                };
                self.run_confirmed(confirm)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirm = None;
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn run_confirmed(&mut self, confirm: Confirm) -> Vec<Request> {
        match confirm {
            Confirm::DeleteQuiz { quiz_id, .. } => {
                self.collection_request(Request::DeleteQuiz(quiz_id), "Deleting quiz...")
            }
            Confirm::DeleteFile { file_id, .. } => {
                self.file_request(Request::DeleteFile(file_id), "Deleting file...")
            }
            Confirm::DeleteQuestion(question_id) => {
                if let View::QuizEdit(editor) = &mut self.view {
                    if let Err(err) = editor.delete_question(&question_id) {
                        self.notice = Some(err.to_string());
                    }
                }
                Vec::new()
            }
            Confirm::DiscardEdits => {
                self.leave_editor();
                Vec::new()
            }
        }
    }

    fn start_input(&mut self, target: InputTarget, initial: impl Into<String>) {
        self.input = Some(TextInput {
            target,
            buffer: initial.into(),
        });
    }

    fn handle_input_key(&mut self, key: KeyCode) -> Vec<Request> {
        let Some(input) = self.input.as_mut() else {
            return Vec::new();
        };
        match key {
            KeyCode::Char(c) => input.buffer.push(c),
            KeyCode::Backspace => {
                input.buffer.pop();
            }
            KeyCode::Esc => self.input = None,
            KeyCode::Enter => {
                if let Some(input) = self.input.take() {
                    return self.commit_input(input);
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn commit_input(&mut self, input: TextInput) -> Vec<Request> {
        let TextInput { target, buffer } = input;
        match target {
            InputTarget::UploadPath => return self.upload_path(PathBuf::from(buffer.trim())),
            InputTarget::FocusTopics => {
                if let Some(form) = self.upload.form.as_mut() {
                    form.options.focus_topics = buffer;
                }
            }
            target => {
                let View::QuizEdit(editor) = &mut self.view else {
                    return Vec::new();
                };
                let result = match target {
                    InputTarget::Title => {
                        editor.set_title(buffer);
                        Ok(())
                    }
                    InputTarget::Description => {
                        editor.set_description(buffer);
                        Ok(())
                    }
                    InputTarget::QuestionText(id) => editor.set_question_text(&id, buffer),
                    InputTarget::Option { question_id, index } => {
                        editor.set_option(&question_id, index, buffer)
                    }
                    InputTarget::SuggestedAnswer(id) => editor.set_correct_answer(&id, buffer),
                    InputTarget::Explanation(id) => editor.set_explanation(&id, buffer),
                    InputTarget::UploadPath | InputTarget::FocusTopics => Ok(()),
                };
                if let Err(err) = result {
                    self.notice = Some(err.to_string());
                }
            }
        }
        Vec::new()
    }

    fn upload_path(&mut self, path: PathBuf) -> Vec<Request> {
        let candidate = match UploadCandidate::from_path(&path) {
            Ok(candidate) => candidate,
            Err(err) => {
                self.upload.notice = Some(err.to_string());
                return Vec::new();
            }
        };
        if self.upload.validate(&candidate).is_err() {
            return Vec::new();
        }
        self.file_request(Request::Upload { path, candidate }, "Uploading...")
    }

    fn handle_upload_key(&mut self, key: KeyCode) -> Vec<Request> {
        if self.upload.form.is_some() {
            return self.handle_form_key(key);
        }
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::Char('2') => self.go_to(View::QuizList),
            KeyCode::Char('u') => self.start_input(InputTarget::UploadPath, ""),
            KeyCode::Down | KeyCode::Char('j') => self.upload.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.upload.select_previous(),
            KeyCode::Enter | KeyCode::Char('g') => {
                self.upload.open_options();
            }
            KeyCode::Char('r') => return vec![Request::LoadFiles],
            KeyCode::Char('p') => {
                if let Some(file) = self.upload.selected_file() {
                    if file.can_generate_quiz() {
                        let id = file.file_id.clone();
                        return self.file_request(Request::FetchText(id), "Loading text...");
                    }
                    self.upload.notice = Some("Text has not been extracted yet.".to_string());
                }
            }
            KeyCode::Char('x') => {
                if let Some(file) = self.upload.selected_file() {
                    self.confirm = Some(Confirm::DeleteFile {
                        file_id: file.file_id.clone(),
                        filename: file.filename.clone(),
                    });
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_form_key(&mut self, key: KeyCode) -> Vec<Request> {
        let Some(form) = self.upload.form.as_mut() else {
            return Vec::new();
        };
        match key {
            KeyCode::Esc => self.upload.close_options(),
            KeyCode::Down | KeyCode::Char('j') => form.cursor_down(),
            KeyCode::Up | KeyCode::Char('k') => form.cursor_up(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if form.field() == OptionField::FocusTopics {
                    let current = form.options.focus_topics.clone();
                    self.start_input(InputTarget::FocusTopics, current);
                } else if form.activate() {
                    return self.generate();
                }
            }
            KeyCode::Char('G') => return self.generate(),
            _ => {}
        }
        Vec::new()
    }

    fn generate(&mut self) -> Vec<Request> {
        match self.upload.generation_request() {
            Some(request) => {
                info!(file_id = %request.file_id, num_questions = request.num_questions, "requesting quiz generation");
                self.collection_request(Request::Generate(request), "Generating quiz...")
            }
            None => {
                self.upload.notice = Some("Select at least one question type.".to_string());
                Vec::new()
            }
        }
    }

    fn handle_list_key(&mut self, key: KeyCode) -> Vec<Request> {
        self.notice = None;
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::Char('1') | KeyCode::Char('n') => self.go_to(View::Upload),
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.collection.quizzes().len();
                if len > 0 {
                    self.list_cursor = (self.list_cursor + 1).min(len - 1);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.list_cursor = self.list_cursor.saturating_sub(1);
            }
            KeyCode::Enter => {
                if let Some(quiz) = self.selected_quiz().cloned() {
                    self.go_to_quiz(quiz);
                }
            }
            KeyCode::Char('e') => {
                if let Some(quiz) = self.selected_quiz() {
                    let editor = QuizEditor::new(quiz);
                    self.go_to(View::QuizEdit(editor));
                }
            }
            KeyCode::Char('d') => {
                if let Some(quiz) = self.selected_quiz() {
                    self.confirm = Some(Confirm::DeleteQuiz {
                        quiz_id: quiz.id.clone(),
                        title: quiz.title.clone(),
                    });
                }
            }
            KeyCode::Char('y') => {
                if let Some(id) = self.selected_quiz().map(|q| q.id.clone()) {
                    return self.collection_request(Request::DuplicateQuiz(id), "Duplicating quiz...");
                }
            }
            KeyCode::Char('r') => {
                if !self.is_busy() {
                    return self.reload_quizzes();
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_quiz_key(&mut self, key: KeyCode) -> Vec<Request> {
        let View::QuizView(session) = &mut self.view else {
            return Vec::new();
        };

        if self.answering {
            match key {
                KeyCode::Char(c) => session.type_char(c),
                KeyCode::Backspace => session.backspace(),
                KeyCode::Enter | KeyCode::Esc => self.answering = false,
                _ => {}
            }
            return Vec::new();
        }

        if session.show_results() {
            match key {
                KeyCode::Char('r') => {
                    session.retake();
                    self.result_scroll = 0;
                }
                KeyCode::Char('v') => session.review(),
                KeyCode::Down | KeyCode::Char('j') => {
                    let max = session.total_questions().saturating_sub(1);
                    self.result_scroll = (self.result_scroll + 1).min(max);
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.result_scroll = self.result_scroll.saturating_sub(1);
                }
                KeyCode::Char('b') | KeyCode::Esc => self.go_to(View::QuizList),
                KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
                _ => {}
            }
            return Vec::new();
        }

        match key {
            KeyCode::Left | KeyCode::Char('h') => session.previous(),
            KeyCode::Right | KeyCode::Char('l') => {
                session.next();
                if session.show_results() {
                    self.result_scroll = 0;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => session.select_next_option(),
            KeyCode::Up | KeyCode::Char('k') => session.select_previous_option(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let short_answer = session
                    .current_question()
                    .is_some_and(|q| q.question_type == QuestionType::ShortAnswer);
                if short_answer {
                    self.answering = session.can_answer();
                } else {
                    session.submit_selected_option();
                }
            }
            KeyCode::Char('m') => session.toggle_mode(),
            KeyCode::Char('f') => {
                session.finish();
                self.result_scroll = 0;
            }
            KeyCode::Char('e') => {
                let editor = QuizEditor::new(session.quiz());
                self.go_to(View::QuizEdit(editor));
            }
            KeyCode::Char('d') => {
                self.confirm = Some(Confirm::DeleteQuiz {
                    quiz_id: session.quiz().id.clone(),
                    title: session.quiz().title.clone(),
                });
            }
            KeyCode::Char('b') | KeyCode::Esc => self.go_to(View::QuizList),
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            _ => {}
        }
        Vec::new()
    }

    fn handle_editor_key(&mut self, key: KeyCode) -> Vec<Request> {
        let View::QuizEdit(editor) = &mut self.view else {
            return Vec::new();
        };
        self.notice = None;

        let selected = editor.selected_question().cloned();
        let result = match (key, selected) {
            (KeyCode::Down | KeyCode::Char('j'), _) => {
                editor.select_next();
                Ok(())
            }
            (KeyCode::Up | KeyCode::Char('k'), _) => {
                editor.select_previous();
                Ok(())
            }
            (KeyCode::Enter, _) => {
                editor.toggle_expanded();
                Ok(())
            }
            (KeyCode::Char('a'), _) => {
                editor.add_question();
                Ok(())
            }
            (KeyCode::Char('T'), _) => {
                let title = editor.title().to_string();
                self.start_input(InputTarget::Title, title);
                Ok(())
            }
            (KeyCode::Char('D'), _) => {
                let description = editor.description().to_string();
                self.start_input(InputTarget::Description, description);
                Ok(())
            }
            (KeyCode::Char('s'), _) => {
                let quiz_id = editor.quiz_id().to_string();
                let update = editor.to_update_request();
                return self.collection_request(Request::UpdateQuiz { quiz_id, update }, "Saving quiz...");
            }
            (KeyCode::Esc, _) => {
                if editor.needs_cancel_confirmation() {
                    self.confirm = Some(Confirm::DiscardEdits);
                } else {
                    self.leave_editor();
                }
                Ok(())
            }
            (KeyCode::Char('K'), Some(q)) => editor.move_up(&q.id),
            (KeyCode::Char('J'), Some(q)) => editor.move_down(&q.id),
            (KeyCode::Char('t'), Some(q)) => editor.change_type(&q.id, q.question_type.cycle()),
            (KeyCode::Char('v'), Some(q)) => editor.cycle_difficulty(&q.id),
            (KeyCode::Char('o'), Some(_)) => {
                editor.cycle_option_cursor();
                Ok(())
            }
            (KeyCode::Char('d'), Some(q)) => match editor.can_delete(&q.id) {
                Ok(()) => {
                    self.confirm = Some(Confirm::DeleteQuestion(q.id));
                    Ok(())
                }
                Err(err) => Err(err),
            },
            (KeyCode::Char('w'), Some(q)) => {
                self.start_input(InputTarget::QuestionText(q.id), q.question);
                Ok(())
            }
            (KeyCode::Char('O'), Some(q)) => {
                let index = editor.option_cursor();
                if q.question_type == QuestionType::MultipleChoice {
                    if let Some(option) = q.options().get(index).cloned() {
                        self.start_input(
                            InputTarget::Option {
                                question_id: q.id,
                                index,
                            },
                            option,
                        );
                    }
                }
                Ok(())
            }
            (KeyCode::Char('c'), Some(q)) => {
                if q.question_type.has_options() {
                    match q.options().get(editor.option_cursor()).cloned() {
                        Some(option) => editor.set_correct_answer(&q.id, option),
                        None => Ok(()),
                    }
                } else {
                    self.start_input(InputTarget::SuggestedAnswer(q.id), q.correct_answer);
                    Ok(())
                }
            }
            (KeyCode::Char('x'), Some(q)) => {
                let current = q.explanation.unwrap_or_default();
                self.start_input(InputTarget::Explanation(q.id), current);
                Ok(())
            }
            _ => Ok(()),
        };

        if let Err(err) = result {
            self.notice = Some(err.to_string());
        }
        Vec::new()
    }

    /// Back to the quiz view of the stored copy, discarding the buffer.
    fn leave_editor(&mut self) {
        let stored = self
            .view
            .quiz_id()
            .and_then(|id| self.collection.get(id))
            .cloned();
        match stored {
            Some(quiz) => self.go_to_quiz(quiz),
            None => self.go_to(View::QuizList),
        }
    }
}
