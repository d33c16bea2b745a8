//! Upload & generation panel.
//!
//! Validates documents before they ever reach the network, keeps the list
//! of uploaded files, and collects quiz generation options.

use std::collections::BTreeSet;
use std::path::Path;

use thiserror::Error;

use crate::api::UploadPayload;
use crate::models::{Difficulty, FileInfo, QuestionType, QuizGenerationRequest};

pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

const MIME_PDF: &str = "application/pdf";
const MIME_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const MIME_TXT: &str = "text/plain";

const ACCEPTED_MIME_TYPES: [&str; 3] = [MIME_PDF, MIME_DOCX, MIME_TXT];
const ACCEPTED_EXTENSIONS: [&str; 3] = [".pdf", ".docx", ".txt"];

/// Choices offered for the number of questions.
pub const QUESTION_COUNTS: [u32; 4] = [3, 5, 8, 10];
const DEFAULT_QUESTION_COUNT: u32 = 5;

/// Local rejection of a candidate file. Never leaves the panel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please upload a PDF, DOCX, or TXT file.")]
    UnsupportedType,
    #[error("File size must be less than 10MB.")]
    TooLarge,
    #[error("Could not read file: {0}")]
    Unreadable(String),
}

/// A file the user wants to upload, as far as validation is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCandidate {
    pub filename: String,
    /// Declared MIME type, when the source provides one.
    pub mime_type: Option<String>,
    pub size: u64,
}

impl UploadCandidate {
    pub fn new(filename: impl Into<String>, mime_type: Option<&str>, size: u64) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.map(str::to_string),
            size,
        }
    }

    /// Reads name and size from disk. Local files carry no declared MIME type.
    pub fn from_path(path: &Path) -> Result<Self, ValidationError> {
        let metadata =
            std::fs::metadata(path).map_err(|e| ValidationError::Unreadable(e.to_string()))?;
        if !metadata.is_file() {
            return Err(ValidationError::Unreadable(format!(
                "{} is not a file",
                path.display()
            )));
        }
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(filename, None, metadata.len()))
    }

    /// Content type sent with the upload: the declared one, else by extension.
    pub fn content_type(&self) -> &str {
        if let Some(mime) = &self.mime_type {
            if ACCEPTED_MIME_TYPES.contains(&mime.as_str()) {
                return mime;
            }
        }
        mime_for_filename(&self.filename)
    }

    pub fn into_payload(self, data: Vec<u8>) -> UploadPayload {
        UploadPayload {
            content_type: self.content_type().to_string(),
            filename: self.filename,
            data,
        }
    }
}

fn mime_for_filename(filename: &str) -> &'static str {
    let lower = filename.to_lowercase();
    if lower.ends_with(".pdf") {
        MIME_PDF
    } else if lower.ends_with(".docx") {
        MIME_DOCX
    } else if lower.ends_with(".txt") {
        MIME_TXT
    } else {
        "application/octet-stream"
    }
}

/// Type passes if either the declared MIME type or the extension is accepted.
pub fn validate_upload(candidate: &UploadCandidate) -> Result<(), ValidationError> {
    let mime_ok = candidate
        .mime_type
        .as_deref()
        .is_some_and(|mime| ACCEPTED_MIME_TYPES.contains(&mime));
    let lower = candidate.filename.to_lowercase();
    let extension_ok = ACCEPTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext));

    if !(mime_ok || extension_ok) {
        return Err(ValidationError::UnsupportedType);
    }
    if candidate.size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::TooLarge);
    }
    Ok(())
}

/// Human readable size, e.g. `2 MB` or `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[exponent])
}

/// Options for a generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    pub num_questions: u32,
    pub question_types: BTreeSet<QuestionType>,
    pub difficulty: Difficulty,
    /// Raw comma separated input.
    pub focus_topics: String,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            num_questions: DEFAULT_QUESTION_COUNT,
            question_types: BTreeSet::from([QuestionType::MultipleChoice]),
            difficulty: Difficulty::Medium,
            focus_topics: String::new(),
        }
    }
}

impl GenerationOptions {
    pub fn cycle_question_count(&mut self) {
        let position = QUESTION_COUNTS
            .iter()
            .position(|count| *count == self.num_questions);
        self.num_questions = match position {
            Some(index) => QUESTION_COUNTS[(index + 1) % QUESTION_COUNTS.len()],
            None => DEFAULT_QUESTION_COUNT,
        };
    }

    pub fn toggle_type(&mut self, question_type: QuestionType) {
        if !self.question_types.remove(&question_type) {
            self.question_types.insert(question_type);
        }
    }

    pub fn cycle_difficulty(&mut self) {
        self.difficulty = self.difficulty.cycle();
    }

    pub fn can_generate(&self) -> bool {
        !self.question_types.is_empty()
    }

    pub fn parsed_focus_topics(&self) -> Option<Vec<String>> {
        let topics: Vec<String> = self
            .focus_topics
            .split(',')
            .map(str::trim)
            .filter(|topic| !topic.is_empty())
            .map(str::to_string)
            .collect();
        (!topics.is_empty()).then_some(topics)
    }

    /// `None` while no question type is selected.
    pub fn to_request(&self, file_id: &str) -> Option<QuizGenerationRequest> {
        if !self.can_generate() {
            return None;
        }
        Some(QuizGenerationRequest {
            file_id: file_id.to_string(),
            num_questions: self.num_questions,
            question_types: self.question_types.iter().copied().collect(),
            difficulty_level: self.difficulty,
            focus_topics: self.parsed_focus_topics(),
        })
    }
}

/// Rows of the generation options form, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionField {
    QuestionCount,
    Type(QuestionType),
    Difficulty,
    FocusTopics,
    Generate,
}

impl OptionField {
    pub const ORDER: [OptionField; 7] = [
        OptionField::QuestionCount,
        OptionField::Type(QuestionType::MultipleChoice),
        OptionField::Type(QuestionType::TrueFalse),
        OptionField::Type(QuestionType::ShortAnswer),
        OptionField::Difficulty,
        OptionField::FocusTopics,
        OptionField::Generate,
    ];
}

/// Generation form opened for one eligible file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsForm {
    pub file_id: String,
    pub options: GenerationOptions,
    pub cursor: usize,
}

impl OptionsForm {
    pub fn field(&self) -> OptionField {
        OptionField::ORDER[self.cursor]
    }

    pub fn cursor_down(&mut self) {
        self.cursor = (self.cursor + 1).min(OptionField::ORDER.len() - 1);
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Changes the value under the cursor. Returns true for the generate row.
    pub fn activate(&mut self) -> bool {
        match self.field() {
            OptionField::QuestionCount => self.options.cycle_question_count(),
            OptionField::Type(question_type) => self.options.toggle_type(question_type),
            OptionField::Difficulty => self.options.cycle_difficulty(),
            OptionField::FocusTopics => {}
            OptionField::Generate => return true,
        }
        false
    }
}

/// Short excerpt of a file's extracted text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPreview {
    pub file_id: String,
    pub word_count: u64,
    pub excerpt: String,
}

const PREVIEW_CHARS: usize = 400;

impl TextPreview {
    pub fn new(file_id: String, word_count: u64, text: &str) -> Self {
        let mut excerpt: String = text.chars().take(PREVIEW_CHARS).collect();
        if text.chars().count() > PREVIEW_CHARS {
            excerpt.push_str("...");
        }
        Self {
            file_id,
            word_count,
            excerpt,
        }
    }
}

#[derive(Debug, Default)]
pub struct UploadPanel {
    files: Vec<FileInfo>,
    selected: usize,
    /// Inline message for validation failures and ineligible files.
    pub notice: Option<String>,
    pub form: Option<OptionsForm>,
    pub preview: Option<TextPreview>,
}

impl UploadPanel {
    pub fn files(&self) -> &[FileInfo] {
        &self.files
    }

    pub fn set_files(&mut self, files: Vec<FileInfo>) {
        let selected_id = self.selected_file().map(|f| f.file_id.clone());
        self.files = files;
        self.selected = selected_id
            .and_then(|id| self.files.iter().position(|f| f.file_id == id))
            .unwrap_or(0);
        if let Some(form) = &self.form {
            if !self.files.iter().any(|f| f.file_id == form.file_id) {
                self.form = None;
            }
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_file(&self) -> Option<&FileInfo> {
        self.files.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.files.is_empty() {
            self.selected = (self.selected + 1).min(self.files.len() - 1);
        }
        self.preview = None;
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.preview = None;
    }

    /// Checks a candidate, recording the message inline on failure.
    pub fn validate(&mut self, candidate: &UploadCandidate) -> Result<(), ValidationError> {
        let result = validate_upload(candidate);
        self.notice = result.as_ref().err().map(ToString::to_string);
        result
    }

    /// Opens the generation form for the selected file if its text is ready.
    pub fn open_options(&mut self) -> bool {
        let Some(file) = self.selected_file() else {
            return false;
        };
        if !file.can_generate_quiz() {
            self.notice = Some(format!(
                "Text extraction for {} has not completed yet.",
                file.filename
            ));
            return false;
        }
        self.form = Some(OptionsForm {
            file_id: file.file_id.clone(),
            options: GenerationOptions::default(),
            cursor: 0,
        });
        self.notice = None;
        true
    }

    pub fn close_options(&mut self) {
        self.form = None;
    }

    pub fn generation_request(&self) -> Option<QuizGenerationRequest> {
        self.form
            .as_ref()
            .and_then(|form| form.options.to_request(&form.file_id))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::FileType;

    fn file(id: &str, extracted: bool) -> FileInfo {
        FileInfo {
            file_id: id.to_string(),
            filename: format!("{}.txt", id),
            file_type: FileType::Txt,
            file_size: 2 * 1024 * 1024,
            upload_time: Utc::now(),
            text_extracted: extracted,
            word_count: extracted.then_some(420),
        }
    }

    #[test]
    fn test_accepts_valid_type_and_size() {
        for (name, mime) in [
            ("notes.pdf", None),
            ("NOTES.DOCX", None),
            ("notes.txt", None),
            ("no-extension", Some(MIME_PDF)),
            ("weird.bin", Some(MIME_TXT)),
            ("notes.txt", Some("application/octet-stream")),
        ] {
            let candidate = UploadCandidate::new(name, mime, MAX_UPLOAD_BYTES);
            assert_eq!(validate_upload(&candidate), Ok(()), "{}", name);
        }
    }

    #[test]
    fn test_rejects_unsupported_type() {
        let candidate = UploadCandidate::new("slides.pptx", Some("application/vnd.ms-powerpoint"), 10);
        assert_eq!(
            validate_upload(&candidate),
            Err(ValidationError::UnsupportedType)
        );
    }

    #[test]
    fn test_rejects_oversized_file() {
        let candidate = UploadCandidate::new("book.pdf", None, MAX_UPLOAD_BYTES + 1);
        let err = validate_upload(&candidate).unwrap_err();
        assert_eq!(err, ValidationError::TooLarge);
        assert_eq!(err.to_string(), "File size must be less than 10MB.");
    }

    #[test]
    fn test_type_checked_before_size() {
        let candidate = UploadCandidate::new("movie.mp4", None, MAX_UPLOAD_BYTES * 3);
        assert_eq!(
            validate_upload(&candidate),
            Err(ValidationError::UnsupportedType)
        );
    }

    #[test]
    fn test_panel_records_validation_notice() {
        let mut panel = UploadPanel::default();
        let bad = UploadCandidate::new("image.png", Some("image/png"), 100);
        assert!(panel.validate(&bad).is_err());
        assert_eq!(
            panel.notice.as_deref(),
            Some("Please upload a PDF, DOCX, or TXT file.")
        );

        let good = UploadCandidate::new("notes.txt", None, 100);
        assert!(panel.validate(&good).is_ok());
        assert_eq!(panel.notice, None);
    }

    #[test]
    fn test_content_type_falls_back_to_extension() {
        let candidate = UploadCandidate::new("Thesis.DOCX", None, 1);
        assert_eq!(candidate.content_type(), MIME_DOCX);
        let payload = candidate.into_payload(vec![1, 2, 3]);
        assert_eq!(payload.filename, "Thesis.DOCX");
        assert_eq!(payload.data, vec![1, 2, 3]);
    }

    #[test]
    fn test_default_options() {
        let options = GenerationOptions::default();
        let request = options.to_request("f1").unwrap();
        assert_eq!(request.num_questions, 5);
        assert_eq!(request.question_types, vec![QuestionType::MultipleChoice]);
        assert_eq!(request.difficulty_level, Difficulty::Medium);
        assert_eq!(request.focus_topics, None);
    }

    #[test]
    fn test_generate_disabled_without_types() {
        let mut options = GenerationOptions::default();
        options.toggle_type(QuestionType::MultipleChoice);
        assert!(!options.can_generate());
        assert_eq!(options.to_request("f1"), None);

        options.toggle_type(QuestionType::TrueFalse);
        assert!(options.can_generate());
    }

    #[test]
    fn test_focus_topics_parsing() {
        let options = GenerationOptions {
            focus_topics: " borrowing, , lifetimes ,".to_string(),
            ..GenerationOptions::default()
        };
        assert_eq!(
            options.parsed_focus_topics(),
            Some(vec!["borrowing".to_string(), "lifetimes".to_string()])
        );
    }

    #[test]
    fn test_question_count_cycles() {
        let mut options = GenerationOptions::default();
        let seen: Vec<u32> = (0..4)
            .map(|_| {
                options.cycle_question_count();
                options.num_questions
            })
            .collect();
        assert_eq!(seen, vec![8, 10, 3, 5]);
    }

    #[test]
    fn test_options_only_for_extracted_files() {
        let mut panel = UploadPanel::default();
        panel.set_files(vec![file("pending", false), file("ready", true)]);

        assert!(!panel.open_options());
        assert!(panel.form.is_none());
        assert!(panel.notice.is_some());

        panel.select_next();
        assert!(panel.open_options());
        assert_eq!(panel.generation_request().unwrap().file_id, "ready");
    }

    #[test]
    fn test_selection_survives_refresh() {
        let mut panel = UploadPanel::default();
        panel.set_files(vec![file("a", true), file("b", true)]);
        panel.select_next();
        panel.set_files(vec![file("new", false), file("a", true), file("b", true)]);
        assert_eq!(panel.selected_file().unwrap().file_id, "b");
    }

    #[test]
    fn test_form_activation() {
        let mut panel = UploadPanel::default();
        panel.set_files(vec![file("ready", true)]);
        panel.open_options();
        let form = panel.form.as_mut().unwrap();

        form.cursor_down();
        assert_eq!(form.field(), OptionField::Type(QuestionType::MultipleChoice));
        assert!(!form.activate());
        assert!(!form.options.can_generate());

        for _ in 0..10 {
            form.cursor_down();
        }
        assert_eq!(form.field(), OptionField::Generate);
        assert!(form.activate());
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(2 * 1024 * 1024), "2 MB");
    }

    #[test]
    fn test_preview_truncates() {
        let text = "word ".repeat(200);
        let preview = TextPreview::new("f".to_string(), 200, &text);
        assert!(preview.excerpt.ends_with("..."));
        assert_eq!(preview.excerpt.chars().count(), PREVIEW_CHARS + 3);
    }
}
