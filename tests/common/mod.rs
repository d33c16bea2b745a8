//! In-memory backend shared by the integration tests.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use quiz_studio::api::{ApiError, ApiResult, QuizApi, UploadPayload};
use quiz_studio::models::{
    FileInfo, FileType, HealthStatus, ProcessingStatus, QuestionType, Quiz, QuizGenerationRequest,
    QuizQuestion, QuizUpdateRequest, TextExtractionResult, UploadResponse,
};
use serde_json::Map;

pub fn question(id: &str, text: &str, options: &[&str], answer: &str) -> QuizQuestion {
    QuizQuestion {
        id: id.to_string(),
        question: text.to_string(),
        question_type: QuestionType::MultipleChoice,
        options: Some(options.iter().map(|o| o.to_string()).collect()),
        correct_answer: answer.to_string(),
        explanation: Some(format!("Because {}", answer)),
        difficulty: Some("medium".to_string()),
    }
}

pub fn quiz(id: &str, title: &str) -> Quiz {
    Quiz {
        id: id.to_string(),
        title: title.to_string(),
        description: None,
        source_file_id: "file-1".to_string(),
        questions: vec![
            question("q1", "2 + 2?", &["3", "4"], "4"),
            question("q2", "Capital of France?", &["Paris", "Rome"], "Paris"),
        ],
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        updated_at: None,
        metadata: Map::new(),
    }
}

pub fn file(id: &str, extracted: bool) -> FileInfo {
    FileInfo {
        file_id: id.to_string(),
        filename: format!("{}.pdf", id),
        file_type: FileType::Pdf,
        file_size: 2048,
        upload_time: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        text_extracted: extracted,
        word_count: extracted.then_some(120),
    }
}

/// `num_questions` questions, cycling through the requested types.
pub fn generated_questions(request: &QuizGenerationRequest) -> Vec<QuizQuestion> {
    let types = if request.question_types.is_empty() {
        vec![QuestionType::MultipleChoice]
    } else {
        request.question_types.clone()
    };
    (0..request.num_questions as usize)
        .map(|i| {
            let id = format!("g{}", i + 1);
            let text = format!("Generated question {}", i + 1);
            match types[i % types.len()] {
                QuestionType::MultipleChoice => {
                    question(&id, &text, &["Option A", "Option B", "Option C", "Option D"], "Option B")
                }
                QuestionType::TrueFalse => {
                    let mut q = question(&id, &text, &["True", "False"], "False");
                    q.question_type = QuestionType::TrueFalse;
                    q
                }
                QuestionType::ShortAnswer => {
                    let mut q = question(&id, &text, &[], "Chlorophyll");
                    q.question_type = QuestionType::ShortAnswer;
                    q.options = None;
                    q
                }
            }
        })
        .collect()
}

/// Backend state kept in memory. `fail_with` makes the next call fail.
#[derive(Default)]
pub struct FakeApi {
    pub quizzes: Mutex<Vec<Quiz>>,
    pub files: Mutex<Vec<FileInfo>>,
    pub fail_with: Mutex<Option<ApiError>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn with_quizzes(quizzes: Vec<Quiz>) -> Self {
        Self {
            quizzes: Mutex::new(quizzes),
            ..Self::default()
        }
    }

    pub fn fail_next(&self, err: ApiError) {
        *self.fail_with.lock().unwrap() = Some(err);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn enter(&self, call: &str) -> ApiResult<()> {
        self.calls.lock().unwrap().push(call.to_string());
        match self.fail_with.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn find(&self, quiz_id: &str) -> ApiResult<Quiz> {
        self.quizzes
            .lock()
            .unwrap()
            .iter()
            .find(|q| q.id == quiz_id)
            .cloned()
            .ok_or_else(|| ApiError::from_response(404, r#"{"detail":"Quiz not found"}"#))
    }
}

#[async_trait]
impl QuizApi for FakeApi {
    async fn upload_file(&self, payload: UploadPayload) -> ApiResult<UploadResponse> {
        self.enter("upload_file")?;
        let id = format!("file-{}", self.files.lock().unwrap().len() + 1);
        // Extraction finishes later, on the backend's schedule.
        let mut info = file(&id, false);
        info.filename = payload.filename.clone();
        info.file_size = payload.data.len() as u64;
        self.files.lock().unwrap().push(info);
        Ok(UploadResponse {
            file_id: id,
            filename: payload.filename,
            file_type: FileType::Pdf,
            file_size: payload.data.len() as u64,
            status: ProcessingStatus::Processing,
            message: "File uploaded".to_string(),
        })
    }

    async fn list_files(&self) -> ApiResult<Vec<FileInfo>> {
        self.enter("list_files")?;
        Ok(self.files.lock().unwrap().clone())
    }

    async fn get_file(&self, file_id: &str) -> ApiResult<FileInfo> {
        self.enter("get_file")?;
        self.files
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.file_id == file_id)
            .cloned()
            .ok_or_else(|| ApiError::from_response(404, r#"{"detail":"File not found"}"#))
    }

    async fn get_extracted_text(&self, file_id: &str) -> ApiResult<TextExtractionResult> {
        self.enter("get_extracted_text")?;
        Ok(TextExtractionResult {
            file_id: file_id.to_string(),
            text_content: "Photosynthesis converts light into energy.".to_string(),
            word_count: 5,
            extraction_time: 0.2,
        })
    }

    async fn delete_file(&self, file_id: &str) -> ApiResult<()> {
        self.enter("delete_file")?;
        self.files.lock().unwrap().retain(|f| f.file_id != file_id);
        Ok(())
    }

    async fn generate_quiz(&self, request: QuizGenerationRequest) -> ApiResult<Quiz> {
        self.enter("generate_quiz")?;
        let count = self.quizzes.lock().unwrap().len();
        let mut generated = quiz(&format!("gen-{}", count + 1), "Generated quiz");
        generated.source_file_id = request.file_id.clone();
        generated.questions = generated_questions(&request);
        self.quizzes.lock().unwrap().insert(0, generated.clone());
        Ok(generated)
    }

    async fn list_quizzes(&self, file_id: Option<&str>) -> ApiResult<Vec<Quiz>> {
        self.enter("list_quizzes")?;
        let quizzes = self.quizzes.lock().unwrap();
        Ok(quizzes
            .iter()
            .filter(|q| file_id.is_none_or(|id| q.source_file_id == id))
            .cloned()
            .collect())
    }

    async fn get_quiz(&self, quiz_id: &str) -> ApiResult<Quiz> {
        self.enter("get_quiz")?;
        self.find(quiz_id)
    }

    async fn update_quiz(&self, quiz_id: &str, update: QuizUpdateRequest) -> ApiResult<Quiz> {
        self.enter("update_quiz")?;
        let mut quiz = self.find(quiz_id)?;
        update.apply_to(&mut quiz);
        quiz.updated_at = Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
        let mut quizzes = self.quizzes.lock().unwrap();
        if let Some(slot) = quizzes.iter_mut().find(|q| q.id == quiz_id) {
            *slot = quiz.clone();
        }
        Ok(quiz)
    }

    async fn delete_quiz(&self, quiz_id: &str) -> ApiResult<()> {
        self.enter("delete_quiz")?;
        self.find(quiz_id)?;
        self.quizzes.lock().unwrap().retain(|q| q.id != quiz_id);
        Ok(())
    }

    async fn duplicate_quiz(&self, quiz_id: &str) -> ApiResult<Quiz> {
        self.enter("duplicate_quiz")?;
        let mut copy = self.find(quiz_id)?;
        copy.id = format!("{}-copy", quiz_id);
        copy.title = format!("{} (Copy)", copy.title);
        self.quizzes.lock().unwrap().insert(0, copy.clone());
        Ok(copy)
    }

    async fn health(&self) -> ApiResult<HealthStatus> {
        self.enter("health")?;
        Ok(HealthStatus {
            status: "healthy".to_string(),
            message: "ok".to_string(),
        })
    }
}
