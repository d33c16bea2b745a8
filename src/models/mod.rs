mod file;
mod generation;
mod quiz;
pub(crate) mod timestamp;

pub use file::{FileInfo, FileType, HealthStatus, ProcessingStatus, TextExtractionResult, UploadResponse};
pub use generation::{Difficulty, QuizGenerationRequest, QuizGenerationResponse};
pub use quiz::{QuestionType, Quiz, QuizQuestion, QuizUpdateRequest};
