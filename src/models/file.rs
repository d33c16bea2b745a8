use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Document formats the backend can extract text from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Docx,
    Txt,
}

impl FileType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
            Self::Txt => "TXT",
        }
    }
}

/// Backend-side processing state of an upload or a generation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

/// Metadata for an uploaded document. Only ever read by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    pub file_id: String,
    pub filename: String,
    pub file_type: FileType,
    pub file_size: u64,
    #[serde(with = "timestamp")]
    pub upload_time: DateTime<Utc>,
    pub text_extracted: bool,
    #[serde(default)]
    pub word_count: Option<u64>,
}

impl FileInfo {
    /// A quiz can only be generated once the backend has extracted the text.
    pub fn can_generate_quiz(&self) -> bool {
        self.text_extracted
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub file_id: String,
    pub filename: String,
    pub file_type: FileType,
    pub file_size: u64,
    pub status: ProcessingStatus,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextExtractionResult {
    pub file_id: String,
    pub text_content: String,
    pub word_count: u64,
    pub extraction_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}
