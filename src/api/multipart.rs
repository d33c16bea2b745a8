//! Minimal `multipart/form-data` encoder for single-file uploads.

use uuid::Uuid;

pub struct MultipartBody {
    boundary: String,
    bytes: Vec<u8>,
}

impl MultipartBody {
    /// Encodes one file part under the given form field name.
    pub fn single_file(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Self {
        let boundary = format!("----quiz-studio-{}", Uuid::new_v4().simple());
        Self::with_boundary(boundary, field, filename, content_type, data)
    }

    fn with_boundary(
        boundary: String,
        field: &str,
        filename: &str,
        content_type: &str,
        data: &[u8],
    ) -> Self {
        let filename = filename.replace('"', "\\\"");
        let mut bytes = Vec::with_capacity(data.len() + 256);
        bytes.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        bytes.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                field, filename
            )
            .as_bytes(),
        );
        bytes.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        bytes.extend_from_slice(data);
        bytes.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

        Self { boundary, bytes }
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}
