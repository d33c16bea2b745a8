use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use quiz_studio::api::{ApiError, HttpApiClient, QuizApi, UploadPayload};
use quiz_studio::config::ClientConfig;
use quiz_studio::models::{
    Difficulty, ProcessingStatus, QuestionType, QuizGenerationRequest, QuizUpdateRequest,
};

const QUIZ_JSON: &str = r#"{
    "id": "quiz-1",
    "title": "Biology",
    "source_file_id": "file-1",
    "questions": [{
        "id": "q1",
        "question": "What do plants make?",
        "question_type": "multiple_choice",
        "options": ["Glucose", "Salt"],
        "correct_answer": "Glucose"
    }],
    "created_at": "2024-03-01T10:00:00.123456"
}"#;

/// Serves exactly one response and hands back the raw request it received.
fn respond_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut request = String::new();
        let mut content_length = 0;

        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = value.trim().parse().unwrap();
            }
            request.push_str(&line);
            if line == "\r\n" || line.is_empty() {
                break;
            }
        }
        let mut body = vec![0; content_length];
        reader.read_exact(&mut body).unwrap();
        request.push_str(&String::from_utf8_lossy(&body));

        reader.get_mut().write_all(response.as_bytes()).unwrap();
        request
    });

    (format!("http://{}/api", addr), handle)
}

fn client(base_url: &str) -> HttpApiClient {
    HttpApiClient::new(&ClientConfig {
        api_base_url: base_url.to_string(),
        request_timeout: Duration::from_secs(5),
        generation_timeout: Duration::from_secs(5),
        ..ClientConfig::default()
    })
}

#[tokio::test]
async fn test_get_quiz_decodes_naive_timestamps() {
    let (url, server) = respond_once("200 OK", QUIZ_JSON);

    let quiz = client(&url).get_quiz("quiz-1").await.unwrap();

    assert_eq!(quiz.title, "Biology");
    assert_eq!(quiz.questions[0].question_type, QuestionType::MultipleChoice);
    assert!(quiz.metadata.is_empty());
    let request = server.join().unwrap();
    assert!(request.starts_with("GET /api/quizzes/quiz-1 HTTP/1.1"));
}

#[tokio::test]
async fn test_list_quizzes_sends_file_filter() {
    let (url, server) = respond_once("200 OK", &format!("[{}]", QUIZ_JSON));

    let quizzes = client(&url).list_quizzes(Some("file-1")).await.unwrap();

    assert_eq!(quizzes.len(), 1);
    assert!(server.join().unwrap().starts_with("GET /api/quizzes?file_id=file-1 "));
}

#[tokio::test]
async fn test_get_file_encodes_id_as_one_segment() {
    let body = r#"{"file_id":"a/b?c","filename":"notes.pdf","file_type":"pdf","file_size":2048,"upload_time":"2024-03-01T10:00:00","text_extracted":false}"#;
    let (url, server) = respond_once("200 OK", body);

    let file = client(&url).get_file("a/b?c").await.unwrap();

    assert_eq!(file.file_id, "a/b?c");
    assert!(!file.can_generate_quiz());
    assert!(server.join().unwrap().starts_with("GET /api/files/a%2Fb%3Fc "));
}

#[tokio::test]
async fn test_error_detail_becomes_message() {
    let (url, server) = respond_once("404 Not Found", r#"{"detail":"Quiz not found"}"#);

    let err = client(&url).delete_quiz("nope").await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Server {
            status: 404,
            message: "Quiz not found".to_string()
        }
    );
    assert!(server.join().unwrap().starts_with("DELETE /api/quizzes/nope "));
}

#[tokio::test]
async fn test_error_without_body_uses_status_line() {
    let (url, server) = respond_once("502 Bad Gateway", "");

    let err = client(&url).list_files().await.unwrap_err();

    assert_eq!(err.message(), "Request failed with status code 502");
    server.join().unwrap();
}

#[tokio::test]
async fn test_generation_failure_uses_backend_message() {
    let body = r#"{"quiz_id":"quiz-9","status":"failed","message":"Not enough text"}"#;
    let (url, server) = respond_once("200 OK", body);
    let request = QuizGenerationRequest {
        file_id: "file-1".to_string(),
        num_questions: 3,
        question_types: vec![QuestionType::TrueFalse],
        difficulty_level: Difficulty::Hard,
        focus_topics: Some(vec!["cells".to_string()]),
    };

    let err = client(&url).generate_quiz(request).await.unwrap_err();

    assert_eq!(err, ApiError::Generation("Not enough text".to_string()));
    let raw = server.join().unwrap();
    assert!(raw.starts_with("POST /api/generate-quiz "));
    assert!(raw.contains(r#""difficulty_level":"hard""#));
    assert!(raw.contains(r#""focus_topics":["cells"]"#));
}

#[tokio::test]
async fn test_update_sends_only_present_fields() {
    let (url, server) = respond_once("200 OK", QUIZ_JSON);

    client(&url)
        .update_quiz("quiz-1", QuizUpdateRequest::title("Biology"))
        .await
        .unwrap();

    let raw = server.join().unwrap();
    assert!(raw.starts_with("PUT /api/quizzes/quiz-1 "));
    assert!(raw.ends_with(r#"{"title":"Biology"}"#));
}

#[tokio::test]
async fn test_upload_sends_multipart_file_part() {
    let body = r#"{"file_id":"file-7","filename":"notes.txt","file_type":"txt","file_size":5,"status":"processing","message":"File uploaded successfully"}"#;
    let (url, server) = respond_once("200 OK", body);

    let response = client(&url)
        .upload_file(UploadPayload {
            filename: "notes.txt".to_string(),
            content_type: "text/plain".to_string(),
            data: b"hello".to_vec(),
        })
        .await
        .unwrap();

    assert_eq!(response.file_id, "file-7");
    assert_eq!(response.status, ProcessingStatus::Processing);
    let raw = server.join().unwrap();
    assert!(raw.contains("multipart/form-data; boundary="));
    assert!(raw.contains(r#"Content-Disposition: form-data; name="file"; filename="notes.txt""#));
    assert!(raw.contains("\r\n\r\nhello\r\n"));
}

#[tokio::test]
async fn test_health_is_served_outside_the_api_root() {
    let (url, server) = respond_once("200 OK", r#"{"status":"healthy","message":"ok"}"#);

    let health = client(&url).health().await.unwrap();

    assert_eq!(health.status, "healthy");
    assert!(server.join().unwrap().starts_with("GET /health "));
}

#[tokio::test]
async fn test_unreachable_backend_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}/api", addr))
        .list_files()
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
    assert!(!err.message().is_empty());
}
