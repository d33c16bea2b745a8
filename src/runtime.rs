//! Event loop and request execution.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::{ApiError, QuizApi};
use crate::app::App;
use crate::protocol::{Outcome, Request};
use crate::terminal::TerminalSession;
use crate::ui;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Performs one request against the backend.
pub async fn perform(api: &dyn QuizApi, request: Request) -> Outcome {
    match request {
        Request::LoadFiles => Outcome::FilesLoaded(api.list_files().await),
        Request::LoadQuizzes => Outcome::QuizzesLoaded(api.list_quizzes(None).await),
        Request::Upload { path, candidate } => {
            let result = match tokio::fs::read(&path).await {
                Ok(data) => api.upload_file(candidate.into_payload(data)).await,
                Err(e) => Err(ApiError::network(format!(
                    "Could not read {}: {}",
                    path.display(),
                    e
                ))),
            };
            Outcome::Uploaded(result)
        }
        Request::DeleteFile(file_id) => {
            let result = api.delete_file(&file_id).await;
            Outcome::FileDeleted { file_id, result }
        }
        Request::FetchText(file_id) => {
            let result = api.get_extracted_text(&file_id).await;
            Outcome::TextFetched { file_id, result }
        }
        Request::Generate(request) => Outcome::Generated(api.generate_quiz(request).await),
        Request::UpdateQuiz { quiz_id, update } => {
            let result = api.update_quiz(&quiz_id, update).await;
            Outcome::QuizUpdated { quiz_id, result }
        }
        Request::DeleteQuiz(quiz_id) => {
            let result = api.delete_quiz(&quiz_id).await;
            Outcome::QuizDeleted { quiz_id, result }
        }
        Request::DuplicateQuiz(quiz_id) => {
            Outcome::QuizDuplicated(api.duplicate_quiz(&quiz_id).await)
        }
    }
}

/// Runs each request on its own task and reports back on `tx`.
pub fn dispatch(
    api: &Arc<dyn QuizApi>,
    tx: &mpsc::UnboundedSender<Outcome>,
    requests: Vec<Request>,
) {
    for request in requests {
        debug!(
            request = request.name(),
            collection = request.uses_collection(),
            "dispatching"
        );
        let api = Arc::clone(api);
        let tx = tx.clone();
        tokio::spawn(async move {
            let outcome = perform(api.as_ref(), request).await;
            // The receiver is gone only once the loop has exited.
            let _ = tx.send(outcome);
        });
    }
}

/// Applies every completion that has arrived, dispatching follow-ups.
pub fn drain_outcomes(
    app: &mut App,
    api: &Arc<dyn QuizApi>,
    tx: &mpsc::UnboundedSender<Outcome>,
    rx: &mut mpsc::UnboundedReceiver<Outcome>,
) {
    while let Ok(outcome) = rx.try_recv() {
        let follow_up = app.apply_outcome(outcome);
        dispatch(api, tx, follow_up);
    }
}

/// Run the interactive client until the user quits.
pub async fn run_tui(api: Arc<dyn QuizApi>) -> std::io::Result<()> {
    let mut app = App::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<Outcome>();

    let mut session = TerminalSession::start()?;
    info!("terminal session started");

    let startup = app.startup();
    dispatch(&api, &tx, startup);

    while !app.should_quit {
        drain_outcomes(&mut app, &api, &tx, &mut rx);

        session.terminal().draw(|frame| ui::render(frame, &app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let requests = app.handle_key(key.code);
                dispatch(&api, &tx, requests);
            }
        }
    }

    if let Err(e) = session.finish() {
        warn!(error = %e, "failed to restore terminal");
        return Err(e);
    }
    info!("terminal session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiResult, UploadPayload};
    use crate::models::{
        FileInfo, HealthStatus, Quiz, QuizGenerationRequest, QuizUpdateRequest,
        TextExtractionResult, UploadResponse,
    };
    use crate::upload::UploadCandidate;
    use async_trait::async_trait;

    /// Every call fails with the operation's name, so dispatch is observable.
    struct Failing;

    fn fail<T>(op: &str) -> ApiResult<T> {
        Err(ApiError::network(op))
    }

    #[async_trait]
    impl QuizApi for Failing {
        async fn upload_file(&self, payload: UploadPayload) -> ApiResult<UploadResponse> {
            fail(&format!("upload {}", payload.filename))
        }
        async fn list_files(&self) -> ApiResult<Vec<FileInfo>> {
            fail("list_files")
        }
        async fn get_file(&self, _: &str) -> ApiResult<FileInfo> {
            fail("get_file")
        }
        async fn get_extracted_text(&self, _: &str) -> ApiResult<TextExtractionResult> {
            fail("get_extracted_text")
        }
        async fn delete_file(&self, _: &str) -> ApiResult<()> {
            fail("delete_file")
        }
        async fn generate_quiz(&self, _: QuizGenerationRequest) -> ApiResult<Quiz> {
            fail("generate_quiz")
        }
        async fn list_quizzes(&self, _: Option<&str>) -> ApiResult<Vec<Quiz>> {
            fail("list_quizzes")
        }
        async fn get_quiz(&self, _: &str) -> ApiResult<Quiz> {
            fail("get_quiz")
        }
        async fn update_quiz(&self, _: &str, _: QuizUpdateRequest) -> ApiResult<Quiz> {
            fail("update_quiz")
        }
        async fn delete_quiz(&self, _: &str) -> ApiResult<()> {
            fail("delete_quiz")
        }
        async fn duplicate_quiz(&self, _: &str) -> ApiResult<Quiz> {
            fail("duplicate_quiz")
        }
        async fn health(&self) -> ApiResult<HealthStatus> {
            fail("health")
        }
    }

    #[tokio::test]
    async fn test_perform_routes_by_request() {
        let outcome = perform(&Failing, Request::DeleteQuiz("q1".to_string())).await;
        assert_eq!(
            outcome,
            Outcome::QuizDeleted {
                quiz_id: "q1".to_string(),
                result: fail("delete_quiz"),
            }
        );

        let outcome = perform(&Failing, Request::FetchText("f1".to_string())).await;
        assert!(matches!(outcome, Outcome::TextFetched { file_id, .. } if file_id == "f1"));
    }

    #[tokio::test]
    async fn test_perform_upload_of_missing_file_reports_read_error() {
        let request = Request::Upload {
            path: "/definitely/not/here.pdf".into(),
            candidate: UploadCandidate::new("here.pdf", None, 10),
        };
        match perform(&Failing, request).await {
            Outcome::Uploaded(Err(err)) => assert!(err.message().starts_with("Could not read")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_dispatch_reports_every_request() {
        let api: Arc<dyn QuizApi> = Arc::new(Failing);
        let (tx, mut rx) = mpsc::unbounded_channel();
        dispatch(&api, &tx, vec![Request::LoadFiles, Request::LoadQuizzes]);

        let mut seen = Vec::new();
        for _ in 0..2 {
            match rx.recv().await {
                Some(Outcome::FilesLoaded(_)) => seen.push("files"),
                Some(Outcome::QuizzesLoaded(_)) => seen.push("quizzes"),
                other => panic!("unexpected outcome: {:?}", other),
            }
        }
        seen.sort();
        assert_eq!(seen, vec!["files", "quizzes"]);
    }
}
