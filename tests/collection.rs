mod common;

use common::{FakeApi, quiz};
use quiz_studio::api::ApiError;
use quiz_studio::collection::QuizCollection;
use quiz_studio::models::{Difficulty, QuestionType, QuizGenerationRequest, QuizUpdateRequest};

fn ids(collection: &QuizCollection) -> Vec<&str> {
    collection.quizzes().iter().map(|q| q.id.as_str()).collect()
}

fn request() -> QuizGenerationRequest {
    QuizGenerationRequest {
        file_id: "file-1".to_string(),
        num_questions: 5,
        question_types: vec![QuestionType::MultipleChoice],
        difficulty_level: Difficulty::Medium,
        focus_topics: None,
    }
}

#[tokio::test]
async fn test_load_replaces_list() {
    let api = FakeApi::with_quizzes(vec![quiz("a", "A"), quiz("b", "B")]);
    let mut collection = QuizCollection::new();

    collection.load(&api).await;

    assert_eq!(ids(&collection), vec!["a", "b"]);
    assert!(!collection.is_loading());
    assert_eq!(collection.error(), None);
}

#[tokio::test]
async fn test_load_failure_is_recorded_not_returned() {
    let api = FakeApi::with_quizzes(vec![quiz("a", "A")]);
    let mut collection = QuizCollection::new();
    collection.load(&api).await;

    api.fail_next(ApiError::network("connection refused"));
    collection.load(&api).await;

    assert_eq!(collection.error(), Some("connection refused"));
    assert_eq!(ids(&collection), vec!["a"]);
    assert!(!collection.is_loading());
}

#[tokio::test]
async fn test_generate_prepends_new_quiz() {
    let api = FakeApi::with_quizzes(vec![quiz("a", "A")]);
    let mut collection = QuizCollection::new();
    collection.load(&api).await;

    let generated = collection.generate(&api, request()).await.unwrap();

    assert_eq!(generated.source_file_id, "file-1");
    assert_eq!(ids(&collection), vec![generated.id.as_str(), "a"]);
}

#[tokio::test]
async fn test_generate_five_multiple_choice_questions() {
    let api = FakeApi::default();
    let mut collection = QuizCollection::new();

    let generated = collection.generate(&api, request()).await.unwrap();

    assert_eq!(generated.question_count(), 5);
    for question in &generated.questions {
        assert_eq!(question.question_type, QuestionType::MultipleChoice);
        assert!(question.options().contains(&question.correct_answer));
        assert!(question.has_valid_answer());
    }
}

#[tokio::test]
async fn test_generate_honours_requested_types() {
    let api = FakeApi::default();
    let mut collection = QuizCollection::new();
    let mut mixed = request();
    mixed.num_questions = 3;
    mixed.question_types = vec![QuestionType::TrueFalse, QuestionType::ShortAnswer];

    let generated = collection.generate(&api, mixed).await.unwrap();

    let types: Vec<_> = generated.questions.iter().map(|q| q.question_type).collect();
    assert_eq!(
        types,
        vec![QuestionType::TrueFalse, QuestionType::ShortAnswer, QuestionType::TrueFalse]
    );
    assert!(generated.questions.iter().all(|q| q.has_valid_answer()));
}

#[tokio::test]
async fn test_generate_failure_returns_error_and_keeps_list() {
    let api = FakeApi::with_quizzes(vec![quiz("a", "A")]);
    let mut collection = QuizCollection::new();
    collection.load(&api).await;

    api.fail_next(ApiError::Generation("insufficient text".to_string()));
    let err = collection.generate(&api, request()).await.unwrap_err();

    assert_eq!(err.message(), "insufficient text");
    assert_eq!(collection.error(), Some("insufficient text"));
    assert_eq!(ids(&collection), vec!["a"]);
}

#[tokio::test]
async fn test_update_replaces_in_place() {
    let mut described = quiz("b", "B");
    described.description = Some("Cell biology basics".to_string());
    let original_questions = described.questions.clone();
    let api = FakeApi::with_quizzes(vec![quiz("a", "A"), described, quiz("c", "C")]);
    let mut collection = QuizCollection::new();
    collection.load(&api).await;

    let updated = collection
        .update(&api, "b", QuizUpdateRequest::title("Renamed"))
        .await
        .unwrap();

    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.description.as_deref(), Some("Cell biology basics"));
    assert_eq!(updated.questions, original_questions);
    assert_eq!(ids(&collection), vec!["a", "b", "c"]);
    assert_eq!(collection.get("b").map(|q| q.title.as_str()), Some("Renamed"));
}

#[tokio::test]
async fn test_update_unknown_quiz_surfaces_server_detail() {
    let api = FakeApi::with_quizzes(vec![quiz("a", "A")]);
    let mut collection = QuizCollection::new();
    collection.load(&api).await;

    let err = collection
        .update(&api, "missing", QuizUpdateRequest::title("X"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(collection.error(), Some("Quiz not found"));
}

#[tokio::test]
async fn test_delete_removes_quiz() {
    let api = FakeApi::with_quizzes(vec![quiz("a", "A"), quiz("b", "B")]);
    let mut collection = QuizCollection::new();
    collection.load(&api).await;

    collection.delete(&api, "a").await.unwrap();

    assert_eq!(ids(&collection), vec!["b"]);
}

#[tokio::test]
async fn test_duplicate_prepends_copy() {
    let api = FakeApi::with_quizzes(vec![quiz("a", "A"), quiz("b", "B")]);
    let mut collection = QuizCollection::new();
    collection.load(&api).await;

    let copy = collection.duplicate(&api, "b").await.unwrap();

    assert_eq!(copy.title, "B (Copy)");
    assert_eq!(ids(&collection), vec!["b-copy", "a", "b"]);
}

#[tokio::test]
async fn test_new_operation_clears_previous_error() {
    let api = FakeApi::with_quizzes(vec![quiz("a", "A")]);
    let mut collection = QuizCollection::new();

    api.fail_next(ApiError::network("offline"));
    collection.load(&api).await;
    assert!(collection.error().is_some());

    collection.load(&api).await;
    assert_eq!(collection.error(), None);
    assert_eq!(api.calls(), vec!["list_quizzes", "list_quizzes"]);
}
