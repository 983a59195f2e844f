// src/handlers/attempt.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        quiz::Quiz,
        result::{QuizResult, SaveResultRequest, ScoreResponse, SubmitAttemptRequest},
    },
    scoring::{self, Attempt},
    store::{self, JsonStore},
};

fn find_quiz(store: &JsonStore, id: Uuid) -> Result<Quiz, AppError> {
    let quizzes: Vec<Quiz> = store.load(store::QUIZZES);
    quizzes
        .into_iter()
        .find(|q| q.id == id)
        .ok_or(AppError::NotFound("Quiz not found".to_string()))
}

/// Scores a finished attempt without persisting anything.
///
/// The request carries one answer slot per question, in question order;
/// `null` slots are unanswered and never score. Replaying the same answers
/// yields the same score.
pub async fn submit_attempt(
    State(store): State<JsonStore>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubmitAttemptRequest>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = find_quiz(&store, id)?;

    if payload.answers.len() != quiz.questions.len() {
        return Err(AppError::BadRequest(format!(
            "Expected {} answers, got {}",
            quiz.questions.len(),
            payload.answers.len()
        )));
    }

    let mut attempt = Attempt::start(&quiz);
    for (index, answer) in payload.answers.iter().enumerate() {
        if let Some(choice) = answer {
            attempt.record_answer(index, *choice);
        }
    }
    let score = attempt.submit(&quiz);

    Ok(Json(ScoreResponse {
        score,
        total: quiz.questions.len() as u32,
    }))
}

/// Persists a result record for the quiz creator's scores view.
///
/// The score is recomputed from the submitted answers rather than taken
/// from the client. Saving requires a non-blank participant name; the email
/// is optional. Results are append-only.
pub async fn save_result(
    State(store): State<JsonStore>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SaveResultRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let participant_name = payload.participant_name.trim().to_string();
    if participant_name.is_empty() {
        return Err(AppError::BadRequest(
            "Enter your name to save the result".to_string(),
        ));
    }

    let quiz = find_quiz(&store, id)?;

    if payload.answers.len() != quiz.questions.len() {
        return Err(AppError::BadRequest(format!(
            "Expected {} answers, got {}",
            quiz.questions.len(),
            payload.answers.len()
        )));
    }

    let score = scoring::score_answers(&quiz.questions, &payload.answers);

    let participant_email = payload
        .participant_email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty());

    let result = QuizResult {
        quiz_id: quiz.id,
        participant_name,
        participant_email,
        score,
        total: quiz.questions.len() as u32,
        answers: payload.answers,
        taken_at: chrono::Utc::now(),
    };

    store.update(store::RESULTS, |results: &mut Vec<QuizResult>| {
        results.push(result.clone());
        Ok(())
    })?;

    tracing::info!("saved result for quiz {} ({}/{})", quiz.id, score, result.total);

    Ok((StatusCode::CREATED, Json(result)))
}
