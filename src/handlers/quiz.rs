// src/handlers/quiz.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        quiz::{CreateQuizRequest, PublicQuiz, Question, Quiz},
        user::Session,
    },
    store::{self, JsonStore},
};

/// Creates a quiz owned by the current session's user.
///
/// Quiz and question ids are assigned here; the quiz id doubles as the
/// shareable identifier a client embeds in a take-this-quiz link. Quizzes
/// are immutable once stored.
pub async fn create_quiz(
    State(store): State<JsonStore>,
    Extension(session): Extension<Session>,
    Json(payload): Json<CreateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let questions = payload
        .questions
        .into_iter()
        .map(|q| Question {
            id: Uuid::new_v4(),
            text: q.text,
            choices: q.choices,
            correct_index: q.correct_index,
        })
        .collect();

    let quiz = Quiz {
        id: Uuid::new_v4(),
        creator_id: session.id,
        title: payload.title,
        description: payload.description,
        questions,
        created_at: chrono::Utc::now(),
    };

    store.update(store::QUIZZES, |quizzes: &mut Vec<Quiz>| {
        quizzes.push(quiz.clone());
        Ok(())
    })?;

    tracing::info!("user {} created quiz {}", session.id, quiz.id);

    Ok((StatusCode::CREATED, Json(quiz)))
}

/// Lists the current user's quizzes in creation (append) order.
pub async fn list_my_quizzes(
    State(store): State<JsonStore>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, AppError> {
    let quizzes: Vec<Quiz> = store.load(store::QUIZZES);
    let mine: Vec<Quiz> = quizzes
        .into_iter()
        .filter(|q| q.creator_id == session.id)
        .collect();

    Ok(Json(mine))
}

/// Fetches one quiz by its shareable id, for taking.
///
/// Answer keys are stripped: scoring happens server-side, so participants
/// only ever see the question text and choices.
pub async fn get_quiz(
    State(store): State<JsonStore>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let quizzes: Vec<Quiz> = store.load(store::QUIZZES);
    let quiz = quizzes
        .iter()
        .find(|q| q.id == id)
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    Ok(Json(PublicQuiz::for_quiz(quiz)))
}
