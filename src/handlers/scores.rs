// src/handlers/scores.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        quiz::Quiz,
        result::{LeaderboardEntry, QuizResult},
    },
    store::{self, JsonStore},
};

/// Returns the leaderboard for one quiz: every saved result, best score
/// first. The sort is stable, so equal scores keep the order the results
/// were saved in. A quiz with no results yields an empty list; an unknown
/// quiz id is a 404.
pub async fn leaderboard(
    State(store): State<JsonStore>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let quizzes: Vec<Quiz> = store.load(store::QUIZZES);
    if !quizzes.iter().any(|q| q.id == id) {
        return Err(AppError::NotFound("Quiz not found".to_string()));
    }

    let results: Vec<QuizResult> = store.load(store::RESULTS);
    let mut entries: Vec<LeaderboardEntry> = results
        .iter()
        .filter(|r| r.quiz_id == id)
        .map(LeaderboardEntry::for_result)
        .collect();

    entries.sort_by(|a, b| b.score.cmp(&a.score));

    Ok(Json(entries))
}
