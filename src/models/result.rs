// src/models/result.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// One saved quiz attempt in the 'results' collection. Append-only: results
/// are never mutated or deleted, and they reference their quiz by id with
/// no integrity enforcement (quiz removal does not exist).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResult {
    pub quiz_id: Uuid,

    pub participant_name: String,

    pub participant_email: Option<String>,

    /// Count of answers matching the quiz's answer key.
    pub score: u32,

    /// Question count of the quiz at the time it was taken.
    pub total: u32,

    /// One slot per question; `None` means left unanswered.
    pub answers: Vec<Option<u8>>,

    pub taken_at: chrono::DateTime<chrono::Utc>,
}

/// A leaderboard row: a result projected for the scores view.
#[derive(Debug, Serialize)]
pub struct LeaderboardEntry {
    pub participant_name: String,
    pub participant_email: Option<String>,
    pub score: u32,
    pub total: u32,
    pub taken_at: chrono::DateTime<chrono::Utc>,
}

impl LeaderboardEntry {
    pub fn for_result(result: &QuizResult) -> Self {
        Self {
            participant_name: result.participant_name.clone(),
            participant_email: result.participant_email.clone(),
            score: result.score,
            total: result.total,
            taken_at: result.taken_at,
        }
    }
}

/// DTO for submitting a finished attempt for scoring.
#[derive(Debug, Deserialize)]
pub struct SubmitAttemptRequest {
    /// One entry per question, in question order. `null` = unanswered.
    pub answers: Vec<Option<u8>>,
}

/// DTO for the computed score.
#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub score: u32,
    pub total: u32,
}

/// DTO for saving a result for the quiz creator to see.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveResultRequest {
    #[validate(length(max = 100))]
    pub participant_name: String,

    #[validate(length(max = 254))]
    pub participant_email: Option<String>,

    pub answers: Vec<Option<u8>>,
}
