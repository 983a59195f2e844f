// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Every question carries exactly this many choices.
pub const CHOICE_COUNT: usize = 4;

/// A quiz in the 'quizzes' collection. Immutable after creation: there are
/// no edit or delete operations, and results reference it by id only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,

    pub text: String,

    /// Exactly four non-blank choices, in display order.
    pub choices: Vec<String>,

    /// Index into `choices` of the correct answer, 0..=3.
    pub correct_index: u8,
}

/// Participant-facing projection of a quiz: the answer key stays private
/// because scoring happens on this side of the wire.
#[derive(Debug, Serialize)]
pub struct PublicQuiz {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub questions: Vec<PublicQuestion>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub id: Uuid,
    pub text: String,
    pub choices: Vec<String>,
}

impl PublicQuiz {
    pub fn for_quiz(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id,
            title: quiz.title.clone(),
            description: quiz.description.clone(),
            questions: quiz
                .questions
                .iter()
                .map(|q| PublicQuestion {
                    id: q.id,
                    text: q.text.clone(),
                    choices: q.choices.clone(),
                })
                .collect(),
            created_at: quiz.created_at,
        }
    }
}

/// DTO for creating a new quiz.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(custom(function = validate_not_blank), length(max = 200))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,

    #[validate(length(min = 1, message = "Add at least one question."), nested)]
    pub questions: Vec<CreateQuestionRequest>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(custom(function = validate_not_blank), length(max = 1000))]
    pub text: String,

    #[validate(custom(function = validate_choices))]
    pub choices: Vec<String>,

    #[validate(range(max = 3, message = "Correct option index invalid."))]
    pub correct_index: u8,
}

fn validate_not_blank(text: &str) -> Result<(), validator::ValidationError> {
    if text.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}

fn validate_choices(choices: &[String]) -> Result<(), validator::ValidationError> {
    if choices.len() != CHOICE_COUNT {
        return Err(validator::ValidationError::new("need_exactly_four_choices"));
    }
    for choice in choices {
        if choice.trim().is_empty() {
            return Err(validator::ValidationError::new("blank_choice"));
        }
        if choice.len() > 500 {
            return Err(validator::ValidationError::new("choice_too_long"));
        }
    }
    Ok(())
}
