// src/scoring.rs

use uuid::Uuid;

use crate::models::quiz::{Question, Quiz};

/// Lifecycle of one participant's pass through a quiz.
///
/// `InProgress` allows cursor movement and answer edits; `Submitted` freezes
/// both and carries the computed score; `Saved` and `Discarded` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptPhase {
    InProgress,
    Submitted,
    Saved,
    Discarded,
}

/// One in-flight attempt at a quiz.
///
/// Answers hold one slot per question; `None` means unanswered and never
/// scores. Choice values are not range-checked here: the caller presents
/// only the four real choices, so an answer slot only ever receives an
/// index it handed out itself.
#[derive(Debug, Clone)]
pub struct Attempt {
    quiz_id: Uuid,
    answers: Vec<Option<u8>>,
    cursor: usize,
    phase: AttemptPhase,
    score: u32,
}

impl Attempt {
    /// Opens a fresh attempt: all questions unanswered, cursor on the first.
    pub fn start(quiz: &Quiz) -> Self {
        Self {
            quiz_id: quiz.id,
            answers: vec![None; quiz.questions.len()],
            cursor: 0,
            phase: AttemptPhase::InProgress,
            score: 0,
        }
    }

    pub fn quiz_id(&self) -> Uuid {
        self.quiz_id
    }

    pub fn answers(&self) -> &[Option<u8>] {
        &self.answers
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn phase(&self) -> AttemptPhase {
        self.phase
    }

    /// Records (or overwrites) the answer at `question_index`. Ignored once
    /// the attempt has been submitted.
    pub fn record_answer(&mut self, question_index: usize, choice_index: u8) {
        if self.phase != AttemptPhase::InProgress {
            return;
        }
        if let Some(slot) = self.answers.get_mut(question_index) {
            *slot = Some(choice_index);
        }
    }

    /// Moves the cursor forward, clamped to the last question.
    pub fn next(&mut self) {
        if self.phase == AttemptPhase::InProgress && self.cursor + 1 < self.answers.len() {
            self.cursor += 1;
        }
    }

    /// Moves the cursor back, clamped to the first question.
    pub fn prev(&mut self) {
        if self.phase == AttemptPhase::InProgress && self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Computes the score and freezes the attempt. Submitting twice is a
    /// no-op that returns the already-computed score.
    pub fn submit(&mut self, quiz: &Quiz) -> u32 {
        if self.phase == AttemptPhase::InProgress {
            self.score = score_answers(&quiz.questions, &self.answers);
            self.phase = AttemptPhase::Submitted;
        }
        self.score
    }

    /// Marks a submitted attempt as persisted. Terminal.
    pub fn mark_saved(&mut self) {
        if self.phase == AttemptPhase::Submitted {
            self.phase = AttemptPhase::Saved;
        }
    }

    /// Closes the attempt without saving. Terminal.
    pub fn discard(&mut self) {
        if self.phase != AttemptPhase::Saved {
            self.phase = AttemptPhase::Discarded;
        }
    }
}

/// Counts the positions where the submitted answer matches the question's
/// correct choice. `None` never matches, so an unanswered question never
/// contributes. Deterministic: same questions and answers, same score.
pub fn score_answers(questions: &[Question], answers: &[Option<u8>]) -> u32 {
    questions
        .iter()
        .zip(answers)
        .filter(|(question, answer)| **answer == Some(question.correct_index))
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct_index: u8) -> Question {
        Question {
            id: Uuid::new_v4(),
            text: "Capital of France?".to_string(),
            choices: vec![
                "Paris".to_string(),
                "Lyon".to_string(),
                "Nice".to_string(),
                "Dijon".to_string(),
            ],
            correct_index,
        }
    }

    fn quiz(correct_indexes: &[u8]) -> Quiz {
        Quiz {
            id: Uuid::new_v4(),
            creator_id: Uuid::new_v4(),
            title: "Geo".to_string(),
            description: String::new(),
            questions: correct_indexes.iter().map(|&i| question(i)).collect(),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn fresh_attempt_is_unanswered_at_first_question() {
        let quiz = quiz(&[0, 1, 2]);
        let attempt = Attempt::start(&quiz);

        assert_eq!(attempt.answers(), &[None, None, None]);
        assert_eq!(attempt.cursor(), 0);
        assert_eq!(attempt.phase(), AttemptPhase::InProgress);
    }

    #[test]
    fn score_counts_matching_positions() {
        let quiz = quiz(&[0, 1, 2, 3]);
        let score = score_answers(&quiz.questions, &[Some(0), Some(1), Some(0), None]);
        assert_eq!(score, 2);
    }

    #[test]
    fn all_unanswered_scores_zero() {
        let quiz = quiz(&[0, 1, 2, 3]);
        let score = score_answers(&quiz.questions, &[None, None, None, None]);
        assert_eq!(score, 0);
    }

    #[test]
    fn geo_example_scores_as_specified() {
        let quiz = quiz(&[0]);

        assert_eq!(score_answers(&quiz.questions, &[Some(0)]), 1);
        assert_eq!(score_answers(&quiz.questions, &[Some(1)]), 0);
        assert_eq!(score_answers(&quiz.questions, &[None]), 0);
    }

    #[test]
    fn recording_overwrites_prior_answer() {
        let quiz = quiz(&[2]);
        let mut attempt = Attempt::start(&quiz);

        attempt.record_answer(0, 1);
        attempt.record_answer(0, 2);

        assert_eq!(attempt.answers(), &[Some(2)]);
        assert_eq!(attempt.submit(&quiz), 1);
    }

    #[test]
    fn cursor_clamps_at_both_ends() {
        let quiz = quiz(&[0, 1]);
        let mut attempt = Attempt::start(&quiz);

        attempt.prev();
        assert_eq!(attempt.cursor(), 0);

        attempt.next();
        attempt.next();
        attempt.next();
        assert_eq!(attempt.cursor(), 1);
    }

    #[test]
    fn submit_freezes_answers_and_cursor() {
        let quiz = quiz(&[0, 1]);
        let mut attempt = Attempt::start(&quiz);

        attempt.record_answer(0, 0);
        let score = attempt.submit(&quiz);
        assert_eq!(score, 1);
        assert_eq!(attempt.phase(), AttemptPhase::Submitted);

        // Frozen: late edits and movement are ignored, resubmission is a no-op.
        attempt.record_answer(1, 1);
        attempt.next();
        assert_eq!(attempt.cursor(), 0);
        assert_eq!(attempt.submit(&quiz), 1);
    }

    #[test]
    fn submitted_attempt_can_be_saved_or_discarded() {
        let quiz = quiz(&[0]);

        let mut saved = Attempt::start(&quiz);
        saved.submit(&quiz);
        saved.mark_saved();
        assert_eq!(saved.phase(), AttemptPhase::Saved);

        let mut discarded = Attempt::start(&quiz);
        discarded.submit(&quiz);
        discarded.discard();
        assert_eq!(discarded.phase(), AttemptPhase::Discarded);

        // Saved is terminal.
        saved.discard();
        assert_eq!(saved.phase(), AttemptPhase::Saved);
    }

    #[test]
    fn score_never_exceeds_question_count() {
        let quiz = quiz(&[1, 1, 1]);
        let score = score_answers(&quiz.questions, &[Some(1), Some(1), Some(1)]);
        assert_eq!(score, 3);
        assert!(score as usize <= quiz.questions.len());
    }
}
