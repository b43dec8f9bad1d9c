//! Exam domain errors.
//!
//! Defined in `invigil-core` so collaborators can match on variants (for
//! example to re-prompt on a rejected selection) instead of string matching.

use thiserror::Error;

/// Errors produced by exam construction, grading, and assignment.
#[derive(Debug, Error)]
pub enum ExamError {
    /// A selection outside the 1-based choice range.
    #[error("selection {selected} is out of range, expected 1 to {choices}")]
    InvalidSelection { selected: u32, choices: usize },

    /// An exam-type tag matching no known kind.
    #[error("unknown exam type: {0}")]
    UnknownExamKind(String),

    /// Two answers in one choice set share an id.
    #[error("duplicate answer id {0} in one choice set")]
    DuplicateAnswerId(u32),

    /// Two answers in one choice set have the same text, ignoring case.
    #[error("duplicate answer text: {0}")]
    DuplicateAnswerText(String),

    /// An answer with id 0; ids are 1-based.
    #[error("answer id must be at least 1")]
    ZeroAnswerId,

    /// An answer whose text is blank instead of absent.
    #[error("answer {0} has blank text")]
    BlankAnswerText(u32),

    /// A mark that is negative or not a number.
    #[error("mark must be a non-negative number, got {0}")]
    InvalidMark(f64),

    /// The designated correct answer does not point at any choice.
    #[error("correct answer {selected} does not match any of the {choices} choices")]
    CorrectAnswerMissing { selected: u32, choices: usize },

    /// A question of the wrong kind inside an exam section.
    #[error("question {position} is not {expected}")]
    WrongQuestionKind {
        position: usize,
        expected: &'static str,
    },

    /// An exam with nothing to present.
    #[error("an exam needs at least one question")]
    NoQuestions,

    /// A zero-minute time budget.
    #[error("exam time must be at least one minute")]
    ZeroExamTime,

    /// More multiple-choice questions requested than the exam holds.
    #[error("number of MCQ questions cannot exceed total questions ({mcq} > {questions})")]
    McqCountExceedsTotal { mcq: usize, questions: usize },

    /// A second exam assigned to a subject that already has one.
    #[error("{0} already has an exam assigned")]
    ExamAlreadyAssigned(String),
}

impl ExamError {
    /// Returns `true` for errors caused by user input, which callers should
    /// re-prompt for rather than treat as faults.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ExamError::InvalidSelection { .. }
                | ExamError::UnknownExamKind(_)
                | ExamError::McqCountExceedsTotal { .. }
        )
    }
}
