//! Questions, their choice sets, and grading.

use serde::Serialize;

use crate::answer::Answer;
use crate::error::ExamError;

/// Shown in place of a header for questions created without one.
pub const NO_HEADER: &str = "No Header";
/// Shown in place of a body for questions created without one.
pub const NO_BODY: &str = "No body";

/// Number of choices every multiple-choice question offers.
pub const MCQ_CHOICES: usize = 4;

/// How a question offers its choices.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Four authored choices.
    MultipleChoice { choices: [Answer; MCQ_CHOICES] },
    /// The fixed True/False pair, built internally and never authored.
    TrueFalse { choices: [Answer; 2] },
}

/// A single exam question.
///
/// Construction goes through [`Question::multiple_choice`] or
/// [`Question::true_false`], which validate the choice set and resolve the
/// designated correct answer to a position within it. Immutable after
/// creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    header: Option<String>,
    body: Option<String>,
    mark: f64,
    kind: QuestionKind,
    /// 0-based position of the correct answer within the choices.
    correct: usize,
}

impl Question {
    /// Create a multiple-choice question.
    ///
    /// `correct` is the 1-based position of the right answer among
    /// `choices`. Fails on a negative or non-finite mark, an answer with
    /// id 0 or blank text, duplicate answer ids or texts
    /// (case-insensitive), or a `correct` outside the set.
    pub fn multiple_choice(
        header: Option<String>,
        body: Option<String>,
        mark: f64,
        choices: [Answer; MCQ_CHOICES],
        correct: u32,
    ) -> Result<Self, ExamError> {
        validate_mark(mark)?;
        validate_choices(&choices)?;
        let correct = resolve_correct(correct, choices.len())?;
        Ok(Self {
            header,
            body,
            mark,
            kind: QuestionKind::MultipleChoice { choices },
            correct,
        })
    }

    /// Create a True/False question.
    ///
    /// The choice pair is always `Answer 1: True`, `Answer 2: False`;
    /// `answer_is_true` designates which of the two is correct.
    pub fn true_false(
        header: Option<String>,
        body: Option<String>,
        mark: f64,
        answer_is_true: bool,
    ) -> Result<Self, ExamError> {
        validate_mark(mark)?;
        Ok(Self {
            header,
            body,
            mark,
            kind: QuestionKind::TrueFalse {
                choices: [Answer::new(1, "True"), Answer::new(2, "False")],
            },
            correct: if answer_is_true { 0 } else { 1 },
        })
    }

    /// The header, with the missing case resolved to [`NO_HEADER`].
    pub fn header(&self) -> &str {
        self.header.as_deref().unwrap_or(NO_HEADER)
    }

    /// The body, with the missing case resolved to [`NO_BODY`].
    pub fn body(&self) -> &str {
        self.body.as_deref().unwrap_or(NO_BODY)
    }

    pub fn mark(&self) -> f64 {
        self.mark
    }

    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    /// All choices in presentation order.
    pub fn choices(&self) -> &[Answer] {
        match &self.kind {
            QuestionKind::MultipleChoice { choices } => choices,
            QuestionKind::TrueFalse { choices } => choices,
        }
    }

    /// Number of selectable choices.
    pub fn choice_count(&self) -> usize {
        self.choices().len()
    }

    /// Look up a choice by its 1-based selection number.
    pub fn choice(&self, selected: u32) -> Option<&Answer> {
        (selected as usize)
            .checked_sub(1)
            .and_then(|i| self.choices().get(i))
    }

    /// The designated correct answer.
    pub fn correct_answer(&self) -> &Answer {
        // `correct` is validated against the choice set at construction.
        &self.choices()[self.correct]
    }

    /// The display lines for this question, in presentation order.
    ///
    /// Pure: presenting never changes the question or any grading state.
    pub fn present(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Header: {}", self.header()),
            "-------------".to_string(),
            format!("Body: {}\tMark: {}M", self.body(), self.mark),
        ];
        match &self.kind {
            QuestionKind::MultipleChoice { choices } => {
                lines.push("Choices: ".to_string());
                for (i, answer) in choices.iter().enumerate() {
                    lines.push(format!("{}) {}", i + 1, answer.text()));
                }
            }
            QuestionKind::TrueFalse { .. } => {
                lines.push("1.True \t 2.False".to_string());
            }
        }
        lines
    }

    /// Grade a 1-based selection against the designated correct answer.
    ///
    /// Pure: the same selection against the same question always grades the
    /// same. A selection outside `1..=choice_count()` is an
    /// [`ExamError::InvalidSelection`], which callers should re-prompt for.
    pub fn grade(&self, selected: u32) -> Result<bool, ExamError> {
        let position = selected as usize;
        if position == 0 || position > self.choice_count() {
            return Err(ExamError::InvalidSelection {
                selected,
                choices: self.choice_count(),
            });
        }
        Ok(position - 1 == self.correct)
    }
}

fn validate_mark(mark: f64) -> Result<(), ExamError> {
    if !mark.is_finite() || mark < 0.0 {
        return Err(ExamError::InvalidMark(mark));
    }
    Ok(())
}

/// Reject choice sets with a zero id, blank text, duplicate ids, or
/// (case-insensitively) duplicate text, so selection numbers and result
/// display stay unambiguous. Absent text is fine; it resolves to the
/// [`NO_ANSWER`](crate::answer::NO_ANSWER) sentinel before the check.
fn validate_choices(choices: &[Answer]) -> Result<(), ExamError> {
    for (i, candidate) in choices.iter().enumerate() {
        if candidate.id() == 0 {
            return Err(ExamError::ZeroAnswerId);
        }
        if candidate.text().trim().is_empty() {
            return Err(ExamError::BlankAnswerText(candidate.id()));
        }
        for earlier in &choices[..i] {
            if candidate.id() == earlier.id() {
                return Err(ExamError::DuplicateAnswerId(candidate.id()));
            }
            if candidate.text().to_lowercase() == earlier.text().to_lowercase() {
                return Err(ExamError::DuplicateAnswerText(candidate.text().to_string()));
            }
        }
    }
    Ok(())
}

fn resolve_correct(selected: u32, choices: usize) -> Result<usize, ExamError> {
    let position = selected as usize;
    if position == 0 || position > choices {
        return Err(ExamError::CorrectAnswerMissing { selected, choices });
    }
    Ok(position - 1)
}
