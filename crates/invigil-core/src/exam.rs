//! Exam variants, sizing, and the fixed question order.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::ExamError;
use crate::question::{Question, QuestionKind};

/// Exam variant tag, parsed from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamKind {
    /// Homogeneous multiple choice.
    Practical,
    /// A multiple-choice section followed by a True/False section.
    Final,
}

impl fmt::Display for ExamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExamKind::Practical => write!(f, "practical"),
            ExamKind::Final => write!(f, "final"),
        }
    }
}

impl FromStr for ExamKind {
    type Err = ExamError;

    /// Case- and whitespace-insensitive, so `" Final "` parses. Unknown tags
    /// are a recoverable user error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "practical" => Ok(ExamKind::Practical),
            "final" => Ok(ExamKind::Final),
            other => Err(ExamError::UnknownExamKind(other.to_string())),
        }
    }
}

/// Sizing for an exam, validated before any authoring work happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamPlan {
    kind: ExamKind,
    mcq: usize,
    true_false: usize,
    minutes: u32,
}

impl ExamPlan {
    /// Plan a practical exam: every question is multiple choice.
    pub fn practical(questions: usize, minutes: u32) -> Result<Self, ExamError> {
        validate_sizing(questions, minutes)?;
        Ok(Self {
            kind: ExamKind::Practical,
            mcq: questions,
            true_false: 0,
            minutes,
        })
    }

    /// Plan a final exam: `mcq` of the `questions` are multiple choice and
    /// the rest are True/False. `mcq` may be zero or the whole exam, but
    /// never more than `questions`.
    pub fn final_exam(questions: usize, mcq: usize, minutes: u32) -> Result<Self, ExamError> {
        validate_sizing(questions, minutes)?;
        if mcq > questions {
            return Err(ExamError::McqCountExceedsTotal { mcq, questions });
        }
        Ok(Self {
            kind: ExamKind::Final,
            mcq,
            true_false: questions - mcq,
            minutes,
        })
    }

    pub fn kind(&self) -> ExamKind {
        self.kind
    }

    /// Multiple-choice questions to author.
    pub fn mcq(&self) -> usize {
        self.mcq
    }

    /// True/False questions to author.
    pub fn true_false(&self) -> usize {
        self.true_false
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }
}

fn validate_sizing(questions: usize, minutes: u32) -> Result<(), ExamError> {
    if questions == 0 {
        return Err(ExamError::NoQuestions);
    }
    if minutes == 0 {
        return Err(ExamError::ZeroExamTime);
    }
    Ok(())
}

/// A timed exam: a fixed question sequence plus a time budget in minutes.
///
/// Construction validates section homogeneity, so every question a session
/// walks is of the kind its section promises.
#[derive(Debug, Clone, Serialize)]
pub struct Exam {
    kind: ExamKind,
    /// The multiple-choice section; the whole exam for practical exams.
    mcq: Vec<Question>,
    /// The True/False section; always empty for practical exams.
    true_false: Vec<Question>,
    /// Time budget in whole minutes.
    minutes: u32,
}

impl Exam {
    /// Create a practical exam from a homogeneous multiple-choice sequence.
    pub fn practical(questions: Vec<Question>, minutes: u32) -> Result<Self, ExamError> {
        validate_sizing(questions.len(), minutes)?;
        ensure_all_multiple_choice(&questions)?;
        Ok(Self {
            kind: ExamKind::Practical,
            mcq: questions,
            true_false: Vec::new(),
            minutes,
        })
    }

    /// Create a final exam from its two sections. Either section may be
    /// empty, but not both.
    pub fn final_exam(
        mcq: Vec<Question>,
        true_false: Vec<Question>,
        minutes: u32,
    ) -> Result<Self, ExamError> {
        validate_sizing(mcq.len() + true_false.len(), minutes)?;
        ensure_all_multiple_choice(&mcq)?;
        ensure_all_true_false(&true_false)?;
        Ok(Self {
            kind: ExamKind::Final,
            mcq,
            true_false,
            minutes,
        })
    }

    pub fn kind(&self) -> ExamKind {
        self.kind
    }

    /// Time budget in whole minutes.
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Total number of questions across both sections.
    pub fn question_count(&self) -> usize {
        self.mcq.len() + self.true_false.len()
    }

    /// Questions in presentation order: the whole multiple-choice section
    /// first, then the True/False section. The order is fixed at
    /// construction and identical on every walk.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.mcq.iter().chain(self.true_false.iter())
    }
}

impl fmt::Display for Exam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Exam: {} questions, {} minutes",
            self.question_count(),
            self.minutes
        )
    }
}

fn ensure_all_multiple_choice(questions: &[Question]) -> Result<(), ExamError> {
    for (i, question) in questions.iter().enumerate() {
        if !matches!(question.kind(), QuestionKind::MultipleChoice { .. }) {
            return Err(ExamError::WrongQuestionKind {
                position: i + 1,
                expected: "multiple choice",
            });
        }
    }
    Ok(())
}

fn ensure_all_true_false(questions: &[Question]) -> Result<(), ExamError> {
    for (i, question) in questions.iter().enumerate() {
        if !matches!(question.kind(), QuestionKind::TrueFalse { .. }) {
            return Err(ExamError::WrongQuestionKind {
                position: i + 1,
                expected: "True/False",
            });
        }
    }
    Ok(())
}
