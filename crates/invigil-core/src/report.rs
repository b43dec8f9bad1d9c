//! Session outcome types and the result screen.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

use crate::question::Question;
use crate::score::ScoreCard;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Every question was presented and graded.
    Completed,
    /// The time budget ran out with questions still unpresented.
    TimedOut,
}

/// One graded question within an outcome.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionResult {
    /// The question as presented. An owned copy, so outcomes stay usable
    /// after the exam itself is gone.
    pub question: Question,
    /// The accepted 1-based selection.
    pub selected: u32,
    /// Whether the selection matched the designated correct answer.
    pub correct: bool,
}

/// Wall-clock bounds of a session.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SessionTiming {
    pub started_at: DateTime<Local>,
    pub ended_at: DateTime<Local>,
    /// Elapsed time truncated to whole seconds.
    pub elapsed: Duration,
}

impl SessionTiming {
    /// Sub-second precision is discarded; a session never has negative
    /// length even if the clock misbehaves.
    pub fn new(started_at: DateTime<Local>, ended_at: DateTime<Local>) -> Self {
        let secs = (ended_at - started_at).num_seconds().max(0) as u64;
        Self {
            started_at,
            ended_at,
            elapsed: Duration::from_secs(secs),
        }
    }

    /// Elapsed time as `HH:MM:SS`.
    pub fn elapsed_display(&self) -> String {
        let secs = self.elapsed.as_secs();
        format!("{:02}:{:02}:{:02}", secs / 3600, secs % 3600 / 60, secs % 60)
    }
}

/// The immutable result of one exam session.
#[derive(Debug, Clone, Serialize)]
pub struct ExamOutcome {
    /// Unique attempt identifier.
    pub run_id: Uuid,
    /// How the session ended.
    pub verdict: Verdict,
    /// Questions the exam planned to present.
    pub question_count: usize,
    /// Graded questions in presentation order. Questions the timer cut off
    /// never appear here.
    pub results: Vec<QuestionResult>,
    /// Earned and total marks across `results`.
    pub score: ScoreCard,
    /// When the session ran and for how long.
    pub timing: SessionTiming,
}

impl ExamOutcome {
    /// Number of questions that were actually presented and graded.
    pub fn answered(&self) -> usize {
        self.results.len()
    }

    /// Final grade as a percentage; exactly zero when nothing was graded.
    pub fn percentage(&self) -> f64 {
        self.score.percentage()
    }

    /// The plain result screen: timing, every graded question with its
    /// correct answer, then the final grade.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!(
                "Exam ended at: {}",
                self.timing.ended_at.format("%Y-%m-%d %H:%M:%S")
            ),
            format!("Total time taken: {}", self.timing.elapsed_display()),
            "-------------------------".to_string(),
            "-- The Correct Answers --".to_string(),
            "-------------------------".to_string(),
        ];
        for result in &self.results {
            lines.extend(result.question.present());
            lines.push(format!(
                "The Correct Was: {}",
                result.question.correct_answer()
            ));
        }
        lines.push("------------------------".to_string());
        lines.push(format!("Your Grade Is: {:.1}%", self.percentage()));
        lines
    }
}
