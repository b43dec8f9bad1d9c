//! Score accumulation and the percentage rule.

use serde::Serialize;

/// Running score for one exam session.
///
/// Marks enter through [`ScoreCard::record`] only: the full mark of every
/// graded question lands in the total, and additionally in the earned sum
/// when the answer was correct. Questions never reached stay out of both
/// sums, which is what makes a timed-out partial exam grade correctly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreCard {
    earned: f64,
    total: f64,
}

impl ScoreCard {
    /// Record one graded question.
    pub fn record(&mut self, mark: f64, correct: bool) {
        if correct {
            self.earned += mark;
        }
        self.total += mark;
    }

    /// Marks earned from correctly answered questions.
    pub fn earned(&self) -> f64 {
        self.earned
    }

    /// Marks at stake across every graded question.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Earned over total as a percentage.
    ///
    /// Exactly `0.0` when nothing was graded, so a session that timed out
    /// before its first question reports zero instead of dividing by zero.
    pub fn percentage(&self) -> f64 {
        if self.total == 0.0 {
            return 0.0;
        }
        self.earned / self.total * 100.0
    }
}
