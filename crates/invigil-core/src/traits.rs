//! Boundary traits between the session engine and the terminal.
//!
//! Implemented by the `invigil-console` crate; the engine itself never
//! touches stdin or stdout. Sessions are single-threaded and strictly
//! sequential, so the traits take `&mut self` and carry no `Send`/`Sync`
//! bounds.

use chrono::{DateTime, Local};

use crate::question::Question;

// ---------------------------------------------------------------------------
// Respondent trait
// ---------------------------------------------------------------------------

/// Supplies the test-taker's selections, one per presented question.
pub trait Respondent {
    /// Return a 1-based selection for `question`.
    ///
    /// `number` and `total` locate the question in the presentation order.
    /// The engine rejects out-of-range selections and asks again, so
    /// implementations that can re-prompt should validate before returning.
    /// An error here voids the whole session.
    fn choose(&mut self, question: &Question, number: usize, total: usize)
        -> anyhow::Result<u32>;
}

// ---------------------------------------------------------------------------
// Session observer trait
// ---------------------------------------------------------------------------

/// Receives session events as the engine walks the question order.
pub trait SessionObserver {
    /// The timer has started; nothing has been presented yet.
    fn on_session_start(&mut self, started_at: DateTime<Local>, question_count: usize);

    /// A question is being presented.
    fn on_question(&mut self, number: usize, total: usize, question: &Question);

    /// A selection was rejected as out of range; the respondent will be
    /// asked again.
    fn on_invalid_selection(&mut self, selected: u32, choices: usize);

    /// The time budget ran out; no further question will be presented.
    fn on_time_expired(&mut self, answered: usize);
}

/// Observer that ignores every event.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {
    fn on_session_start(&mut self, _: DateTime<Local>, _: usize) {}
    fn on_question(&mut self, _: usize, _: usize, _: &Question) {}
    fn on_invalid_selection(&mut self, _: u32, _: usize) {}
    fn on_time_expired(&mut self, _: usize) {}
}
