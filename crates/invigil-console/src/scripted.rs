//! Scripted stand-ins for exercising sessions without a terminal.

use std::collections::VecDeque;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

use invigil_core::question::Question;
use invigil_core::traits::{Respondent, SessionObserver};

/// A respondent that answers from a fixed script.
///
/// Hands out selections in order and records the body of every question it
/// was asked. Running dry is an error, so a script that is too short fails
/// the session instead of hanging.
pub struct ScriptedRespondent {
    selections: VecDeque<u32>,
    asked: Vec<String>,
}

impl ScriptedRespondent {
    pub fn new(selections: impl IntoIterator<Item = u32>) -> Self {
        Self {
            selections: selections.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// Bodies of the questions asked so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Respondent for ScriptedRespondent {
    fn choose(&mut self, question: &Question, _number: usize, _total: usize) -> Result<u32> {
        self.asked.push(question.body().to_string());
        self.selections
            .pop_front()
            .context("selection script exhausted")
    }
}

/// An observer that records every event it sees, for assertions.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    /// Start timestamp and planned question count, once seen.
    pub started: Option<(DateTime<Local>, usize)>,
    /// Bodies of the questions presented, in order.
    pub questions: Vec<String>,
    /// Selections the session rejected as out of range.
    pub rejections: Vec<u32>,
    /// Questions answered before time expired, if it did.
    pub expired_after: Option<usize>,
}

impl SessionObserver for RecordingObserver {
    fn on_session_start(&mut self, started_at: DateTime<Local>, question_count: usize) {
        self.started = Some((started_at, question_count));
    }

    fn on_question(&mut self, _number: usize, _total: usize, question: &Question) {
        self.questions.push(question.body().to_string());
    }

    fn on_invalid_selection(&mut self, selected: u32, _choices: usize) {
        self.rejections.push(selected);
    }

    fn on_time_expired(&mut self, answered: usize) {
        self.expired_after = Some(answered);
    }
}
