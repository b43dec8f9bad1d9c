//! The timed exam session engine.
//!
//! A session owns the timer: the state is created when the exam starts and
//! consumed when the outcome is produced, so a timer cannot be started twice
//! or read back after finalization. The cutoff is polled between questions
//! only; collecting an answer is never interrupted.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::error::ExamError;
use crate::exam::Exam;
use crate::report::{ExamOutcome, QuestionResult, SessionTiming, Verdict};
use crate::score::ScoreCard;
use crate::traits::{Respondent, SessionObserver};

// ---------------------------------------------------------------------------
// Clocks
// ---------------------------------------------------------------------------

/// Source of wall-clock time for a session.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// The real wall clock.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to, for exercising the cutoff without
/// waiting out real minutes.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Local>>,
}

impl ManualClock {
    pub fn starting_at(now: DateTime<Local>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        *self.now.lock().unwrap()
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A started exam attempt.
///
/// Created by [`ExamSession::start`]; the timer lives exactly as long as
/// this value and ends when [`ExamSession::run`] consumes it. Starting the
/// same exam again creates a distinct attempt with its own timer and id.
pub struct ExamSession<'a> {
    exam: &'a Exam,
    clock: Arc<dyn Clock>,
    started_at: DateTime<Local>,
    run_id: Uuid,
}

impl<'a> ExamSession<'a> {
    /// Start the timer against the system clock.
    pub fn start(exam: &'a Exam) -> Self {
        Self::start_with_clock(exam, Arc::new(SystemClock))
    }

    /// Start the timer against an injected clock.
    pub fn start_with_clock(exam: &'a Exam, clock: Arc<dyn Clock>) -> Self {
        let started_at = clock.now();
        let run_id = Uuid::new_v4();
        tracing::info!(
            %run_id,
            questions = exam.question_count(),
            minutes = exam.minutes(),
            "exam session started"
        );
        Self {
            exam,
            clock,
            started_at,
            run_id,
        }
    }

    /// The id stamped on this attempt, available before the outcome is.
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// When the timer started.
    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Whether the time budget has been used up.
    pub fn is_time_up(&self) -> bool {
        let elapsed = self.clock.now() - self.started_at;
        elapsed >= chrono::Duration::minutes(i64::from(self.exam.minutes()))
    }

    /// Present every reachable question, grade the selections, and produce
    /// the final outcome.
    ///
    /// The cutoff is checked before each question: once the budget is spent,
    /// the current and all remaining questions are neither presented nor
    /// graded, and their marks never enter the total. Consumes the session;
    /// the timer ends exactly once, here.
    pub fn run(
        self,
        respondent: &mut dyn Respondent,
        observer: &mut dyn SessionObserver,
    ) -> Result<ExamOutcome> {
        let total = self.exam.question_count();
        observer.on_session_start(self.started_at, total);

        let mut results = Vec::with_capacity(total);
        let mut score = ScoreCard::default();
        let mut verdict = Verdict::Completed;

        for (index, question) in self.exam.questions().enumerate() {
            if self.is_time_up() {
                verdict = Verdict::TimedOut;
                observer.on_time_expired(results.len());
                tracing::info!(
                    run_id = %self.run_id,
                    answered = results.len(),
                    remaining = total - results.len(),
                    "time expired"
                );
                break;
            }

            let number = index + 1;
            observer.on_question(number, total, question);

            let (selected, correct) = loop {
                let picked = respondent.choose(question, number, total)?;
                match question.grade(picked) {
                    Ok(correct) => break (picked, correct),
                    Err(ExamError::InvalidSelection { selected, choices }) => {
                        tracing::debug!(
                            run_id = %self.run_id,
                            selected,
                            choices,
                            "selection rejected"
                        );
                        observer.on_invalid_selection(selected, choices);
                    }
                    Err(other) => return Err(other.into()),
                }
            };

            score.record(question.mark(), correct);
            results.push(QuestionResult {
                question: question.clone(),
                selected,
                correct,
            });
        }

        let timing = SessionTiming::new(self.started_at, self.clock.now());
        tracing::info!(
            run_id = %self.run_id,
            answered = results.len(),
            percentage = score.percentage(),
            elapsed_secs = timing.elapsed.as_secs(),
            "exam session finalized"
        );

        Ok(ExamOutcome {
            run_id: self.run_id,
            verdict,
            question_count: total,
            results,
            score,
            timing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::Answer;
    use crate::question::Question;
    use crate::traits::NoopObserver;
    use std::collections::VecDeque;

    fn make_mcq(body: &str, mark: f64) -> Question {
        // Correct answer is always choice 2.
        Question::multiple_choice(
            Some("MCQ Question".into()),
            Some(body.into()),
            mark,
            [
                Answer::new(1, "red"),
                Answer::new(2, "green"),
                Answer::new(3, "blue"),
                Answer::new(4, "yellow"),
            ],
            2,
        )
        .unwrap()
    }

    fn make_tf(body: &str, mark: f64) -> Question {
        Question::true_false(
            Some("True/False Question".into()),
            Some(body.into()),
            mark,
            true,
        )
        .unwrap()
    }

    fn make_practical(count: usize, minutes: u32) -> Exam {
        let questions = (1..=count).map(|i| make_mcq(&format!("q{i}"), 5.0)).collect();
        Exam::practical(questions, minutes).unwrap()
    }

    /// Answers from a fixed script, optionally advancing a manual clock
    /// while each answer is being collected.
    struct Scripted {
        selections: VecDeque<u32>,
        clock: Option<Arc<ManualClock>>,
        advance: chrono::Duration,
        asked: Vec<String>,
    }

    impl Scripted {
        fn new(selections: &[u32]) -> Self {
            Self {
                selections: selections.iter().copied().collect(),
                clock: None,
                advance: chrono::Duration::zero(),
                asked: Vec::new(),
            }
        }

        fn advancing(
            selections: &[u32],
            clock: Arc<ManualClock>,
            advance: chrono::Duration,
        ) -> Self {
            Self {
                selections: selections.iter().copied().collect(),
                clock: Some(clock),
                advance,
                asked: Vec::new(),
            }
        }
    }

    impl Respondent for Scripted {
        fn choose(&mut self, question: &Question, _: usize, _: usize) -> Result<u32> {
            self.asked.push(question.body().to_string());
            if let Some(clock) = &self.clock {
                clock.advance(self.advance);
            }
            self.selections
                .pop_front()
                .ok_or_else(|| anyhow::anyhow!("selection script exhausted"))
        }
    }

    #[derive(Default)]
    struct Counting {
        started: bool,
        questions: usize,
        rejections: usize,
        expired_after: Option<usize>,
    }

    impl SessionObserver for Counting {
        fn on_session_start(&mut self, _: DateTime<Local>, _: usize) {
            self.started = true;
        }
        fn on_question(&mut self, _: usize, _: usize, _: &Question) {
            self.questions += 1;
        }
        fn on_invalid_selection(&mut self, _: u32, _: usize) {
            self.rejections += 1;
        }
        fn on_time_expired(&mut self, answered: usize) {
            self.expired_after = Some(answered);
        }
    }

    #[test]
    fn all_correct_scores_one_hundred() {
        let exam = make_practical(2, 30);
        let mut respondent = Scripted::new(&[2, 2]);

        let outcome = ExamSession::start(&exam)
            .run(&mut respondent, &mut NoopObserver)
            .unwrap();

        assert_eq!(outcome.verdict, Verdict::Completed);
        assert_eq!(outcome.answered(), 2);
        assert!((outcome.score.total() - 10.0).abs() < f64::EPSILON);
        assert!((outcome.percentage() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn one_wrong_of_two_scores_fifty() {
        let exam = make_practical(2, 30);
        let mut respondent = Scripted::new(&[1, 2]);

        let outcome = ExamSession::start(&exam)
            .run(&mut respondent, &mut NoopObserver)
            .unwrap();

        assert!(!outcome.results[0].correct);
        assert!(outcome.results[1].correct);
        assert!((outcome.score.earned() - 5.0).abs() < f64::EPSILON);
        assert!((outcome.score.total() - 10.0).abs() < f64::EPSILON);
        assert!((outcome.percentage() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn timeout_before_first_question_scores_exactly_zero() {
        let exam = make_practical(3, 10);
        let clock = Arc::new(ManualClock::starting_at(Local::now()));
        let session = ExamSession::start_with_clock(&exam, Arc::clone(&clock) as Arc<dyn Clock>);
        clock.advance(chrono::Duration::minutes(10));

        let mut respondent = Scripted::new(&[2, 2, 2]);
        let mut observer = Counting::default();
        let outcome = session.run(&mut respondent, &mut observer).unwrap();

        assert_eq!(outcome.verdict, Verdict::TimedOut);
        assert_eq!(outcome.answered(), 0);
        assert_eq!(outcome.question_count, 3);
        assert_eq!(outcome.score.total(), 0.0);
        assert_eq!(outcome.percentage(), 0.0);
        assert_eq!(observer.questions, 0, "nothing should have been presented");
        assert_eq!(observer.expired_after, Some(0));
        assert!(respondent.asked.is_empty());
    }

    #[test]
    fn cutoff_between_questions_counts_only_reached_marks() {
        // 6 minutes pass while each answer is collected; with a 10 minute
        // budget the check before question 3 sees 12 minutes elapsed.
        let exam = make_practical(4, 10);
        let clock = Arc::new(ManualClock::starting_at(Local::now()));
        let session = ExamSession::start_with_clock(&exam, Arc::clone(&clock) as Arc<dyn Clock>);

        let mut respondent = Scripted::advancing(
            &[2, 2, 2, 2],
            Arc::clone(&clock),
            chrono::Duration::minutes(6),
        );
        let mut observer = Counting::default();
        let outcome = session.run(&mut respondent, &mut observer).unwrap();

        assert_eq!(outcome.verdict, Verdict::TimedOut);
        assert_eq!(outcome.answered(), 2);
        assert!((outcome.score.total() - 10.0).abs() < f64::EPSILON);
        assert!((outcome.percentage() - 100.0).abs() < f64::EPSILON);
        assert_eq!(observer.questions, 2);
        assert_eq!(observer.expired_after, Some(2));
    }

    #[test]
    fn exact_budget_boundary_cuts_off() {
        // Elapsed == budget must already stop the walk.
        let exam = make_practical(2, 5);
        let clock = Arc::new(ManualClock::starting_at(Local::now()));
        let session = ExamSession::start_with_clock(&exam, Arc::clone(&clock) as Arc<dyn Clock>);

        let mut respondent = Scripted::advancing(
            &[2, 2],
            Arc::clone(&clock),
            chrono::Duration::minutes(5),
        );
        let outcome = session.run(&mut respondent, &mut NoopObserver).unwrap();

        assert_eq!(outcome.verdict, Verdict::TimedOut);
        assert_eq!(outcome.answered(), 1);
    }

    #[test]
    fn final_exam_walks_mcq_then_true_false() {
        let exam = Exam::final_exam(
            vec![make_mcq("m1", 2.0), make_mcq("m2", 2.0), make_mcq("m3", 2.0)],
            vec![make_tf("t1", 3.0), make_tf("t2", 3.0)],
            30,
        )
        .unwrap();
        // MCQ correct answer is 2, True/False correct answer is 1 (True).
        let mut respondent = Scripted::new(&[2, 2, 2, 1, 1]);

        let outcome = ExamSession::start(&exam)
            .run(&mut respondent, &mut NoopObserver)
            .unwrap();

        assert_eq!(respondent.asked, ["m1", "m2", "m3", "t1", "t2"]);
        assert!((outcome.score.total() - 12.0).abs() < f64::EPSILON);
        assert!((outcome.percentage() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_selections_are_asked_again_not_graded() {
        let exam = make_practical(1, 30);
        let mut respondent = Scripted::new(&[9, 0, 3]);
        let mut observer = Counting::default();

        let outcome = ExamSession::start(&exam)
            .run(&mut respondent, &mut observer)
            .unwrap();

        assert_eq!(observer.rejections, 2);
        assert_eq!(outcome.answered(), 1);
        assert_eq!(outcome.results[0].selected, 3);
        assert!(!outcome.results[0].correct);
        assert!(
            (outcome.score.total() - 5.0).abs() < f64::EPSILON,
            "the mark must be counted once, not per attempt"
        );
    }

    #[test]
    fn respondent_failure_voids_the_session() {
        let exam = make_practical(2, 30);
        let mut respondent = Scripted::new(&[2]);

        let err = ExamSession::start(&exam)
            .run(&mut respondent, &mut NoopObserver)
            .unwrap_err();
        assert!(err.to_string().contains("script exhausted"));
    }

    #[test]
    fn repeated_runs_grade_identically() {
        let exam = make_practical(3, 30);
        let script = [2, 1, 2];

        let first = ExamSession::start(&exam)
            .run(&mut Scripted::new(&script), &mut NoopObserver)
            .unwrap();
        let second = ExamSession::start(&exam)
            .run(&mut Scripted::new(&script), &mut NoopObserver)
            .unwrap();

        assert_eq!(first.verdict, second.verdict);
        assert_eq!(first.answered(), second.answered());
        assert!((first.percentage() - second.percentage()).abs() < f64::EPSILON);
        assert_ne!(first.run_id, second.run_id, "attempts are distinct");
    }

    #[test]
    fn observer_sees_start_before_any_question() {
        let exam = make_practical(1, 30);
        let mut observer = Counting::default();

        ExamSession::start(&exam)
            .run(&mut Scripted::new(&[2]), &mut observer)
            .unwrap();

        assert!(observer.started);
        assert_eq!(observer.questions, 1);
        assert_eq!(observer.expired_after, None);
    }

    #[test]
    fn outcome_carries_the_stamps_taken_at_start() {
        // Time spent before run() must not shift the recorded start.
        let exam = make_practical(1, 30);
        let clock = Arc::new(ManualClock::starting_at(Local::now()));
        let session = ExamSession::start_with_clock(&exam, Arc::clone(&clock) as Arc<dyn Clock>);
        let run_id = session.run_id();
        let started_at = session.started_at();

        clock.advance(chrono::Duration::minutes(3));
        let outcome = session
            .run(&mut Scripted::new(&[2]), &mut NoopObserver)
            .unwrap();

        assert_eq!(outcome.run_id, run_id);
        assert_eq!(outcome.timing.started_at, started_at);
        assert_eq!(outcome.timing.elapsed.as_secs(), 180);
    }

    #[test]
    fn session_reports_elapsed_in_whole_seconds() {
        let exam = make_practical(1, 30);
        let clock = Arc::new(ManualClock::starting_at(Local::now()));
        let session = ExamSession::start_with_clock(&exam, Arc::clone(&clock) as Arc<dyn Clock>);

        let mut respondent = Scripted::advancing(
            &[2],
            Arc::clone(&clock),
            chrono::Duration::milliseconds(90_500),
        );
        let outcome = session.run(&mut respondent, &mut NoopObserver).unwrap();

        assert_eq!(outcome.timing.elapsed.as_secs(), 90);
        assert_eq!(outcome.timing.elapsed.subsec_nanos(), 0);
    }
}
