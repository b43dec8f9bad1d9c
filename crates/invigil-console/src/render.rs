//! Terminal presentation of running sessions and finished outcomes.

use anyhow::{bail, Result};
use chrono::{DateTime, Local};
use comfy_table::{Cell, Table};

use invigil_core::question::Question;
use invigil_core::report::{ExamOutcome, Verdict};
use invigil_core::traits::SessionObserver;

/// Prints session events to standard output as the exam runs.
#[derive(Debug, Default)]
pub struct ConsolePresenter;

impl SessionObserver for ConsolePresenter {
    fn on_session_start(&mut self, started_at: DateTime<Local>, question_count: usize) {
        println!(
            "Exam started at: {}",
            started_at.format("%Y-%m-%d %H:%M:%S")
        );
        println!("Number of questions: {question_count}");
        println!("---------------------------------------");
        println!();
    }

    fn on_question(&mut self, _number: usize, _total: usize, question: &Question) {
        for line in question.present() {
            println!("{line}");
        }
    }

    fn on_invalid_selection(&mut self, _selected: u32, _choices: usize) {
        println!("Invalid input, Try Again.");
    }

    fn on_time_expired(&mut self, _answered: usize) {
        println!();
        println!("Time is Finish!");
    }
}

/// Lay out each graded question as a table row.
pub fn outcome_table(outcome: &ExamOutcome) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "#",
        "Question",
        "Your Answer",
        "Correct Answer",
        "Mark",
        "Result",
    ]);

    for (i, result) in outcome.results.iter().enumerate() {
        let selected = result
            .question
            .choice(result.selected)
            .map(|answer| answer.text().to_string())
            .unwrap_or_else(|| result.selected.to_string());
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(result.question.body()),
            Cell::new(selected),
            Cell::new(result.question.correct_answer().text()),
            Cell::new(format!("{}M", result.question.mark())),
            Cell::new(if result.correct { "right" } else { "wrong" }),
        ]);
    }

    table
}

/// Render a finished session in the requested format.
///
/// `plain` replays the end-of-exam transcript line by line, `table`
/// condenses the graded questions, `json` emits the full outcome for other
/// tools to consume.
pub fn print_outcome(outcome: &ExamOutcome, format: &str) -> Result<()> {
    match format {
        "plain" => {
            for line in outcome.summary_lines() {
                println!("{line}");
            }
        }
        "table" => {
            println!("{}", outcome_table(outcome));
            if outcome.verdict == Verdict::TimedOut {
                println!(
                    "Time ran out: {} of {} questions answered.",
                    outcome.answered(),
                    outcome.question_count
                );
            }
            println!("Your Grade Is: {:.1}%", outcome.percentage());
            println!("Total time taken: {}", outcome.timing.elapsed_display());
        }
        "json" => println!("{}", serde_json::to_string_pretty(outcome)?),
        other => bail!("unknown format: {other} (expected plain, table, or json)"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use invigil_core::answer::Answer;
    use invigil_core::report::{QuestionResult, SessionTiming};
    use invigil_core::score::ScoreCard;
    use uuid::Uuid;

    use super::*;

    fn make_outcome() -> ExamOutcome {
        let capital = Question::multiple_choice(
            Some("MCQ Question".into()),
            Some("Capital of France?".into()),
            5.0,
            [
                Answer::new(1, "Cairo"),
                Answer::new(2, "Paris"),
                Answer::new(3, "Rome"),
                Answer::new(4, "Oslo"),
            ],
            2,
        )
        .unwrap();
        let compiled = Question::true_false(
            Some("True/False Question".into()),
            Some("Rust has a garbage collector".into()),
            3.0,
            false,
        )
        .unwrap();

        let mut score = ScoreCard::default();
        score.record(5.0, true);
        score.record(3.0, false);

        let started = Local::now();
        ExamOutcome {
            run_id: Uuid::nil(),
            verdict: Verdict::Completed,
            question_count: 2,
            results: vec![
                QuestionResult {
                    question: capital,
                    selected: 2,
                    correct: true,
                },
                QuestionResult {
                    question: compiled,
                    selected: 1,
                    correct: false,
                },
            ],
            score,
            timing: SessionTiming::new(started, started + Duration::seconds(75)),
        }
    }

    #[test]
    fn table_lists_each_graded_question() {
        let rendered = outcome_table(&make_outcome()).to_string();
        assert!(rendered.contains("Capital of France?"));
        assert!(rendered.contains("Rust has a garbage collector"));
        assert!(rendered.contains("Paris"));
        assert!(rendered.contains("5M"));
        assert!(rendered.contains("right"));
        assert!(rendered.contains("wrong"));
    }

    #[test]
    fn table_shows_the_respondent_answer_text() {
        let rendered = outcome_table(&make_outcome()).to_string();
        // Second question: picked True, correct was False.
        assert!(rendered.contains("True"));
        assert!(rendered.contains("False"));
    }

    #[test]
    fn every_known_format_renders() {
        let outcome = make_outcome();
        for format in ["plain", "table", "json"] {
            assert!(
                print_outcome(&outcome, format).is_ok(),
                "format {format} should render"
            );
        }
    }

    #[test]
    fn unknown_format_is_rejected() {
        let err = print_outcome(&make_outcome(), "csv").unwrap_err();
        assert!(err.to_string().contains("unknown format: csv"));
    }
}
