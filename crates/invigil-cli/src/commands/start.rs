//! The `invigil start` command.

use std::io;

use anyhow::{Context, Result};

use invigil_console::{render, ConsoleAuthor, ConsolePresenter, ConsoleRespondent};
use invigil_core::exam::{Exam, ExamKind, ExamPlan};
use invigil_core::session::ExamSession;
use invigil_core::subject::Subject;

/// Author an exam for a subject, ask for the go-ahead, sit it, and render
/// the outcome.
pub fn execute(
    subject_name: String,
    subject_id: u32,
    exam_type: String,
    questions: usize,
    mcq: Option<usize>,
    minutes: u32,
    format: String,
) -> Result<()> {
    let kind: ExamKind = exam_type.parse()?;
    anyhow::ensure!(
        matches!(format.as_str(), "plain" | "table" | "json"),
        "unknown format: {format} (expected plain, table, or json)"
    );

    // Validate sizing before any authoring work happens.
    let plan = match kind {
        ExamKind::Practical => {
            anyhow::ensure!(
                mcq.is_none(),
                "--mcq only applies to final exams; a practical exam is all multiple choice"
            );
            ExamPlan::practical(questions, minutes)?
        }
        ExamKind::Final => {
            let mcq = mcq
                .context("final exams need --mcq to say how many questions are multiple choice")?;
            ExamPlan::final_exam(questions, mcq, minutes)?
        }
    };

    let mut subject = Subject::new(subject_name, subject_id);
    println!("{subject}");
    println!("--------------------------");
    println!();

    // Authoring holds the stdin lock; release it before the exam starts.
    let (exam, confirmed) = {
        let mut author = ConsoleAuthor::new(io::stdin().lock(), io::stdout());
        let exam = match plan.kind() {
            ExamKind::Practical => {
                Exam::practical(author.collect_multiple_choice(plan.mcq())?, plan.minutes())?
            }
            ExamKind::Final => Exam::final_exam(
                author.collect_multiple_choice(plan.mcq())?,
                author.collect_true_false(plan.true_false())?,
                plan.minutes(),
            )?,
        };
        println!();
        println!("{exam}");
        (exam, author.confirm_start()?)
    };

    if !confirmed {
        println!("Exam Cancelled.");
        return Ok(());
    }

    let exam = subject.assign_exam(exam)?;

    let mut respondent = ConsoleRespondent::new(io::stdin().lock(), io::stdout());
    let mut presenter = ConsolePresenter;
    let outcome = ExamSession::start(exam).run(&mut respondent, &mut presenter)?;

    render::print_outcome(&outcome, &format)
}
