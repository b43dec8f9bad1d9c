//! invigil CLI — the user-facing command-line interface.

use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "invigil",
    version,
    about = "Timed exam administration at the terminal"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Author an exam and sit it immediately
    Start {
        /// Subject the exam belongs to
        #[arg(long)]
        subject_name: String,

        /// Numeric subject identifier
        #[arg(long)]
        subject_id: u32,

        /// Exam type: practical, final
        #[arg(long)]
        exam_type: String,

        /// Total number of questions
        #[arg(long)]
        questions: usize,

        /// How many of the questions are multiple-choice (final exams only)
        #[arg(long)]
        mcq: Option<usize>,

        /// Time budget in minutes
        #[arg(long)]
        minutes: u32,

        /// Output format: plain, table, json
        #[arg(long, default_value = "table")]
        format: String,
    },
}

fn main() {
    // Logs go to stderr so piped stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("invigil_core=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Start {
            subject_name,
            subject_id,
            exam_type,
            questions,
            mcq,
            minutes,
            format,
        } => commands::start::execute(
            subject_name,
            subject_id,
            exam_type,
            questions,
            mcq,
            minutes,
            format,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
