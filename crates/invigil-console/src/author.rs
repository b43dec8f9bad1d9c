//! Interactive question authoring.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use invigil_core::answer::Answer;
use invigil_core::question::{Question, MCQ_CHOICES};

/// Collects exam questions from a terminal, one prompt at a time.
///
/// Generic over its streams so tests can drive the same prompt flow from
/// in-memory buffers. Rejected input is always asked for again; nothing is
/// silently substituted.
pub struct ConsoleAuthor<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> ConsoleAuthor<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    /// Author `count` multiple-choice questions.
    ///
    /// Each question asks for a body (blank keeps the default), a mark, four
    /// distinct answers, and the number of the correct one.
    pub fn collect_multiple_choice(&mut self, count: usize) -> Result<Vec<Question>> {
        let mut questions = Vec::with_capacity(count);
        for number in 1..=count {
            writeln!(self.out)?;
            writeln!(self.out, "--- MCQ Question {number} ---")?;
            let body = self.read_body()?;
            let mark = self.read_mark()?;
            let choices = self.read_answers()?;
            let correct = self.read_correct_number()?;
            let question = Question::multiple_choice(
                Some("MCQ Question".to_string()),
                body,
                mark,
                choices,
                correct,
            )?;
            tracing::debug!(number, "authored multiple-choice question");
            questions.push(question);
        }
        Ok(questions)
    }

    /// Author `count` true/false questions.
    ///
    /// The choice pair is fixed; authoring only decides which of the two is
    /// correct.
    pub fn collect_true_false(&mut self, count: usize) -> Result<Vec<Question>> {
        let mut questions = Vec::with_capacity(count);
        for number in 1..=count {
            writeln!(self.out)?;
            writeln!(self.out, "--- True/False Question {number} ---")?;
            let body = self.read_body()?;
            let mark = self.read_mark()?;
            let answer_is_true = self.read_truth()?;
            let question = Question::true_false(
                Some("True/False Question".to_string()),
                body,
                mark,
                answer_is_true,
            )?;
            tracing::debug!(number, "authored true/false question");
            questions.push(question);
        }
        Ok(questions)
    }

    /// Ask whether to begin the exam.
    ///
    /// Anything other than an explicit yes, including end of input, declines.
    pub fn confirm_start(&mut self) -> Result<bool> {
        write!(self.out, "Do You Want To Start Exam? (Y / N): ")?;
        self.out.flush()?;
        let Some(line) = self.read_line()? else {
            return Ok(false);
        };
        let reply = line.trim().to_lowercase();
        Ok(reply == "y" || reply == "yes")
    }

    fn read_body(&mut self) -> Result<Option<String>> {
        let body = self.prompt("Enter Question Body: ")?;
        let body = body.trim();
        Ok((!body.is_empty()).then(|| body.to_string()))
    }

    fn read_mark(&mut self) -> Result<f64> {
        loop {
            let raw = self.prompt("Enter Question Mark: ")?;
            match raw.trim().parse::<f64>() {
                Ok(mark) if mark.is_finite() && mark >= 0.0 => return Ok(mark),
                _ => writeln!(self.out, "Invalid input, Try Again.")?,
            }
        }
    }

    /// Collect four distinct answer texts and assign them ids 1 through 4.
    fn read_answers(&mut self) -> Result<[Answer; MCQ_CHOICES]> {
        let mut texts: Vec<String> = Vec::with_capacity(MCQ_CHOICES);
        while texts.len() < MCQ_CHOICES {
            let slot = texts.len() + 1;
            let raw = self.prompt(&format!("Enter Answer {slot}: "))?;
            let text = raw.trim();
            if text.is_empty() {
                writeln!(self.out, "Answer Cannot Be Empty.")?;
                continue;
            }
            if texts.iter().any(|t| t.to_lowercase() == text.to_lowercase()) {
                writeln!(self.out, "This Answer Already Exists. Enter a Different One.")?;
                continue;
            }
            texts.push(text.to_string());
        }
        // The loop above fills exactly MCQ_CHOICES slots.
        Ok(std::array::from_fn(|i| {
            Answer::new(i as u32 + 1, std::mem::take(&mut texts[i]))
        }))
    }

    fn read_correct_number(&mut self) -> Result<u32> {
        loop {
            let raw = self.prompt("Enter the correct answer number (1 to 4): ")?;
            match raw.trim().parse::<u32>() {
                Ok(n) if (1..=MCQ_CHOICES as u32).contains(&n) => return Ok(n),
                _ => writeln!(self.out, "Invalid input, Try Again.")?,
            }
        }
    }

    fn read_truth(&mut self) -> Result<bool> {
        loop {
            let raw = self.prompt("Enter the correct answer (True/False): ")?;
            match raw.trim().to_lowercase().as_str() {
                "true" => return Ok(true),
                "false" => return Ok(false),
                _ => writeln!(self.out, "Invalid input, Try Again.")?,
            }
        }
    }

    /// Print `text` without a newline and read the reply.
    fn prompt(&mut self, text: &str) -> Result<String> {
        write!(self.out, "{text}")?;
        self.out.flush()?;
        self.read_line()?
            .context("input ended during question authoring")
    }

    /// Read one line, `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
