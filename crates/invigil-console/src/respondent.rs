//! Answer collection from an interactive terminal.

use std::io::{BufRead, Write};

use anyhow::{ensure, Result};

use invigil_core::question::Question;
use invigil_core::traits::Respondent;

/// Reads answer selections from a terminal.
///
/// Keeps asking until the reply parses as a number within the question's
/// choice range, so the selections it hands back are always gradeable.
pub struct ConsoleRespondent<R, W> {
    input: R,
    out: W,
}

impl<R, W> ConsoleRespondent<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }
}

impl<R: BufRead, W: Write> Respondent for ConsoleRespondent<R, W> {
    fn choose(&mut self, question: &Question, _number: usize, _total: usize) -> Result<u32> {
        loop {
            write!(self.out, "Enter Your Answer Number: ")?;
            self.out.flush()?;
            let mut line = String::new();
            ensure!(
                self.input.read_line(&mut line)? != 0,
                "input ended before the exam finished"
            );
            match line.trim().parse::<u32>() {
                Ok(n) if (1..=question.choice_count() as u32).contains(&n) => return Ok(n),
                _ => writeln!(self.out, "Invalid input, Try Again.")?,
            }
        }
    }
}
