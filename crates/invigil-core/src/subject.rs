//! Subjects: the course a single exam belongs to.

use serde::Serialize;
use std::fmt;

use crate::error::ExamError;
use crate::exam::Exam;

/// A course subject holding at most one exam.
#[derive(Debug, Clone, Serialize)]
pub struct Subject {
    name: String,
    id: u32,
    exam: Option<Exam>,
}

impl Subject {
    pub fn new(name: impl Into<String>, id: u32) -> Self {
        Self {
            name: name.into(),
            id,
            exam: None,
        }
    }

    pub fn exam(&self) -> Option<&Exam> {
        self.exam.as_ref()
    }

    /// Attach an exam and return a reference to it. A subject holds at most
    /// one exam; assigning a second is an error that leaves the first in
    /// place.
    pub fn assign_exam(&mut self, exam: Exam) -> Result<&Exam, ExamError> {
        if self.exam.is_some() {
            return Err(ExamError::ExamAlreadyAssigned(self.name.clone()));
        }
        Ok(self.exam.insert(exam))
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Subject Name: {}, Subject ID: {}", self.name, self.id)
    }
}
