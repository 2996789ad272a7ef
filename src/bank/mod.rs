use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

mod export;
pub mod question;


pub use export::template;
pub use question::{Question, QuestionDetail, QuestionKind, RawRow, SkipReason};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("CSV file appears to be empty")]
    EmptyInput,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Successfully imported {} questions. {} questions were skipped due to validation issues.",
            self.imported, self.skipped
        )
    }
}

/// Ordered questions belonging to one quiz.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new() -> QuestionBank {
        Default::default()
    }

    pub fn from_csv(input: &str) -> Result<(QuestionBank, ImportReport), ImportError> {
        let mut bank = QuestionBank::new();
        let report = bank.append_csv(input)?;
        Ok((bank, report))
    }

    pub fn open(source: &Path) -> Result<(QuestionBank, ImportReport)> {
        let input = fs::read_to_string(source)
            .with_context(|| format!("Could not read {}", source.display()))?;
        Ok(QuestionBank::from_csv(&input)?)
    }

    /// Parses a CSV blob and appends its valid questions in row order.
    /// Malformed rows are counted and skipped, never fatal; the only fatal
    /// condition is an input without any data line.
    pub fn append_csv(&mut self, input: &str) -> Result<ImportReport, ImportError> {
        if input.lines().count() < 2 {
            return Err(ImportError::EmptyInput);
        }

        let mut report = ImportReport::default();
        // The first line is a header, discarded without validation.
        for (number, line) in input.lines().enumerate().skip(1) {
            let row = RawRow::split(line);
            if !row.is_data() {
                continue;
            }
            match Question::try_from(&row) {
                Ok(question) => {
                    self.questions.push(question);
                    report.imported += 1;
                }
                Err(reason) => {
                    log::warn!("Skipping row {}: {}", number + 1, reason);
                    report.skipped += 1;
                }
            }
        }

        log::info!("{}", report);
        Ok(report)
    }

    pub fn push(&mut self, question: Question) {
        self.questions.push(question);
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
