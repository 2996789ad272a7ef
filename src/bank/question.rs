use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use thiserror::Error;

/// Why a data row was rejected during import.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SkipReason {
    #[error("question text is empty")]
    EmptyText,
    #[error("multiple choice questions need at least two options")]
    NotEnoughOptions,
    #[error("open ended questions need at least one expected keyword")]
    NoKeywords,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
    OpenEnded,
}

impl QuestionKind {
    /// Unrecognized tokens fall back to multiple choice.
    pub fn from_token(token: &str) -> QuestionKind {
        match token.to_lowercase().as_str() {
            "true_false" => QuestionKind::TrueFalse,
            "open_ended" => QuestionKind::OpenEnded,
            _ => QuestionKind::MultipleChoice,
        }
    }

    pub fn is_auto_gradable(self) -> bool {
        match self {
            QuestionKind::MultipleChoice | QuestionKind::TrueFalse => true,
            QuestionKind::OpenEnded => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionDetail {
    MultipleChoice {
        options: Vec<String>,
        correct_answer: String,
    },
    TrueFalse {
        correct_answer: String,
    },
    OpenEnded {
        expected_keywords: Vec<String>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub points: u32,
    pub explanation: Option<String>,
    #[serde(flatten)]
    pub detail: QuestionDetail,
}

impl Question {
    pub fn new(
        text: String,
        points: u32,
        explanation: Option<String>,
        detail: QuestionDetail,
    ) -> Question {
        Question {
            text,
            points: points.max(1),
            explanation,
            detail,
        }
    }

    pub fn kind(&self) -> QuestionKind {
        match self.detail {
            QuestionDetail::MultipleChoice { .. } => QuestionKind::MultipleChoice,
            QuestionDetail::TrueFalse { .. } => QuestionKind::TrueFalse,
            QuestionDetail::OpenEnded { .. } => QuestionKind::OpenEnded,
        }
    }

    pub fn is_auto_gradable(&self) -> bool {
        self.kind().is_auto_gradable()
    }

    pub fn correct_answer(&self) -> Option<&str> {
        match &self.detail {
            QuestionDetail::MultipleChoice { correct_answer, .. } => Some(correct_answer),
            QuestionDetail::TrueFalse { correct_answer } => Some(correct_answer),
            QuestionDetail::OpenEnded { .. } => None,
        }
    }

    pub fn matches_answer(&self, submitted: &str) -> bool {
        match self.correct_answer() {
            Some(key) => key == submitted,
            None => false,
        }
    }
}

/// One data row split into positional fields, before validation.
///
/// Column contract: question, type, optionA, optionB, optionC, optionD,
/// correctAnswer, points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawRow {
    fields: Vec<String>,
}

impl RawRow {
    /// Quote-aware field splitter. A double quote toggles in-quotes mode for
    /// the remainder of the scan and a comma only closes a field outside
    /// quotes. There is no `""` escape; a doubled quote reads as two toggles.
    pub fn split(line: &str) -> RawRow {
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        for c in line.chars() {
            match c {
                '"' => in_quotes = !in_quotes,
                ',' if !in_quotes => {
                    fields.push(current.trim().to_owned());
                    current.clear();
                }
                _ => current.push(c),
            }
        }
        fields.push(current.trim().to_owned());
        RawRow { fields }
    }

    /// Rows with fewer than 3 fields are not data (blank or truncated lines).
    pub fn is_data(&self) -> bool {
        self.fields.len() >= 3
    }

    fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }

    // Fields 2-5 with empties dropped: the options of a multiple choice row,
    // the expected keywords of an open ended one.
    fn choices(&self) -> Vec<String> {
        (2..=5)
            .map(|index| self.field(index))
            .filter(|field| !field.is_empty())
            .map(str::to_owned)
            .collect()
    }

    fn points(&self) -> u32 {
        match self.field(7).parse::<u32>() {
            Ok(points) if points >= 1 => points,
            _ => 1,
        }
    }
}

fn letter_to_index(letter: &str) -> Option<usize> {
    let mut chars = letter.chars();
    match (chars.next(), chars.next()) {
        (Some(c @ 'A'..='Z'), None) => Some(c as usize - 'A' as usize),
        _ => None,
    }
}

impl TryFrom<&RawRow> for Question {
    type Error = SkipReason;

    fn try_from(row: &RawRow) -> Result<Question, SkipReason> {
        let text = row.field(0);
        if text.is_empty() {
            return Err(SkipReason::EmptyText);
        }

        let detail = match QuestionKind::from_token(row.field(1)) {
            QuestionKind::MultipleChoice => {
                let options = row.choices();
                if options.len() < 2 {
                    return Err(SkipReason::NotEnoughOptions);
                }
                let candidate = row.field(6).to_uppercase();
                let correct_answer = match letter_to_index(&candidate) {
                    Some(index) if index < options.len() => candidate,
                    _ => "A".to_owned(),
                };
                QuestionDetail::MultipleChoice {
                    options,
                    correct_answer,
                }
            }
            QuestionKind::TrueFalse => {
                let token = row.field(6).to_lowercase();
                let correct_answer = match token.as_str() {
                    "true" | "false" => token,
                    _ => "true".to_owned(),
                };
                QuestionDetail::TrueFalse { correct_answer }
            }
            QuestionKind::OpenEnded => {
                let expected_keywords = row.choices();
                if expected_keywords.is_empty() {
                    return Err(SkipReason::NoKeywords);
                }
                QuestionDetail::OpenEnded { expected_keywords }
            }
        };

        Ok(Question::new(text.to_owned(), row.points(), None, detail))
    }
}
