use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::iter::FromIterator;
use thiserror::Error;

use crate::bank::{QuestionBank, QuestionDetail};

pub mod evaluator;


pub use evaluator::{KeywordEvaluator, NoEvaluator, OpenEndedEvaluator};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GradeError {
    #[error("quiz has no gradable content")]
    InvalidQuiz,
}

/// How open ended questions participate in automatic scoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenEndedPolicy {
    /// Left out of both point sums.
    ExcludeFromTotal,
    /// Count toward the total but earn nothing until a reviewer scores them.
    ManualReview,
    /// An `OpenEndedEvaluator` supplies the verdict.
    ExternalEvaluator,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GradeSettings {
    pub passing_score: u8,
    pub open_ended_policy: OpenEndedPolicy,
}

impl Default for GradeSettings {
    fn default() -> Self {
        GradeSettings {
            passing_score: 70,
            open_ended_policy: OpenEndedPolicy::ManualReview,
        }
    }
}

/// Answers collected during one quiz-taking session, keyed by question index
/// in bank order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnswerSet {
    responses: HashMap<usize, String>,
}

impl AnswerSet {
    pub fn new() -> AnswerSet {
        Default::default()
    }

    pub fn record(&mut self, index: usize, answer: &str) {
        self.responses.insert(index, answer.to_owned());
    }

    pub fn response(&self, index: usize) -> Option<&str> {
        self.responses.get(&index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

impl FromIterator<(usize, String)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (usize, String)>>(iter: I) -> AnswerSet {
        AnswerSet {
            responses: iter.into_iter().collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub earned_points: u32,
    pub total_points: u32,
    pub percentage: u8,
    pub passed: bool,
}

pub struct Grader<E: OpenEndedEvaluator> {
    settings: GradeSettings,
    evaluator: E,
}

impl Grader<NoEvaluator> {
    pub fn new(settings: GradeSettings) -> Grader<NoEvaluator> {
        Grader::with_evaluator(settings, NoEvaluator)
    }
}

impl<E: OpenEndedEvaluator> Grader<E> {
    pub fn with_evaluator(settings: GradeSettings, evaluator: E) -> Grader<E> {
        Grader {
            settings,
            evaluator,
        }
    }

    /// Computes the weighted score of an attempt. Pure: identical inputs
    /// always produce the identical result.
    pub fn grade(
        &self,
        bank: &QuestionBank,
        answers: &AnswerSet,
    ) -> Result<ScoreResult, GradeError> {
        let mut total_points = 0u32;
        let mut earned_points = 0u32;

        for (index, question) in bank.questions().iter().enumerate() {
            let correct = match &question.detail {
                QuestionDetail::OpenEnded { expected_keywords } => {
                    match self.settings.open_ended_policy {
                        OpenEndedPolicy::ExcludeFromTotal => continue,
                        OpenEndedPolicy::ManualReview => false,
                        OpenEndedPolicy::ExternalEvaluator => match answers.response(index) {
                            Some(response) => self.evaluator.evaluate(expected_keywords, response),
                            None => false,
                        },
                    }
                }
                _ => match answers.response(index) {
                    Some(response) => question.matches_answer(response),
                    None => false,
                },
            };

            total_points += question.points;
            if correct {
                earned_points += question.points;
            }
        }

        if total_points == 0 {
            return Err(GradeError::InvalidQuiz);
        }

        let percentage =
            ((earned_points as u64 * 100) as f64 / total_points as f64).round() as u8;
        let passed = percentage >= self.settings.passing_score;
        Ok(ScoreResult {
            earned_points,
            total_points,
            percentage,
            passed,
        })
    }
}
