use anyhow::*;
use parking_lot::{Mutex, RwLock};
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::sync::Arc;

use crate::bank::{Question, QuestionBank};
use crate::grade::{AnswerSet, GradeSettings, Grader, ScoreResult};

#[cfg(test)]
mod tests;

/// Order in which a session walks the bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionMode {
    InOrder,
    Shuffled,
}

/// One quiz-taking attempt: a bank, a presentation order and the answers
/// collected so far. Everything here is transient; storing finished attempts
/// is the application's concern.
pub struct QuizSession {
    bank: QuestionBank,
    settings: GradeSettings,
    mode: SelectionMode,
    order: Vec<usize>,
    answers: AnswerSet,
}

impl QuizSession {
    pub fn new(bank: QuestionBank, mode: SelectionMode, settings: GradeSettings) -> QuizSession {
        let mut order: Vec<usize> = (0..bank.len()).collect();
        if let SelectionMode::Shuffled = mode {
            order.shuffle(&mut rand::thread_rng());
        }
        QuizSession {
            bank,
            settings,
            mode,
            order,
            answers: AnswerSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Question shown at `position`, with its index in bank order. Answers
    /// are always recorded against the bank index, not the position.
    pub fn question_at(&self, position: usize) -> Option<(usize, &Question)> {
        let index = *self.order.get(position)?;
        Some((index, self.bank.get(index)?))
    }

    pub fn record_answer(&mut self, index: usize, answer: &str) -> Result<()> {
        if self.bank.get(index).is_none() {
            return Err(anyhow!("There is no question {}", index));
        }
        if self.answers.response(index).is_some() {
            return Err(anyhow!("Question {} was already answered", index));
        }
        self.answers.record(index, answer);
        Ok(())
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn is_complete(&self) -> bool {
        self.answers.len() == self.bank.len()
    }

    pub fn submit(&self) -> Result<ScoreResult> {
        let grader = Grader::new(self.settings.clone());
        Ok(grader.grade(&self.bank, &self.answers)?)
    }

    /// A fresh attempt over the same bank: empty answers, new shuffle.
    pub fn retake(&self) -> QuizSession {
        QuizSession::new(self.bank.clone(), self.mode, self.settings.clone())
    }
}

/// Live sessions, one per name.
#[derive(Default)]
pub struct SessionPool {
    sessions: RwLock<HashMap<String, Arc<Mutex<QuizSession>>>>,
}

impl SessionPool {
    pub fn start(&self, name: &str, session: QuizSession) -> Result<Arc<Mutex<QuizSession>>> {
        let mut sessions = self.sessions.write();
        if sessions.contains_key(name) {
            return Err(anyhow!("Session name '{}' is already in use", name));
        }
        log::info!("Started session '{}'", name);
        let session = Arc::new(Mutex::new(session));
        sessions.insert(name.to_owned(), Arc::clone(&session));
        Ok(session)
    }

    pub fn get(&self, name: &str) -> Option<Arc<Mutex<QuizSession>>> {
        self.sessions.read().get(name).cloned()
    }

    pub fn end(&self, name: &str) -> Option<Arc<Mutex<QuizSession>>> {
        self.sessions.write().remove(name)
    }
}
