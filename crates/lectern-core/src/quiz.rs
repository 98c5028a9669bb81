//! Quiz answers and scoring

use std::fmt;

use crate::content::QuizSpec;
use crate::error::CoreError;

/// Selection state of one question
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnswerState {
    #[default]
    Unanswered,
    Answered(usize),
}

impl AnswerState {
    /// Option index, or -1 when unanswered
    pub fn as_sentinel(self) -> i64 {
        match self {
            AnswerState::Unanswered => -1,
            AnswerState::Answered(i) => i64::try_from(i).unwrap_or(i64::MAX),
        }
    }

    pub fn selected(self) -> Option<usize> {
        match self {
            AnswerState::Unanswered => None,
            AnswerState::Answered(i) => Some(i),
        }
    }
}

/// Result of checking a quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score: {}/{}", self.correct, self.total)
    }
}

/// Per-question answers for one quiz
#[derive(Debug, Clone)]
pub struct QuizStateMachine {
    option_counts: Vec<usize>,
    correct: Vec<usize>,
    answers: Vec<AnswerState>,
}

impl QuizStateMachine {
    pub fn new(quiz: &QuizSpec) -> Self {
        Self {
            option_counts: quiz.questions.iter().map(|q| q.options.len()).collect(),
            correct: quiz.questions.iter().map(|q| q.correct_option).collect(),
            answers: vec![AnswerState::Unanswered; quiz.questions.len()],
        }
    }

    /// Record (or overwrite) the answer to `question`
    pub fn select_answer(&mut self, question: usize, option: usize) -> Result<(), CoreError> {
        let options = *self
            .option_counts
            .get(question)
            .ok_or_else(|| CoreError::invalid_question(question, self.option_counts.len()))?;
        if option >= options {
            return Err(CoreError::invalid_option(option, options));
        }
        self.answers[question] = AnswerState::Answered(option);
        Ok(())
    }

    /// Count correct answers. Unanswered questions are never correct.
    pub fn compute_score(&self) -> Score {
        let correct = (0..self.question_count())
            .filter(|&q| self.is_correct(q))
            .count();
        Score {
            correct,
            total: self.question_count(),
        }
    }

    pub fn answer(&self, question: usize) -> Option<AnswerState> {
        self.answers.get(question).copied()
    }

    pub fn is_correct(&self, question: usize) -> bool {
        match (self.answers.get(question), self.correct.get(question)) {
            (Some(AnswerState::Answered(selected)), Some(correct)) => selected == correct,
            _ => false,
        }
    }

    pub fn answers(&self) -> &[AnswerState] {
        &self.answers
    }

    pub fn answered_count(&self) -> usize {
        self.answers
            .iter()
            .filter(|a| matches!(a, AnswerState::Answered(_)))
            .count()
    }

    pub fn question_count(&self) -> usize {
        self.answers.len()
    }
}
