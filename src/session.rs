use std::collections::HashMap;

use log::{info, warn};
use rand::seq::SliceRandom;

use crate::api::{Question, QuestionRequest, TriviaClient};
use crate::catalog::CategoryCatalog;
use crate::config::QuizConfig;

pub const NOT_ANSWERED: &str = "Not answered";

#[derive(Debug)]
pub enum Phase {
    Idle,
    Loading,
    Failed(String),
    InProgress,
    Completed(QuizResult),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    pub timed_out: bool,
    pub review: Vec<ReviewEntry>,
}

impl QuizResult {
    /// Rounded-down percentage; an empty batch scores 0% rather than
    /// dividing by zero.
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.score * 100 / self.total) as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEntry {
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
}

/// One playthrough: fetch a question batch, track answers under a countdown,
/// score on submit or timeout. `Completed` is terminal; a new quiz means a
/// new session.
pub struct QuizSession {
    config: QuizConfig,
    phase: Phase,
    questions: Vec<Question>,
    answer_orders: Vec<Vec<String>>,
    selections: HashMap<usize, String>,
    remaining_seconds: u32,
}

impl QuizSession {
    pub fn new(config: QuizConfig) -> QuizSession {
        QuizSession {
            config,
            phase: Phase::Idle,
            questions: Vec::new(),
            answer_orders: Vec::new(),
            selections: HashMap::new(),
            remaining_seconds: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// The frozen display order for one question's choices. Shuffled once
    /// when the batch arrives; re-shuffling on every read would let the user
    /// infer correctness by watching the order reset.
    pub fn answer_choices(&self, index: usize) -> &[String] {
        self.answer_orders
            .get(index)
            .map(|order| order.as_slice())
            .unwrap_or(&[])
    }

    pub fn selection(&self, index: usize) -> Option<&str> {
        self.selections.get(&index).map(|s| s.as_str())
    }

    pub fn result(&self) -> Option<&QuizResult> {
        match &self.phase {
            Phase::Completed(result) => Some(result),
            _ => None,
        }
    }

    /// Fetches the batch for this session's configuration. Re-invocable from
    /// `Failed` as the manual retry; a completed session stays completed.
    pub async fn start(&mut self, client: &TriviaClient, catalog: &CategoryCatalog) {
        if matches!(self.phase, Phase::Completed(_)) {
            return;
        }
        self.phase = Phase::Loading;
        self.selections.clear();
        self.answer_orders.clear();
        self.questions.clear();

        let request = self.build_request(catalog);
        match client.fetch_questions(&request).await {
            Ok(questions) => self.begin(questions),
            Err(error) => {
                warn!("Question fetch failed: {error}");
                self.phase = Phase::Failed(error.to_string());
            }
        }
    }

    fn build_request(&self, catalog: &CategoryCatalog) -> QuestionRequest {
        QuestionRequest {
            amount: self.config.question_count,
            category: catalog.id_for_name(&self.config.category),
            difficulty: self.config.difficulty.api_param(),
            question_type: self.config.question_type.api_param(),
        }
    }

    fn begin(&mut self, questions: Vec<Question>) {
        let mut rng = rand::rng();
        self.answer_orders = questions
            .iter()
            .map(|question| {
                let mut order = question.incorrect_answers.clone();
                order.push(question.correct_answer.clone());
                order.shuffle(&mut rng);
                order
            })
            .collect();
        self.questions = questions;
        self.selections.clear();
        self.remaining_seconds = self.config.timer.seconds();
        self.phase = Phase::InProgress;
        info!(
            "Quiz started: {} questions, {} seconds",
            self.questions.len(),
            self.remaining_seconds
        );
    }

    /// Records or overwrites the choice for one question. Ignored outside
    /// `InProgress`.
    pub fn select_answer(&mut self, index: usize, answer: &str) {
        if !matches!(self.phase, Phase::InProgress) {
            return;
        }
        if index >= self.questions.len() {
            return;
        }
        self.selections.insert(index, answer.to_string());
    }

    /// One second elapsed. Hitting zero completes the session with
    /// `timed_out = true`; ticks outside `InProgress` do nothing, so a late
    /// tick racing a submit is a no-op.
    pub fn tick(&mut self) {
        if !matches!(self.phase, Phase::InProgress) {
            return;
        }
        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
        }
        if self.remaining_seconds == 0 {
            info!("Time expired, scoring answered questions");
            self.complete(true);
        }
    }

    /// User-initiated completion. A no-op unless the session is in progress,
    /// so a submit arriving after the timeout tick cannot re-score.
    pub fn submit(&mut self) {
        if !matches!(self.phase, Phase::InProgress) {
            return;
        }
        self.complete(false);
    }

    fn complete(&mut self, timed_out: bool) {
        let mut score = 0;
        let review = self
            .questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let user_answer = match self.selections.get(&index) {
                    Some(answer) => {
                        if answer == &question.correct_answer {
                            score += 1;
                        }
                        answer.clone()
                    }
                    None => NOT_ANSWERED.to_string(),
                };
                ReviewEntry {
                    question: question.text.clone(),
                    user_answer,
                    correct_answer: question.correct_answer.clone(),
                }
            })
            .collect();

        let result = QuizResult {
            score,
            total: self.questions.len(),
            timed_out,
            review,
        };
        info!(
            "Quiz completed: {}/{} correct, timed_out={}",
            result.score, result.total, result.timed_out
        );
        self.phase = Phase::Completed(result);
    }
}
