use crate::{
    canonical_key, evaluate_hand, Card, CompletionStats, Difficulty, EquationError, Event,
    EventBus, GameCompletionState, GameConfiguration, Solution, SolutionProgress, SolutionSet,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("unknown card id {0}")]
    UnknownCard(String),
    #[error("card {0} selected more than once")]
    RepeatedCard(String),
    #[error("game already completed")]
    GameCompleted,
    #[error("equation error: {0}")]
    Equation(#[from] EquationError),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerAnswer {
    pub card_ids: [String; 3],
    pub equation: String,
    pub result: f64,
    pub is_correct: bool,
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Found { key: String, solution: Solution },
    Duplicate { key: String },
    Incorrect { result: f64 },
}

#[derive(Debug, Clone)]
pub struct GameSession {
    pub difficulty: Difficulty,
    pub cards: Vec<Card>,
    pub target: i64,
    pub found: SolutionSet,
    pub completion: GameCompletionState,
    pub answers: Vec<PlayerAnswer>,
    pub score: u32,
    pub started_at: u64,
}

impl GameSession {
    pub fn start(configuration: GameConfiguration, now_ms: u64, events: &mut EventBus) -> Self {
        events.push(Event::GameStarted {
            difficulty: configuration.difficulty,
            target: configuration.target,
            cards: configuration.cards.len(),
            total_solutions: configuration.total_solutions,
        });
        Self {
            difficulty: configuration.difficulty,
            cards: configuration.cards,
            target: configuration.target,
            found: SolutionSet::new(),
            completion: GameCompletionState::new(configuration.total_solutions),
            answers: Vec::new(),
            score: 0,
            started_at: now_ms,
        }
    }

    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn card_by_label(&self, label: &str) -> Option<&Card> {
        self.cards
            .iter()
            .find(|card| card.label.eq_ignore_ascii_case(label))
    }

    pub fn is_completed(&self) -> bool {
        self.completion.is_completed
    }

    pub fn progress(&self) -> SolutionProgress {
        SolutionProgress::new(self.found.len(), self.completion.total_solutions)
    }

    pub fn stats(&self) -> CompletionStats {
        self.completion.stats(Some(self.started_at))
    }

    pub fn submit(
        &mut self,
        card_ids: [&str; 3],
        now_ms: u64,
        events: &mut EventBus,
    ) -> Result<SubmitOutcome, SessionError> {
        if self.is_completed() {
            return Err(SessionError::GameCompleted);
        }
        let hand = self.select_hand(card_ids)?.map(Card::clone);
        let equation = evaluate_hand(hand.each_ref())?;
        let is_correct = equation.result == self.target as f64;

        events.push(Event::HandSubmitted {
            card_ids: card_ids.map(str::to_string),
            equation: equation.text.clone(),
            result: equation.result,
        });
        self.answers.push(PlayerAnswer {
            card_ids: card_ids.map(str::to_string),
            equation: equation.text.clone(),
            result: equation.result,
            is_correct,
            timestamp: now_ms,
        });

        if !is_correct {
            events.push(Event::WrongAnswer {
                result: equation.result,
                target: self.target,
            });
            return Ok(SubmitOutcome::Incorrect {
                result: equation.result,
            });
        }

        let key = canonical_key(hand.each_ref())?;
        let solution = Solution {
            hand,
            equation: equation.text,
        };
        let (found, added) =
            std::mem::take(&mut self.found).record_keyed(key.clone(), solution.clone());
        self.found = found;
        if !added {
            events.push(Event::DuplicateSolution { key: key.clone() });
            return Ok(SubmitOutcome::Duplicate { key });
        }

        self.score += 1;
        self.completion = self.completion.update(self.found.len(), now_ms);
        events.push(Event::SolutionFound {
            key: key.clone(),
            found: self.found.len(),
            total: self.completion.total_solutions,
            score: self.score,
        });
        if self.completion.is_completed {
            events.push(Event::GameCompleted {
                found: self.found.len(),
                score: self.score,
                duration_ms: self.stats().game_duration,
            });
        }
        Ok(SubmitOutcome::Found { key, solution })
    }

    fn select_hand(&self, card_ids: [&str; 3]) -> Result<[&Card; 3], SessionError> {
        for (idx, id) in card_ids.iter().enumerate() {
            if card_ids[..idx].contains(id) {
                return Err(SessionError::RepeatedCard(id.to_string()));
            }
        }
        let [a, b, c] = card_ids;
        let lookup = |id: &str| {
            self.card(id)
                .ok_or_else(|| SessionError::UnknownCard(id.to_string()))
        };
        Ok([lookup(a)?, lookup(b)?, lookup(c)?])
    }
}
