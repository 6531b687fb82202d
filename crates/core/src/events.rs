use crate::Difficulty;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    ConfigurationGenerated {
        difficulty: Difficulty,
        cards: usize,
        target: i64,
        total_solutions: usize,
        attempts: u32,
    },
    GameStarted {
        difficulty: Difficulty,
        target: i64,
        cards: usize,
        total_solutions: usize,
    },
    HandSubmitted {
        card_ids: [String; 3],
        equation: String,
        result: f64,
    },
    SolutionFound {
        key: String,
        found: usize,
        total: usize,
        score: u32,
    },
    DuplicateSolution { key: String },
    WrongAnswer { result: f64, target: i64 },
    GameCompleted {
        found: usize,
        score: u32,
        duration_ms: Option<u64>,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}
