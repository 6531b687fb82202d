use crate::{deduplicate_solutions, equations, Card, EquationError, Hand};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Solution {
    pub hand: Hand,
    pub equation: String,
}

impl Solution {
    pub fn hand_ref(&self) -> [&Card; 3] {
        self.hand.each_ref()
    }

    pub fn card_ids(&self) -> [&str; 3] {
        self.hand.each_ref().map(|card| card.id.as_str())
    }
}

/// Every permutation that lands on `target`, deduplicated by the literal
/// equation string and kept in enumeration order.
pub fn solutions_for_target(cards: &[Card], target: i64) -> Vec<Solution> {
    let target = target as f64;
    let mut seen = HashSet::new();
    let mut solutions = Vec::new();
    for candidate in equations(cards) {
        if candidate.result != target {
            continue;
        }
        if !seen.insert(candidate.equation.clone()) {
            continue;
        }
        solutions.push(Solution {
            hand: candidate.hand.map(Card::clone),
            equation: candidate.equation,
        });
    }
    solutions
}

pub fn is_target_reachable(cards: &[Card], target: i64) -> bool {
    let target = target as f64;
    equations(cards).any(|candidate| candidate.result == target)
}

/// Number of mathematically distinct solutions for `target`.
pub fn total_solutions(cards: &[Card], target: i64) -> Result<usize, EquationError> {
    let solutions = solutions_for_target(cards, target);
    Ok(deduplicate_solutions(&solutions)?.len())
}
