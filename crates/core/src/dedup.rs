use crate::{canonical_key, EquationError, Solution};
use std::collections::HashMap;

/// Canonical key -> first representative solution, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionSet {
    index: HashMap<String, usize>,
    solutions: Vec<Solution>,
}

impl SolutionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_solutions(solutions: &[Solution]) -> Result<Self, EquationError> {
        let mut set = Self::new();
        for solution in solutions {
            set.insert(solution.clone())?;
        }
        Ok(set)
    }

    /// Returns `false` when an equivalent solution is already present.
    pub fn insert(&mut self, solution: Solution) -> Result<bool, EquationError> {
        let key = canonical_key(solution.hand_ref())?;
        Ok(self.insert_keyed(key, solution))
    }

    /// `key` must be `canonical_key` of the solution's hand.
    pub fn insert_keyed(&mut self, key: String, solution: Solution) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.solutions.len());
        self.solutions.push(solution);
        true
    }

    /// Consumes the set and hands it back with `solution` recorded.
    pub fn record(self, solution: Solution) -> Result<(Self, bool), EquationError> {
        let key = canonical_key(solution.hand_ref())?;
        Ok(self.record_keyed(key, solution))
    }

    pub fn record_keyed(mut self, key: String, solution: Solution) -> (Self, bool) {
        let added = self.insert_keyed(key, solution);
        (self, added)
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    pub fn into_solutions(self) -> Vec<Solution> {
        self.solutions
    }
}

/// Keeps the first solution per canonical key.
pub fn deduplicate_solutions(solutions: &[Solution]) -> Result<Vec<Solution>, EquationError> {
    Ok(SolutionSet::from_solutions(solutions)?.into_solutions())
}
