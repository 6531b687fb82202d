use crate::{
    card_label, equations, is_target_reachable, is_valid_game_result, total_solutions, Card,
    ConfigError, Difficulty, DifficultyConfig, EquationError, Event, EventBus, Operator, RngState,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

/// Smallest playable board is a 3x3 grid.
pub const MIN_GAME_CARDS: usize = 9;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameConfiguration {
    pub difficulty: Difficulty,
    pub cards: Vec<Card>,
    pub target: i64,
    pub total_solutions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("no reachable target for this card set")]
    NoReachableTarget,
    #[error("Failed to generate valid card set after {0} attempts")]
    CardSetAttemptsExhausted(u32),
    #[error("Failed to generate valid game configuration after {0} attempts")]
    AttemptsExhausted(u32),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("equation error: {0}")]
    Equation(#[from] EquationError),
}

pub fn generate_cards(
    config: &DifficultyConfig,
    count: usize,
    rng: &mut RngState,
) -> Result<Vec<Card>, GenerateError> {
    config.validate()?;
    let weights: Vec<u32> = Operator::ALL
        .iter()
        .map(|op| config.operator_weights.weight(*op))
        .collect();
    let mut cards = Vec::with_capacity(count);
    for position in 0..count {
        let number = rng.range_inclusive(config.min_number, config.max_number);
        let idx = rng.weighted_index(&weights).ok_or_else(|| {
            ConfigError::Invalid("operator weights must not all be zero".to_string())
        })?;
        cards.push(Card::new(card_label(position), Operator::ALL[idx], number, position));
    }
    Ok(cards)
}

/// Checks numbers against the configured range and rejects `÷ 0` in the
/// two slots whose operator is applied.
pub fn validate_equation_format(hand: [&Card; 3], config: &DifficultyConfig) -> bool {
    if hand.iter().any(|card| !config.number_in_range(card.number)) {
        return false;
    }
    !hand[1].divides_by_zero() && !hand[2].divides_by_zero()
}

pub fn validate_card_set(cards: &[Card], config: &DifficultyConfig) -> bool {
    if cards.len() < 3 {
        return false;
    }
    let mut ids = HashSet::new();
    for card in cards {
        if !ids.insert(card.id.as_str()) {
            return false;
        }
        if !config.number_in_range(card.number) || card.divides_by_zero() {
            return false;
        }
    }
    !reachable_targets(cards, config).is_empty()
}

/// Distinct integer results inside the target range, ascending.
pub fn reachable_targets(cards: &[Card], config: &DifficultyConfig) -> BTreeSet<i64> {
    equations(cards)
        .filter(|candidate| is_valid_game_result(candidate.result))
        .map(|candidate| candidate.result as i64)
        .filter(|value| config.target_range.contains(*value))
        .collect()
}

pub fn generate_target_number(
    cards: &[Card],
    config: &DifficultyConfig,
    rng: &mut RngState,
) -> Result<i64, GenerateError> {
    let targets: Vec<i64> = reachable_targets(cards, config).into_iter().collect();
    let idx = rng
        .index(targets.len())
        .ok_or(GenerateError::NoReachableTarget)?;
    Ok(targets[idx])
}

pub fn generate_valid_card_set(
    config: &DifficultyConfig,
    rng: &mut RngState,
    max_attempts: u32,
) -> Result<Vec<Card>, GenerateError> {
    config.validate()?;
    for _ in 0..max_attempts {
        let cards = generate_cards(config, config.card_count(), rng)?;
        if validate_card_set(&cards, config) {
            return Ok(cards);
        }
    }
    Err(GenerateError::CardSetAttemptsExhausted(max_attempts))
}

/// Each attempt draws exactly one card set; rejected sets and unlucky
/// targets both count against `max_attempts`.
pub fn generate_valid_game_configuration(
    difficulty: Difficulty,
    config: &DifficultyConfig,
    rng: &mut RngState,
    max_attempts: u32,
    events: &mut EventBus,
) -> Result<GameConfiguration, GenerateError> {
    config.validate()?;
    for attempt in 1..=max_attempts {
        let cards = generate_cards(config, config.card_count(), rng)?;
        if !validate_card_set(&cards, config) {
            continue;
        }
        let target = match generate_target_number(&cards, config, rng) {
            Ok(target) => target,
            Err(GenerateError::NoReachableTarget) => continue,
            Err(err) => return Err(err),
        };
        let total = total_solutions(&cards, target)?;
        if total == 0 {
            continue;
        }
        events.push(Event::ConfigurationGenerated {
            difficulty,
            cards: cards.len(),
            target,
            total_solutions: total,
            attempts: attempt,
        });
        return Ok(GameConfiguration {
            difficulty,
            cards,
            target,
            total_solutions: total,
        });
    }
    Err(GenerateError::AttemptsExhausted(max_attempts))
}

pub fn validate_game_configuration(cards: &[Card], target: i64) -> bool {
    cards.len() >= MIN_GAME_CARDS
        && target > 0
        && !cards.iter().any(Card::divides_by_zero)
        && is_target_reachable(cards, target)
}
