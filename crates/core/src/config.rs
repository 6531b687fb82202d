use crate::Operator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
    #[error("invalid difficulty config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn id(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ConfigError::UnknownDifficulty(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OperatorWeights {
    #[serde(rename = "+")]
    pub add: u32,
    #[serde(rename = "-")]
    pub sub: u32,
    #[serde(rename = "×")]
    pub mul: u32,
    #[serde(rename = "÷")]
    pub div: u32,
}

impl OperatorWeights {
    pub fn weight(&self, op: Operator) -> u32 {
        match op {
            Operator::Add => self.add,
            Operator::Sub => self.sub,
            Operator::Mul => self.mul,
            Operator::Div => self.div,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetRange {
    pub min: i64,
    pub max: i64,
}

impl TargetRange {
    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DifficultyConfig {
    pub min_number: i64,
    pub max_number: i64,
    pub operator_weights: OperatorWeights,
    pub target_range: TargetRange,
    pub grid_size: usize,
}

impl DifficultyConfig {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                min_number: 1,
                max_number: 10,
                operator_weights: OperatorWeights {
                    add: 40,
                    sub: 30,
                    mul: 20,
                    div: 10,
                },
                target_range: TargetRange { min: 1, max: 50 },
                grid_size: 4,
            },
            Difficulty::Medium => Self {
                min_number: 1,
                max_number: 12,
                operator_weights: OperatorWeights {
                    add: 30,
                    sub: 30,
                    mul: 25,
                    div: 15,
                },
                target_range: TargetRange { min: 1, max: 100 },
                grid_size: 5,
            },
            Difficulty::Hard => Self {
                min_number: 1,
                max_number: 15,
                operator_weights: OperatorWeights {
                    add: 25,
                    sub: 25,
                    mul: 25,
                    div: 25,
                },
                target_range: TargetRange { min: 1, max: 200 },
                grid_size: 6,
            },
        }
    }

    pub fn card_count(&self) -> usize {
        self.grid_size * self.grid_size
    }

    pub fn number_in_range(&self, number: i64) -> bool {
        (self.min_number..=self.max_number).contains(&number)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_number > self.max_number {
            return Err(ConfigError::Invalid(format!(
                "number range {}..={} is empty",
                self.min_number, self.max_number
            )));
        }
        if Operator::ALL
            .iter()
            .any(|op| self.operator_weights.weight(*op) == 0)
        {
            return Err(ConfigError::Invalid(
                "every operator needs a positive weight".to_string(),
            ));
        }
        if self.target_range.min <= 0 || self.target_range.min > self.target_range.max {
            return Err(ConfigError::Invalid(format!(
                "target range {}..={} must be positive and ordered",
                self.target_range.min, self.target_range.max
            )));
        }
        if self.grid_size < 3 {
            return Err(ConfigError::Invalid(format!(
                "grid size {} is smaller than 3",
                self.grid_size
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DifficultyTable {
    pub easy: DifficultyConfig,
    pub medium: DifficultyConfig,
    pub hard: DifficultyConfig,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: DifficultyConfig::for_difficulty(Difficulty::Easy),
            medium: DifficultyConfig::for_difficulty(Difficulty::Medium),
            hard: DifficultyConfig::for_difficulty(Difficulty::Hard),
        }
    }
}

impl DifficultyTable {
    pub fn get(&self, difficulty: Difficulty) -> &DifficultyConfig {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for difficulty in Difficulty::ALL {
            self.get(difficulty).validate().map_err(|err| match err {
                ConfigError::Invalid(message) => {
                    ConfigError::Invalid(format!("{difficulty}: {message}"))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}
