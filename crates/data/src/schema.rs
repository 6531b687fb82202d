use pyramid_core::{DifficultyConfig, DifficultyTable};
use serde::{Deserialize, Serialize};

/// On-disk difficulty table. Missing entries fall back to the built-in
/// defaults for that difficulty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DifficultyFile {
    #[serde(default)]
    pub easy: Option<DifficultyConfig>,
    #[serde(default)]
    pub medium: Option<DifficultyConfig>,
    #[serde(default)]
    pub hard: Option<DifficultyConfig>,
}

impl DifficultyFile {
    pub fn into_table(self) -> DifficultyTable {
        let defaults = DifficultyTable::default();
        DifficultyTable {
            easy: self.easy.unwrap_or(defaults.easy),
            medium: self.medium.unwrap_or(defaults.medium),
            hard: self.hard.unwrap_or(defaults.hard),
        }
    }
}

impl From<DifficultyTable> for DifficultyFile {
    fn from(table: DifficultyTable) -> Self {
        Self {
            easy: Some(table.easy),
            medium: Some(table.medium),
            hard: Some(table.hard),
        }
    }
}
