use crate::schema::DifficultyFile;
use anyhow::Context;
use pyramid_core::DifficultyTable;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub const DIFFICULTY_FILE: &str = "difficulty.json";

/// Reads `difficulty.json` from `dir`, or the built-in table when the file
/// does not exist.
pub fn load_difficulty_table(dir: &Path) -> anyhow::Result<DifficultyTable> {
    let path = dir.join(DIFFICULTY_FILE);
    if !path.exists() {
        return Ok(DifficultyTable::default());
    }
    load_difficulty_file(&path)
}

pub fn load_difficulty_file(path: &Path) -> anyhow::Result<DifficultyTable> {
    let file: DifficultyFile = load_json(path)?;
    let table = file.into_table();
    table
        .validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(table)
}

pub fn parse_difficulty_table(raw: &str) -> anyhow::Result<DifficultyTable> {
    let file: DifficultyFile = serde_json::from_str(raw).context("parse difficulty table")?;
    let table = file.into_table();
    table.validate().context("validate difficulty table")?;
    Ok(table)
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
