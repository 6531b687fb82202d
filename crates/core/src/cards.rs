use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "×")]
    Mul,
    #[serde(rename = "÷")]
    Div,
}

impl Operator {
    pub const ALL: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

    /// Glyph shown to players in equation strings.
    pub fn glyph(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "×",
            Operator::Div => "÷",
        }
    }

    /// ASCII form used in normalized expressions.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
        }
    }

    pub fn from_symbol(value: &str) -> Option<Self> {
        match value {
            "+" => Some(Operator::Add),
            "-" | "−" => Some(Operator::Sub),
            "*" | "×" | "x" => Some(Operator::Mul),
            "/" | "÷" => Some(Operator::Div),
            _ => None,
        }
    }

    pub fn is_high_precedence(self) -> bool {
        matches!(self, Operator::Mul | Operator::Div)
    }

    pub fn is_commutative(self) -> bool {
        matches!(self, Operator::Add | Operator::Mul)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub id: String,
    pub label: String,
    pub operator: Operator,
    pub number: i64,
    #[serde(default)]
    pub position: usize,
}

impl Card {
    pub fn new(label: impl Into<String>, operator: Operator, number: i64, position: usize) -> Self {
        let label = label.into();
        Self {
            id: format!("card-{label}"),
            label,
            operator,
            number,
            position,
        }
    }

    /// A `÷ 0` card is poisonous in the 2nd or 3rd slot of a hand.
    pub fn divides_by_zero(&self) -> bool {
        self.operator == Operator::Div && self.number == 0
    }
}

/// Short `op number` form, e.g. `×7`.
impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.number)
    }
}

/// Spreadsheet-style label: `A..Z`, then `AA, AB, ...`.
pub fn card_label(position: usize) -> String {
    let mut n = position + 1;
    let mut label = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}
