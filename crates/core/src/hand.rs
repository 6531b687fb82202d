use crate::{apply, Card, EquationError};
use serde::{Deserialize, Serialize};

/// Three cards in selection order.
pub type Hand = [Card; 3];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Equation {
    pub text: String,
    pub result: f64,
}

/// `N1 OP2 N2 OP3 N3`; the first card's operator never shows up.
pub fn equation_text(hand: [&Card; 3]) -> String {
    let [first, second, third] = hand;
    format!(
        "{} {} {} {} {}",
        first.number,
        second.operator.glyph(),
        second.number,
        third.operator.glyph(),
        third.number
    )
}

/// Same layout as [`equation_text`] but with `*` and `/`.
pub fn hand_to_expression(hand: [&Card; 3]) -> String {
    let [first, second, third] = hand;
    format!(
        "{} {} {} {} {}",
        first.number,
        second.operator.symbol(),
        second.number,
        third.operator.symbol(),
        third.number
    )
}

pub fn calculate_result(hand: [&Card; 3]) -> Result<f64, EquationError> {
    let [first, second, third] = hand;
    let n1 = first.number as f64;
    let n2 = second.number as f64;
    let n3 = third.number as f64;
    let (op2, op3) = (second.operator, third.operator);

    // Only low-then-high needs the right pair grouped first; every other
    // ordering is already left-associative under standard precedence.
    if !op2.is_high_precedence() && op3.is_high_precedence() {
        let right = apply(n2, op3, n3)?;
        return apply(n1, op2, right);
    }
    let left = apply(n1, op2, n2)?;
    apply(left, op3, n3)
}

pub fn evaluate_hand(hand: [&Card; 3]) -> Result<Equation, EquationError> {
    let result = calculate_result(hand)?;
    Ok(Equation {
        text: equation_text(hand),
        result,
    })
}
