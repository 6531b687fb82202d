//! Canonical keys for equations, so that commutative reorderings of the same
//! hand count as one solution.
//!
//! Two hands with equal keys always share a numeric result. Different keys may
//! still land on the same number; those are distinct derivations.

use crate::{
    calculate_result, format_number, hand_to_expression, parse_expr, Card, EquationError, Expr,
    Operator,
};

pub fn canonical_key(hand: [&Card; 3]) -> Result<String, EquationError> {
    let result = calculate_result(hand)?;
    let normalized = normalize_expression(&hand_to_expression(hand))?;
    Ok(format!("{}:{normalized}", format_number(result)))
}

pub fn normalize_expression(expression: &str) -> Result<String, EquationError> {
    let parsed = parse_expr(expression)?;
    normalize_expr(&parsed)
}

pub fn normalize_expr(expr: &Expr) -> Result<String, EquationError> {
    if is_additive_chain(expr) {
        normalize_additive(expr)
    } else {
        Ok(normalize_node(expr))
    }
}

pub fn evaluate_expression(expression: &str) -> Result<f64, EquationError> {
    parse_expr(expression)?.evaluate()
}

/// False when either side fails to parse.
pub fn are_expressions_equivalent(left: &str, right: &str) -> bool {
    match (normalize_expression(left), normalize_expression(right)) {
        (Ok(left), Ok(right)) => left == right,
        _ => false,
    }
}

/// A `+`/`-` chain with no multiplicative operator anywhere inside.
pub fn is_additive_chain(expr: &Expr) -> bool {
    matches!(expr.top_op(), Some(Operator::Add | Operator::Sub))
        && !expr.contains_op(Operator::Mul)
        && !expr.contains_op(Operator::Div)
}

/// Splits the chain into sorted positive and negative terms: `5 - 8 + 4`
/// and `5 + 4 - 8` both become `4+5-8`.
fn normalize_additive(expr: &Expr) -> Result<String, EquationError> {
    let mut positive = Vec::new();
    let mut negative = Vec::new();
    collect_terms(expr, false, &mut positive, &mut negative)?;
    positive.sort_by(f64::total_cmp);
    negative.sort_by(f64::total_cmp);

    let mut out = join_terms(&positive, "+");
    if !negative.is_empty() {
        out.push('-');
        out.push_str(&join_terms(&negative, "-"));
    }
    Ok(out)
}

fn collect_terms(
    expr: &Expr,
    negated: bool,
    positive: &mut Vec<f64>,
    negative: &mut Vec<f64>,
) -> Result<(), EquationError> {
    match expr {
        Expr::Number(value) => {
            if negated {
                negative.push(*value);
            } else {
                positive.push(*value);
            }
            Ok(())
        }
        Expr::Neg(inner) => collect_terms(inner, !negated, positive, negative),
        Expr::Binary {
            left,
            op: Operator::Add,
            right,
        } => {
            collect_terms(left, negated, positive, negative)?;
            collect_terms(right, negated, positive, negative)
        }
        Expr::Binary {
            left,
            op: Operator::Sub,
            right,
        } => {
            collect_terms(left, negated, positive, negative)?;
            collect_terms(right, !negated, positive, negative)
        }
        Expr::Binary { .. } => Err(EquationError::InvalidExpression(format!(
            "multiplicative term {expr} inside additive chain"
        ))),
    }
}

fn join_terms(terms: &[f64], sep: &str) -> String {
    terms
        .iter()
        .map(|term| format_number(*term))
        .collect::<Vec<_>>()
        .join(sep)
}

fn normalize_node(expr: &Expr) -> String {
    match expr {
        Expr::Number(value) => format_number(*value),
        Expr::Neg(inner) => format!("(-{})", normalize_node(inner)),
        Expr::Binary { op, .. } if op.is_commutative() => {
            let mut operands = Vec::new();
            flatten_operands(expr, *op, &mut operands);
            // Division is never commutative, and a chain carrying a quotient
            // keeps its source order too.
            let pinned = operands
                .iter()
                .any(|operand| operand.contains_op(Operator::Div));
            let mut rendered: Vec<String> = operands.into_iter().map(normalize_node).collect();
            if !pinned {
                rendered.sort();
            }
            format!("({})", rendered.join(&format!(" {} ", op.symbol())))
        }
        Expr::Binary { left, op, right } => format!(
            "({} {} {})",
            normalize_node(left),
            op.symbol(),
            normalize_node(right)
        ),
    }
}

/// `((1 * 2) * 11)` -> `[1, 2, 11]`
fn flatten_operands<'a>(expr: &'a Expr, target: Operator, out: &mut Vec<&'a Expr>) {
    match expr {
        Expr::Binary { left, op, right } if *op == target => {
            flatten_operands(left, target, out);
            flatten_operands(right, target, out);
        }
        other => out.push(other),
    }
}
