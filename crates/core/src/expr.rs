use crate::{apply, format_number, EquationError, Operator};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Neg(Box<Expr>),
    Binary {
        left: Box<Expr>,
        op: Operator,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(left: Expr, op: Operator, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn evaluate(&self) -> Result<f64, EquationError> {
        match self {
            Expr::Number(value) => Ok(*value),
            Expr::Neg(inner) => Ok(-inner.evaluate()?),
            Expr::Binary { left, op, right } => apply(left.evaluate()?, *op, right.evaluate()?),
        }
    }

    pub fn contains_op(&self, target: Operator) -> bool {
        match self {
            Expr::Number(_) => false,
            Expr::Neg(inner) => inner.contains_op(target),
            Expr::Binary { left, op, right } => {
                *op == target || left.contains_op(target) || right.contains_op(target)
            }
        }
    }

    pub fn top_op(&self) -> Option<Operator> {
        match self {
            Expr::Binary { op, .. } => Some(*op),
            _ => None,
        }
    }
}

/// Fully parenthesized ASCII form.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(value) => f.write_str(&format_number(*value)),
            Expr::Neg(inner) => write!(f, "(-{inner})"),
            Expr::Binary { left, op, right } => write!(f, "({left} {} {right})", op.symbol()),
        }
    }
}

pub fn parse_expr(input: &str) -> Result<Expr, EquationError> {
    let mut parser = ExprParser::new(input)?;
    let expr = parser.parse_expr()?;
    if let Some(token) = parser.peek_token() {
        return Err(invalid(format!("unexpected trailing token {token:?} in {input:?}")));
    }
    Ok(expr)
}

fn invalid(message: impl Into<String>) -> EquationError {
    EquationError::InvalidExpression(message.into())
}

#[derive(Debug, Clone, PartialEq)]
enum ExprToken {
    Number(f64),
    Op(Operator),
    LParen,
    RParen,
}

struct ExprParser {
    tokens: Vec<ExprToken>,
    pos: usize,
}

impl ExprParser {
    fn new(input: &str) -> Result<Self, EquationError> {
        let tokens = tokenize_expr(input)?;
        if tokens.is_empty() {
            return Err(invalid("empty expression"));
        }
        Ok(Self { tokens, pos: 0 })
    }

    fn parse_expr(&mut self) -> Result<Expr, EquationError> {
        self.parse_add()
    }

    fn parse_add(&mut self) -> Result<Expr, EquationError> {
        let mut node = self.parse_mul()?;
        loop {
            if self.match_op(Operator::Add) {
                let right = self.parse_mul()?;
                node = Expr::binary(node, Operator::Add, right);
            } else if self.match_op(Operator::Sub) {
                let right = self.parse_mul()?;
                node = Expr::binary(node, Operator::Sub, right);
            } else {
                break;
            }
        }
        Ok(node)
    }

    fn parse_mul(&mut self) -> Result<Expr, EquationError> {
        let mut node = self.parse_unary()?;
        loop {
            if self.match_op(Operator::Mul) {
                let right = self.parse_unary()?;
                node = Expr::binary(node, Operator::Mul, right);
            } else if self.match_op(Operator::Div) {
                let right = self.parse_unary()?;
                node = Expr::binary(node, Operator::Div, right);
            } else {
                break;
            }
        }
        Ok(node)
    }

    fn parse_unary(&mut self) -> Result<Expr, EquationError> {
        if self.match_op(Operator::Sub) {
            let expr = self.parse_unary()?;
            return Ok(Expr::Neg(Box::new(expr)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, EquationError> {
        match self.next_token() {
            Some(ExprToken::Number(value)) => Ok(Expr::Number(value)),
            Some(ExprToken::LParen) => {
                let expr = self.parse_expr()?;
                self.expect_rparen()?;
                Ok(expr)
            }
            other => Err(invalid(format!("unexpected token in expression: {other:?}"))),
        }
    }

    fn match_op(&mut self, op: Operator) -> bool {
        if let Some(ExprToken::Op(value)) = self.peek_token() {
            if *value == op {
                self.pos += 1;
                return true;
            }
        }
        false
    }

    fn expect_rparen(&mut self) -> Result<(), EquationError> {
        match self.next_token() {
            Some(ExprToken::RParen) => Ok(()),
            other => Err(invalid(format!("expected ')', found {other:?}"))),
        }
    }

    fn peek_token(&self) -> Option<&ExprToken> {
        self.tokens.get(self.pos)
    }

    fn next_token(&mut self) -> Option<ExprToken> {
        let tok = self.tokens.get(self.pos)?.clone();
        self.pos += 1;
        Some(tok)
    }
}

fn tokenize_expr(input: &str) -> Result<Vec<ExprToken>, EquationError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.peek().copied() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }
        if ch.is_ascii_digit() || ch == '.' {
            let mut value = String::new();
            while let Some(next) = chars.peek().copied() {
                if !next.is_ascii_digit() && next != '.' {
                    break;
                }
                value.push(next);
                chars.next();
            }
            let number: f64 = value
                .parse()
                .map_err(|_| invalid(format!("invalid number {value:?}")))?;
            tokens.push(ExprToken::Number(number));
            continue;
        }
        match ch {
            '(' => tokens.push(ExprToken::LParen),
            ')' => tokens.push(ExprToken::RParen),
            _ => match Operator::from_symbol(ch.encode_utf8(&mut [0; 4])) {
                Some(op) => tokens.push(ExprToken::Op(op)),
                None => return Err(invalid(format!("unexpected character {ch:?}"))),
            },
        }
        chars.next();
    }
    Ok(tokens)
}
