//! Level-parameterized stat formulas.
//!
//! A formula is a postfix (reverse-Polish) token sequence over integer
//! literals, the live `level` value and the operators
//! `+ - * / power sqrt middle`. It is evaluated with an explicit stack.
//!
//! ## Examples
//!
//! ```
//! use tower_core::stats::Formula;
//!
//! // 5 + level * 2
//! let attack: Formula = "5 level 2 * +".parse().unwrap();
//! assert_eq!(attack.evaluate(3).unwrap(), 11);
//!
//! // median of (level, 4, 10)
//! let speed: Formula = "level 4 10 middle".parse().unwrap();
//! assert_eq!(speed.evaluate(1).unwrap(), 4);
//! ```
//!
//! All arithmetic is checked; a malformed expression is an error, never a
//! silently coerced value.

use core::fmt;
use core::str::FromStr;

use crate::error::{ErrorSeverity, GameError};

// ============================================================================
// Errors
// ============================================================================

/// Raised when a formula cannot produce a value (the `InvalidFormula` condition).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormulaError {
    #[error("invalid formula: unknown token '{0}'")]
    UnknownToken(String),

    #[error("invalid formula: operator '{operator}' at token {position} needs {needed} operand(s)")]
    StackUnderflow {
        operator: Operator,
        position: usize,
        needed: usize,
    },

    #[error("invalid formula: expected exactly one value at the end, found {depth}")]
    LeftoverStack { depth: usize },

    #[error("invalid formula: division by zero")]
    DivisionByZero,

    #[error("invalid formula: square root of negative value {0}")]
    NegativeSqrt(i64),

    #[error("invalid formula: negative exponent {0}")]
    NegativeExponent(i64),

    #[error("invalid formula: arithmetic overflow in '{0}'")]
    Overflow(Operator),
}

impl GameError for FormulaError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownToken(_) => "FORMULA_UNKNOWN_TOKEN",
            Self::StackUnderflow { .. } => "FORMULA_STACK_UNDERFLOW",
            Self::LeftoverStack { .. } => "FORMULA_LEFTOVER_STACK",
            Self::DivisionByZero => "FORMULA_DIVISION_BY_ZERO",
            Self::NegativeSqrt(_) => "FORMULA_NEGATIVE_SQRT",
            Self::NegativeExponent(_) => "FORMULA_NEGATIVE_EXPONENT",
            Self::Overflow(_) => "FORMULA_OVERFLOW",
        }
    }
}

// ============================================================================
// Tokens
// ============================================================================

/// Operators understood by the postfix machine.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operator {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
    #[strum(serialize = "power")]
    Power,
    #[strum(serialize = "sqrt")]
    Sqrt,
    #[strum(serialize = "middle")]
    Middle,
}

impl Operator {
    /// Number of operands popped from the stack.
    pub const fn arity(self) -> usize {
        match self {
            Self::Sqrt => 1,
            Self::Middle => 3,
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Power => 2,
        }
    }
}

/// A single token of a postfix formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    /// Non-negative integer literal.
    Literal(i64),
    /// The monster's current level.
    Level,
    Op(Operator),
}

impl FromStr for Token {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "level" {
            return Ok(Self::Level);
        }
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            return s
                .parse::<i64>()
                .map(Self::Literal)
                .map_err(|_| FormulaError::UnknownToken(s.to_string()));
        }
        s.parse::<Operator>()
            .map(Self::Op)
            .map_err(|_| FormulaError::UnknownToken(s.to_string()))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Level => f.write_str("level"),
            Self::Op(op) => f.write_str(op.as_ref()),
        }
    }
}

// ============================================================================
// Formula
// ============================================================================

/// Postfix stat formula evaluated against a monster level.
///
/// Formulas are written as whitespace separated tokens in data files
/// (`"level 10 * 50 +"`) and serialize back to that form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Formula {
    tokens: Vec<Token>,
}

impl Formula {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Formula that always yields `value`.
    pub fn constant(value: i64) -> Self {
        Self::new(vec![Token::Literal(value)])
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Checks the stack shape without evaluating any arithmetic.
    ///
    /// Underflow and leftover depth do not depend on the level, so a formula
    /// that passes here can only fail at evaluation on value-dependent errors
    /// (division by zero, negative square root, overflow).
    pub fn validate(&self) -> Result<(), FormulaError> {
        let mut depth = 0usize;
        for (position, token) in self.tokens.iter().enumerate() {
            match token {
                Token::Literal(_) | Token::Level => depth += 1,
                Token::Op(op) => {
                    let needed = op.arity();
                    if depth < needed {
                        return Err(FormulaError::StackUnderflow {
                            operator: *op,
                            position,
                            needed,
                        });
                    }
                    depth = depth - needed + 1;
                }
            }
        }
        if depth != 1 {
            return Err(FormulaError::LeftoverStack { depth });
        }
        Ok(())
    }

    /// Evaluates the formula for the given level.
    pub fn evaluate(&self, level: u32) -> Result<i64, FormulaError> {
        let mut stack: Vec<i64> = Vec::with_capacity(self.tokens.len());

        for (position, token) in self.tokens.iter().enumerate() {
            match *token {
                Token::Literal(value) => stack.push(value),
                Token::Level => stack.push(i64::from(level)),
                Token::Op(op) => {
                    let needed = op.arity();
                    if stack.len() < needed {
                        return Err(FormulaError::StackUnderflow {
                            operator: op,
                            position,
                            needed,
                        });
                    }
                    let result = apply(op, &mut stack)?;
                    stack.push(result);
                }
            }
        }

        match stack.as_slice() {
            [value] => Ok(*value),
            _ => Err(FormulaError::LeftoverStack { depth: stack.len() }),
        }
    }
}

/// Pops the operands of `op` (right-hand operand first) and computes the result.
///
/// The caller guarantees the stack holds at least `op.arity()` values.
fn apply(op: Operator, stack: &mut Vec<i64>) -> Result<i64, FormulaError> {
    let mut pop = || stack.pop().unwrap_or_default();
    match op {
        Operator::Add => {
            let b = pop();
            let a = pop();
            a.checked_add(b).ok_or(FormulaError::Overflow(op))
        }
        Operator::Sub => {
            let b = pop();
            let a = pop();
            a.checked_sub(b).ok_or(FormulaError::Overflow(op))
        }
        Operator::Mul => {
            let b = pop();
            let a = pop();
            a.checked_mul(b).ok_or(FormulaError::Overflow(op))
        }
        Operator::Div => {
            let b = pop();
            let a = pop();
            floor_div(a, b)
        }
        Operator::Power => {
            let b = pop();
            let a = pop();
            if b < 0 {
                return Err(FormulaError::NegativeExponent(b));
            }
            let exponent = u32::try_from(b).map_err(|_| FormulaError::Overflow(op))?;
            a.checked_pow(exponent).ok_or(FormulaError::Overflow(op))
        }
        Operator::Sqrt => {
            let a = pop();
            if a < 0 {
                return Err(FormulaError::NegativeSqrt(a));
            }
            Ok(a.unsigned_abs().isqrt() as i64)
        }
        Operator::Middle => {
            let c = pop();
            let b = pop();
            let a = pop();
            let mut values = [a, b, c];
            values.sort_unstable();
            Ok(values[1])
        }
    }
}

/// Integer division rounding toward negative infinity.
fn floor_div(a: i64, b: i64) -> Result<i64, FormulaError> {
    if b == 0 {
        return Err(FormulaError::DivisionByZero);
    }
    let quotient = a
        .checked_div(b)
        .ok_or(FormulaError::Overflow(Operator::Div))?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        Ok(quotient - 1)
    } else {
        Ok(quotient)
    }
}

impl FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .map(str::parse::<Token>)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }
}

impl TryFrom<String> for Formula {
    type Error = FormulaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Formula> for String {
    fn from(formula: Formula) -> Self {
        formula.to_string()
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}
