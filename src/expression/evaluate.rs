/*
evaluate.rs

Copyright 2025 Hervé Quatremain

This file is part of Mazekit.

Mazekit is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Mazekit is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Mazekit. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Evaluate an expression in reverse Polish notation.

use std::error::Error;
use std::fmt;

use super::tokenizer::{Operator, Token};

/// Type of errors.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// The number cannot be parsed.
    InvalidNumber(String),

    /// An operator does not have its two operands.
    MissingOperand,

    /// Division by zero.
    DivisionByZero,

    /// Several values remain on the stack after the last operator.
    LeftoverOperands(usize),

    /// Parenthesis or unknown symbol in the reverse Polish notation.
    UnexpectedToken(String),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EvalError::InvalidNumber(n) => write!(f, "invalid number `{n}`"),
            EvalError::MissingOperand => write!(f, "missing operand"),
            EvalError::DivisionByZero => write!(f, "unable to divide by zero"),
            EvalError::LeftoverOperands(n) => write!(f, "{n} values left without an operator"),
            EvalError::UnexpectedToken(t) => write!(f, "unrecognized non-numeric `{t}`"),
        }
    }
}

impl Error for EvalError {}

/// Apply the operator.
fn apply(op: Operator, a: f64, b: f64) -> Result<f64, EvalError> {
    match op {
        Operator::Add => Ok(a + b),
        Operator::Subtract => Ok(a - b),
        Operator::Multiply => Ok(a * b),
        Operator::Divide => {
            if b == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            Ok(a / b)
        }
    }
}

/// Compute the value of the expression.
///
/// # Errors
///
/// The function returns an error if the expression cannot be computed.
pub fn evaluate(rpn: &[Token]) -> Result<f64, EvalError> {
    let mut stack: Vec<f64> = Vec::new();

    for token in rpn {
        match token {
            Token::Number(n) => {
                let value: f64 = n
                    .parse()
                    .map_err(|_| EvalError::InvalidNumber(n.clone()))?;
                stack.push(value);
            }
            Token::Operator(op) => {
                let b: f64 = stack.pop().ok_or(EvalError::MissingOperand)?;
                let a: f64 = stack.pop().ok_or(EvalError::MissingOperand)?;
                stack.push(apply(*op, a, b)?);
            }
            t => return Err(EvalError::UnexpectedToken(t.to_string())),
        }
    }

    match stack.as_slice() {
        [value] => Ok(*value),
        [] => Err(EvalError::MissingOperand),
        values => Err(EvalError::LeftoverOperands(values.len())),
    }
}
