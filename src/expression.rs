/*
expression.rs

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

//! Arithmetic expression calculator.
//!
//! Expressions use the four operators `+`, `-`, `*`, `/`, parentheses, and decimal numbers.
//! Evaluating an expression goes through four steps:
//!
//! * [`tokenizer::tokenize`] splits the text into [`tokenizer::Token`] values.
//! * [`validate::validate`] rejects malformed expressions with a readable reason.
//! * [`shunting_yard::to_rpn`] reorders the tokens in reverse Polish notation by using the
//!   shunting-yard algorithm.
//! * [`evaluate::evaluate`] computes the result with a stack.
//!
//! [`evaluate_str`] chains the four steps.

pub mod evaluate;
pub mod shunting_yard;
pub mod tokenizer;
pub mod validate;

use log::debug;
use std::error::Error;
use std::fmt;

use evaluate::EvalError;
use tokenizer::Token;
use validate::ValidationError;

/// Type of errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionError {
    /// The expression is malformed.
    Invalid(ValidationError),

    /// The expression cannot be computed.
    Eval(EvalError),
}

impl fmt::Display for ExpressionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExpressionError::Invalid(e) => write!(f, "Invalid Expression: {e}"),
            ExpressionError::Eval(e) => write!(f, "ERROR: {e}"),
        }
    }
}

impl Error for ExpressionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ExpressionError::Invalid(e) => Some(e),
            ExpressionError::Eval(e) => Some(e),
        }
    }
}

impl From<ValidationError> for ExpressionError {
    fn from(e: ValidationError) -> Self {
        ExpressionError::Invalid(e)
    }
}

impl From<EvalError> for ExpressionError {
    fn from(e: EvalError) -> Self {
        ExpressionError::Eval(e)
    }
}

/// Tokenize, validate, convert, and compute the expression.
///
/// # Errors
///
/// The function returns an error if the expression is malformed or cannot be computed.
pub fn evaluate_str(input: &str) -> Result<f64, ExpressionError> {
    let tokens: Vec<Token> = tokenizer::tokenize(input);
    validate::validate(&tokens)?;
    let rpn: Vec<Token> = shunting_yard::to_rpn(&tokens)?;
    debug!(
        "RPN: {}",
        rpn.iter()
            .map(|t| t.to_string())
            .collect::<Vec<String>>()
            .join(" ")
    );
    Ok(evaluate::evaluate(&rpn)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(input: &str, expected: f64) {
        let value: f64 = evaluate_str(input).unwrap();
        assert!(
            (value - expected).abs() < 1e-9,
            "{input} = {value}, expected {expected}"
        );
    }

    #[test_log::test]
    fn whole_pipeline() {
        assert_close("2.9 / 3 * 34 - 6 + 3 / 4", 2.9 / 3.0 * 34.0 - 6.0 + 3.0 / 4.0);
        assert_close("8 - 3 - 2", 3.0);
        assert_close("(1 + 2) * -3", -9.0);
        assert_close("-4 - -4", 0.0);
        assert_close("((2))", 2.0);
        assert_close(".5 * 4", 2.0);
    }

    #[test]
    fn errors_are_tagged_by_stage() {
        assert_eq!(
            evaluate_str("3 +"),
            Err(ExpressionError::Invalid(ValidationError::EndsWithOperator))
        );
        assert_eq!(
            evaluate_str("1 / (2 - 2)"),
            Err(ExpressionError::Eval(EvalError::DivisionByZero))
        );
        assert_eq!(
            evaluate_str("1 / 0").unwrap_err().to_string(),
            "ERROR: unable to divide by zero"
        );
        assert_eq!(
            evaluate_str("").unwrap_err().to_string(),
            "Invalid Expression: empty input"
        );
    }
}
