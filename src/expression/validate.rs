/*
validate.rs

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

//! Reject malformed expressions before converting them.

use std::error::Error;
use std::fmt;

use super::tokenizer::Token;

/// Reason why an expression is malformed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ValidationError {
    Empty,
    UnknownSymbol(char),
    StartsWithOperator,
    EndsWithOperator,
    IsolatedDecimal,
    MultipleDecimals,
    ConsecutiveOperators,
    ConsecutiveNumbers,
    MissingOpenParenthesis,
    MissingClosingParenthesis,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ValidationError::Empty => write!(f, "empty input"),
            ValidationError::UnknownSymbol(ch) => write!(f, "unknown symbol `{ch}`"),
            ValidationError::StartsWithOperator => write!(f, "starts with an operator"),
            ValidationError::EndsWithOperator => write!(f, "ends with an operator"),
            ValidationError::IsolatedDecimal => write!(f, "isolated decimal"),
            ValidationError::MultipleDecimals => write!(f, "multiple decimals"),
            ValidationError::ConsecutiveOperators => write!(f, "consecutive operators"),
            ValidationError::ConsecutiveNumbers => write!(f, "consecutive numeric values"),
            ValidationError::MissingOpenParenthesis => write!(f, "missing open parenthesis"),
            ValidationError::MissingClosingParenthesis => {
                write!(f, "missing closing parenthesis")
            }
        }
    }
}

impl Error for ValidationError {}

/// Verify that the tokens form a well-formed infix expression.
///
/// # Errors
///
/// The function returns the first problem found.
pub fn validate(tokens: &[Token]) -> Result<(), ValidationError> {
    let (first, last) = match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(ValidationError::Empty),
    };
    if let Some(Token::Unknown(ch)) = tokens.iter().find(|t| matches!(t, Token::Unknown(_))) {
        return Err(ValidationError::UnknownSymbol(*ch));
    }
    if !matches!(first, Token::Number(_) | Token::LeftParen) {
        return Err(ValidationError::StartsWithOperator);
    }
    if !matches!(last, Token::Number(_) | Token::RightParen) {
        return Err(ValidationError::EndsWithOperator);
    }

    // Numbers and operators must alternate; the counters track which one is expected next
    let mut open_parentheses: i32 = 0;
    let mut previous_numeric: usize = 0;
    let mut previous_operator: usize = 0;

    for token in tokens {
        match token {
            Token::LeftParen => open_parentheses += 1,
            Token::RightParen => open_parentheses -= 1,
            Token::Number(n) => {
                if !n.chars().any(|c| c.is_ascii_digit()) {
                    return Err(ValidationError::IsolatedDecimal);
                }
                if n.matches('.').count() > 1 {
                    return Err(ValidationError::MultipleDecimals);
                }
                previous_numeric += 1;
                previous_operator = previous_operator.saturating_sub(1);
            }
            Token::Operator(_) => {
                previous_operator += 1;
                if previous_numeric == 0 {
                    return Err(ValidationError::ConsecutiveOperators);
                }
                previous_numeric -= 1;
            }
            Token::Unknown(ch) => return Err(ValidationError::UnknownSymbol(*ch)),
        }

        if open_parentheses < 0 {
            return Err(ValidationError::MissingOpenParenthesis);
        }
        if previous_numeric > 1 {
            return Err(ValidationError::ConsecutiveNumbers);
        }
    }

    if open_parentheses != 0 {
        return Err(ValidationError::MissingClosingParenthesis);
    }
    Ok(())
}
