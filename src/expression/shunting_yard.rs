/*
shunting_yard.rs

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

//! Convert an infix expression to reverse Polish notation.
//!
//! Operators wait on a stack until an operator with a lower precedence, a closing
//! parenthesis, or the end of the expression pushes them to the output. Operators of equal
//! precedence are applied from left to right.

use super::tokenizer::Token;
use super::validate::ValidationError;

/// Return the tokens in reverse Polish notation. Parentheses are removed.
///
/// # Errors
///
/// The function returns an error on unbalanced parentheses or unknown symbols. Expressions
/// accepted by [`super::validate::validate`] never fail.
pub fn to_rpn(tokens: &[Token]) -> Result<Vec<Token>, ValidationError> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut operators: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(_) => output.push(token.clone()),
            Token::Operator(op) => {
                while let Some(Token::Operator(top)) = operators.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    output.push(Token::Operator(*top));
                    operators.pop();
                }
                operators.push(token.clone());
            }
            Token::LeftParen => operators.push(Token::LeftParen),
            Token::RightParen => loop {
                match operators.pop() {
                    Some(Token::LeftParen) => break,
                    Some(t) => output.push(t),
                    None => return Err(ValidationError::MissingOpenParenthesis),
                }
            },
            Token::Unknown(ch) => return Err(ValidationError::UnknownSymbol(*ch)),
        }
    }

    while let Some(t) = operators.pop() {
        if t == Token::LeftParen {
            return Err(ValidationError::MissingClosingParenthesis);
        }
        output.push(t);
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::tokenizer::tokenize;

    /// Render the RPN as a space separated string.
    fn rpn(input: &str) -> String {
        to_rpn(&tokenize(input))
            .unwrap()
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<String>>()
            .join(" ")
    }

    #[test]
    fn precedence() {
        assert_eq!(rpn("1 + 2 * 3"), "1 2 3 * +");
        assert_eq!(rpn("1 * 2 + 3"), "1 2 * 3 +");
    }

    #[test]
    fn left_associativity() {
        assert_eq!(rpn("8 - 3 - 2"), "8 3 - 2 -");
        assert_eq!(rpn("8 / 4 * 2"), "8 4 / 2 *");
    }

    #[test]
    fn parentheses() {
        assert_eq!(rpn("(1 + 2) * 3"), "1 2 + 3 *");
        assert_eq!(rpn("2 * (3 - (4 + -1))"), "2 3 4 -1 + - *");
    }

    #[test]
    fn unbalanced_parentheses() {
        assert_eq!(
            to_rpn(&tokenize("1 + 2)")),
            Err(ValidationError::MissingOpenParenthesis)
        );
        assert_eq!(
            to_rpn(&tokenize("(1 + 2")),
            Err(ValidationError::MissingClosingParenthesis)
        );
    }
}
