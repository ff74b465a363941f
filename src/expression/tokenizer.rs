/*
tokenizer.rs

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

//! Split an arithmetic expression into tokens.
//!
//! Whitespace is dropped. A minus sign that cannot be a subtraction, because it starts the
//! expression or follows an operator or an opening parenthesis, is a negation: it becomes the
//! first character of the number that follows.

use std::fmt;

/// Arithmetic operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Return the operator for the given symbol.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            _ => None,
        }
    }

    /// Symbol of the operator.
    pub fn as_char(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// Operators with a higher precedence bind tighter.
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 1,
            Operator::Multiply | Operator::Divide => 2,
        }
    }
}

/// Expression token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Number as typed, including a leading minus sign for negative values.
    Number(String),
    Operator(Operator),
    LeftParen,
    RightParen,

    /// Any other symbol.
    Unknown(char),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{n}"),
            Token::Operator(op) => write!(f, "{}", op.as_char()),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::Unknown(ch) => write!(f, "{ch}"),
        }
    }
}

/// Whether the character can be part of a number.
fn is_value_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '.'
}

/// Push the number being accumulated, if any.
fn flush(number: &mut String, tokens: &mut Vec<Token>) {
    if number.is_empty() {
        return;
    }
    // A lone minus sign not followed by any digit is a plain operator
    if number == "-" {
        tokens.push(Token::Operator(Operator::Subtract));
    } else {
        tokens.push(Token::Number(number.clone()));
    }
    number.clear();
}

/// Split the input into tokens.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut number: String = String::new();

    for ch in input.chars() {
        if is_value_char(ch) {
            number.push(ch);
            continue;
        }
        flush(&mut number, &mut tokens);

        match ch {
            '-' if !matches!(tokens.last(), Some(Token::Number(_) | Token::RightParen)) => {
                number.push('-');
            }
            '(' => tokens.push(Token::LeftParen),
            ')' => tokens.push(Token::RightParen),
            c if c.is_whitespace() => (),
            c => match Operator::from_char(c) {
                Some(op) => tokens.push(Token::Operator(op)),
                None => tokens.push(Token::Unknown(c)),
            },
        }
    }
    flush(&mut number, &mut tokens);
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(s: &str) -> Token {
        Token::Number(s.to_string())
    }

    #[test]
    fn splits_numbers_and_operators() {
        assert_eq!(
            tokenize("2.9 / 3 * 34"),
            vec![
                num("2.9"),
                Token::Operator(Operator::Divide),
                num("3"),
                Token::Operator(Operator::Multiply),
                num("34"),
            ]
        );
    }

    #[test]
    fn leading_minus_is_a_negation() {
        assert_eq!(
            tokenize("-4-2"),
            vec![num("-4"), Token::Operator(Operator::Subtract), num("2")]
        );
        assert_eq!(
            tokenize("3*-2"),
            vec![num("3"), Token::Operator(Operator::Multiply), num("-2")]
        );
        assert_eq!(
            tokenize("(-1.5)"),
            vec![Token::LeftParen, num("-1.5"), Token::RightParen]
        );
    }

    #[test]
    fn minus_after_parenthesis_is_a_subtraction() {
        assert_eq!(
            tokenize("(1) -2"),
            vec![
                Token::LeftParen,
                num("1"),
                Token::RightParen,
                Token::Operator(Operator::Subtract),
                num("2"),
            ]
        );
    }

    #[test]
    fn dangling_minus_stays_an_operator() {
        assert_eq!(
            tokenize("-(2)"),
            vec![
                Token::Operator(Operator::Subtract),
                Token::LeftParen,
                num("2"),
                Token::RightParen,
            ]
        );
        assert_eq!(
            tokenize("- 5"),
            vec![Token::Operator(Operator::Subtract), num("5")]
        );
    }

    #[test]
    fn unknown_symbols_are_kept() {
        assert_eq!(
            tokenize("2^3"),
            vec![num("2"), Token::Unknown('^'), num("3")]
        );
        assert!(tokenize("   ").is_empty());
    }
}
