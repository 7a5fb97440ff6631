// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use displaydoc::Display;
use std::fmt;
use thiserror::Error;

/// Characters of context shown on each side of an error position.
const CONTEXT_RADIUS: usize = 5;

/// What went wrong while parsing.
#[derive(Error, Display, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unknown character `{0}`
    UnknownCharacter(char),
    /// Unknown word `{word}`
    UnknownWord {
        word: String,
        suggestion: Option<&'static str>,
    },
    /// Malformed number `{0}`
    MalformedNumber(String),
    /// Unmatched parenthesis `{0}`
    UnmatchedParen(char),
    /// Empty parentheses
    EmptyParens,
    /// Operator `{0}` is missing its left operand
    MissingOperand(char),
    /// Missing operator between two operands
    MissingOperator,
    /// Ends with a - sign
    TrailingMinus,
    /// Incomplete equation, maybe missing a term?
    Incomplete,
    /// Empty equation
    Empty,
    /// Parentheses nested more than {0} deep
    TooDeep(usize),
}

/// The single error raised for malformed input.
///
/// Carries the character offset of the problem (when there is one) and
/// a short excerpt of the surrounding input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ErrorKind,
    pub position: Option<usize>,
    pub context: String,
}

impl ParseError {
    pub(crate) fn at(kind: ErrorKind, input: &[char], position: usize) -> ParseError {
        let start = position.saturating_sub(CONTEXT_RADIUS);
        let end = (position + CONTEXT_RADIUS + 1).min(input.len());
        let context = if start < end {
            input[start..end].iter().collect()
        } else {
            String::new()
        };
        ParseError {
            kind,
            position: Some(position),
            context,
        }
    }

    pub(crate) fn empty() -> ParseError {
        ParseError {
            kind: ErrorKind::Empty,
            position: None,
            context: String::new(),
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "{}", self.kind)?;
        if let Some(position) = self.position {
            write!(fmt, " at {}", position)?;
            if !self.context.trim().is_empty() {
                write!(fmt, ", near `{}`", self.context.trim())?;
            }
        }
        if let ErrorKind::UnknownWord {
            suggestion: Some(suggestion),
            ..
        } = self.kind
        {
            write!(fmt, ". Did you mean `{}`?", suggestion)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn chars(input: &str) -> Vec<char> {
        input.chars().collect()
    }

    #[test]
    fn context_is_clamped() {
        let err = ParseError::at(ErrorKind::UnknownCharacter('&'), &chars("1&2"), 1);
        assert_eq!(err.context, "1&2");
        assert_eq!(err.to_string(), "Unknown character `&` at 1, near `1&2`");
    }

    #[test]
    fn context_window() {
        let err = ParseError::at(
            ErrorKind::UnknownCharacter('#'),
            &chars("1+2+3+4+#+5+6+7+8"),
            8,
        );
        assert_eq!(err.context, "+3+4+#+5+6+");
    }

    #[test]
    fn suggestion_is_shown() {
        let err = ParseError::at(
            ErrorKind::UnknownWord {
                word: "sine".to_owned(),
                suggestion: Some("sin"),
            },
            &chars("sine(1)"),
            0,
        );
        assert_eq!(
            err.to_string(),
            "Unknown word `sine` at 0, near `sine(1)`. Did you mean `sin`?"
        );
    }

    #[test]
    fn empty_has_no_position() {
        let err = ParseError::empty();
        assert_eq!(err.position(), None);
        assert_eq!(err.message(), "Empty equation");
    }
}
