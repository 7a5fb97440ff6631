// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Single left-to-right scan over the input that hands each term to an
//! [`Equation`] as soon as it is recognized. There is no separate token
//! stream and no grammar table; precedence is entirely the equation's
//! business.

use crate::equation::Equation;
use crate::error::{ErrorKind, ParseError};
use crate::suggest::suggest;
use crate::term::{BinOpType, Function, Term};
use log::{debug, trace};
use std::f64::consts::{E, PI};

/// Deepest nesting of parentheses accepted by [`parse`].
pub const MAX_NESTING: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Word {
    Func(Function),
    Pi,
    E,
    X,
}

impl Word {
    fn into_term(self) -> Term {
        match self {
            Word::Func(func) => Term::new_call(func),
            Word::Pi => Term::new_const(PI),
            Word::E => Term::new_const(E),
            Word::X => Term::Var,
        }
    }
}

/// Longest known word that `rest` starts with, and its length.
fn lookup_word(rest: &[char]) -> Option<(Word, usize)> {
    let mut best: Option<(Word, usize)> = None;
    let mut consider = |name: &str, word: Word| {
        let len = name.chars().count();
        let matches = rest.len() >= len && rest.iter().zip(name.chars()).all(|(a, b)| *a == b);
        if matches && best.map_or(true, |(_, longest)| len > longest) {
            best = Some((word, len));
        }
    };
    for func in Function::ALL.iter() {
        consider(func.name(), Word::Func(*func));
    }
    consider("pi", Word::Pi);
    consider("e", Word::E);
    consider("x", Word::X);
    best
}

struct Parser<'a> {
    chars: &'a [char],
}

impl<'a> Parser<'a> {
    fn error(&self, kind: ErrorKind, position: usize) -> ParseError {
        ParseError::at(kind, self.chars, position)
    }

    fn accept(&self, equation: &mut Equation, term: Term, position: usize) -> Result<(), ParseError> {
        equation
            .accept(term)
            .map(|_| ())
            .map_err(|kind| self.error(kind, position))
    }

    fn operator(
        &self,
        equation: &mut Equation,
        op: BinOpType,
        position: usize,
    ) -> Result<(), ParseError> {
        let left = equation
            .previous_operand(op.priority())
            .ok_or_else(|| self.error(ErrorKind::MissingOperand(op.as_char()), position))?;
        self.accept(equation, Term::new_bin(op, left), position)
    }

    fn next_significant(&self, from: usize, end: usize) -> Option<usize> {
        (from..end).find(|&index| !self.chars[index].is_whitespace())
    }

    /// End of the numeric literal starting at `start`: digits and
    /// decimal points, then an optional exponent with an optional minus.
    fn scan_number(&self, start: usize, end: usize) -> usize {
        let chars = self.chars;
        let mut index = start;
        while index < end && (chars[index].is_ascii_digit() || chars[index] == '.') {
            index += 1;
        }
        if index > start && index < end && (chars[index] == 'e' || chars[index] == 'E') {
            index += 1;
            if index < end && chars[index] == '-' {
                index += 1;
            }
            while index < end && chars[index].is_ascii_digit() {
                index += 1;
            }
        }
        index
    }

    /// Literals too large for an `f64` are malformed rather than infinite.
    fn number(&self, start: usize, stop: usize) -> Result<f64, ParseError> {
        let text: String = self.chars[start..stop].iter().collect();
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(self.error(ErrorKind::MalformedNumber(text), start)),
        }
    }

    fn matching_paren(&self, open: usize, end: usize) -> Result<usize, ParseError> {
        let mut nesting = 1;
        for index in open + 1..end {
            match self.chars[index] {
                '(' => nesting += 1,
                ')' => {
                    nesting -= 1;
                    if nesting == 0 {
                        return Ok(index);
                    }
                }
                _ => (),
            }
        }
        Err(self.error(ErrorKind::UnmatchedParen('('), open))
    }

    /// Splits a run of letters into known words, longest match first.
    fn split_words(&self, start: usize, stop: usize) -> Result<Vec<(usize, Word)>, ParseError> {
        let mut words = vec![];
        let mut index = start;
        while index < stop {
            match lookup_word(&self.chars[index..stop]) {
                Some((word, len)) => {
                    words.push((index, word));
                    index += len;
                }
                None if stop - start == 1 => {
                    return Err(self.error(ErrorKind::UnknownCharacter(self.chars[start]), start))
                }
                None => {
                    let word: String = self.chars[start..stop].iter().collect();
                    let suggestion = suggest(&word);
                    return Err(self.error(ErrorKind::UnknownWord { word, suggestion }, start));
                }
            }
        }
        Ok(words)
    }

    fn check_complete(&self, equation: &Equation, position: usize) -> Result<(), ParseError> {
        if equation.root().is_some() && !equation.is_complete() {
            Err(self.error(ErrorKind::Incomplete, position))
        } else {
            Ok(())
        }
    }

    fn parse_scope(&self, start: usize, end: usize, depth: usize) -> Result<Equation, ParseError> {
        let chars = self.chars;
        let mut equation = Equation::new();
        let mut index = start;
        while index < end {
            match chars[index] {
                c if c.is_whitespace() || c == ',' || c == '=' => index += 1,
                '0'..='9' | '.' => {
                    let stop = self.scan_number(index, end);
                    let value = self.number(index, stop)?;
                    self.accept(&mut equation, Term::new_const(value), index)?;
                    index = stop;
                }
                '-' => {
                    let next = self
                        .next_significant(index + 1, end)
                        .ok_or_else(|| self.error(ErrorKind::TrailingMinus, index))?;
                    if equation.is_complete() {
                        self.operator(&mut equation, BinOpType::Sub, index)?;
                        index += 1;
                    } else if chars[next].is_ascii_digit() || chars[next] == '.' {
                        let stop = self.scan_number(next, end);
                        let value = self.number(next, stop)?;
                        self.accept(&mut equation, Term::new_const(-value), index)?;
                        index = stop;
                    } else {
                        self.accept(&mut equation, Term::new_negate(), index)?;
                        index += 1;
                    }
                }
                '(' => {
                    if depth >= MAX_NESTING {
                        return Err(self.error(ErrorKind::TooDeep(MAX_NESTING), index));
                    }
                    let close = self.matching_paren(index, end)?;
                    let inner = self.parse_scope(index + 1, close, depth + 1)?;
                    self.check_complete(&inner, close)?;
                    equation
                        .accept_group(inner)
                        .map_err(|kind| self.error(kind, index))?;
                    index = close + 1;
                }
                ')' => return Err(self.error(ErrorKind::UnmatchedParen(')'), index)),
                c if c.is_alphabetic() => {
                    let stop = (index..end)
                        .find(|&i| !chars[i].is_alphabetic())
                        .unwrap_or(end);
                    for (position, word) in self.split_words(index, stop)? {
                        self.accept(&mut equation, word.into_term(), position)?;
                    }
                    index = stop;
                }
                c => match BinOpType::from_char(c) {
                    Some(op) => {
                        self.operator(&mut equation, op, index)?;
                        index += 1;
                    }
                    None => return Err(self.error(ErrorKind::UnknownCharacter(c), index)),
                },
            }
        }
        Ok(equation)
    }
}

/// Parses `text` into an [`Equation`].
///
/// Whitespace, commas and `=` are ignored. Any malformed input fails the
/// whole parse; there is no partial result. Parentheses may nest at most
/// [`MAX_NESTING`] levels deep.
pub fn parse(text: &str) -> Result<Equation, ParseError> {
    let chars: Vec<char> = text.chars().collect();
    let parser = Parser { chars: &chars };
    let result = parser.parse_scope(0, chars.len(), 0).and_then(|equation| {
        if equation.root().is_none() {
            return Err(ParseError::empty());
        }
        parser.check_complete(&equation, chars.len())?;
        Ok(equation)
    });
    match result {
        Ok(ref equation) => trace!(
            "parsed {:?} into {} terms ({} x terms)",
            text,
            equation.terms().len(),
            equation.variables().len()
        ),
        Err(ref err) => debug!("failed to parse {:?}: {}", text, err),
    }
    result
}

#[cfg(test)]
mod test {
    use super::*;

    fn value(input: &str) -> f64 {
        parse(input)
            .unwrap_or_else(|err| panic!("{:?} failed: {}", input, err))
            .evaluate()
    }

    fn kind(input: &str) -> ErrorKind {
        parse(input).expect_err(input).kind
    }

    #[test]
    fn longest_word_wins() {
        assert_eq!(lookup_word(&['s', 'i', 'n', 'h']), Some((Word::Func(Function::Sinh), 4)));
        assert_eq!(lookup_word(&['s', 'i', 'n', 'x']), Some((Word::Func(Function::Sin), 3)));
        assert_eq!(lookup_word(&['a', 't', 'a', 'n']), Some((Word::Func(Function::Atan), 4)));
        assert_eq!(lookup_word(&['q']), None);
    }

    #[test]
    fn noise_is_skipped() {
        assert_eq!(value(" 1 ,+ 2 = "), 3.0);
    }

    #[test]
    fn scientific_literals() {
        assert_eq!(value("1.5e3"), 1500.0);
        assert_eq!(value("2E-2"), 0.02);
        assert_eq!(value(".5"), 0.5);
        assert_eq!(kind("2e"), ErrorKind::MalformedNumber("2e".to_owned()));
        assert_eq!(kind("1.2.3"), ErrorKind::MalformedNumber("1.2.3".to_owned()));
        assert_eq!(kind("1e999"), ErrorKind::MalformedNumber("1e999".to_owned()));
        assert_eq!(kind("2*-1e999"), ErrorKind::MalformedNumber("1e999".to_owned()));
    }

    #[test]
    fn minus_in_operand_position() {
        assert_eq!(value("- 2"), -2.0);
        assert_eq!(value("3 - 2"), 1.0);
        assert_eq!(value("x-2"), -2.0);
        assert_eq!(value("--2"), 2.0);
        assert_eq!(value("2^-1"), 0.5);
        assert_eq!(kind("1 -   "), ErrorKind::TrailingMinus);
    }

    #[test]
    fn words_in_one_run() {
        assert_eq!(value("sinx"), 0.0);
        assert_eq!(value("cosh0"), 1.0);
        assert_eq!(kind("pix"), ErrorKind::MissingOperator);
    }

    #[test]
    fn unknown_input() {
        assert_eq!(kind("1 & 2"), ErrorKind::UnknownCharacter('&'));
        assert_eq!(kind("y"), ErrorKind::UnknownCharacter('y'));
        assert_eq!(
            kind("log(2)"),
            ErrorKind::UnknownWord {
                word: "log".to_owned(),
                suggestion: None,
            }
        );
    }

    #[test]
    fn parentheses() {
        assert_eq!(kind("(1+2"), ErrorKind::UnmatchedParen('('));
        assert_eq!(kind("1+2)"), ErrorKind::UnmatchedParen(')'));
        assert_eq!(kind("()"), ErrorKind::EmptyParens);
        assert_eq!(kind("(1+)"), ErrorKind::Incomplete);
        assert_eq!(kind("2(3)"), ErrorKind::MissingOperator);
        assert_eq!(value("((2))"), 2.0);
    }

    #[test]
    fn nesting_limit() {
        let deep = |levels: usize| format!("{}1{}", "(".repeat(levels), ")".repeat(levels));
        assert_eq!(value(&deep(MAX_NESTING)), 1.0);
        let err = parse(&deep(MAX_NESTING + 1)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TooDeep(MAX_NESTING));
        assert_eq!(err.position(), Some(MAX_NESTING));
    }

    #[test]
    fn error_positions() {
        let err = parse("1 + 2 * #").unwrap_err();
        assert_eq!(err.position(), Some(8));
        assert_eq!(err.context, " 2 * #");
        assert!(err.to_string().ends_with("near `2 * #`"));
        let err = parse("sin").unwrap_err();
        assert_eq!(err.position(), Some(3));
    }

    #[test]
    fn empty_input() {
        assert_eq!(kind(""), ErrorKind::Empty);
        assert_eq!(kind("  ,  "), ErrorKind::Empty);
    }
}
