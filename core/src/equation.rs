// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The parse result, and the priority rule that links terms into a tree
//! as they arrive from the scanner.

use crate::error::ErrorKind;
use crate::term::{BinOpType, Function, Priority, Term, TermId};
use serde_derive::Serialize;
use std::fmt;

/// A parsed expression.
///
/// Owns every term of its tree in a flat arena. Parenthesised
/// sub-expressions are parsed as their own equations and then grafted
/// into the parent's arena behind a [`Term::Group`].
///
/// The free variable is not stored in the tree: [`Equation::evaluate_at`]
/// passes it down through evaluation, so a shared `&Equation` can be
/// sampled from several threads at once.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Equation {
    terms: Vec<Term>,
    root: Option<TermId>,
    variables: Vec<TermId>,
    /// The term with an empty operand slot, if any. There is never more
    /// than one.
    #[serde(skip)]
    open: Option<TermId>,
    #[serde(skip)]
    x: f64,
}

impl Equation {
    pub fn new() -> Equation {
        Equation::default()
    }

    pub fn root(&self) -> Option<TermId> {
        self.root
    }

    pub fn term(&self, id: TermId) -> &Term {
        &self.terms[id.0]
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Every `x` term reachable from the root, in the order they were
    /// parsed.
    pub fn variables(&self) -> &[TermId] {
        &self.variables
    }

    pub fn depends_on_x(&self) -> bool {
        !self.variables.is_empty()
    }

    /// True once every operand slot in the tree is filled.
    pub fn is_complete(&self) -> bool {
        self.root.is_some() && self.open.is_none()
    }

    /// Finds the left operand for a binary operator of `priority`,
    /// together with the term whose slot currently holds it.
    ///
    /// An operator that binds no tighter than the root takes the whole
    /// root. A tighter one walks down the right spine and takes the
    /// first subtree that binds at least as tightly as itself. Returns
    /// `None` if there is nothing complete to the left.
    fn locate_operand(&self, priority: Priority) -> Option<(Option<TermId>, TermId)> {
        if !self.is_complete() {
            return None;
        }
        let root = self.root?;
        if priority >= self.terms[root.0].priority() {
            return Some((None, root));
        }
        let mut parent = root;
        loop {
            let child = self.terms[parent.0].slot().flatten()?;
            if self.terms[child.0].priority() <= priority {
                return Some((Some(parent), child));
            }
            parent = child;
        }
    }

    /// The term a binary operator of `priority` would take as its left
    /// operand.
    pub fn previous_operand(&self, priority: Priority) -> Option<TermId> {
        self.locate_operand(priority).map(|(_, operand)| operand)
    }

    /// The term whose empty slot the next operand or prefix term fills,
    /// or `None` if the equation is still empty.
    fn open_slot(&self) -> Result<Option<TermId>, ErrorKind> {
        match (self.root, self.open) {
            (None, _) => Ok(None),
            (Some(_), Some(open)) => Ok(Some(open)),
            (Some(_), None) => Err(ErrorKind::MissingOperator),
        }
    }

    /// Links the next term into the tree.
    ///
    /// Binary operators are placed by priority, and their left operand
    /// is always the one [`Equation::previous_operand`] reports, whatever
    /// the caller passed in. Every other term fills the one empty
    /// operand slot. Operand slots of incoming terms start out empty.
    /// Group terms are created by the parser; use [`crate::parse`] for
    /// parenthesised input.
    pub fn accept(&mut self, term: Term) -> Result<TermId, ErrorKind> {
        let id = TermId(self.terms.len());
        match term {
            Term::BinOp { op, .. } => {
                let (parent, left) = self
                    .locate_operand(op.priority())
                    .ok_or_else(|| ErrorKind::MissingOperand(op.as_char()))?;
                self.terms.push(Term::new_bin(op, left));
                self.link(parent, id);
                self.open = Some(id);
            }
            mut term => {
                let parent = self.open_slot()?;
                let is_variable = term.is_variable();
                let is_prefix = match term.slot_mut() {
                    Some(slot) => {
                        *slot = None;
                        true
                    }
                    None => false,
                };
                self.terms.push(term);
                self.link(parent, id);
                self.open = if is_prefix { Some(id) } else { None };
                if is_variable {
                    self.variables.push(id);
                }
            }
        }
        Ok(id)
    }

    fn link(&mut self, parent: Option<TermId>, id: TermId) {
        match parent {
            None => self.root = Some(id),
            Some(parent) => {
                if let Some(slot) = self.terms[parent.0].slot_mut() {
                    *slot = Some(id);
                }
            }
        }
    }

    /// Grafts a complete sub-equation in as a single atomic operand.
    pub(crate) fn accept_group(&mut self, inner: Equation) -> Result<TermId, ErrorKind> {
        let inner_root = inner.root.ok_or(ErrorKind::EmptyParens)?;
        if !inner.is_complete() {
            return Err(ErrorKind::Incomplete);
        }
        self.open_slot()?;
        let offset = self.terms.len();
        self.terms
            .extend(inner.terms.into_iter().map(|term| term.shifted(offset)));
        self.variables
            .extend(inner.variables.into_iter().map(|id| id.shifted(offset)));
        self.accept(Term::Group {
            root: inner_root.shifted(offset),
        })
    }

    /// Stores `x` for later calls to [`Equation::evaluate`].
    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    /// Value of the equation using the stored `x` (0 until
    /// [`Equation::set_x`] is called). NaN if the equation is incomplete.
    pub fn evaluate(&self) -> f64 {
        self.evaluate_at(self.x)
    }

    /// Value of the equation with the free variable bound to `x`.
    pub fn evaluate_at(&self, x: f64) -> f64 {
        self.root.map_or(f64::NAN, |root| self.value(root, x))
    }

    // Walks the tree with an explicit stack so that deep trees, such as
    // a long chain of sums or negations, cannot exhaust the call stack.
    fn value(&self, root: TermId, x: f64) -> f64 {
        enum Step {
            Eval(TermId),
            Negate,
            Call(Function),
            Apply(BinOpType),
        }

        fn pop(values: &mut Vec<f64>) -> f64 {
            values.pop().unwrap_or(f64::NAN)
        }

        let mut steps = vec![Step::Eval(root)];
        let mut values: Vec<f64> = vec![];
        while let Some(step) = steps.pop() {
            match step {
                Step::Eval(id) => match self.terms[id.0] {
                    Term::Const { value } => values.push(value),
                    Term::Var => values.push(x),
                    Term::Group { root } => steps.push(Step::Eval(root)),
                    Term::Negate {
                        operand: Some(operand),
                    } => {
                        steps.push(Step::Negate);
                        steps.push(Step::Eval(operand));
                    }
                    Term::Call {
                        func,
                        arg: Some(arg),
                    } => {
                        steps.push(Step::Call(func));
                        steps.push(Step::Eval(arg));
                    }
                    Term::BinOp {
                        op,
                        left,
                        right: Some(right),
                    } => {
                        steps.push(Step::Apply(op));
                        steps.push(Step::Eval(right));
                        steps.push(Step::Eval(left));
                    }
                    // an empty slot
                    _ => values.push(f64::NAN),
                },
                Step::Negate => {
                    let value = pop(&mut values);
                    values.push(-value);
                }
                Step::Call(func) => {
                    let value = pop(&mut values);
                    values.push(func.apply(value));
                }
                Step::Apply(op) => {
                    let right = pop(&mut values);
                    let left = pop(&mut values);
                    values.push(op.apply(left, right));
                }
            }
        }
        pop(&mut values)
    }
}

/// Writes a constant so that it reads back as the same value. Literals
/// that overflowed are rejected by the parser, so non-finite values only
/// come from terms built by hand.
fn write_const(fmt: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        fmt.write_str("(0/0)")
    } else if value == f64::INFINITY {
        fmt.write_str("(1/0)")
    } else if value == f64::NEG_INFINITY {
        fmt.write_str("(-1/0)")
    } else {
        write!(fmt, "{}", value)
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The tree mirrors the source, so the only parentheses needed are
        // the groups themselves.
        enum Piece {
            Term(TermId),
            Text(&'static str),
        }

        let mut pieces = match self.root {
            Some(root) => vec![Piece::Term(root)],
            None => return Ok(()),
        };
        while let Some(piece) = pieces.pop() {
            let id = match piece {
                Piece::Text(text) => {
                    fmt.write_str(text)?;
                    continue;
                }
                Piece::Term(id) => id,
            };
            match self.terms[id.0] {
                Term::Const { value } => write_const(fmt, value)?,
                Term::Var => fmt.write_str("x")?,
                Term::Group { root } => {
                    fmt.write_str("(")?;
                    pieces.push(Piece::Text(")"));
                    pieces.push(Piece::Term(root));
                }
                Term::Negate { operand } => {
                    fmt.write_str("-")?;
                    pieces.extend(operand.map(Piece::Term));
                }
                Term::Call { func, arg } => {
                    write!(fmt, "{}", func)?;
                    if let Some(arg) = arg {
                        if !matches!(self.terms[arg.0], Term::Group { .. }) {
                            fmt.write_str(" ")?;
                        }
                        pieces.push(Piece::Term(arg));
                    }
                }
                Term::BinOp { op, left, right } => {
                    pieces.extend(right.map(Piece::Term));
                    pieces.push(Piece::Text(op.symbol()));
                    pieces.push(Piece::Term(left));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn constant(eq: &mut Equation, value: f64) {
        eq.accept(Term::new_const(value)).unwrap();
    }

    fn operator(eq: &mut Equation, op: BinOpType) {
        let left = eq.previous_operand(op.priority()).unwrap();
        eq.accept(Term::new_bin(op, left)).unwrap();
    }

    #[test]
    fn tighter_operator_takes_anchor() {
        // 1 + 2 * 4
        let mut eq = Equation::new();
        constant(&mut eq, 1.0);
        operator(&mut eq, BinOpType::Add);
        constant(&mut eq, 2.0);
        assert_eq!(eq.previous_operand(Priority::PRODUCT), Some(TermId(2)));
        operator(&mut eq, BinOpType::Mul);
        constant(&mut eq, 4.0);
        assert_eq!(eq.evaluate(), 9.0);
        assert_eq!(eq.root(), Some(TermId(1)));
    }

    #[test]
    fn looser_operator_takes_root() {
        // 2 * 4 + 1
        let mut eq = Equation::new();
        constant(&mut eq, 2.0);
        operator(&mut eq, BinOpType::Mul);
        constant(&mut eq, 4.0);
        assert_eq!(eq.previous_operand(Priority::SUM), eq.root());
        operator(&mut eq, BinOpType::Add);
        constant(&mut eq, 1.0);
        assert_eq!(eq.evaluate(), 9.0);
    }

    #[test]
    fn tighter_subtree_moves_whole() {
        // 1 + 2 ^ 3 * 4
        let mut eq = Equation::new();
        constant(&mut eq, 1.0);
        operator(&mut eq, BinOpType::Add);
        constant(&mut eq, 2.0);
        operator(&mut eq, BinOpType::Pow);
        constant(&mut eq, 3.0);
        operator(&mut eq, BinOpType::Mul);
        constant(&mut eq, 4.0);
        assert_eq!(eq.evaluate(), 33.0);
    }

    #[test]
    fn prefix_terms_fill_slots() {
        // -sin(x)
        let mut eq = Equation::new();
        eq.accept(Term::new_negate()).unwrap();
        eq.accept(Term::new_call(Function::Sin)).unwrap();
        assert!(!eq.is_complete());
        eq.accept(Term::Var).unwrap();
        assert!(eq.is_complete());
        assert_eq!(eq.variables(), &[TermId(2)]);
        assert!((eq.evaluate_at(std::f64::consts::FRAC_PI_2) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn operand_after_operand_is_rejected() {
        let mut eq = Equation::new();
        constant(&mut eq, 2.0);
        assert_eq!(eq.accept(Term::Var), Err(ErrorKind::MissingOperator));
    }

    #[test]
    fn operator_without_left_operand() {
        let mut eq = Equation::new();
        assert_eq!(eq.previous_operand(Priority::PRODUCT), None);
        eq.accept(Term::new_negate()).unwrap();
        assert_eq!(
            eq.accept(Term::new_bin(BinOpType::Mul, TermId(0))),
            Err(ErrorKind::MissingOperand('*'))
        );
    }

    #[test]
    fn stored_x_and_threaded_x() {
        let mut eq = Equation::new();
        eq.accept(Term::Var).unwrap();
        assert_eq!(eq.evaluate(), 0.0);
        eq.set_x(3.0);
        assert_eq!(eq.evaluate(), 3.0);
        assert_eq!(eq.evaluate_at(5.0), 5.0);
        assert_eq!(eq.x(), 3.0);
    }

    #[test]
    fn empty_equation() {
        let eq = Equation::new();
        assert!(!eq.is_complete());
        assert!(eq.evaluate().is_nan());
        assert_eq!(eq.to_string(), "");
    }
}
