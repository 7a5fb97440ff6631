// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The closed set of term variants that make up a parsed expression.
//!
//! Terms live in an arena owned by [`Equation`](crate::Equation) and
//! refer to their operands by [`TermId`]. Every operand is referenced
//! by exactly one parent, so the arena always describes a tree.

use serde_derive::Serialize;
use std::fmt;

/// Index of a term inside the arena of its owning equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TermId(pub(crate) usize);

impl TermId {
    pub(crate) fn shifted(self, offset: usize) -> TermId {
        TermId(self.0 + offset)
    }
}

/// Binding strength of a term. Lower numbers bind tighter.
///
/// Ties are never re-ranked: two operators of the same priority are
/// linked in the order they arrive, which makes every binary operator
/// left-associative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Priority(i8);

impl Priority {
    /// Constants, the free variable and parenthesised sub-expressions.
    pub const ATOMIC: Priority = Priority(-1);
    pub const FUNCTION: Priority = Priority(0);
    pub const NEGATION: Priority = Priority(1);
    pub const EXPONENT: Priority = Priority(1);
    pub const PRODUCT: Priority = Priority(2);
    pub const SUM: Priority = Priority(3);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BinOpType {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinOpType {
    pub fn from_char(c: char) -> Option<BinOpType> {
        match c {
            '+' => Some(BinOpType::Add),
            '-' => Some(BinOpType::Sub),
            '*' => Some(BinOpType::Mul),
            '/' => Some(BinOpType::Div),
            '%' => Some(BinOpType::Mod),
            '^' => Some(BinOpType::Pow),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            BinOpType::Add => '+',
            BinOpType::Sub => '-',
            BinOpType::Mul => '*',
            BinOpType::Div => '/',
            BinOpType::Mod => '%',
            BinOpType::Pow => '^',
        }
    }

    /// Operator as printed between its operands.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOpType::Add => " + ",
            BinOpType::Sub => " - ",
            BinOpType::Mul => " * ",
            BinOpType::Div => " / ",
            BinOpType::Mod => " % ",
            BinOpType::Pow => "^",
        }
    }

    pub fn priority(self) -> Priority {
        match self {
            BinOpType::Pow => Priority::EXPONENT,
            BinOpType::Mul | BinOpType::Div | BinOpType::Mod => Priority::PRODUCT,
            BinOpType::Add | BinOpType::Sub => Priority::SUM,
        }
    }

    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            BinOpType::Add => left + right,
            BinOpType::Sub => left - right,
            BinOpType::Mul => left * right,
            BinOpType::Div => left / right,
            BinOpType::Mod => left % right,
            BinOpType::Pow => left.powf(right),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Function {
    Ln,
    Sqrt,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
}

impl Function {
    pub const ALL: [Function; 11] = [
        Function::Ln,
        Function::Sqrt,
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Asin,
        Function::Acos,
        Function::Atan,
        Function::Sinh,
        Function::Cosh,
        Function::Tanh,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Function::Ln => "ln",
            Function::Sqrt => "sqrt",
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Sinh => "sinh",
            Function::Cosh => "cosh",
            Function::Tanh => "tanh",
        }
    }

    pub fn from_name(name: &str) -> Option<Function> {
        Function::ALL.iter().copied().find(|func| func.name() == name)
    }

    /// Trigonometric functions work in radians. Out-of-domain inputs
    /// produce NaN or an infinity rather than an error.
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Function::Ln => value.ln(),
            Function::Sqrt => value.sqrt(),
            Function::Sin => value.sin(),
            Function::Cos => value.cos(),
            Function::Tan => value.tan(),
            Function::Asin => value.asin(),
            Function::Acos => value.acos(),
            Function::Atan => value.atan(),
            Function::Sinh => value.sinh(),
            Function::Cosh => value.cosh(),
            Function::Tanh => value.tanh(),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.name())
    }
}

/// A node of the expression tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
#[serde(tag = "type")]
pub enum Term {
    Const { value: f64 },
    /// The free variable `x`.
    Var,
    Negate { operand: Option<TermId> },
    Call { func: Function, arg: Option<TermId> },
    BinOp {
        op: BinOpType,
        left: TermId,
        right: Option<TermId>,
    },
    /// A parenthesised sub-equation grafted into the arena.
    Group { root: TermId },
}

impl Term {
    pub fn new_const(value: f64) -> Term {
        Term::Const { value }
    }

    pub fn new_negate() -> Term {
        Term::Negate { operand: None }
    }

    pub fn new_call(func: Function) -> Term {
        Term::Call { func, arg: None }
    }

    pub fn new_bin(op: BinOpType, left: TermId) -> Term {
        Term::BinOp {
            op,
            left,
            right: None,
        }
    }

    pub fn priority(&self) -> Priority {
        match *self {
            Term::Const { .. } | Term::Var | Term::Group { .. } => Priority::ATOMIC,
            Term::Call { .. } => Priority::FUNCTION,
            Term::Negate { .. } => Priority::NEGATION,
            Term::BinOp { op, .. } => op.priority(),
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Var)
    }

    /// The operand slot that the linker fills or descends into.
    /// Leaves and groups have none.
    pub fn slot(&self) -> Option<Option<TermId>> {
        match *self {
            Term::Negate { operand } => Some(operand),
            Term::Call { arg, .. } => Some(arg),
            Term::BinOp { right, .. } => Some(right),
            Term::Const { .. } | Term::Var | Term::Group { .. } => None,
        }
    }

    pub(crate) fn slot_mut(&mut self) -> Option<&mut Option<TermId>> {
        match self {
            Term::Negate { operand } => Some(operand),
            Term::Call { arg, .. } => Some(arg),
            Term::BinOp { right, .. } => Some(right),
            Term::Const { .. } | Term::Var | Term::Group { .. } => None,
        }
    }

    /// Rebases every operand reference by `offset`, used when a
    /// sub-equation's arena is appended to its parent's.
    pub(crate) fn shifted(self, offset: usize) -> Term {
        let shift = |id: Option<TermId>| id.map(|id| id.shifted(offset));
        match self {
            Term::Negate { operand } => Term::Negate {
                operand: shift(operand),
            },
            Term::Call { func, arg } => Term::Call {
                func,
                arg: shift(arg),
            },
            Term::BinOp { op, left, right } => Term::BinOp {
                op,
                left: left.shifted(offset),
                right: shift(right),
            },
            Term::Group { root } => Term::Group {
                root: root.shifted(offset),
            },
            leaf => leaf,
        }
    }
}
