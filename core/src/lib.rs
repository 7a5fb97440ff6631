// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Graphcalc is a calculator and function plotter for expressions in
//! one free variable, `x`. `graphcalc_core` is the engine behind it.
//!
//! Expressions are parsed in a single left-to-right pass. Each term is
//! linked into the tree the moment it is read, using operator priority
//! alone; there is no token stream and no recursive descent. The
//! resulting [`Equation`] can be evaluated as often as needed with a
//! different `x` each time, without parsing again.
//!
//! ## Example
//!
//! ```rust
//! # fn main() -> Result<(), graphcalc_core::ParseError> {
//! let equation = graphcalc_core::parse("2*x^2 - 1")?;
//! assert_eq!(equation.evaluate_at(3.0), 17.0);
//! assert_eq!(equation.evaluate_at(0.5), -0.5);
//!
//! // `one_line` parses, evaluates with x = 0, then formats the value.
//! assert_eq!(graphcalc_core::one_line("sin(pi/2)")?, "1");
//! # Ok(())
//! # }
//! ```
//!
//! ## Plotting
//!
//! [`sample`] evaluates an equation across a [`Domain`] and keeps only
//! the finite values, along with the y range they span.
//!
//! ```rust
//! use graphcalc_core::{parse, sample, Domain};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let domain = Domain::parse("-pi", "pi")?;
//! let samples = sample(&parse("sin(x)")?, &domain, 100);
//! assert_eq!(samples.points.len(), 101);
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Malformed input always produces a [`ParseError`], never a partial
//! tree. Out-of-domain arithmetic such as `ln(-1)` or `1/0` is not an
//! error; it evaluates to NaN or an infinity.

// False positives, or make code harder to understand.
#![allow(clippy::match_like_matches_macro)]

pub mod equation;
pub mod error;
pub mod output;
pub mod parser;
pub mod sample;
pub mod term;

mod helpers;
pub(crate) mod suggest;

pub use crate::equation::Equation;
pub use crate::error::{ErrorKind, ParseError};
pub use crate::output::{format_number, DEFAULT_DIGITS};
pub use crate::parser::{parse, MAX_NESTING};
pub use crate::sample::{sample, Domain, Sample, SampleError, Samples, DEFAULT_POINTS};
pub use crate::term::{BinOpType, Function, Priority, Term, TermId};
pub use helpers::{one_line, version};
