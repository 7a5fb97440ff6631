// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sampling an equation across a range of `x`, for plotting.

use crate::equation::Equation;
use crate::error::ParseError;
use crate::parser::parse;
use displaydoc::Display;
use log::debug;
use serde_derive::Serialize;
use thiserror::Error;

/// Number of steps taken across a domain when the caller has no
/// preference.
pub const DEFAULT_POINTS: usize = 250;

#[derive(Error, Display, Debug, Clone, PartialEq)]
pub enum SampleError {
    /// Invalid domain bound: {0}
    Bound(#[from] ParseError),
    /// Domain maximum {max} is less than its minimum {min}
    InvertedDomain { min: f64, max: f64 },
    /// Domain bound {0} is not a finite number
    NonFiniteBound(f64),
}

/// Closed interval of `x` values to sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    pub fn new(min: f64, max: f64) -> Result<Domain, SampleError> {
        for &bound in &[min, max] {
            if !bound.is_finite() {
                return Err(SampleError::NonFiniteBound(bound));
            }
        }
        if max < min {
            return Err(SampleError::InvertedDomain { min, max });
        }
        Ok(Domain { min, max })
    }

    /// Builds a domain whose bounds are themselves expressions, such as
    /// `-2*pi` and `2*pi`. Any `x` inside a bound evaluates as 0.
    pub fn parse(min: &str, max: &str) -> Result<Domain, SampleError> {
        let min = parse(min)?.evaluate();
        let max = parse(max)?.evaluate();
        Domain::new(min, max)
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn step(&self, points: usize) -> f64 {
        self.width() / points.max(1) as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

/// Finite samples of an equation, with the y range they cover.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Samples {
    pub domain: Domain,
    pub step: f64,
    pub points: Vec<Sample>,
    /// Positions where the equation was NaN or infinite.
    pub skipped: usize,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
}

impl Samples {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Evaluates `equation` at `points + 1` evenly spaced positions from
/// `domain.min` to `domain.max` inclusive. A zero-width domain is sampled
/// once.
///
/// Non-finite results are left out of `points` and do not affect the y
/// range.
pub fn sample(equation: &Equation, domain: &Domain, points: usize) -> Samples {
    let step = domain.step(points);
    let positions = if domain.width() == 0.0 {
        1
    } else {
        points.max(1) + 1
    };

    let mut samples = Samples {
        domain: *domain,
        step,
        points: Vec::with_capacity(positions),
        skipped: 0,
        y_min: None,
        y_max: None,
    };
    for i in 0..positions {
        let x = if i + 1 == positions {
            domain.max
        } else {
            domain.min + i as f64 * step
        };
        let y = equation.evaluate_at(x);
        if !y.is_finite() {
            samples.skipped += 1;
            continue;
        }
        samples.y_min = Some(samples.y_min.map_or(y, |min| min.min(y)));
        samples.y_max = Some(samples.y_max.map_or(y, |max| max.max(y)));
        samples.points.push(Sample { x, y });
    }

    debug!(
        "sampled `{}` over [{}, {}]: {} points, {} skipped, y in [{:?}, {:?}]",
        equation,
        domain.min,
        domain.max,
        samples.points.len(),
        samples.skipped,
        samples.y_min,
        samples.y_max
    );
    samples
}
