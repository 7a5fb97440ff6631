// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use graphcalc_core::{parse, ParseError};
use std::collections::VecDeque;

/// One evaluated line and what came of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub expression: String,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Value(f64),
    /// The expression was plotted rather than evaluated.
    Plotted,
    Failed(ParseError),
}

impl Entry {
    /// Parses and evaluates `expression` with `x` at 0.
    pub fn evaluate(expression: &str) -> Entry {
        let expression = expression.trim();
        let outcome = match parse(expression) {
            Ok(equation) => Outcome::Value(equation.evaluate()),
            Err(err) => Outcome::Failed(err),
        };
        Entry {
            expression: expression.to_owned(),
            outcome,
        }
    }
}

/// The most recent results of a session, oldest first.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Entry>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> History {
        History {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: Entry) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }
}
