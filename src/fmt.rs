// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt::Display;

use ansi_term::ANSIStrings;
use graphcalc_core::format_number;

use crate::config::{Config, Theme};
use crate::history::{Entry, Outcome};

pub fn value_string(config: &Config, theme: &Theme, value: f64) -> String {
    theme
        .number
        .paint(format_number(value, config.graphcalc.digits))
        .to_string()
}

pub fn error_string(theme: &Theme, err: &dyn Display) -> String {
    theme.error.paint(err.to_string()).to_string()
}

/// The result of evaluating one line, as printed after it.
pub fn outcome_string(config: &Config, theme: &Theme, outcome: &Outcome) -> String {
    match outcome {
        Outcome::Value(value) => value_string(config, theme, *value),
        Outcome::Plotted => theme.plain.paint("(plotted)").to_string(),
        Outcome::Failed(err) => error_string(theme, err),
    }
}

/// A history line: `expr = value` on success, or the expression with
/// the error on the line below.
pub fn entry_string(config: &Config, theme: &Theme, entry: &Entry) -> String {
    let expression = theme.user_input.paint(&entry.expression[..]);
    match entry.outcome {
        Outcome::Value(value) => {
            let strings = [
                expression,
                theme.plain.paint(" = "),
                theme
                    .number
                    .paint(format_number(value, config.graphcalc.digits)),
            ];
            ANSIStrings(&strings).to_string()
        }
        Outcome::Plotted => format!(
            "{} {}",
            expression,
            outcome_string(config, theme, &entry.outcome)
        ),
        Outcome::Failed(_) => format!(
            "{}\n{}",
            expression,
            outcome_string(config, theme, &entry.outcome)
        ),
    }
}
