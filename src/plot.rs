// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::Theme;
use eyre::{eyre, Result, WrapErr};
use graphcalc_core::{format_number, parse, sample, Domain, Equation, Samples};
use log::info;
use std::fmt::Write;

/// Digits shown for the y range and x range labels.
const LABEL_DIGITS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
    Csv,
}

impl Format {
    pub const NAMES: [&'static str; 3] = ["text", "json", "csv"];

    pub fn from_name(name: &str) -> Option<Format> {
        match name {
            "text" => Some(Format::Text),
            "json" => Some(Format::Json),
            "csv" => Some(Format::Csv),
            _ => None,
        }
    }
}

/// Parses the expression and both bounds, then samples the expression
/// across that range.
pub fn sample_expression(expr: &str, min: &str, max: &str, points: usize) -> Result<Samples> {
    let equation: Equation =
        parse(expr).wrap_err_with(|| format!("Failed to parse `{}`", expr.trim()))?;
    let domain = Domain::parse(min, max).wrap_err("Invalid plot range")?;
    if !equation.depends_on_x() {
        info!("`{}` does not depend on x, plotting a flat line", equation);
    }
    Ok(sample(&equation, &domain, points))
}

#[derive(Clone, Copy, PartialEq)]
enum Cell {
    Empty,
    Horizontal,
    Vertical,
    Origin,
    Curve,
}

/// Maps `value` within `min..=max` onto `0..cells`, with `min` at 0.
fn scale(value: f64, min: f64, max: f64, cells: usize) -> usize {
    if max <= min {
        return cells / 2;
    }
    let offset = ((value - min) / (max - min) * (cells - 1) as f64).round();
    (offset.max(0.0) as usize).min(cells - 1)
}

/// Draws the samples as a character chart framed by the y range above
/// and below and the x range underneath.
pub fn render_text(samples: &Samples, width: usize, height: usize, theme: &Theme) -> Result<String> {
    let (y_min, y_max) = match (samples.y_min, samples.y_max) {
        (Some(min), Some(max)) => (min, max),
        _ => {
            return Err(eyre!(
                "Nothing to plot, there are no finite values between {} and {}",
                format_number(samples.domain.min, LABEL_DIGITS),
                format_number(samples.domain.max, LABEL_DIGITS)
            ))
        }
    };
    let width = width.max(2);
    let height = height.max(2);
    let (x_min, x_max) = (samples.domain.min, samples.domain.max);
    let row_of = |y: f64| height - 1 - scale(y, y_min, y_max, height);

    let mut grid = vec![vec![Cell::Empty; width]; height];
    if y_min <= 0.0 && 0.0 <= y_max {
        let row = row_of(0.0);
        for cell in grid[row].iter_mut() {
            *cell = Cell::Horizontal;
        }
    }
    if x_min <= 0.0 && 0.0 <= x_max {
        let column = scale(0.0, x_min, x_max, width);
        for row in grid.iter_mut() {
            row[column] = match row[column] {
                Cell::Horizontal => Cell::Origin,
                _ => Cell::Vertical,
            };
        }
    }
    for point in &samples.points {
        grid[row_of(point.y)][scale(point.x, x_min, x_max, width)] = Cell::Curve;
    }

    let mut out = String::new();
    let label = |name: &str, value: f64| {
        format!(
            "{}{}",
            theme.label.paint(name),
            theme.number.paint(format_number(value, LABEL_DIGITS))
        )
    };
    writeln!(out, "{}", label("Y max: ", y_max))?;
    for row in &grid {
        let used = row
            .iter()
            .rposition(|cell| *cell != Cell::Empty)
            .map_or(0, |last| last + 1);
        for cell in &row[..used] {
            let painted = match cell {
                Cell::Empty => theme.plain.paint(" "),
                Cell::Horizontal => theme.axis.paint("-"),
                Cell::Vertical => theme.axis.paint("|"),
                Cell::Origin => theme.axis.paint("+"),
                Cell::Curve => theme.curve.paint("*"),
            };
            write!(out, "{}", painted)?;
        }
        writeln!(out)?;
    }
    writeln!(out, "{}", label("Y min: ", y_min))?;
    writeln!(
        out,
        "{} to {}",
        label("X: ", x_min),
        theme.number.paint(format_number(x_max, LABEL_DIGITS))
    )?;
    Ok(out)
}

pub fn render_json(samples: &Samples) -> Result<String> {
    serde_json::to_string_pretty(samples).wrap_err("Failed to serialize samples")
}

pub fn render_csv(samples: &Samples) -> String {
    let mut out = String::from("x,y\n");
    for point in &samples.points {
        out.push_str(&format!("{},{}\n", point.x, point.y));
    }
    out
}

pub fn render(samples: &Samples, format: Format, width: usize, height: usize, theme: &Theme) -> Result<String> {
    match format {
        Format::Text => render_text(samples, width, height, theme),
        Format::Json => render_json(samples),
        Format::Csv => Ok(render_csv(samples)),
    }
}
