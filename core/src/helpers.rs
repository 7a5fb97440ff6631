// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::error::ParseError;
use crate::output::{format_number, DEFAULT_DIGITS};
use crate::parser::parse;

/// Helper function that parses an expression, evaluates it with `x` at 0
/// and formats the value with [`DEFAULT_DIGITS`] significant digits.
pub fn one_line(line: &str) -> Result<String, ParseError> {
    let equation = parse(line.trim())?;
    Ok(format_number(equation.evaluate(), DEFAULT_DIGITS))
}

/// Returns `env!("CARGO_PKG_VERSION")`, a string in `x.y.z` format.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn formats_value() {
        assert_eq!(one_line(" 1+2*4 ").as_deref(), Ok("9"));
        assert_eq!(one_line("pi").as_deref(), Ok("3.1416"));
        assert_eq!(one_line("ln(-1)").as_deref(), Ok("NaN"));
    }

    #[test]
    fn reports_error() {
        let err = one_line("1*").unwrap_err();
        assert_eq!(err.message(), "Incomplete equation, maybe missing a term? at 2, near `1*`");
    }
}
