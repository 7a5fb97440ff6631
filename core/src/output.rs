// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Significant digits used when the caller has no preference.
pub const DEFAULT_DIGITS: usize = 5;

fn trim_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// Formats `value` with at most `digits` significant digits.
///
/// Plain decimal notation is used while the decimal exponent lies in
/// `-5..digits`; outside that range the value is written as
/// `mantissa` `e` `exponent`. Trailing zeros are dropped either way.
pub fn format_number(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_owned();
    }
    if value == 0.0 {
        return "0".to_owned();
    }

    let digits = digits.max(1);
    // The exponent is read back after rounding, so 99999.7 at five digits
    // is correctly treated as 1e5.
    let scientific = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = match scientific.find('e') {
        Some(at) => (&scientific[..at], &scientific[at + 1..]),
        None => (&scientific[..], "0"),
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -5 || exponent >= digits as i32 {
        format!("{}e{}", trim_zeros(mantissa), exponent)
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        trim_zeros(&format!("{:.*}", decimals, value)).to_owned()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn g5(value: f64) -> String {
        format_number(value, DEFAULT_DIGITS)
    }

    #[test]
    fn plain() {
        assert_eq!(g5(9.0), "9");
        assert_eq!(g5(-4.0), "-4");
        assert_eq!(g5(1.0 / 3.0), "0.33333");
        assert_eq!(g5(std::f64::consts::PI), "3.1416");
        assert_eq!(g5(12345.0), "12345");
        assert_eq!(g5(0.00012345), "0.00012345");
    }

    #[test]
    fn scientific() {
        assert_eq!(g5(1234567.0), "1.2346e6");
        assert_eq!(g5(99999.7), "1e5");
        assert_eq!(g5(0.000001234), "1.234e-6");
        assert_eq!(g5(-2.5e-10), "-2.5e-10");
    }

    #[test]
    fn special_values() {
        assert_eq!(g5(f64::NAN), "NaN");
        assert_eq!(g5(f64::INFINITY), "inf");
        assert_eq!(g5(f64::NEG_INFINITY), "-inf");
        assert_eq!(g5(-0.0), "0");
    }

    #[test]
    fn digit_count() {
        assert_eq!(format_number(std::f64::consts::PI, 2), "3.1");
        assert_eq!(format_number(std::f64::consts::PI, 0), "3");
        assert_eq!(format_number(123.0, 2), "1.2e2");
    }
}
