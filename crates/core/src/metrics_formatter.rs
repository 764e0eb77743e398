#![allow(clippy::uninlined_format_args)]

/// Number rendering shared by the console report.
pub struct MetricsFormatter;

impl MetricsFormatter {
    /// Renders `value` in scientific notation with a signed, at least
    /// two-digit exponent (`1.234e-05`), the layout analysts expect from
    /// statistics packages. Rust's `{:e}` would print `1.234e-5`.
    #[must_use]
    pub fn scientific(value: f64, precision: usize) -> String {
        if !value.is_finite() {
            return Self::non_finite(value);
        }

        let raw = format!("{:.*e}", precision, value);
        let Some((mantissa, exponent)) = raw.split_once('e') else {
            return raw;
        };

        let (sign, digits) = match exponent.strip_prefix('-') {
            Some(digits) => ('-', digits),
            None => ('+', exponent),
        };

        format!("{}e{}{:0>2}", mantissa, sign, digits)
    }

    /// Renders `value` with a fixed number of decimals.
    #[must_use]
    pub fn fixed(value: f64, precision: usize) -> String {
        if !value.is_finite() {
            return Self::non_finite(value);
        }
        format!("{:.*}", precision, value)
    }

    /// Renders `value` as a percentage with a fixed number of decimals.
    #[must_use]
    pub fn percent(value: f64, precision: usize) -> String {
        if !value.is_finite() {
            return Self::non_finite(value);
        }
        format!("{:.*}%", precision, value * 100.0)
    }

    fn non_finite(value: f64) -> String {
        if value.is_nan() {
            "nan".to_string()
        } else if value.is_sign_positive() {
            "inf".to_string()
        } else {
            "-inf".to_string()
        }
    }
}
