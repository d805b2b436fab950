/// Parses a real literal, accepting `e`, `E`, `d` and `D` as exponent markers.
///
/// The literal must already have been validated by the lexer, so only the
/// exponent marker needs rewriting. Returns `None` when the text is not a
/// valid floating-point literal.
///
/// ## Parameters
/// - `text`: Literal text such as `12`, `.5`, `3.` or `2.5D-3`.
///
/// ## Returns
/// - `Some(f64)`: The parsed value. Literals that overflow become infinity.
/// - `None`: If the text is not a number.
///
/// ## Example
/// ```
/// use lattice_expr::util::num::parse_real_literal;
///
/// assert_eq!(parse_real_literal("2.5d2"), Some(250.0));
/// assert_eq!(parse_real_literal("1E-3"), Some(0.001));
/// assert_eq!(parse_real_literal(".5"), Some(0.5));
/// assert_eq!(parse_real_literal("3."), Some(3.0));
/// assert_eq!(parse_real_literal("pi"), None);
/// ```
#[must_use]
pub fn parse_real_literal(text: &str) -> Option<f64> {
    if text.contains(['d', 'D']) {
        text.replace(['d', 'D'], "e").parse().ok()
    } else {
        text.parse().ok()
    }
}

/// Formats a value the way the command line prints results.
///
/// Integral values keep a trailing `.0` so that a result is never mistaken for
/// an integer quantity; everything else uses the shortest round-trip form.
///
/// ## Example
/// ```
/// use lattice_expr::util::num::format_real;
///
/// assert_eq!(format_real(23.0), "23.0");
/// assert_eq!(format_real(0.25), "0.25");
/// assert_eq!(format_real(f64::INFINITY), "inf");
/// ```
#[must_use]
pub fn format_real(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fortran_exponents_are_accepted() {
        assert_eq!(parse_real_literal("1d3"), Some(1000.0));
        assert_eq!(parse_real_literal("1D+3"), Some(1000.0));
        assert_eq!(parse_real_literal("4.5e-1"), Some(0.45));
    }

    #[test]
    fn overflowing_literal_is_infinite() {
        assert_eq!(parse_real_literal("1e400"), Some(f64::INFINITY));
    }

    #[test]
    fn large_values_use_plain_formatting() {
        assert_eq!(format_real(2.99792458e8), "299792458.0");
        assert_eq!(format_real(1e20), "100000000000000000000");
        assert_eq!(format_real(-8.0), "-8.0");
    }
}
