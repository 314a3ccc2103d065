//! Result formatting for display.

/// Renders a finite value the way the UI shows it: scientific notation with
/// six mantissa decimals outside the comfortable range, otherwise the
/// shortest decimal form after rounding away float noise at the tenth
/// decimal place.
///
/// Only ever called on values already known to be finite.
pub fn format_for_display(value: f64) -> String {
    if value.abs() > 1e10 || (value != 0.0 && value.abs() < 1e-4) {
        return format!("{value:.6e}");
    }

    let rounded = (value * 1e10).round() / 1e10;
    if rounded == 0.0 {
        // avoids "-0" after rounding
        return "0".to_string();
    }
    format!("{rounded}")
}
