//! Identifier and colour normalization.
//!
//! Both formatters are total: every input produces an output, and the output
//! strings are used verbatim by every rendered format and by the snapshot.
//!
//! ```rust
//! use swatch_core::document::ColorValue;
//! use swatch_core::format::{format_color, format_name};
//!
//! assert_eq!(format_name("Brand/Primary é"), "BRAND_PRIMARYE");
//! assert_eq!(format_color(&ColorValue::rgb(1.0, 0.0, 0.0)), "rgb(255, 0, 0)");
//! ```

use unicode_normalization::UnicodeNormalization;

use crate::document::ColorValue;

/// Converts a style name into a constant-style identifier.
///
/// Uppercases, strips diacritics (canonical decomposition, then the combining
/// diacritical marks block is dropped), replaces `/` with `_` and removes any
/// character that is not an ASCII letter, digit or underscore.
///
/// Distinct names may map to the same identifier.
pub fn format_name(name: &str) -> String {
    name.to_uppercase()
        .nfd()
        .filter(|c| !is_diacritical_mark(*c))
        .map(|c| if c == '/' { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

// Only the Combining Diacritical Marks block; other marks fall through to the
// ASCII filter anyway.
fn is_diacritical_mark(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036f}')
}

/// Scales a channel from `[0, 1]` to `[0, 255]`, rounding half up.
///
/// Out-of-range input is not clamped.
pub fn scale_channel(value: f64) -> i64 {
    (value * 255.0 + 0.5).floor() as i64
}

/// Renders a colour as a CSS `rgb()`/`rgba()` expression.
///
/// Alpha is scaled to `[0, 255]` like the other channels. The `rgb()` form is
/// used only when alpha is exactly `1`.
pub fn format_color(color: &ColorValue) -> String {
    let (r, g, b) = (
        scale_channel(color.r),
        scale_channel(color.g),
        scale_channel(color.b),
    );

    if color.a == 1.0 {
        format!("rgb({}, {}, {})", r, g, b)
    } else {
        format!("rgba({}, {}, {}, {})", r, g, b, scale_channel(color.a))
    }
}
