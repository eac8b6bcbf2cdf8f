//! CSS length helpers

/// Root font size used to resolve `rem`/`em` lengths
pub const ROOT_FONT_SIZE: f32 = 16.0;

/// Parse a CSS length into pixels.
///
/// Accepts `px`, unitless numbers, and `rem`/`em` (against
/// [`ROOT_FONT_SIZE`]). Anything else (percentages, `auto`, `calc()`)
/// returns `None`.
pub fn parse_px(value: &str) -> Option<f32> {
    let value = value.trim();
    let (number, scale) = if let Some(n) = value.strip_suffix("px") {
        (n, 1.0)
    } else if let Some(n) = value.strip_suffix("rem") {
        (n, ROOT_FONT_SIZE)
    } else if let Some(n) = value.strip_suffix("em") {
        (n, ROOT_FONT_SIZE)
    } else {
        (value, 1.0)
    };
    number
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|n| n.is_finite())
        .map(|n| n * scale)
}

/// At most two decimals, no trailing zeros
pub fn format_number(value: f32) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let text = format!("{:.2}", rounded);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Format pixels as a CSS length, rounded to two decimals
pub fn format_px(value: f32) -> String {
    format!("{}px", format_number(value))
}
