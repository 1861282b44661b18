// Parsing and sanitizing of user-supplied styling fields
// Malformed input never blocks delivery, it falls back to a default instead

/// Largest value a Discord embed color can hold
const MAX_COLOR: u32 = 0xFF_FF_FF;

/// Parse a `#rrggbb` / `rrggbb` string into a 24-bit color.
fn parse_hex(input: &str) -> Option<u32> {
    let hex = input.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);

    if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    u32::from_str_radix(hex, 16).ok().filter(|value| *value <= MAX_COLOR)
}

/// Resolve a color, returning `default_color` when `input` is absent or invalid.
///
/// The default is expected to be one of the constants in `config::colors`;
/// should it be invalid as well the result is black.
pub fn normalize_color(input: Option<&str>, default_color: &str) -> u32 {
    match input.and_then(parse_hex) {
        Some(color) => color,
        None => parse_hex(default_color).unwrap_or(0),
    }
}

/// Image URLs are passed through unvalidated; only an empty string counts as absent.
pub fn normalize_image(input: Option<&str>) -> Option<String> {
    input.filter(|url| !url.trim().is_empty()).map(str::to_string)
}
