//! Country flag glyph conversion for the leaderboard display

/// Offset between an uppercase ASCII letter and its Unicode regional
/// indicator symbol
const REGIONAL_INDICATOR_OFFSET: u32 = 127_397;

/// Glyph shown for users without a country code
pub const PLACEHOLDER_FLAG: &str = "\u{1F310}";

/// Converts a two letter country code into its flag glyph by mapping
/// each letter onto the regional indicator range. Missing or empty
/// codes render the globe placeholder.
pub fn country_flag(country_code: Option<&str>) -> String {
    let code = match country_code {
        Some(value) if !value.is_empty() => value,
        _ => return PLACEHOLDER_FLAG.to_string(),
    };

    code.to_uppercase()
        .chars()
        .filter_map(|value| char::from_u32(REGIONAL_INDICATOR_OFFSET + value as u32))
        .collect()
}
