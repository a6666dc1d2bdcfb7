//! Validation of the numeric channel fields.

use crate::constants::CHANNEL_MAX;

/// Parse a channel field, clamping to `0..=255`.
///
/// Surrounding whitespace is ignored. Text that is not an integer maps to 0.
pub fn parse_and_clamp(text: &str) -> u8 {
    match text.trim().parse::<i128>() {
        Ok(value) => value.clamp(0, CHANNEL_MAX as i128) as u8,
        Err(_) => 0,
    }
}

/// Parse all three channel fields at once
pub fn parse_channels(r: &str, g: &str, b: &str) -> [u8; 3] {
    [parse_and_clamp(r), parse_and_clamp(g), parse_and_clamp(b)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_values_pass_through() {
        assert_eq!(parse_and_clamp("0"), 0);
        assert_eq!(parse_and_clamp("128"), 128);
        assert_eq!(parse_and_clamp("255"), 255);
        assert_eq!(parse_and_clamp(" 42 "), 42);
        assert_eq!(parse_and_clamp("+7"), 7);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        assert_eq!(parse_and_clamp("300"), 255);
        assert_eq!(parse_and_clamp("-5"), 0);
        assert_eq!(parse_and_clamp("99999999999999999999"), 255);
        assert_eq!(parse_and_clamp("-99999999999999999999"), 0);
    }

    #[test]
    fn test_unparseable_text_is_zero() {
        assert_eq!(parse_and_clamp("abc"), 0);
        assert_eq!(parse_and_clamp(""), 0);
        assert_eq!(parse_and_clamp("12.5"), 0);
        assert_eq!(parse_and_clamp("0x10"), 0);
    }

    #[test]
    fn test_parse_channels() {
        assert_eq!(parse_channels("300", "-5", "abc"), [255, 0, 0]);
        assert_eq!(parse_channels("1", "2", "3"), [1, 2, 3]);
    }
}
