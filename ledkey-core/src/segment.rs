//! 7-segment glyph encoding
//!
//! Segment bit layout of a digit register:
//!
//! ```text
//!      ─a─          bit 0: a (top)
//!     │   │         bit 1: b (top right)
//!     f   b         bit 2: c (bottom right)
//!     │   │         bit 3: d (bottom)
//!      ─g─          bit 4: e (bottom left)
//!     │   │         bit 5: f (top left)
//!     e   c         bit 6: g (middle)
//!     │   │         bit 7: dp
//!      ─d─  .dp
//! ```
//!
//! The glyph set follows the Siekoo alphabet: every letter has a distinct
//! shape, at the cost of some letters (m, w, x...) being stylised.
//! Upper-case input renders with the lower-case glyph.

/// Decimal point segment; callers pass it in bit 7 of a character or hex value
pub const DECIMAL_POINT: u8 = 0b1000_0000;

/// Pattern returned for characters without a glyph (decimal point only)
pub const UNSUPPORTED: u8 = 0b1000_0000;

/// All segments off
pub const BLANK: u8 = 0b0000_0000;

/// Every character with a dedicated glyph (upper-case letters excluded)
pub const SUPPORTED: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz .,;:=+/\\!?_-^\"'%()@*#<>";

/// Encode a character to its segment pattern
///
/// Bit 7 is never set by the table itself, except for the
/// [`UNSUPPORTED`] sentinel returned for characters outside the glyph set.
pub const fn encode(c: u8) -> u8 {
    match c {
        b'0' => 0b0011_1111,
        b'1' => 0b0000_0110,
        b'2' => 0b0101_1011,
        b'3' => 0b0100_1111,
        b'4' => 0b0110_0110,
        b'5' => 0b0110_1101,
        b'6' => 0b0111_1101,
        b'7' => 0b0000_0111,
        b'8' => 0b0111_1111,
        b'9' => 0b0110_1111,
        b'a' => 0b0101_1111,
        b'b' => 0b0111_1100,
        b'c' => 0b0101_1000,
        b'd' => 0b0101_1110,
        b'e' => 0b0111_1001,
        b'f' => 0b0111_0001,
        b'g' => 0b0011_1101,
        b'h' => 0b0111_0100,
        b'i' => 0b0001_0001,
        b'j' => 0b0000_1101,
        b'k' => 0b0111_0101,
        b'l' => 0b0011_1000,
        b'm' => 0b0101_0101,
        b'n' => 0b0101_0100,
        b'o' => 0b0101_1100,
        b'p' => 0b0111_0011,
        b'q' => 0b0110_0111,
        b'r' => 0b0101_0000,
        b's' => 0b0010_1101,
        b't' => 0b0111_1000,
        b'u' => 0b0001_1100,
        b'v' => 0b0010_1010,
        b'w' => 0b0110_1010,
        b'x' => 0b0001_0100,
        b'y' => 0b0110_1110,
        b'z' => 0b0001_1011,
        b'A'..=b'Z' => encode(c.to_ascii_lowercase()),
        b' ' => 0b0000_0000,
        b'.' => 0b0001_0000,
        b',' => 0b0000_1100,
        b';' => 0b0000_1010,
        b':' => 0b0000_1001,
        b'=' => 0b0100_1000,
        b'+' => 0b0100_0110,
        b'/' => 0b0101_0010,
        b'\\' => 0b0110_0100,
        b'!' => 0b0110_1011,
        b'?' => 0b0100_1011,
        b'_' => 0b0000_1000,
        b'-' => 0b0100_0000,
        b'^' => 0b0000_0001,
        b'"' => 0b0010_0000,
        b'\'' => 0b0010_0010,
        b'%' => 0b0010_0100,
        b'(' => 0b0011_1001,
        b')' => 0b0000_1111,
        b'@' => 0b0001_0111,
        b'*' => 0b0100_1001,
        b'#' => 0b0011_0110,
        b'<' => 0b0010_0001,
        b'>' => 0b0000_0011,
        _ => UNSUPPORTED,
    }
}

/// Pattern for a character byte carrying an optional decimal point in bit 7
pub const fn char_pattern(value: u8) -> u8 {
    let dp = value & DECIMAL_POINT;
    encode(value & !DECIMAL_POINT) | dp
}

/// Pattern for a hex value carrying an optional decimal point in bit 7
///
/// Accepts either a nibble (0-15) or an ASCII hex letter of either case.
/// Anything else renders blank, decimal point preserved.
pub const fn hex_pattern(value: u8) -> u8 {
    let dp = value & DECIMAL_POINT;
    let digit = value & !DECIMAL_POINT;

    let glyph = match digit {
        0..=9 => encode(b'0' + digit),
        10..=15 => encode(b'a' + digit - 10),
        b'a'..=b'f' | b'A'..=b'F' => encode(digit),
        _ => BLANK,
    };

    glyph | dp
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_digits() {
        assert_eq!(encode(b'0'), 0x3F);
        assert_eq!(encode(b'1'), 0x06);
        assert_eq!(encode(b'8'), 0x7F);
    }

    #[test]
    fn test_supported_glyphs_are_unique() {
        for (i, &a) in SUPPORTED.iter().enumerate() {
            for &b in &SUPPORTED[i + 1..] {
                assert_ne!(
                    encode(a),
                    encode(b),
                    "{} and {} share a glyph",
                    a as char,
                    b as char
                );
            }
        }
    }

    #[test]
    fn test_no_glyph_uses_decimal_point() {
        for &c in SUPPORTED {
            assert_eq!(encode(c) & DECIMAL_POINT, 0, "{}", c as char);
        }
    }

    #[test]
    fn test_upper_case_merges_with_lower_case() {
        for upper in b'A'..=b'Z' {
            assert_eq!(encode(upper), encode(upper.to_ascii_lowercase()));
        }
        assert_eq!(encode(b'A'), encode(b'a'));
    }

    #[test]
    fn test_unsupported_is_sentinel() {
        assert_eq!(encode(b'~'), 0b1000_0000);
        assert_eq!(encode(b'&'), UNSUPPORTED);
        assert_eq!(encode(0x00), UNSUPPORTED);
        assert_eq!(encode(0xFF), UNSUPPORTED);
    }

    #[test]
    fn test_char_pattern_decimal_point() {
        assert_eq!(char_pattern(b'3'), 0x4F);
        assert_eq!(char_pattern(b'3' | DECIMAL_POINT), 0xCF);
        // Sentinel and decimal point coincide
        assert_eq!(char_pattern(b'~' | DECIMAL_POINT), UNSUPPORTED);
    }

    #[test]
    fn test_hex_pattern_nibbles() {
        assert_eq!(hex_pattern(0), encode(b'0'));
        assert_eq!(hex_pattern(9), encode(b'9'));
        assert_eq!(hex_pattern(10), encode(b'a'));
        assert_eq!(hex_pattern(15), encode(b'f'));
    }

    #[test]
    fn test_hex_pattern_ascii_letters() {
        assert_eq!(hex_pattern(b'c'), encode(b'c'));
        assert_eq!(hex_pattern(b'C'), encode(b'c'));
        assert_eq!(hex_pattern(b'F' | DECIMAL_POINT), encode(b'f') | DECIMAL_POINT);
    }

    #[test]
    fn test_hex_pattern_out_of_range_is_blank() {
        assert_eq!(hex_pattern(16), BLANK);
        assert_eq!(hex_pattern(b'g'), BLANK);
        assert_eq!(hex_pattern(b'0'), BLANK);
        assert_eq!(hex_pattern(b'z' | DECIMAL_POINT), DECIMAL_POINT);
    }

    proptest! {
        #[test]
        fn prop_decimal_point_preserved(value in any::<u8>()) {
            prop_assert_eq!(hex_pattern(value) & DECIMAL_POINT, value & DECIMAL_POINT);
            if value & DECIMAL_POINT != 0 {
                prop_assert_eq!(char_pattern(value) & DECIMAL_POINT, DECIMAL_POINT);
            }
        }
    }
}
