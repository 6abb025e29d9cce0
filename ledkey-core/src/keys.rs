//! Key scan decoding
//!
//! The TM1638 scans up to 24 keys wired as 3 key lines (K1-K3) crossed
//! with the 8 segment drivers:
//!
//! ```text
//!          SEG1     SEG2     SEG3   ...   SEG8
//!           │        │        │             │
//!  K1 ── K1_SEG1  K1_SEG2  K1_SEG3  ...  K1_SEG8
//!  K2 ── K2_SEG1  K2_SEG2  K2_SEG3  ...  K2_SEG8
//!  K3 ── K3_SEG1  K3_SEG2  K3_SEG3  ...  K3_SEG8
//! ```
//!
//! Reading key data returns 4 bytes. Byte `i` covers segment columns
//! `2i` (low nibble) and `2i + 1` (high nibble); within a nibble bit 0 is
//! K3, bit 1 is K2 and bit 2 is K1. Bit 3 of each nibble is unused.
//!
//! The decoded mask is grouped in blocks of 8 per key line:
//! - bit 0..=7   => K1_SEG1..K1_SEG8
//! - bit 8..=15  => K2_SEG1..K2_SEG8
//! - bit 16..=23 => K3_SEG1..K3_SEG8

/// Number of key scan bytes read per scan
pub const SCAN_BYTES: usize = 4;

/// Number of key lines (K1-K3)
pub const KEY_LINES: usize = 3;

/// Segment columns per key line
pub const KEYS_PER_LINE: usize = 8;

/// Total addressable keys
pub const KEY_COUNT: usize = KEY_LINES * KEYS_PER_LINE;

/// Decoded key state, one bit per key (set = pressed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyMask(pub u32);

impl KeyMask {
    /// No keys pressed
    pub const NONE: Self = Self(0);

    /// Decode the raw scan registers
    ///
    /// Walks the key lines starting from the nibble bit 0 line, and for each
    /// line walks the bytes from last to first, shifting in the high nibble
    /// bit then the low nibble bit. This order matches the board wiring;
    /// changing it remaps physical keys.
    pub fn decode(raw: &[u8; SCAN_BYTES]) -> Self {
        let mut mask: u32 = 0;
        let mut line_bit: u8 = 0x01;

        for _ in 0..KEY_LINES {
            for byte in raw.iter().rev() {
                mask <<= 1;
                if byte & (line_bit << 4) != 0 {
                    mask |= 1;
                }

                mask <<= 1;
                if byte & line_bit != 0 {
                    mask |= 1;
                }
            }

            line_bit <<= 1;
        }

        Self(mask)
    }

    /// Bit index of a key
    ///
    /// `line` is 0 for K1, `column` is 0 for SEG1.
    pub const fn bit_index(line: usize, column: usize) -> usize {
        line * KEYS_PER_LINE + column
    }

    /// Raw bits
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// The 8 keys of one key line
    ///
    /// Boards with a single key row (the common 8-key LED&KEY module) only
    /// need `line(0)`.
    pub const fn line(self, line: usize) -> u8 {
        (self.0 >> (line * KEYS_PER_LINE)) as u8
    }

    /// Check a single key by bit index
    pub const fn is_pressed(self, bit: usize) -> bool {
        bit < KEY_COUNT && self.0 & (1 << bit) != 0
    }

    /// Number of keys pressed
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Check whether no key is pressed
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl From<KeyMask> for u32 {
    fn from(mask: KeyMask) -> Self {
        mask.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_no_keys() {
        assert_eq!(KeyMask::decode(&[0; SCAN_BYTES]), KeyMask::NONE);
    }

    #[test]
    fn test_k1_wiring() {
        // K1 is nibble bit 2 (0x04 low, 0x40 high)
        assert_eq!(KeyMask::decode(&[0x04, 0, 0, 0]).bits(), 1 << 0);
        assert_eq!(KeyMask::decode(&[0x40, 0, 0, 0]).bits(), 1 << 1);
        assert_eq!(KeyMask::decode(&[0, 0, 0, 0x40]).bits(), 1 << 7);
        // SEG1 + SEG4 + SEG6
        assert_eq!(KeyMask::decode(&[0x04, 0x40, 0x40, 0]).bits(), 0b0010_1001);
    }

    #[test]
    fn test_k2_wiring() {
        // K2 is nibble bit 1 (0x02 low, 0x20 high)
        assert_eq!(KeyMask::decode(&[0, 0x02, 0, 0]).bits(), 1 << 10);
        assert_eq!(KeyMask::decode(&[0, 0, 0x20, 0]).bits(), 1 << 13);
        assert_eq!(KeyMask::decode(&[0x22, 0x22, 0x22, 0x22]).bits(), 0x0000_FF00);
    }

    #[test]
    fn test_k3_wiring() {
        // K3 is nibble bit 0 (0x01 low, 0x10 high)
        assert_eq!(KeyMask::decode(&[0x01, 0, 0, 0]).bits(), 1 << 16);
        assert_eq!(KeyMask::decode(&[0, 0, 0, 0x10]).bits(), 1 << 23);
        assert_eq!(KeyMask::decode(&[0x10, 0, 0x01, 0]).bits(), (1 << 17) | (1 << 20));
    }

    #[test]
    fn test_unused_bits_ignored() {
        assert_eq!(KeyMask::decode(&[0x88; SCAN_BYTES]), KeyMask::NONE);
    }

    #[test]
    fn test_all_keys() {
        let mask = KeyMask::decode(&[0x77; SCAN_BYTES]);
        assert_eq!(mask.bits(), 0x00FF_FFFF);
        assert_eq!(mask.count(), KEY_COUNT as u32);
    }

    #[test]
    fn test_line_and_bit_helpers() {
        let mask = KeyMask::decode(&[0x04, 0, 0x20, 0x10]);
        assert_eq!(mask.line(0), 0x01);
        assert_eq!(mask.line(1), 1 << 5);
        assert_eq!(mask.line(2), 1 << 7);
        assert!(mask.is_pressed(KeyMask::bit_index(0, 0)));
        assert!(mask.is_pressed(KeyMask::bit_index(1, 5)));
        assert!(mask.is_pressed(KeyMask::bit_index(2, 7)));
        assert!(!mask.is_pressed(KeyMask::bit_index(2, 6)));
        assert!(!mask.is_pressed(40));
    }

    proptest! {
        /// Every raw key bit lands on exactly one mask bit:
        /// nibble bit `b` of byte `i` is key line `2 - b`, column `2i + high`.
        #[test]
        fn prop_decode_matches_wiring(raw in any::<[u8; SCAN_BYTES]>()) {
            let mut expected = 0u32;
            for (i, byte) in raw.iter().enumerate() {
                for b in 0..KEY_LINES {
                    for high in 0..2 {
                        if byte & (1 << (b + 4 * high)) != 0 {
                            expected |= 1 << KeyMask::bit_index(2 - b, 2 * i + high);
                        }
                    }
                }
            }
            prop_assert_eq!(KeyMask::decode(&raw).bits(), expected);
        }
    }
}
