use crate::Version;
use crate::error::QrStreamError;

/// Data mode of a payload segment, identified by the 4-bit mode indicator
/// that opens the segment (ISO/IEC 18004, table 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Mode {
    /// Marks the end of the encoded data.
    Terminator = 0b0000,

    /// Digits 0-9, packed three to 10 bits.
    Numeric = 0b0001,

    /// The 45-character alphanumeric set, packed two to 11 bits.
    Alphanumeric = 0b0010,

    /// One symbol of a multi-symbol message; carries a 16-bit header.
    StructuredAppend = 0b0011,

    /// Raw 8-bit data.
    Byte = 0b0100,

    /// FNC1 in first position: GS1 application identifier convention.
    Fnc1FirstPosition = 0b0101,

    /// ECI designator: switches the character set for later byte segments.
    Eci = 0b0111,

    /// Shift_JIS double-byte characters, packed one to 13 bits.
    Kanji = 0b1000,

    /// FNC1 in second position: AIM application indicator convention.
    Fnc1SecondPosition = 0b1001,
}

impl std::convert::TryFrom<u8> for Mode {
    type Error = QrStreamError;
    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0b0000 => Ok(Self::Terminator),
            0b0001 => Ok(Self::Numeric),
            0b0010 => Ok(Self::Alphanumeric),
            0b0011 => Ok(Self::StructuredAppend),
            0b0100 => Ok(Self::Byte),
            0b0101 => Ok(Self::Fnc1FirstPosition),
            0b0111 => Ok(Self::Eci),
            0b1000 => Ok(Self::Kanji),
            0b1001 => Ok(Self::Fnc1SecondPosition),
            _ => Err(QrStreamError::UnknownModeIndicator),
        }
    }
}

impl Mode {
    /// Width in bits of the character count field that follows this mode
    /// indicator, per ISO/IEC 18004, table 3. Modes without a count field
    /// report zero.
    pub fn character_count_bits(self, version: Version) -> usize {
        let widths = match self {
            Self::Numeric => [10, 12, 14],
            Self::Alphanumeric => [9, 11, 13],
            Self::Byte => [8, 16, 16],
            Self::Kanji => [8, 10, 12],
            _ => return 0,
        };
        match version.number() {
            1..=9 => widths[0],
            10..=26 => widths[1],
            _ => widths[2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn test_mode_indicator_round_trip() {
        for mode in [
            Mode::Terminator,
            Mode::Numeric,
            Mode::Alphanumeric,
            Mode::StructuredAppend,
            Mode::Byte,
            Mode::Fnc1FirstPosition,
            Mode::Eci,
            Mode::Kanji,
            Mode::Fnc1SecondPosition,
        ] {
            assert_eq!(Mode::try_from(mode as u8).unwrap(), mode);
        }
    }

    #[test]
    fn test_unknown_indicators_rejected() {
        for v in [0b0110u8, 0b1010, 0b1111, 0xFF] {
            assert_eq!(Mode::try_from(v), Err(QrStreamError::UnknownModeIndicator));
        }
    }

    #[test]
    fn test_character_count_bits_tiers() {
        let v1 = Version::new(1).unwrap();
        let v10 = Version::new(10).unwrap();
        let v27 = Version::new(27).unwrap();

        assert_eq!(Mode::Numeric.character_count_bits(v1), 10);
        assert_eq!(Mode::Numeric.character_count_bits(v10), 12);
        assert_eq!(Mode::Numeric.character_count_bits(v27), 14);

        assert_eq!(Mode::Alphanumeric.character_count_bits(v1), 9);
        assert_eq!(Mode::Byte.character_count_bits(v10), 16);
        assert_eq!(Mode::Kanji.character_count_bits(v27), 12);

        assert_eq!(Mode::Terminator.character_count_bits(v1), 0);
        assert_eq!(Mode::Eci.character_count_bits(v27), 0);
    }
}
