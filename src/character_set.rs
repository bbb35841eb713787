use crate::error::QrStreamError;

/// Character sets addressable through an ECI designator, limited to the
/// assignments QR readers encounter in practice (AIM ECI, part 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterSet {
    Cp437,
    Iso8859_1,
    Iso8859_2,
    Iso8859_3,
    Iso8859_4,
    Iso8859_5,
    Iso8859_6,
    Iso8859_7,
    Iso8859_8,
    Iso8859_9,
    Iso8859_10,
    Iso8859_11,
    Iso8859_13,
    Iso8859_14,
    Iso8859_15,
    Iso8859_16,
    Sjis,
    Cp1250,
    Cp1251,
    Cp1252,
    Cp1256,
    Utf16Be,
    Utf8,
    Ascii,
    Big5,
    Gb18030,
    EucKr,
}

impl CharacterSet {
    /// Resolves an ECI assignment value to its character set. The table is
    /// closed; unassigned values return `None`.
    pub fn from_eci_value(value: u32) -> Option<CharacterSet> {
        match value {
            0 | 2 => Some(Self::Cp437),
            1 | 3 => Some(Self::Iso8859_1),
            4 => Some(Self::Iso8859_2),
            5 => Some(Self::Iso8859_3),
            6 => Some(Self::Iso8859_4),
            7 => Some(Self::Iso8859_5),
            8 => Some(Self::Iso8859_6),
            9 => Some(Self::Iso8859_7),
            10 => Some(Self::Iso8859_8),
            11 => Some(Self::Iso8859_9),
            12 => Some(Self::Iso8859_10),
            13 => Some(Self::Iso8859_11),
            15 => Some(Self::Iso8859_13),
            16 => Some(Self::Iso8859_14),
            17 => Some(Self::Iso8859_15),
            18 => Some(Self::Iso8859_16),
            20 => Some(Self::Sjis),
            21 => Some(Self::Cp1250),
            22 => Some(Self::Cp1251),
            23 => Some(Self::Cp1252),
            24 => Some(Self::Cp1256),
            25 => Some(Self::Utf16Be),
            26 => Some(Self::Utf8),
            27 | 170 => Some(Self::Ascii),
            28 => Some(Self::Big5),
            29 => Some(Self::Gb18030),
            30 => Some(Self::EucKr),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Cp437 => "Cp437",
            Self::Iso8859_1 => "ISO-8859-1",
            Self::Iso8859_2 => "ISO-8859-2",
            Self::Iso8859_3 => "ISO-8859-3",
            Self::Iso8859_4 => "ISO-8859-4",
            Self::Iso8859_5 => "ISO-8859-5",
            Self::Iso8859_6 => "ISO-8859-6",
            Self::Iso8859_7 => "ISO-8859-7",
            Self::Iso8859_8 => "ISO-8859-8",
            Self::Iso8859_9 => "ISO-8859-9",
            Self::Iso8859_10 => "ISO-8859-10",
            Self::Iso8859_11 => "ISO-8859-11",
            Self::Iso8859_13 => "ISO-8859-13",
            Self::Iso8859_14 => "ISO-8859-14",
            Self::Iso8859_15 => "ISO-8859-15",
            Self::Iso8859_16 => "ISO-8859-16",
            Self::Sjis => "Shift_JIS",
            Self::Cp1250 => "windows-1250",
            Self::Cp1251 => "windows-1251",
            Self::Cp1252 => "windows-1252",
            Self::Cp1256 => "windows-1256",
            Self::Utf16Be => "UTF-16BE",
            Self::Utf8 => "UTF-8",
            Self::Ascii => "US-ASCII",
            Self::Big5 => "Big5",
            Self::Gb18030 => "GB18030",
            Self::EucKr => "EUC-KR",
        }
    }

    /// Decodes a byte run under this character set. Malformed sequences are
    /// replaced with U+FFFD; only a character set with no available codec is
    /// an error.
    pub fn decode(self, bytes: &[u8]) -> Result<String, QrStreamError> {
        let encoding = match self {
            // No codec; ECI 0/2 resolve but cannot be decoded.
            Self::Cp437 => return Err(QrStreamError::EncodingUnsupported),
            // True Latin-1: every byte maps to the same code point. The
            // WHATWG tables alias ISO-8859-1 to windows-1252, which differs
            // in 0x80-0x9F, so decode it directly.
            Self::Iso8859_1 => {
                return Ok(bytes.iter().map(|&b| b as char).collect());
            }
            Self::Ascii => {
                return Ok(bytes
                    .iter()
                    .map(|&b| if b < 0x80 { b as char } else { '\u{FFFD}' })
                    .collect());
            }
            Self::Iso8859_2 => encoding_rs::ISO_8859_2,
            Self::Iso8859_3 => encoding_rs::ISO_8859_3,
            Self::Iso8859_4 => encoding_rs::ISO_8859_4,
            Self::Iso8859_5 => encoding_rs::ISO_8859_5,
            Self::Iso8859_6 => encoding_rs::ISO_8859_6,
            Self::Iso8859_7 => encoding_rs::ISO_8859_7,
            Self::Iso8859_8 => encoding_rs::ISO_8859_8,
            // ISO-8859-9 and -11 only exist as their windows supersets;
            // identical for every byte a conforming encoder emits.
            Self::Iso8859_9 => encoding_rs::WINDOWS_1254,
            Self::Iso8859_10 => encoding_rs::ISO_8859_10,
            Self::Iso8859_11 => encoding_rs::WINDOWS_874,
            Self::Iso8859_13 => encoding_rs::ISO_8859_13,
            Self::Iso8859_14 => encoding_rs::ISO_8859_14,
            Self::Iso8859_15 => encoding_rs::ISO_8859_15,
            Self::Iso8859_16 => encoding_rs::ISO_8859_16,
            Self::Sjis => encoding_rs::SHIFT_JIS,
            Self::Cp1250 => encoding_rs::WINDOWS_1250,
            Self::Cp1251 => encoding_rs::WINDOWS_1251,
            Self::Cp1252 => encoding_rs::WINDOWS_1252,
            Self::Cp1256 => encoding_rs::WINDOWS_1256,
            Self::Utf16Be => encoding_rs::UTF_16BE,
            Self::Utf8 => encoding_rs::UTF_8,
            Self::Big5 => encoding_rs::BIG5,
            Self::Gb18030 => encoding_rs::GB18030,
            Self::EucKr => encoding_rs::EUC_KR,
        };
        let (text, _had_errors) = encoding.decode_without_bom_handling(bytes);
        Ok(text.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eci_lookup() {
        assert_eq!(CharacterSet::from_eci_value(1), Some(CharacterSet::Iso8859_1));
        assert_eq!(CharacterSet::from_eci_value(3), Some(CharacterSet::Iso8859_1));
        assert_eq!(CharacterSet::from_eci_value(20), Some(CharacterSet::Sjis));
        assert_eq!(CharacterSet::from_eci_value(26), Some(CharacterSet::Utf8));
        assert_eq!(CharacterSet::from_eci_value(170), Some(CharacterSet::Ascii));
        assert_eq!(CharacterSet::from_eci_value(14), None);
        assert_eq!(CharacterSet::from_eci_value(19), None);
        assert_eq!(CharacterSet::from_eci_value(900), None);
    }

    #[test]
    fn test_latin1_decodes_every_byte_verbatim() {
        let bytes: Vec<u8> = (0..=255).collect();
        let text = CharacterSet::Iso8859_1.decode(&bytes).unwrap();
        for (b, c) in bytes.iter().zip(text.chars()) {
            assert_eq!(*b as u32, c as u32);
        }
    }

    #[test]
    fn test_shift_jis_decode() {
        // 0x93FA 0x967B: Japanese "nihon".
        let text = CharacterSet::Sjis.decode(&[0x93, 0xFA, 0x96, 0x7B]).unwrap();
        assert_eq!(text, "\u{65E5}\u{672C}");
    }

    #[test]
    fn test_utf8_decode_keeps_bom() {
        let text = CharacterSet::Utf8.decode(&[0xEF, 0xBB, 0xBF, b'h', b'i']).unwrap();
        assert_eq!(text, "\u{FEFF}hi");
    }

    #[test]
    fn test_cp437_is_unsupported() {
        assert_eq!(
            CharacterSet::Cp437.decode(b"abc"),
            Err(QrStreamError::EncodingUnsupported)
        );
    }
}
