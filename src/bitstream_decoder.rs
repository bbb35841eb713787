use std::convert::TryFrom;

use crate::bit_source::BitSource;
use crate::character_set::CharacterSet;
use crate::constants::{
    ALPHANUMERIC_CHARS, FNC1_GS, MODE_INDICATOR_BITS, STRUCTURED_APPEND_HEADER_BITS,
};
use crate::encoding_guess::guess_encoding;
use crate::error::QrStreamError;
use crate::mode::Mode;
use crate::{DecodeOptions, DecoderResult, Version};

/// Decodes the segmented payload bit stream of one symbol back into text
/// (ISO/IEC 18004, sections 6.4.3 - 6.4.7).
///
/// A symbol can mix several modes in one payload; each segment opens with a
/// 4-bit mode indicator and, for content modes, a character count. The
/// decoder owns all session state and is consumed by `decode`.
pub struct BitStreamDecoder<'a> {
    bits: BitSource<'a>,
    version: Version,
    options: DecodeOptions,
    text: String,
    byte_segments: Vec<Vec<u8>>,
    character_set: Option<CharacterSet>,
    fnc1_in_effect: bool,
    eci_seen: bool,
}

impl<'a> BitStreamDecoder<'a> {
    pub fn new(source: &'a [u8], version: Version, options: DecodeOptions) -> Self {
        Self {
            bits: BitSource::new(source),
            version,
            options,
            text: String::new(),
            byte_segments: Vec::new(),
            character_set: None,
            fnc1_in_effect: false,
            eci_seen: false,
        }
    }

    /// Runs the mode dispatch loop to completion.
    pub fn decode(mut self) -> Result<DecoderResult, QrStreamError> {
        loop {
            // A truncated stream is an implicit terminator: some encoders
            // omit the explicit one when the payload fills the symbol.
            let mode = if self.bits.available() < MODE_INDICATOR_BITS {
                Mode::Terminator
            } else {
                Mode::try_from(self.bits.read_bits(MODE_INDICATOR_BITS)? as u8)?
            };

            match mode {
                Mode::Terminator => break,
                Mode::Fnc1FirstPosition | Mode::Fnc1SecondPosition => {
                    // Sticky for the rest of the decode; only alters how
                    // '%' is rendered in alphanumeric segments.
                    self.fnc1_in_effect = true;
                }
                Mode::StructuredAppend => {
                    // Sequence indicator and parity byte; reassembly of
                    // multi-symbol messages is not supported.
                    self.bits.read_bits(STRUCTURED_APPEND_HEADER_BITS)?;
                }
                Mode::Eci => {
                    let value = self.parse_eci_value()?;
                    self.character_set = Some(
                        CharacterSet::from_eci_value(value)
                            .ok_or(QrStreamError::UnknownEciValue)?,
                    );
                    self.eci_seen = true;
                }
                Mode::Numeric => {
                    let count = self.read_character_count(mode)?;
                    self.decode_numeric_segment(count)?;
                }
                Mode::Alphanumeric => {
                    let count = self.read_character_count(mode)?;
                    self.decode_alphanumeric_segment(count)?;
                }
                Mode::Byte => {
                    let count = self.read_character_count(mode)?;
                    self.decode_byte_segment(count)?;
                }
                Mode::Kanji => {
                    let count = self.read_character_count(mode)?;
                    self.decode_kanji_segment(count)?;
                }
            }
        }

        Ok(DecoderResult {
            text: self.text,
            byte_segments: self.byte_segments,
            eci_seen: self.eci_seen,
        })
    }

    /// How many characters follow, encoded in this mode; the field width
    /// depends on the symbol version.
    fn read_character_count(&mut self, mode: Mode) -> Result<usize, QrStreamError> {
        let count_bits = mode.character_count_bits(self.version);
        Ok(self.bits.read_bits(count_bits)? as usize)
    }

    /// Variable-length ECI assignment value: the leading bits of the first
    /// byte select a 1, 2 or 3 byte header (AIM ECI, section 5.2).
    fn parse_eci_value(&mut self) -> Result<u32, QrStreamError> {
        let first_byte = self.bits.read_bits(8)?;
        if first_byte & 0x80 == 0 {
            return Ok(first_byte & 0x7F);
        }
        if first_byte & 0xC0 == 0x80 {
            let second_byte = self.bits.read_bits(8)?;
            return Ok(((first_byte & 0x3F) << 8) | second_byte);
        }
        if first_byte & 0xE0 == 0xC0 {
            let second_third_bytes = self.bits.read_bits(16)?;
            return Ok(((first_byte & 0x1F) << 16) | second_third_bytes);
        }
        Err(QrStreamError::MalformedEciHeader)
    }

    /// Three digits per 10 bits, then a 7-bit pair or 4-bit single digit.
    fn decode_numeric_segment(&mut self, mut count: usize) -> Result<(), QrStreamError> {
        while count >= 3 {
            let three_digits = self.bits.read_bits(10)? as usize;
            if three_digits >= 1000 {
                return Err(QrStreamError::NumericValueOutOfRange);
            }
            self.text.push(ALPHANUMERIC_CHARS[three_digits / 100]);
            self.text.push(ALPHANUMERIC_CHARS[(three_digits / 10) % 10]);
            self.text.push(ALPHANUMERIC_CHARS[three_digits % 10]);
            count -= 3;
        }
        if count == 2 {
            let two_digits = self.bits.read_bits(7)? as usize;
            if two_digits >= 100 {
                return Err(QrStreamError::NumericValueOutOfRange);
            }
            self.text.push(ALPHANUMERIC_CHARS[two_digits / 10]);
            self.text.push(ALPHANUMERIC_CHARS[two_digits % 10]);
        } else if count == 1 {
            let digit = self.bits.read_bits(4)? as usize;
            if digit >= 10 {
                return Err(QrStreamError::NumericValueOutOfRange);
            }
            self.text.push(ALPHANUMERIC_CHARS[digit]);
        }
        Ok(())
    }

    /// Two characters per 11 bits, a final odd character in 6 bits.
    fn decode_alphanumeric_segment(&mut self, mut count: usize) -> Result<(), QrStreamError> {
        let start = self.text.len();
        while count > 1 {
            let two_chars = self.bits.read_bits(11)? as usize;
            if two_chars >= 45 * 45 {
                return Err(QrStreamError::AlphanumericValueOutOfRange);
            }
            self.text.push(ALPHANUMERIC_CHARS[two_chars / 45]);
            self.text.push(ALPHANUMERIC_CHARS[two_chars % 45]);
            count -= 2;
        }
        if count == 1 {
            let index = self.bits.read_bits(6)? as usize;
            if index >= 45 {
                return Err(QrStreamError::AlphanumericValueOutOfRange);
            }
            self.text.push(ALPHANUMERIC_CHARS[index]);
        }
        if self.fnc1_in_effect {
            // GS1 convention (ISO/IEC 18004, 6.4.8.1 / 6.4.8.2): within
            // this segment only, "%%" renders as '%' and a lone '%' is the
            // GS separator.
            let segment: String = self.text.split_off(start);
            let mut chars = segment.chars().peekable();
            while let Some(c) = chars.next() {
                if c == '%' {
                    if chars.peek() == Some(&'%') {
                        chars.next();
                        self.text.push('%');
                    } else {
                        self.text.push(FNC1_GS);
                    }
                } else {
                    self.text.push(c);
                }
            }
        }
        Ok(())
    }

    /// `count` raw bytes, interpreted under the active ECI character set or,
    /// absent one, under the guessed encoding.
    fn decode_byte_segment(&mut self, count: usize) -> Result<(), QrStreamError> {
        // Checked up front so a bad count fails before consuming anything.
        if count * 8 > self.bits.available() {
            return Err(QrStreamError::SegmentLengthExceedsData);
        }
        let mut bytes = Vec::with_capacity(count);
        for _ in 0..count {
            bytes.push(self.bits.read_bits(8)? as u8);
        }
        let character_set = match self.character_set {
            Some(cs) => cs,
            None => guess_encoding(&bytes, self.options.assume_shift_jis),
        };
        self.byte_segments.push(bytes.clone());
        self.text.push_str(&character_set.decode(&bytes)?);
        Ok(())
    }

    /// 13-bit codes mapping into the two Shift_JIS double-byte ranges; the
    /// whole segment is decoded as one run.
    fn decode_kanji_segment(&mut self, count: usize) -> Result<(), QrStreamError> {
        let mut buffer = Vec::with_capacity(2 * count);
        for _ in 0..count {
            let two_bytes = self.bits.read_bits(13)?;
            let mut assembled = ((two_bytes / 0x0C0) << 8) | (two_bytes % 0x0C0);
            if assembled < 0x1F00 {
                // In the 0x8140 to 0x9FFC range.
                assembled += 0x8140;
            } else {
                // In the 0xE040 to 0xEBBF range.
                assembled += 0xC140;
            }
            buffer.push((assembled >> 8) as u8);
            buffer.push(assembled as u8);
        }
        self.text.push_str(&CharacterSet::Sjis.decode(&buffer)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_bytes(bytes: &[u8], version: u8) -> Result<DecoderResult, QrStreamError> {
        BitStreamDecoder::new(bytes, Version::new(version).unwrap(), DecodeOptions::default())
            .decode()
    }

    #[test]
    fn test_empty_payload() {
        let result = decode_bytes(&[], 1).unwrap();
        assert_eq!(result.text, "");
        assert!(result.byte_segments.is_empty());
        assert!(!result.eci_seen);
    }

    #[test]
    fn test_numeric_single_segment() {
        // 0001 | count=3 (10 bits) | 123 (10 bits) | terminator, padded.
        // 0001 0000000011 0001111011 0000 -> 10 00 00 00 11 00 01 11 10 11 00 00
        let payload = [0b0001_0000, 0b0000_1100, 0b0111_1011, 0b0000_0000];
        let result = decode_bytes(&payload, 1).unwrap();
        assert_eq!(result.text, "123");
    }

    #[test]
    fn test_numeric_overflow_value() {
        // Same layout with the 10-bit group holding 1000.
        let payload = [0b0001_0000, 0b0000_1111, 0b1110_1000, 0b0000_0000];
        assert_eq!(
            decode_bytes(&payload, 1),
            Err(QrStreamError::NumericValueOutOfRange)
        );
    }

    #[test]
    fn test_unknown_mode_indicator() {
        // 0110 is unassigned.
        assert_eq!(
            decode_bytes(&[0b0110_0000], 1),
            Err(QrStreamError::UnknownModeIndicator)
        );
    }

    #[test]
    fn test_truncated_stream_is_implicit_terminator() {
        // Numeric, count=2, value 42; 21 bits used, 3 bits of padding left,
        // so no explicit terminator fits.
        // 0001 | 0000000010 | 0101010 -> 0001_0000 0000_1001 0101_0xxx
        let payload = [0b0001_0000, 0b0000_1001, 0b0101_0000];
        let result = decode_bytes(&payload, 1).unwrap();
        assert_eq!(result.text, "42");
        assert!(result.byte_segments.is_empty());
    }
}
