use crate::character_set::CharacterSet;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Guesses the character set of a byte segment that carries no ECI
/// designator. Distinguishes ISO-8859-1, Shift_JIS and UTF-8 only, which
/// covers what encoders emit in practice.
///
/// The scan and its thresholds are kept bit-for-bit compatible with
/// reference decoders: ISO-8859-1 text has no bytes in 0x7F-0x9F, while
/// Shift_JIS uses that range for double-byte lead bytes. A lead followed by
/// a valid trail byte keeps Shift_JIS in the running; once a pair is
/// matched the trail byte is not re-examined as a new lead.
///
/// `assume_shift_jis` short-circuits the scan for environments whose
/// default text encoding is in the Japanese double-byte family. The caller
/// computes it once and threads it through; it is never read from ambient
/// state.
pub fn guess_encoding(bytes: &[u8], assume_shift_jis: bool) -> CharacterSet {
    if assume_shift_jis {
        return CharacterSet::Sjis;
    }
    if bytes.starts_with(&UTF8_BOM) {
        return CharacterSet::Utf8;
    }

    let length = bytes.len();
    let mut can_be_iso_8859_1 = true;
    let mut can_be_shift_jis = true;
    let mut saw_double_byte_start = false;
    let mut maybe_single_byte_katakana_count = 0usize;
    let mut saw_latin1_supplement = false;
    let mut last_was_possible_double_byte_start = false;

    let mut i = 0;
    while i < length && (can_be_iso_8859_1 || can_be_shift_jis) {
        let value = bytes[i];

        // Latin-1 supplement characters (e.g. u-umlaut) encode in UTF-8 as
        // 0xC2 followed by [0xA0,0xBF] or 0xC3 followed by [0x80,0xBF].
        if (value == 0xC2 || value == 0xC3) && i < length - 1 {
            let next = bytes[i + 1];
            if next <= 0xBF && ((value == 0xC2 && next >= 0xA0) || (value == 0xC3 && next >= 0x80))
            {
                saw_latin1_supplement = true;
            }
        }

        if (0x7F..=0x9F).contains(&value) {
            can_be_iso_8859_1 = false;
        }

        // Bytes that might be Shift_JIS single-byte Katakana, unless this
        // byte is the trail of a matched double-byte pair.
        if (0xA1..=0xDF).contains(&value) && !last_was_possible_double_byte_start {
            maybe_single_byte_katakana_count += 1;
        }

        if !last_was_possible_double_byte_start
            && ((0xF0..=0xFF).contains(&value) || value == 0x80 || value == 0xA0)
        {
            can_be_shift_jis = false;
        }

        if ((0x81..=0x9F).contains(&value) || (0xE0..=0xEF).contains(&value)) && i < length - 1 {
            // Starts a double-byte character in Shift_JIS.
            saw_double_byte_start = true;
            if last_was_possible_double_byte_start {
                // This byte is the trail of the pair matched at i - 1;
                // don't treat it as a new lead.
                last_was_possible_double_byte_start = false;
            } else {
                last_was_possible_double_byte_start = true;
                let next = bytes[i + 1];
                if !(0x40..=0xFC).contains(&next) {
                    can_be_shift_jis = false;
                }
            }
        } else {
            last_was_possible_double_byte_start = false;
        }

        i += 1;
    }

    // At least one double-byte lead, or over 5% possible-Katakana bytes,
    // with no invalid sequence: conclude Shift_JIS.
    if can_be_shift_jis && (saw_double_byte_start || 20 * maybe_single_byte_katakana_count > length)
    {
        return CharacterSet::Sjis;
    }
    if !saw_latin1_supplement && can_be_iso_8859_1 {
        return CharacterSet::Iso8859_1;
    }
    CharacterSet::Utf8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_ascii_is_latin1() {
        assert_eq!(guess_encoding(b"hello world", false), CharacterSet::Iso8859_1);
    }

    #[test]
    fn test_empty_segment_is_latin1() {
        assert_eq!(guess_encoding(&[], false), CharacterSet::Iso8859_1);
    }

    #[test]
    fn test_assume_shift_jis_short_circuits() {
        assert_eq!(guess_encoding(b"hello", true), CharacterSet::Sjis);
        assert_eq!(guess_encoding(&[], true), CharacterSet::Sjis);
    }

    #[test]
    fn test_utf8_bom_wins() {
        // BOM followed by bytes that would otherwise classify as Shift_JIS.
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(&[0x93, 0xFA]);
        assert_eq!(guess_encoding(&bytes, false), CharacterSet::Utf8);
        assert_eq!(guess_encoding(&[0xEF, 0xBB, 0xBF], false), CharacterSet::Utf8);
    }

    #[test]
    fn test_shift_jis_double_byte_pairs() {
        // "nihongo" in Shift_JIS: three valid lead/trail pairs.
        let bytes = [0x93, 0xFA, 0x96, 0x7B, 0x8C, 0xEA];
        assert_eq!(guess_encoding(&bytes, false), CharacterSet::Sjis);
    }

    #[test]
    fn test_half_width_katakana_ratio() {
        // Three single-byte Katakana: 20 * 3 > 3.
        assert_eq!(guess_encoding(&[0xB1, 0xB2, 0xB3], false), CharacterSet::Sjis);
    }

    #[test]
    fn test_invalid_trail_byte_disqualifies_shift_jis() {
        // 0x93 lead followed by 0x20, not a valid trail.
        let bytes = [0x93, 0x20, b'a', b'b'];
        assert_eq!(guess_encoding(&bytes, false), CharacterSet::Utf8);
    }

    #[test]
    fn test_latin1_supplement_utf8_sequence() {
        // Long ASCII text with one U+00E9 as UTF-8; the katakana ratio
        // stays under threshold, and the 0xC3 pair rules out ISO-8859-1.
        let mut bytes = b"the quick brown fox jumps over the lazy dog caf".to_vec();
        bytes.extend_from_slice(&[0xC3, 0xA9]);
        assert_eq!(guess_encoding(&bytes, false), CharacterSet::Utf8);
    }

    #[test]
    fn test_control_range_byte_rules_out_latin1() {
        // 0x85 disqualifies ISO-8859-1 and is no Shift_JIS lead at the end
        // of the buffer.
        assert_eq!(guess_encoding(&[0x85], false), CharacterSet::Utf8);
    }
}
