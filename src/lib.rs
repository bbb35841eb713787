pub mod bit_source;
pub mod bitstream_decoder;
pub mod character_set;
pub mod constants;
pub mod encoding_guess;
pub mod error;
pub mod mode;

pub use character_set::CharacterSet;
pub use encoding_guess::guess_encoding;
pub use error::QrStreamError;
pub use bit_source::BitSource;
pub use bitstream_decoder::BitStreamDecoder;
pub use mode::Mode;

use crate::constants::{MAXIMUM_VERSION, MINIMUM_VERSION};

/// Symbol version, 1 through 40. Selects the character count field widths
/// of the content modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version(u8);

impl Version {
    pub fn new(number: u8) -> Result<Self, QrStreamError> {
        if !(MINIMUM_VERSION..=MAXIMUM_VERSION).contains(&number) {
            return Err(QrStreamError::InvalidVersion);
        }
        Ok(Self(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }
}

impl std::convert::TryFrom<u8> for Version {
    type Error = QrStreamError;
    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Self::new(v)
    }
}

/// Per-decode configuration.
///
/// `assume_shift_jis` replaces the process-global "platform default is
/// Shift_JIS/EUC-JP" flag of older decoders: the surrounding system
/// computes it once at startup and threads it into every decode call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub assume_shift_jis: bool,
}

/// Output of one decode call. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderResult {
    /// The decoded text, all segments concatenated.
    pub text: String,
    /// Raw bytes of every byte-mode segment in encounter order, for callers
    /// that need the undecoded form (e.g. GS1 application data).
    pub byte_segments: Vec<Vec<u8>>,
    /// Whether any ECI designator appeared in the payload.
    pub eci_seen: bool,
}

/// Decodes one error-corrected payload to completion.
///
/// `bytes` must already be the corrected, unmasked data codewords; error
/// correction and bitstream extraction happen upstream. All session state
/// lives for this one call, so independent decodes can run in parallel.
pub fn decode_bit_stream(
    bytes: &[u8],
    version: Version,
    options: DecodeOptions,
) -> Result<DecoderResult, QrStreamError> {
    BitStreamDecoder::new(bytes, version, options).decode()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_bounds() {
        assert!(Version::new(1).is_ok());
        assert!(Version::new(40).is_ok());
        assert_eq!(Version::new(0), Err(QrStreamError::InvalidVersion));
        assert_eq!(Version::new(41), Err(QrStreamError::InvalidVersion));
    }
}
