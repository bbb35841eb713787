use crate::error::QrStreamError;

/// Reads an arbitrary number of bits at a time from a byte slice, where the
/// number of bits read is rarely a multiple of 8.
///
/// Bits are read from the first byte first, and within a byte from the
/// most-significant to the least-significant bit. Not thread-safe; one
/// source serves exactly one decode session.
pub struct BitSource<'a> {
    source: &'a [u8],
    byte_offset: usize,
    bit_offset: usize,
}

impl<'a> BitSource<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            byte_offset: 0,
            bit_offset: 0,
        }
    }

    /// Number of bits that can still be read successfully.
    pub fn available(&self) -> usize {
        8 * (self.source.len() - self.byte_offset) - self.bit_offset
    }

    /// Reads `count` bits and returns them as the least-significant bits of
    /// the result, first bit read in the highest position.
    ///
    /// `count` must be in 1..=32 and must not exceed `available()`.
    pub fn read_bits(&mut self, count: usize) -> Result<u32, QrStreamError> {
        if count < 1 || count > 32 {
            return Err(QrStreamError::InvalidBitCount);
        }
        if count > self.available() {
            return Err(QrStreamError::SourceExhausted);
        }

        let mut remaining = count;
        let mut result: u32 = 0;

        // First, the rest of the current byte.
        if self.bit_offset > 0 {
            let bits_left = 8 - self.bit_offset;
            let to_read = remaining.min(bits_left);
            let unread = bits_left - to_read;
            let mask = (0xFFu32 >> (8 - to_read)) << unread;
            result = (self.source[self.byte_offset] as u32 & mask) >> unread;
            remaining -= to_read;
            self.bit_offset += to_read;
            if self.bit_offset == 8 {
                self.bit_offset = 0;
                self.byte_offset += 1;
            }
        }

        // Then whole bytes.
        while remaining >= 8 {
            result = (result << 8) | self.source[self.byte_offset] as u32;
            self.byte_offset += 1;
            remaining -= 8;
        }

        // Finally a leading slice of the next byte.
        if remaining > 0 {
            let unread = 8 - remaining;
            let mask = (0xFFu32 >> unread) << unread;
            result = (result << remaining) | ((self.source[self.byte_offset] as u32 & mask) >> unread);
            self.bit_offset += remaining;
        }

        Ok(result)
    }
}
