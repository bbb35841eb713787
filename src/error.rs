use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrStreamError {
    // Format errors: the payload bits themselves are malformed.
    #[error("Unknown mode indicator")]
    UnknownModeIndicator = 1,
    #[error("Numeric group value out of range")]
    NumericValueOutOfRange = 2,
    #[error("Segment length exceeds remaining data")]
    SegmentLengthExceedsData = 3,
    #[error("Malformed ECI header")]
    MalformedEciHeader = 4,
    #[error("Unknown ECI assignment value")]
    UnknownEciValue = 5,
    #[error("Character encoding not supported")]
    EncodingUnsupported = 6,
    #[error("Read past end of bit stream")]
    SourceExhausted = 7,
    #[error("Alphanumeric value out of range")]
    AlphanumericValueOutOfRange = 8,

    // Logic errors: the caller asked for something outside the contract.
    #[error("Bit count must be between 1 and 32")]
    InvalidBitCount = 100,
    #[error("Symbol version must be between 1 and 40")]
    InvalidVersion = 101,
}
