use thiserror::Error;

/// Errors produced by the codec.
///
/// `IllegalCharacter` and `MalformedData` describe bad input data and are
/// the only errors a well-formed caller can see from `decode`. `OutOfRange`
/// and `InvalidArgument` mean the calling code passed arguments that can
/// never succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A character that is not an alphabet symbol, the pad symbol, or whitespace.
    #[error("invalid character {ch:?} at offset {offset}")]
    IllegalCharacter { ch: char, offset: usize },

    /// The accepted symbols do not form a valid encoding.
    #[error("malformed input: {0}")]
    MalformedData(Malformed),

    /// An offset/length pair outside the input (or not on a char boundary).
    #[error("range {offset}+{length} is out of bounds for input of length {available}")]
    OutOfRange {
        offset: usize,
        length: usize,
        available: usize,
    },

    /// A configuration value that cannot form a valid codec.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Why an encoding was rejected as malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Malformed {
    /// An alphabet symbol appeared after the padding had started.
    #[error("symbol after padding at offset {offset}")]
    DataAfterPadding { offset: usize },

    /// Padding is configured but the symbol count is not a multiple of 4.
    #[error("{symbols} symbols is not a multiple of 4")]
    BadPaddedLength { symbols: usize },
}

impl CodecError {
    /// True for errors caused by the data being decoded rather than by the caller.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            CodecError::IllegalCharacter { .. } | CodecError::MalformedData(_)
        )
    }
}

impl From<Malformed> for CodecError {
    fn from(reason: Malformed) -> Self {
        CodecError::MalformedData(reason)
    }
}
