use std::fmt;

use super::error::CodecError;

/// The fixed part of every alphabet, values 0..=61.
const ALPHANUMERIC: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Number of caller-supplied symbols needed to complete the 64-symbol table.
pub const NUM_EXTRA_SYMBOLS: usize = 64 - ALPHANUMERIC.len();

/// Marks bytes with no 6-bit value in the reverse lookup table.
const INVALID: u8 = 0xFF;

/// An ordered table of 64 ASCII symbols plus its reverse lookup.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Alphabet {
    symbols: [u8; 64],
    values: [u8; 256],
}

impl Alphabet {
    /// `+` and `/`, as in RFC 4648 section 4.
    pub const STANDARD: Alphabet = Alphabet::from_extra(*b"+/");

    /// `-` and `_`, as in RFC 4648 section 5.
    pub const URL_SAFE: Alphabet = Alphabet::from_extra(*b"-_");

    /// Builds an alphabet from the two symbols that follow the alphanumerics.
    ///
    /// Both symbols must be printable ASCII, distinct, and not alphanumeric.
    pub fn new(extra: &str) -> Result<Self, CodecError> {
        let count = extra.chars().count();
        if count != NUM_EXTRA_SYMBOLS {
            return Err(CodecError::InvalidArgument(format!(
                "expected {} extra symbols, got {}",
                NUM_EXTRA_SYMBOLS, count
            )));
        }

        let bytes = extra.as_bytes();
        for &b in bytes {
            if !b.is_ascii_graphic() || b.is_ascii_alphanumeric() {
                return Err(CodecError::InvalidArgument(format!(
                    "extra symbol {:?} must be printable ASCII punctuation",
                    b as char
                )));
            }
        }
        if bytes[0] == bytes[1] {
            return Err(CodecError::InvalidArgument(format!(
                "extra symbols must differ, got {:?} twice",
                bytes[0] as char
            )));
        }

        Ok(Alphabet::from_extra([bytes[0], bytes[1]]))
    }

    const fn from_extra(extra: [u8; NUM_EXTRA_SYMBOLS]) -> Self {
        let mut symbols = [0u8; 64];
        let mut values = [INVALID; 256];
        let mut i = 0;
        while i < 64 {
            let symbol = if i < ALPHANUMERIC.len() {
                ALPHANUMERIC[i]
            } else {
                extra[i - ALPHANUMERIC.len()]
            };
            symbols[i] = symbol;
            values[symbol as usize] = i as u8;
            i += 1;
        }
        Alphabet { symbols, values }
    }

    /// The symbol for a 6-bit value. Only the low 6 bits of `value` are used.
    #[inline]
    pub fn symbol(&self, value: u32) -> char {
        self.symbols[(value & 0x3F) as usize] as char
    }

    /// The 6-bit value of `ch`, or `None` if it is not in the alphabet.
    #[inline]
    pub fn value(&self, ch: char) -> Option<u8> {
        if !ch.is_ascii() {
            return None;
        }
        match self.values[ch as usize] {
            INVALID => None,
            v => Some(v),
        }
    }

    #[inline]
    pub fn contains(&self, ch: char) -> bool {
        self.value(ch).is_some()
    }

    /// The two symbols following the alphanumerics.
    pub fn extra(&self) -> [char; NUM_EXTRA_SYMBOLS] {
        [self.symbols[62] as char, self.symbols[63] as char]
    }

    pub fn symbols(&self) -> &[u8; 64] {
        &self.symbols
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Alphabet::STANDARD
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.symbols {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Alphabet").field(&self.to_string()).finish()
    }
}
