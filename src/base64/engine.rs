use std::mem;
use std::ops::Range;

use super::alphabet::Alphabet;
use super::error::{CodecError, Malformed};
use crate::common::LINE_SEPARATOR;

/// Conventional pad symbol.
pub const PAD: char = '=';

/// A Base64-family encoder/decoder.
///
/// The alphabet, the pad symbol, the line length and the line separator are
/// fixed at construction; only the wrapping policy can be changed afterwards.
/// Every encode/decode call keeps its working state on the stack, so a shared
/// `&Codec` may be used from many threads at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codec {
    alphabet: Alphabet,
    pad: Option<char>,
    line_length: usize,
    line_separator: String,
}

/// Decode scan state. Once padding starts only padding and whitespace may follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Reading,
    Padding,
}

impl Codec {
    /// Creates a codec.
    ///
    /// `pad` must be printable ASCII and outside the alphabet. `line_length`
    /// of 0 disables wrapping. A `line_separator` of `None` selects the
    /// platform line terminator.
    pub fn new(
        alphabet: Alphabet,
        pad: Option<char>,
        line_length: usize,
        line_separator: Option<&str>,
    ) -> Result<Self, CodecError> {
        if let Some(p) = pad {
            if !p.is_ascii_graphic() {
                return Err(CodecError::InvalidArgument(format!(
                    "pad symbol {:?} must be printable ASCII",
                    p
                )));
            }
            if alphabet.contains(p) {
                return Err(CodecError::InvalidArgument(format!(
                    "pad symbol {:?} is already in the alphabet",
                    p
                )));
            }
        }

        let mut codec = Codec {
            alphabet,
            pad,
            line_length,
            line_separator: String::new(),
        };
        codec.set_line_separator(line_separator)?;
        Ok(codec)
    }

    /// Standard alphabet with `extra` as symbols 62 and 63.
    pub fn with_extra(
        extra: &str,
        pad: Option<char>,
        line_length: usize,
        line_separator: Option<&str>,
    ) -> Result<Self, CodecError> {
        Codec::new(Alphabet::new(extra)?, pad, line_length, line_separator)
    }

    /// RFC 4648 Base64: `+/`, padded with `=`, no wrapping.
    pub fn standard() -> Self {
        Codec {
            alphabet: Alphabet::STANDARD,
            pad: Some(PAD),
            line_length: 0,
            line_separator: LINE_SEPARATOR.to_owned(),
        }
    }

    /// RFC 4648 Base64 wrapped every `line_length` symbols.
    pub fn standard_wrapped(
        line_length: usize,
        line_separator: Option<&str>,
    ) -> Result<Self, CodecError> {
        Codec::new(Alphabet::STANDARD, Some(PAD), line_length, line_separator)
    }

    /// URL- and filename-safe alphabet (`-_`), unpadded, no wrapping.
    pub fn url_safe() -> Self {
        Codec {
            alphabet: Alphabet::URL_SAFE,
            pad: None,
            line_length: 0,
            line_separator: LINE_SEPARATOR.to_owned(),
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn pad(&self) -> Option<char> {
        self.pad
    }

    pub fn line_length(&self) -> usize {
        self.line_length
    }

    pub fn line_separator(&self) -> &str {
        &self.line_separator
    }

    pub fn set_line_length(&mut self, line_length: usize) {
        self.line_length = line_length;
    }

    /// Sets the separator placed between wrapped lines; `None` restores the
    /// platform line terminator. The separator must be ASCII.
    pub fn set_line_separator(&mut self, line_separator: Option<&str>) -> Result<(), CodecError> {
        let separator = line_separator.unwrap_or(LINE_SEPARATOR);
        if !separator.is_ascii() {
            return Err(CodecError::InvalidArgument(format!(
                "line separator {:?} must be ASCII",
                separator
            )));
        }
        self.line_separator = separator.to_owned();
        Ok(())
    }

    /// True if `ch` is an alphabet symbol or the pad symbol.
    #[inline]
    pub fn is_code_char(&self, ch: char) -> bool {
        self.alphabet.contains(ch) || self.pad == Some(ch)
    }

    /// Number of symbols (pads included, separators excluded) that encoding
    /// `len` bytes produces.
    pub fn encoded_len(&self, len: usize) -> usize {
        let full = len / 3 * 4;
        match (len % 3, self.pad) {
            (0, _) => full,
            (_, Some(_)) => full + 4,
            (rem, None) => full + rem + 1,
        }
    }

    /// Encodes `data` into a single string, lines joined by the separator.
    pub fn encode(&self, data: &[u8]) -> String {
        self.join(self.encode_block(data))
    }

    /// Encodes `length` bytes of `data` starting at `offset`.
    pub fn encode_range(
        &self,
        data: &[u8],
        offset: usize,
        length: usize,
    ) -> Result<String, CodecError> {
        let range = checked_range(data.len(), offset, length)?;
        Ok(self.join(self.encode_block(&data[range])))
    }

    /// Encodes `data` into wrapped lines, without separators.
    pub fn encode_lines(&self, data: &[u8]) -> Vec<String> {
        self.encode_block(data)
    }

    /// Encodes `length` bytes of `data` starting at `offset` into wrapped lines.
    pub fn encode_lines_range(
        &self,
        data: &[u8],
        offset: usize,
        length: usize,
    ) -> Result<Vec<String>, CodecError> {
        let range = checked_range(data.len(), offset, length)?;
        Ok(self.encode_block(&data[range]))
    }

    /// Decodes `text`, skipping whitespace.
    pub fn decode(&self, text: &str) -> Result<Vec<u8>, CodecError> {
        self.decode_block(text, 0)
    }

    /// Decodes `length` bytes of `text` starting at byte `offset`.
    ///
    /// Both ends of the range must fall on char boundaries. Offsets reported
    /// in errors are relative to the start of `text`.
    pub fn decode_range(
        &self,
        text: &str,
        offset: usize,
        length: usize,
    ) -> Result<Vec<u8>, CodecError> {
        let range = checked_range(text.len(), offset, length)?;
        match text.get(range) {
            Some(slice) => self.decode_block(slice, offset),
            None => Err(CodecError::OutOfRange {
                offset,
                length,
                available: text.len(),
            }),
        }
    }

    fn join(&self, lines: Vec<String>) -> String {
        if self.line_length == 0 {
            return lines.into_iter().next().unwrap_or_default();
        }
        lines.join(&self.line_separator)
    }

    fn encode_block(&self, data: &[u8]) -> Vec<String> {
        let mut out = LineBuffer::new(self.line_length, self.encoded_len(data.len()));

        let mut acc: u32 = 0;
        let mut held = 0;
        for &byte in data {
            acc = (acc << 8) | u32::from(byte);
            held += 1;
            if held == 3 {
                self.push_symbols(acc, 4, &mut out);
                acc = 0;
                held = 0;
            }
        }

        if held > 0 {
            // 1 byte -> 2 symbols, 2 bytes -> 3 symbols
            acc <<= (3 - held) * 8;
            self.push_symbols(acc, held + 1, &mut out);
            if let Some(pad) = self.pad {
                for _ in held + 1..4 {
                    out.push(pad);
                }
            }
        }

        out.finish()
    }

    /// Pushes the first `count` 6-bit groups of the 24-bit `acc`, high bits first.
    #[inline]
    fn push_symbols(&self, acc: u32, count: usize, out: &mut LineBuffer) {
        for i in 0..count {
            let shift = 18 - 6 * i;
            out.push(self.alphabet.symbol(acc >> shift));
        }
    }

    fn decode_block(&self, text: &str, base: usize) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(text.len() / 4 * 3 + 2);
        let mut state = ScanState::Reading;
        let mut acc: u32 = 0;
        let mut held = 0;
        let mut consumed = 0;

        for (pos, ch) in text.char_indices() {
            if let Some(value) = self.alphabet.value(ch) {
                if state == ScanState::Padding {
                    return Err(Malformed::DataAfterPadding {
                        offset: base + pos,
                    }
                    .into());
                }
                consumed += 1;
                acc = (acc << 6) | u32::from(value);
                held += 1;
                if held == 4 {
                    out.extend_from_slice(&group_bytes(acc));
                    acc = 0;
                    held = 0;
                }
            } else if self.pad == Some(ch) {
                state = ScanState::Padding;
                consumed += 1;
            } else if !ch.is_whitespace() {
                return Err(CodecError::IllegalCharacter {
                    ch,
                    offset: base + pos,
                });
            }
        }

        if self.pad.is_some() && consumed % 4 != 0 {
            return Err(Malformed::BadPaddedLength { symbols: consumed }.into());
        }

        if held > 0 {
            // 2 symbols -> 1 byte, 3 symbols -> 2 bytes; a lone symbol carries no full byte
            acc <<= (4 - held) * 6;
            out.extend_from_slice(&group_bytes(acc)[..held - 1]);
        }

        Ok(out)
    }
}

impl Default for Codec {
    fn default() -> Self {
        Codec::standard()
    }
}

#[inline]
fn group_bytes(acc: u32) -> [u8; 3] {
    let [_, b0, b1, b2] = acc.to_be_bytes();
    [b0, b1, b2]
}

fn checked_range(available: usize, offset: usize, length: usize) -> Result<Range<usize>, CodecError> {
    if offset > available || length > available - offset {
        return Err(CodecError::OutOfRange {
            offset,
            length,
            available,
        });
    }
    Ok(offset..offset + length)
}

/// Accumulates symbols into lines of at most `width` symbols (unbounded when 0).
struct LineBuffer {
    width: usize,
    current: String,
    count: usize,
    lines: Vec<String>,
}

impl LineBuffer {
    fn new(width: usize, total: usize) -> Self {
        let (first_cap, num_lines) = if width == 0 {
            (total, 1)
        } else {
            (width.min(total), total.div_ceil(width))
        };
        LineBuffer {
            width,
            current: String::with_capacity(first_cap),
            count: 0,
            lines: Vec::with_capacity(num_lines),
        }
    }

    #[inline]
    fn push(&mut self, symbol: char) {
        if self.width > 0 && self.count == self.width {
            let full = mem::replace(&mut self.current, String::with_capacity(self.width));
            self.lines.push(full);
            self.count = 0;
        }
        self.current.push(symbol);
        self.count += 1;
    }

    fn finish(mut self) -> Vec<String> {
        if !self.current.is_empty() {
            self.lines.push(self.current);
        }
        self.lines
    }
}
