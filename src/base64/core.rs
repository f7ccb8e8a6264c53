use std::borrow::Cow;
use std::io::{self, BufWriter, Read, Write};

use super::engine::Codec;
use super::error::CodecError;

/// Encode data and write it to `out`.
/// When the codec wraps, every line (the last one included) is terminated
/// by the line separator, matching GNU base64. Unwrapped output has no
/// trailing separator.
pub fn encode_to_writer(codec: &Codec, data: &[u8], out: &mut impl Write) -> io::Result<()> {
    if data.is_empty() {
        return Ok(());
    }

    if codec.line_length() == 0 {
        return out.write_all(codec.encode(data).as_bytes());
    }

    let separator = codec.line_separator().as_bytes();
    for line in codec.encode_lines(data) {
        out.write_all(line.as_bytes())?;
        out.write_all(separator)?;
    }
    Ok(())
}

/// Decode encoded text and write the bytes to `out`.
/// When `ignore_garbage` is true, every character that is not an alphabet
/// or pad symbol is dropped first. Otherwise only whitespace is skipped and
/// anything else is an error.
pub fn decode_to_writer(
    codec: &Codec,
    data: &[u8],
    ignore_garbage: bool,
    out: &mut impl Write,
) -> io::Result<()> {
    if data.is_empty() {
        return Ok(());
    }

    let text = match std::str::from_utf8(data) {
        Ok(text) => Cow::Borrowed(text),
        // Invalid sequences become U+FFFD, which strip_garbage removes.
        Err(_) if ignore_garbage => String::from_utf8_lossy(data),
        Err(e) => {
            return Err(invalid_input(CodecError::IllegalCharacter {
                ch: char::REPLACEMENT_CHARACTER,
                offset: e.valid_up_to(),
            }));
        }
    };

    let decoded = if ignore_garbage {
        codec.decode(&strip_garbage(codec, &text))
    } else {
        codec.decode(&text)
    };

    match decoded {
        Ok(bytes) => out.write_all(&bytes),
        Err(e) => Err(invalid_input(e)),
    }
}

/// Keep only alphabet and pad symbols (for -i / --ignore-garbage).
pub fn strip_garbage(codec: &Codec, text: &str) -> String {
    text.chars().filter(|&ch| codec.is_code_char(ch)).collect()
}

/// Read all of `reader`, encode it, and write to `writer`. Used for stdin.
pub fn encode_stream(
    codec: &Codec,
    reader: &mut impl Read,
    writer: &mut impl Write,
) -> io::Result<()> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    let mut out = BufWriter::with_capacity(2 * 1024 * 1024, writer);
    encode_to_writer(codec, &data, &mut out)?;
    out.flush()
}

/// Read all of `reader`, decode it, and write to `writer`. Used for stdin.
pub fn decode_stream(
    codec: &Codec,
    reader: &mut impl Read,
    ignore_garbage: bool,
    writer: &mut impl Write,
) -> io::Result<()> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    let mut out = BufWriter::with_capacity(2 * 1024 * 1024, writer);
    decode_to_writer(codec, &data, ignore_garbage, &mut out)?;
    out.flush()
}

fn invalid_input(e: CodecError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, format!("invalid input ({})", e))
}
