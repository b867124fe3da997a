//! Quoted-payload codec
//!
//! Both storage formats carry seeds as a single-line quoted literal. The
//! writer produces the same double-quoted literal as Go's `%q` verb, so
//! native entry names match the ones the Go toolchain picks. The reader
//! accepts every form the Go toolchain emits for a `[]byte` or string value,
//! including raw UTF-8 text, octal escapes and back-quoted raw literals.

use crate::error::QuoteError;
use memchr::{memchr, memchr3};
use unicode_general_category::{get_general_category, GeneralCategory};

const LOWER_HEX: &[u8; 16] = b"0123456789abcdef";

/// Encode a byte sequence as a double-quoted literal
///
/// The output never contains a raw line break or an unescaped quote:
/// - printable characters are kept as-is, except `"` and `\` which are escaped
/// - `\a \b \f \n \r \t \v` are used for those control characters
/// - other ASCII controls and DEL become `\xNN`
/// - other non-printable characters become `\uNNNN` or `\UNNNNNNNN`
/// - bytes that are not part of valid UTF-8 become `\xNN`
///
/// Printable means a letter, mark, number, punctuation or symbol, plus the
/// ASCII space. Other spaces, line and paragraph separators, format
/// characters, private use and unassigned code points are escaped.
pub fn encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() + 2);
    out.push('"');

    for chunk in data.utf8_chunks() {
        for c in chunk.valid().chars() {
            push_char(&mut out, c);
        }
        for &b in chunk.invalid() {
            out.push_str("\\x");
            push_hex(&mut out, b as u32, 2);
        }
    }

    out.push('"');
    out
}

fn push_char(out: &mut String, c: char) {
    match c {
        '"' => out.push_str("\\\""),
        '\\' => out.push_str("\\\\"),
        '\x07' => out.push_str("\\a"),
        '\x08' => out.push_str("\\b"),
        '\x0c' => out.push_str("\\f"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\x0b' => out.push_str("\\v"),
        ' '..='~' => out.push(c),
        _ if c.is_ascii() => {
            out.push_str("\\x");
            push_hex(out, c as u32, 2);
        }
        _ if is_printable(c) => out.push(c),
        _ if (c as u32) < 0x1_0000 => {
            out.push_str("\\u");
            push_hex(out, c as u32, 4);
        }
        _ => {
            out.push_str("\\U");
            push_hex(out, c as u32, 8);
        }
    }
}

fn is_printable(c: char) -> bool {
    !matches!(
        get_general_category(c),
        GeneralCategory::SpaceSeparator
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
            | GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
    )
}

fn push_hex(out: &mut String, value: u32, digits: u32) {
    for shift in (0..digits).rev() {
        let nibble = (value >> (shift * 4)) & 0xf;
        out.push(LOWER_HEX[nibble as usize] as char);
    }
}

/// Decode a quoted literal back into the bytes it denotes
///
/// Inverse of [`encode`]. Offsets in errors are byte offsets into `token`.
pub fn decode(token: &str) -> Result<Vec<u8>, QuoteError> {
    let bytes = token.as_bytes();
    if bytes.len() < 2 {
        return Err(QuoteError::TooShort(bytes.len()));
    }

    let quote = bytes[0];
    if !matches!(quote, b'"' | b'`') || bytes[bytes.len() - 1] != quote {
        return Err(QuoteError::MismatchedQuotes);
    }

    let body = &bytes[1..bytes.len() - 1];
    if quote == b'`' {
        decode_raw(body)
    } else {
        decode_interpreted(body)
    }
}

/// Decode a quoted literal given as raw bytes
///
/// Fails with [`QuoteError::NotUtf8`] when the bytes are not valid UTF-8.
pub fn decode_bytes(token: &[u8]) -> Result<Vec<u8>, QuoteError> {
    let token = std::str::from_utf8(token).map_err(|_| QuoteError::NotUtf8)?;
    decode(token)
}

fn decode_raw(body: &[u8]) -> Result<Vec<u8>, QuoteError> {
    if let Some(pos) = memchr(b'`', body) {
        return Err(QuoteError::UnescapedQuote(pos + 1));
    }
    Ok(body.iter().copied().filter(|&b| b != b'\r').collect())
}

fn decode_interpreted(body: &[u8]) -> Result<Vec<u8>, QuoteError> {
    let mut out = Vec::with_capacity(body.len());
    let mut i = 0;

    while let Some(rel) = memchr3(b'\\', b'"', b'\n', &body[i..]) {
        let pos = i + rel;
        out.extend_from_slice(&body[i..pos]);
        match body[pos] {
            b'"' => return Err(QuoteError::UnescapedQuote(pos + 1)),
            b'\n' => return Err(QuoteError::Newline(pos + 1)),
            _ => i = unescape(body, pos, &mut out)?,
        }
    }

    out.extend_from_slice(&body[i..]);
    Ok(out)
}

/// Decode the escape sequence starting at the backslash `body[pos]`,
/// returning the index just past it.
fn unescape(body: &[u8], pos: usize, out: &mut Vec<u8>) -> Result<usize, QuoteError> {
    // Offset of the backslash within the whole token.
    let at = pos + 1;
    let Some(&c) = body.get(pos + 1) else {
        return Err(QuoteError::TruncatedEscape(at));
    };

    let simple = match c {
        b'a' => Some(0x07),
        b'b' => Some(0x08),
        b'f' => Some(0x0c),
        b'n' => Some(b'\n'),
        b'r' => Some(b'\r'),
        b't' => Some(b'\t'),
        b'v' => Some(0x0b),
        b'\\' => Some(b'\\'),
        b'"' => Some(b'"'),
        _ => None,
    };
    if let Some(b) = simple {
        out.push(b);
        return Ok(pos + 2);
    }

    match c {
        b'x' => {
            let value = parse_digits(body, pos + 2, 2, 16, at)?;
            out.push(value as u8);
            Ok(pos + 4)
        }
        b'0'..=b'7' => {
            let value = parse_digits(body, pos + 1, 3, 8, at)?;
            if value > 0xff {
                return Err(QuoteError::InvalidEscape(at));
            }
            out.push(value as u8);
            Ok(pos + 4)
        }
        b'u' | b'U' => {
            let width = if c == b'u' { 4 } else { 8 };
            let value = parse_digits(body, pos + 2, width, 16, at)?;
            let ch = char::from_u32(value).ok_or(QuoteError::InvalidCodePoint(value))?;
            let mut buf = [0u8; 4];
            out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            Ok(pos + 2 + width)
        }
        _ => Err(QuoteError::InvalidEscape(at)),
    }
}

fn parse_digits(
    body: &[u8],
    start: usize,
    count: usize,
    radix: u32,
    at: usize,
) -> Result<u32, QuoteError> {
    let digits = body
        .get(start..start + count)
        .ok_or(QuoteError::TruncatedEscape(at))?;

    let mut value = 0u32;
    for &d in digits {
        let digit = (d as char)
            .to_digit(radix)
            .ok_or(QuoteError::InvalidEscape(at))?;
        value = (value << radix.trailing_zeros()) | digit;
    }
    Ok(value)
}
