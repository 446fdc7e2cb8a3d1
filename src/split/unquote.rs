//! Go-style double-quoted string literals.
//!
//! Supported escapes: `\a \b \f \n \r \t \v \\ \"`, `\xHH` and `\NNN` (one
//! byte each), `\uHHHH` and `\UHHHHHHHH` (one code point each). Bytes from
//! `\x` and octal escapes combine with the surrounding text and the result
//! must be valid UTF-8.

use std::str::Chars;

use thiserror::Error;

/// Errors that can occur when unquoting a literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnquoteError {
    #[error("literal is not enclosed in double quotes")]
    NotQuoted,

    #[error("unescaped double quote inside literal")]
    UnescapedQuote,

    #[error("newline inside literal")]
    Newline,

    #[error("literal ends with a lone backslash")]
    TrailingBackslash,

    #[error("unknown escape sequence \\{0}")]
    UnknownEscape(char),

    #[error("truncated \\{0} escape sequence")]
    Truncated(char),

    #[error("invalid digit {found:?} in \\{kind} escape sequence")]
    InvalidDigit { kind: char, found: char },

    #[error("octal escape value {0:#o} is greater than 255")]
    OctalOutOfRange(u32),

    #[error("\\{kind} escape names invalid code point {value:#x}")]
    InvalidCodePoint { kind: char, value: u32 },

    #[error("escaped bytes are not valid UTF-8")]
    InvalidUtf8,
}

/// Unquote a double-quoted literal, including its surrounding quotes.
pub fn unquote(literal: &str) -> Result<String, UnquoteError> {
    let body = literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or(UnquoteError::NotQuoted)?;

    if !body.contains(['\\', '"', '\n']) {
        return Ok(body.to_string());
    }

    let mut out = Vec::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => return Err(UnquoteError::UnescapedQuote),
            '\n' => return Err(UnquoteError::Newline),
            '\\' => unescape(&mut chars, &mut out)?,
            _ => push_char(&mut out, c),
        }
    }

    String::from_utf8(out).map_err(|_| UnquoteError::InvalidUtf8)
}

/// Quote a string so that [`unquote`] and quote-aware splitting both read it
/// back as exactly one word equal to `s`.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0B}' => out.push_str("\\v"),
            '\u{0C}' => out.push_str("\\f"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut buf = [0; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}

fn unescape(chars: &mut Chars<'_>, out: &mut Vec<u8>) -> Result<(), UnquoteError> {
    let kind = chars.next().ok_or(UnquoteError::TrailingBackslash)?;
    match kind {
        'a' => push_char(out, '\u{07}'),
        'b' => push_char(out, '\u{08}'),
        'f' => push_char(out, '\u{0C}'),
        'n' => push_char(out, '\n'),
        'r' => push_char(out, '\r'),
        't' => push_char(out, '\t'),
        'v' => push_char(out, '\u{0B}'),
        '\\' | '"' => push_char(out, kind),
        'x' => {
            let value = read_digits(chars, kind, 2, 16)?;
            out.push(value as u8);
        }
        '0'..='7' => {
            let high = kind.to_digit(8).unwrap_or_default();
            let value = (high << 6) | read_digits(chars, kind, 2, 8)?;
            if value > 0xFF {
                return Err(UnquoteError::OctalOutOfRange(value));
            }
            out.push(value as u8);
        }
        'u' => push_code_point(out, kind, read_digits(chars, kind, 4, 16)?)?,
        'U' => push_code_point(out, kind, read_digits(chars, kind, 8, 16)?)?,
        other => return Err(UnquoteError::UnknownEscape(other)),
    }
    Ok(())
}

fn read_digits(
    chars: &mut Chars<'_>,
    kind: char,
    count: usize,
    radix: u32,
) -> Result<u32, UnquoteError> {
    let mut value = 0;
    for _ in 0..count {
        let c = chars.next().ok_or(UnquoteError::Truncated(kind))?;
        let digit = c
            .to_digit(radix)
            .ok_or(UnquoteError::InvalidDigit { kind, found: c })?;
        value = value * radix + digit;
    }
    Ok(value)
}

fn push_code_point(out: &mut Vec<u8>, kind: char, value: u32) -> Result<(), UnquoteError> {
    let c = char::from_u32(value).ok_or(UnquoteError::InvalidCodePoint { kind, value })?;
    push_char(out, c);
    Ok(())
}
