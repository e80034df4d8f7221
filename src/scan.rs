//! Longest-prefix float tokenizer.
//!
//! Tokens are found the way `strtof` finds them: skip leading whitespace,
//! then take the longest prefix that reads as a decimal float. Scanning
//! stops at the first position where no such prefix exists, so
//! `"1.5abc 2"` yields a single token and leaves `"abc 2"` unread.
//!
//! Accepted grammar (case-insensitive keywords and exponent marker):
//!
//! ```text
//! Float  ::= Sign? ( 'infinity' | 'inf' | 'nan' | Number )
//! Number ::= ( Digit+ | Digit+ '.' Digit* | Digit* '.' Digit+ ) Exp?
//! Exp    ::= ('e' | 'E') Sign? Digit+
//! ```
//!
//! An exponent marker not followed by digits is left unread, so `"2e"`
//! scans as `2` followed by the unparseable `"e"`. Hexadecimal floats are
//! not recognized.

use crate::error::{Error, Result};

/// Whitespace as understood by C's `isspace` in the "C" locale.
#[inline]
pub fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

fn starts_with_ignore_case(s: &[u8], word: &[u8]) -> bool {
    s.len() >= word.len() && s[..word.len()].eq_ignore_ascii_case(word)
}

fn count_digits(s: &[u8]) -> usize {
    s.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Length of the longest float prefix of `s`, or 0 when `s` does not start with one.
///
/// `s` must not start with whitespace.
pub fn float_prefix_len(s: &[u8]) -> usize {
    let mut i = 0;
    if matches!(s.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let body = &s[i..];
    if starts_with_ignore_case(body, b"infinity") {
        return i + 8;
    }
    if starts_with_ignore_case(body, b"inf") || starts_with_ignore_case(body, b"nan") {
        return i + 3;
    }

    let int_digits = count_digits(body);
    i += int_digits;
    let mut frac_digits = 0;
    if s.get(i) == Some(&b'.') {
        frac_digits = count_digits(&s[i + 1..]);
        if int_digits + frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return 0;
    }

    if matches!(s.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(s.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = count_digits(&s[j.min(s.len())..]);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }
    i
}

/// One numeric token located in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Byte offset of the first character of the token.
    pub offset: usize,
    /// Raw token bytes (ASCII).
    pub text: &'a [u8],
}

impl Token<'_> {
    /// Convert the token to `f32`.
    pub fn value(&self) -> Result<f32> {
        std::str::from_utf8(self.text)
            .ok()
            .and_then(|s| s.parse::<f32>().ok())
            .ok_or(Error::Parse {
                offset: self.offset,
            })
    }
}

/// Iterator over the numeric tokens at the front of a byte buffer.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Start scanning `buf` from its first byte.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current byte position.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Unscanned remainder of the buffer.
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    /// True when only whitespace (or nothing) is left.
    pub fn at_end(&self) -> bool {
        self.rest().iter().all(|&b| is_space(b))
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        while self.pos < self.buf.len() && is_space(self.buf[self.pos]) {
            self.pos += 1;
        }
        let len = float_prefix_len(&self.buf[self.pos..]);
        if len == 0 {
            return None;
        }
        let token = Token {
            offset: self.pos,
            text: &self.buf[self.pos..self.pos + len],
        };
        self.pos += len;
        Some(token)
    }
}

/// Parse every leading token of `buf` into a vector of floats.
pub fn parse_all(buf: &[u8]) -> Result<Vec<f32>> {
    Scanner::new(buf).map(|t| t.value()).collect()
}
