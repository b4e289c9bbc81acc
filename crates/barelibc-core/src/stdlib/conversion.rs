//! Numeric conversion functions (itoa, atoi, atol) and in-place reversal.

use crate::ctype::is_digit;
use crate::string::strlen;

/// Worst-case `itoa` buffer: sign, 19 digits of `i64::MIN`, terminator.
pub const ITOA_BUF_LEN: usize = 21;

/// Reverse the string in `text` in place.
///
/// Only bytes before the first NUL move; the terminator and anything after
/// it stay put. A slice without a NUL is reversed whole.
pub fn reverse(text: &mut [u8]) {
    let len = strlen(text);
    text[..len].reverse();
}

/// Render `value` in base 10 into `buf`, NUL-terminated.
///
/// Digits are accumulated least-significant first and then reversed into
/// reading order. Returns the rendered text without its terminator.
pub fn itoa(value: i64, buf: &mut [u8; ITOA_BUF_LEN]) -> &[u8] {
    let mut magnitude = value.unsigned_abs();
    let mut len = 0;

    if magnitude == 0 {
        buf[0] = b'0';
        len = 1;
    }
    while magnitude > 0 {
        buf[len] = b'0' + (magnitude % 10) as u8;
        magnitude /= 10;
        len += 1;
    }
    if value < 0 {
        buf[len] = b'-';
        len += 1;
    }
    buf[len] = 0;
    reverse(&mut buf[..]);
    &buf[..len]
}

/// Parse a decimal `int` the way C `atoi` does.
///
/// Skips leading space, tab and newline, accepts one optional sign, then
/// consumes digits up to the first non-digit. Overflow wraps.
pub fn atoi(text: &[u8]) -> i32 {
    // Wrapping arithmetic commutes with truncation, so the low 32 bits of
    // the 64-bit accumulation are exactly the 32-bit result.
    parse_decimal(text) as i32
}

/// `long` variant of [`atoi`].
pub fn atol(text: &[u8]) -> i64 {
    parse_decimal(text)
}

fn parse_decimal(text: &[u8]) -> i64 {
    let s = &text[..strlen(text)];
    let mut i = 0;

    while i < s.len() && matches!(s[i], b' ' | b'\t' | b'\n') {
        i += 1;
    }

    let mut negative = false;
    if i < s.len() && (s[i] == b'-' || s[i] == b'+') {
        negative = s[i] == b'-';
        i += 1;
    }

    let mut acc: i64 = 0;
    while i < s.len() && is_digit(s[i]) {
        acc = acc.wrapping_mul(10).wrapping_add(i64::from(s[i] - b'0'));
        i += 1;
    }

    if negative { acc.wrapping_neg() } else { acc }
}
