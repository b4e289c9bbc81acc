//! NUL-terminated byte string helpers.
//!
//! Every function is bounded by the slice it is given: a missing
//! terminator ends the string at the slice end instead of reading past it.

/// Length of the string in `s`: bytes before the first NUL, or `s.len()`.
#[inline]
pub fn strlen(s: &[u8]) -> usize {
    s.iter().position(|&b| b == 0).unwrap_or(s.len())
}

/// The string content of `s`, without the terminator.
#[inline]
pub fn as_str_bytes(s: &[u8]) -> &[u8] {
    &s[..strlen(s)]
}

/// Copies `n` bytes from `src` to `dest`.
///
/// Only copies `min(n, src.len(), dest.len())` bytes; returns that count.
pub fn memcpy(dest: &mut [u8], src: &[u8], n: usize) -> usize {
    let count = n.min(dest.len()).min(src.len());
    dest[..count].copy_from_slice(&src[..count]);
    count
}
