//! printf format-string interpreter.
//!
//! The mini-language is deliberately small: `%s`, `%d`, `%c` and `%x`, no
//! flags, width, precision or length modifiers. Anything else after a `%`
//! is passed through literally together with the `%`, and that includes a
//! second `%`: `%%` renders as `%%`, not `%`.
//!
//! Parsing never allocates. [`Segments`] walks the format lazily and the
//! renderers write into fixed stack buffers.

use core::ffi::CStr;

use crate::string::strlen;

// ---------------------------------------------------------------------------
// Format spec types
// ---------------------------------------------------------------------------

/// A recognized conversion letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// `%s`: NUL-terminated byte string.
    Str,
    /// `%d`: signed decimal.
    SignedDecimal,
    /// `%c`: single byte.
    Char,
    /// `%x`: unsigned lowercase hexadecimal, no prefix, no padding.
    LowerHex,
}

impl Conversion {
    /// Map a conversion letter to its conversion, if recognized.
    #[must_use]
    pub const fn from_letter(letter: u8) -> Option<Self> {
        match letter {
            b's' => Some(Self::Str),
            b'd' => Some(Self::SignedDecimal),
            b'c' => Some(Self::Char),
            b'x' => Some(Self::LowerHex),
            _ => None,
        }
    }

    /// The letter that introduces this conversion.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Str => 's',
            Self::SignedDecimal => 'd',
            Self::Char => 'c',
            Self::LowerHex => 'x',
        }
    }
}

// ---------------------------------------------------------------------------
// Format argument types
// ---------------------------------------------------------------------------

/// Typed argument value, one per conversion in the format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg<'a> {
    /// String content; rendering stops at the first NUL or the slice end.
    Str(&'a [u8]),
    SignedInt(i64),
    UnsignedInt(u64),
    Char(u8),
}

impl FormatArg<'_> {
    /// Whether this value may be consumed by `conversion`.
    #[must_use]
    pub const fn fits(&self, conversion: Conversion) -> bool {
        matches!(
            (self, conversion),
            (Self::Str(_), Conversion::Str)
                | (Self::SignedInt(_), Conversion::SignedDecimal)
                | (Self::Char(_), Conversion::Char)
                | (Self::UnsignedInt(_), Conversion::LowerHex)
        )
    }

    /// Short name of the variant, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::SignedInt(_) => "signed integer",
            Self::UnsignedInt(_) => "unsigned integer",
            Self::Char(_) => "character",
        }
    }
}

impl<'a> From<&'a str> for FormatArg<'a> {
    fn from(s: &'a str) -> Self {
        Self::Str(s.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for FormatArg<'a> {
    fn from(s: &'a [u8]) -> Self {
        Self::Str(s)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for FormatArg<'a> {
    fn from(s: &'a [u8; N]) -> Self {
        Self::Str(s)
    }
}

impl<'a> From<&'a CStr> for FormatArg<'a> {
    fn from(s: &'a CStr) -> Self {
        Self::Str(s.to_bytes())
    }
}

impl From<i32> for FormatArg<'_> {
    fn from(v: i32) -> Self {
        Self::SignedInt(i64::from(v))
    }
}

impl From<i64> for FormatArg<'_> {
    fn from(v: i64) -> Self {
        Self::SignedInt(v)
    }
}

impl From<u32> for FormatArg<'_> {
    fn from(v: u32) -> Self {
        Self::UnsignedInt(u64::from(v))
    }
}

impl From<u64> for FormatArg<'_> {
    fn from(v: u64) -> Self {
        Self::UnsignedInt(v)
    }
}

impl From<char> for FormatArg<'_> {
    /// Keeps the low byte, as a C `(char)` conversion would.
    fn from(c: char) -> Self {
        Self::Char(c as u32 as u8)
    }
}

// ---------------------------------------------------------------------------
// Segment: parsed pieces of a format string
// ---------------------------------------------------------------------------

/// A segment of a parsed format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatSegment<'a> {
    /// Literal bytes to emit verbatim.
    Literal(&'a [u8]),
    /// A conversion that consumes one argument.
    Spec(Conversion),
    /// `%` followed by an unrecognized byte: both are emitted as-is.
    Passthrough(u8),
}

/// Lazy iterator over the segments of a format string.
///
/// The format ends at its first NUL or at the end of the slice. A `%` as
/// the very last byte is a one-byte literal, so the scan never looks past
/// the terminator.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    fmt: &'a [u8],
    pos: usize,
}

impl<'a> Segments<'a> {
    #[must_use]
    pub fn new(fmt: &'a [u8]) -> Self {
        Self {
            fmt: &fmt[..strlen(fmt)],
            pos: 0,
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = FormatSegment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let fmt = self.fmt;
        let len = fmt.len();
        if self.pos >= len {
            return None;
        }

        if fmt[self.pos] != b'%' {
            let start = self.pos;
            while self.pos < len && fmt[self.pos] != b'%' {
                self.pos += 1;
            }
            return Some(FormatSegment::Literal(&fmt[start..self.pos]));
        }

        // Skip the '%'.
        self.pos += 1;
        if self.pos >= len {
            // A trailing '%' is its own one-byte fragment, separate from
            // the literal run before it.
            return Some(FormatSegment::Literal(&fmt[len - 1..]));
        }

        let letter = fmt[self.pos];
        self.pos += 1;
        Some(match Conversion::from_letter(letter) {
            Some(conversion) => FormatSegment::Spec(conversion),
            None => FormatSegment::Passthrough(letter),
        })
    }
}

/// Iterate over segments of a printf format string.
#[must_use]
pub fn parse_format_string(fmt: &[u8]) -> Segments<'_> {
    Segments::new(fmt)
}

/// Number of arguments `fmt` consumes.
#[must_use]
pub fn count_args(fmt: &[u8]) -> usize {
    parse_format_string(fmt)
        .filter(|seg| matches!(seg, FormatSegment::Spec(_)))
        .count()
}

// ---------------------------------------------------------------------------
// Renderers
// ---------------------------------------------------------------------------

/// Largest `%x` rendering: 16 nibbles of a `u64`.
pub const HEX_BUF_LEN: usize = 16;

/// Render `value` as lowercase hexadecimal without prefix or padding.
///
/// Nibbles are produced least-significant first, then the digits are
/// reversed into reading order. Zero renders as `0`.
pub fn hex_digits(mut value: u64, buf: &mut [u8; HEX_BUF_LEN]) -> &[u8] {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";

    let mut len = 0;
    if value == 0 {
        buf[0] = b'0';
        len = 1;
    }
    while value > 0 {
        buf[len] = DIGITS[(value & 0xF) as usize];
        value >>= 4;
        len += 1;
    }
    buf[..len].reverse();
    &buf[..len]
}
