//! Formatted output built directly on the `write` syscall.
//!
//! [`vformat`] interprets a format string against a typed argument list and
//! sends the result to a [`RenderTarget`]. Whatever the target, the returned
//! length is the logical one: what an unbounded buffer would have received.
//!
//! Arguments are checked against the format before anything is emitted, so
//! a mismatched call produces a [`FormatError`] and no output at all.

pub mod printf;
pub mod sink;

pub use printf::{
    Conversion, FormatArg, FormatSegment, HEX_BUF_LEN, Segments, count_args, hex_digits,
    parse_format_string,
};
pub use sink::{BufferSink, DeviceSink, RenderTarget, Sink};

use crate::stdlib::{ITOA_BUF_LEN, itoa};
use crate::string::as_str_bytes;
use crate::syscall::{self, STDOUT_FILENO};

/// Argument list does not match what the format string consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("%{conversion} (argument {index}) has no matching argument")]
    MissingArgument { index: usize, conversion: char },
    #[error("%{conversion} (argument {index}) cannot render a {found}")]
    TypeMismatch {
        index: usize,
        conversion: char,
        found: &'static str,
    },
    #[error("format consumes {expected} arguments but {supplied} were supplied")]
    ExcessArguments { expected: usize, supplied: usize },
}

/// Verify that `args` matches the conversions in `fmt` one-for-one, in order.
pub fn check_args(fmt: &[u8], args: &[FormatArg<'_>]) -> Result<(), FormatError> {
    let mut index = 0;
    for seg in parse_format_string(fmt) {
        let FormatSegment::Spec(conversion) = seg else {
            continue;
        };
        let arg = args.get(index).ok_or(FormatError::MissingArgument {
            index,
            conversion: conversion.letter(),
        })?;
        if !arg.fits(conversion) {
            return Err(FormatError::TypeMismatch {
                index,
                conversion: conversion.letter(),
                found: arg.kind(),
            });
        }
        index += 1;
    }
    if index != args.len() {
        return Err(FormatError::ExcessArguments {
            expected: index,
            supplied: args.len(),
        });
    }
    Ok(())
}

/// Render `fmt` with `args` into any [`Sink`], returning the logical length.
///
/// Each literal run, passthrough pair and converted argument reaches the
/// sink as exactly one fragment.
pub fn vformat_into<S: Sink + ?Sized>(
    sink: &mut S,
    fmt: &[u8],
    args: &[FormatArg<'_>],
) -> Result<usize, FormatError> {
    check_args(fmt, args)?;

    let mut total = 0;
    let mut pending = args.iter();
    for seg in parse_format_string(fmt) {
        total += match seg {
            FormatSegment::Literal(bytes) => {
                sink.emit(bytes);
                bytes.len()
            }
            FormatSegment::Passthrough(letter) => {
                sink.emit(&[b'%', letter]);
                2
            }
            FormatSegment::Spec(_) => pending.next().map_or(0, |arg| render_arg(sink, arg)),
        };
    }
    sink.finish();
    Ok(total)
}

fn render_arg<S: Sink + ?Sized>(sink: &mut S, arg: &FormatArg<'_>) -> usize {
    match *arg {
        FormatArg::Str(s) => {
            let s = as_str_bytes(s);
            sink.emit(s);
            s.len()
        }
        FormatArg::SignedInt(v) => {
            let mut scratch = [0u8; ITOA_BUF_LEN];
            let digits = itoa(v, &mut scratch);
            sink.emit(digits);
            digits.len()
        }
        FormatArg::UnsignedInt(v) => {
            let mut scratch = [0u8; HEX_BUF_LEN];
            let digits = hex_digits(v, &mut scratch);
            sink.emit(digits);
            digits.len()
        }
        FormatArg::Char(c) => {
            sink.emit(&[c]);
            1
        }
    }
}

/// Render `fmt` with `args` to `target`.
pub fn vformat(
    target: RenderTarget<'_>,
    fmt: &[u8],
    args: &[FormatArg<'_>],
) -> Result<usize, FormatError> {
    match target {
        RenderTarget::Device(fd) => vformat_into(&mut DeviceSink::new(fd), fmt, args),
        RenderTarget::Buffer(buf) => vformat_into(&mut BufferSink::new(buf), fmt, args),
    }
}

// ---------------------------------------------------------------------------
// printf / fprintf / snprintf
// ---------------------------------------------------------------------------

/// Format to standard output.
pub fn printf(fmt: &[u8], args: &[FormatArg<'_>]) -> Result<usize, FormatError> {
    vformat(RenderTarget::Device(STDOUT_FILENO), fmt, args)
}

/// Format to descriptor `fd`.
pub fn fprintf(fd: i32, fmt: &[u8], args: &[FormatArg<'_>]) -> Result<usize, FormatError> {
    vformat(RenderTarget::Device(fd), fmt, args)
}

/// Format into `buf`, truncating and NUL-terminating.
///
/// Returns the untruncated length; output was cut short when the result is
/// `>= buf.len()`.
pub fn snprintf(buf: &mut [u8], fmt: &[u8], args: &[FormatArg<'_>]) -> Result<usize, FormatError> {
    vformat(RenderTarget::Buffer(buf), fmt, args)
}

/// `printf!(fmt, args...)`: `stdio::printf` with each argument converted
/// through `FormatArg::from`.
#[macro_export]
macro_rules! printf {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::stdio::printf(
            ::core::convert::AsRef::<[u8]>::as_ref(&$fmt),
            &[$($crate::stdio::FormatArg::from($arg)),*],
        )
    };
}

/// `fprintf!(fd, fmt, args...)`.
#[macro_export]
macro_rules! fprintf {
    ($fd:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::stdio::fprintf(
            $fd,
            ::core::convert::AsRef::<[u8]>::as_ref(&$fmt),
            &[$($crate::stdio::FormatArg::from($arg)),*],
        )
    };
}

/// `snprintf!(buf, fmt, args...)`.
#[macro_export]
macro_rules! snprintf {
    ($buf:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::stdio::snprintf(
            $buf,
            ::core::convert::AsRef::<[u8]>::as_ref(&$fmt),
            &[$($crate::stdio::FormatArg::from($arg)),*],
        )
    };
}

// ---------------------------------------------------------------------------
// Unformatted output
// ---------------------------------------------------------------------------

/// Write the string `s` to `fd` with one kernel call.
///
/// Returns 0 for an empty string (no call is made), -1 if the kernel call
/// failed, otherwise the bytes written.
pub fn fputs(s: &[u8], fd: i32) -> isize {
    let s = as_str_bytes(s);
    if s.is_empty() {
        return 0;
    }
    let written = syscall::write(fd, s);
    if written < 0 { -1 } else { written }
}

/// Write `s` and a newline to standard output.
///
/// Returns the [`fputs`] result plus one for the newline, or the failure.
pub fn puts(s: &[u8]) -> isize {
    puts_fd(s, STDOUT_FILENO)
}

fn puts_fd(s: &[u8], fd: i32) -> isize {
    let r = fputs(s, fd);
    if r < 0 {
        return r;
    }
    // The newline write is not checked; the count assumes it landed.
    let _ = syscall::write(fd, b"\n");
    r + 1
}

/// Write the low byte of `c` to `fd` and return `c`, whether or not the
/// write succeeded.
pub fn fputc(c: i32, fd: i32) -> i32 {
    let _ = syscall::write(fd, &[c as u8]);
    c
}

/// Write the low byte of `c` to standard output and return `c`.
pub fn putchar(c: i32) -> i32 {
    fputc(c, STDOUT_FILENO)
}

/// [`fputs`] to standard output.
pub fn print_s(s: &[u8]) -> isize {
    fputs(s, STDOUT_FILENO)
}

/// Decimal rendering of `v` to standard output, with [`fputs`] semantics.
pub fn print_d(v: i64) -> isize {
    print_d_fd(v, STDOUT_FILENO)
}

fn print_d_fd(v: i64, fd: i32) -> isize {
    let mut scratch = [0u8; ITOA_BUF_LEN];
    fputs(itoa(v, &mut scratch), fd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    /// Records every fragment as a device would see it.
    #[derive(Default)]
    struct Recorder {
        fragments: Vec<Vec<u8>>,
        finished: bool,
    }

    impl Sink for Recorder {
        fn emit(&mut self, fragment: &[u8]) {
            self.fragments.push(fragment.to_vec());
        }

        fn finish(&mut self) {
            self.finished = true;
        }
    }

    impl Recorder {
        fn joined(&self) -> Vec<u8> {
            self.fragments.concat()
        }
    }

    fn record(fmt: &[u8], args: &[FormatArg<'_>]) -> (Recorder, usize) {
        let mut rec = Recorder::default();
        let total = vformat_into(&mut rec, fmt, args).expect("well-formed call");
        (rec, total)
    }

    #[test]
    fn one_fragment_per_piece() {
        let (rec, total) = record(
            b"id=%d name=%s%c%x!",
            &[
                FormatArg::SignedInt(7),
                FormatArg::Str(b"ann"),
                FormatArg::Char(b'?'),
                FormatArg::UnsignedInt(255),
            ],
        );
        let expected: [&[u8]; 7] = [b"id=", b"7", b" name=", b"ann", b"?", b"ff", b"!"];
        assert_eq!(rec.fragments, expected);
        assert_eq!(total, 17);
        assert!(rec.finished);
    }

    #[test]
    fn unknown_conversion_is_one_two_byte_fragment() {
        let (rec, total) = record(b"%q", &[]);
        assert_eq!(rec.fragments, [b"%q".to_vec()]);
        assert_eq!(total, 2);
    }

    #[test]
    fn double_percent_renders_both() {
        let (rec, total) = record(b"100%%", &[]);
        assert_eq!(rec.joined(), b"100%%");
        assert_eq!(total, 5);
    }

    #[test]
    fn lone_trailing_percent() {
        let (rec, total) = record(b"%", &[]);
        assert_eq!(rec.joined(), b"%");
        assert_eq!(total, 1);
    }

    #[test]
    fn string_argument_stops_at_nul() {
        let (rec, total) = record(b"[%s]", &[FormatArg::Str(b"ab\0cd")]);
        assert_eq!(rec.joined(), b"[ab]");
        assert_eq!(total, 4);
    }

    #[test]
    fn empty_string_argument_counts_zero() {
        let (rec, total) = record(b"%s", &[FormatArg::Str(b"")]);
        assert_eq!(rec.joined(), b"");
        assert_eq!(total, 0);
    }

    #[test]
    fn signed_extremes() {
        let (rec, _) = record(
            b"%d %d",
            &[FormatArg::SignedInt(i64::MIN), FormatArg::SignedInt(-42)],
        );
        assert_eq!(rec.joined(), b"-9223372036854775808 -42");
    }

    #[test]
    fn missing_argument_is_reported_before_output() {
        let mut rec = Recorder::default();
        let err = vformat_into(&mut rec, b"a%db%s", &[FormatArg::SignedInt(1)]).unwrap_err();
        assert_eq!(
            err,
            FormatError::MissingArgument {
                index: 1,
                conversion: 's'
            }
        );
        assert!(rec.fragments.is_empty());
        assert!(!rec.finished);
    }

    #[test]
    fn type_mismatch_is_reported() {
        let err = check_args(b"%x", &[FormatArg::SignedInt(-1)]).unwrap_err();
        assert_eq!(
            err,
            FormatError::TypeMismatch {
                index: 0,
                conversion: 'x',
                found: "signed integer"
            }
        );
    }

    #[test]
    fn excess_arguments_are_reported() {
        let err = check_args(b"%d", &[FormatArg::SignedInt(1), FormatArg::Char(b'c')]).unwrap_err();
        assert_eq!(
            err,
            FormatError::ExcessArguments {
                expected: 1,
                supplied: 2
            }
        );
    }

    #[test]
    fn passthrough_letters_consume_nothing() {
        assert_eq!(check_args(b"%% %u %X", &[]), Ok(()));
    }

    #[test]
    fn snprintf_exact_fit() {
        let mut buf = [0xFFu8; 6];
        let n = snprintf(&mut buf, b"%d-%s", &[FormatArg::SignedInt(12), FormatArg::Str(b"ok")]);
        assert_eq!(n, Ok(5));
        assert_eq!(&buf, b"12-ok\0");
    }

    #[test]
    fn snprintf_truncates_but_reports_logical_length() {
        let mut buf = [0xFFu8; 4];
        let n = snprintf(&mut buf, b"%d-%s", &[FormatArg::SignedInt(12), FormatArg::Str(b"ok")]);
        assert_eq!(n, Ok(5));
        assert_eq!(&buf, b"12-\0");
    }

    #[test]
    fn snprintf_macro_converts_arguments() {
        let mut buf = [0u8; 32];
        let n = crate::snprintf!(&mut buf, "%s=%d (%x) %c", "k", -3, 48879u32, 'y');
        assert_eq!(n, Ok(13));
        assert_eq!(&buf[..14], b"k=-3 (beef) y\0");
    }

    #[test]
    fn snprintf_empty_format_terminates() {
        let mut buf = [0xFFu8; 2];
        assert_eq!(snprintf(&mut buf, b"", &[]), Ok(0));
        assert_eq!(buf[0], 0);
    }

    #[test]
    fn logical_length_independent_of_capacity() {
        let args = [FormatArg::Str(b"truncate me"), FormatArg::UnsignedInt(0xabc)];
        let mut unbounded = [0u8; 64];
        let full = snprintf(&mut unbounded, b"<%s|%x>", &args).unwrap();
        for cap in 0..=full + 1 {
            let mut buf = [0u8; 64];
            let n = snprintf(&mut buf[..cap], b"<%s|%x>", &args).unwrap();
            assert_eq!(n, full, "capacity {cap}");
            if cap > 0 {
                let end = full.min(cap - 1);
                assert_eq!(&buf[..end], &unbounded[..end]);
                assert_eq!(buf[end], 0);
            }
        }
    }

    #[test]
    fn device_render_to_bad_fd_still_reports_length() {
        assert_eq!(fprintf(-1, b"%x", &[FormatArg::UnsignedInt(255)]), Ok(2));
    }

    #[test]
    fn fputs_empty_makes_no_call() {
        assert_eq!(fputs(b"", -1), 0);
        assert_eq!(fputs(b"\0ignored", -1), 0);
    }

    #[test]
    fn fputs_failure_is_minus_one() {
        assert_eq!(fputs(b"x", -1), -1);
    }

    fn drain(fd: std::os::unix::net::UnixStream) -> Vec<u8> {
        use std::io::Read;
        let mut fd = fd;
        let mut got = Vec::new();
        fd.read_to_end(&mut got).expect("drain");
        got
    }

    #[test]
    fn puts_appends_newline_and_counts_it() {
        use std::os::fd::AsRawFd;
        let (rx, tx) = std::os::unix::net::UnixStream::pair().expect("socketpair");
        assert_eq!(puts_fd(b"hello\0tail", tx.as_raw_fd()), 6);
        drop(tx);
        assert_eq!(drain(rx), b"hello\n");
    }

    #[test]
    fn puts_empty_still_writes_newline() {
        use std::os::fd::AsRawFd;
        let (rx, tx) = std::os::unix::net::UnixStream::pair().expect("socketpair");
        assert_eq!(puts_fd(b"", tx.as_raw_fd()), 1);
        drop(tx);
        assert_eq!(drain(rx), b"\n");
    }

    #[test]
    fn puts_failure_skips_newline() {
        assert_eq!(puts_fd(b"x", -1), -1);
    }

    #[test]
    fn fputc_writes_low_byte_and_returns_argument() {
        use std::os::fd::AsRawFd;
        let (rx, tx) = std::os::unix::net::UnixStream::pair().expect("socketpair");
        assert_eq!(fputc(0x141, tx.as_raw_fd()), 0x141);
        assert_eq!(fputc(i32::from(b'!'), tx.as_raw_fd()), 33);
        drop(tx);
        assert_eq!(drain(rx), b"A!");
    }

    #[test]
    fn fputc_returns_argument_even_on_failure() {
        assert_eq!(fputc(i32::from(b'z'), -1), i32::from(b'z'));
    }

    #[test]
    fn print_d_renders_decimal() {
        use std::os::fd::AsRawFd;
        let (rx, tx) = std::os::unix::net::UnixStream::pair().expect("socketpair");
        assert_eq!(print_d_fd(-2_147_483_648, tx.as_raw_fd()), 11);
        assert_eq!(print_d_fd(0, tx.as_raw_fd()), 1);
        drop(tx);
        assert_eq!(drain(rx), b"-21474836480");
    }

    #[test]
    fn print_d_failure_is_minus_one() {
        assert_eq!(print_d_fd(5, -1), -1);
    }

    #[test]
    fn format_error_messages() {
        let msg = std::format!(
            "{}",
            FormatError::MissingArgument {
                index: 2,
                conversion: 'd'
            }
        );
        assert_eq!(msg, "%d (argument 2) has no matching argument");
    }
}
