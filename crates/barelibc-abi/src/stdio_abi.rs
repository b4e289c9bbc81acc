//! `<stdio.h>` subset: fputs, puts, putchar, print_s, print_d and the printf
//! family.
//!
//! `fputs` takes a descriptor, not a stream: there is no buffered `FILE`
//! layer. Formatted output goes straight through `barelibc_core::vformat`.

use core::ffi::{CStr, c_char, c_int};

use barelibc_core::stdio;

/// Narrow a byte count to the C return type. Counts past `INT_MAX` become
/// -1, the C overflow result.
fn c_result(n: isize) -> c_int {
    c_int::try_from(n).unwrap_or(-1)
}

abi_fn! {
    /// Write the NUL-terminated string `s` to `fd` with one kernel call.
    ///
    /// Returns bytes written, 0 for an empty string, -1 on failure.
    fn fputs(s: *const c_char, fd: c_int) -> c_int {
        if s.is_null() {
            return -1;
        }
        c_result(stdio::fputs(CStr::from_ptr(s).to_bytes(), fd))
    }
}

abi_fn! {
    /// Write `s` and a newline to standard output.
    fn puts(s: *const c_char) -> c_int {
        if s.is_null() {
            return -1;
        }
        c_result(stdio::puts(CStr::from_ptr(s).to_bytes()))
    }
}

abi_fn! {
    /// Write the low byte of `c` to standard output; returns `c`.
    fn putchar(c: c_int) -> c_int {
        stdio::putchar(c)
    }
}

abi_fn! {
    /// `fputs(s, STDOUT_FILENO)`: no trailing newline.
    fn print_s(s: *const c_char) -> c_int {
        if s.is_null() {
            return -1;
        }
        c_result(stdio::print_s(CStr::from_ptr(s).to_bytes()))
    }
}

abi_fn! {
    /// Write the decimal form of `v` to standard output.
    fn print_d(v: c_int) -> c_int {
        c_result(stdio::print_d(i64::from(v)))
    }
}

#[cfg(feature = "c-variadic")]
pub use variadic::{fprintf, printf, snprintf};

#[cfg(feature = "c-variadic")]
mod variadic {
    use core::ffi::{CStr, c_char, c_int, c_uint};

    use barelibc_core::stdio::{
        Conversion, FormatArg, FormatSegment, RenderTarget, count_args, parse_format_string,
        vformat,
    };
    use barelibc_core::syscall::STDOUT_FILENO;

    /// Upper bound on conversions pulled from one C argument list.
    pub(crate) const MAX_VA_ARGS: usize = 32;

    /// Text substituted for a NULL `%s` argument.
    const NULL_STR: &[u8] = b"(null)";

    /// Pull one typed argument per conversion in `$fmt` out of `$args` into
    /// `$slots`, returning how many were filled. Callers reject formats with
    /// more than `MAX_VA_ARGS` conversions first; the bound is rechecked here.
    macro_rules! extract_va_args {
        ($fmt:expr, $args:expr, $slots:expr) => {{
            let mut filled = 0usize;
            for seg in parse_format_string($fmt) {
                let FormatSegment::Spec(conversion) = seg else {
                    continue;
                };
                if filled == MAX_VA_ARGS {
                    break;
                }
                $slots[filled] = match conversion {
                    Conversion::Str => {
                        let ptr = unsafe { $args.arg::<*const c_char>() };
                        if ptr.is_null() {
                            FormatArg::Str(NULL_STR)
                        } else {
                            FormatArg::Str(unsafe { CStr::from_ptr(ptr) }.to_bytes())
                        }
                    }
                    Conversion::SignedDecimal => {
                        FormatArg::SignedInt(i64::from(unsafe { $args.arg::<c_int>() }))
                    }
                    // Chars are promoted to int through `...`.
                    Conversion::Char => FormatArg::Char(unsafe { $args.arg::<c_int>() } as u8),
                    Conversion::LowerHex => {
                        FormatArg::UnsignedInt(u64::from(unsafe { $args.arg::<c_uint>() }))
                    }
                };
                filled += 1;
            }
            filled
        }};
    }

    fn finish(result: Result<usize, barelibc_core::FormatError>) -> c_int {
        match result {
            Ok(n) => isize::try_from(n).map_or(-1, super::c_result),
            Err(_) => -1,
        }
    }

    /// C `printf` to standard output.
    #[cfg_attr(not(test), unsafe(no_mangle))]
    pub unsafe extern "C" fn printf(format: *const c_char, mut args: ...) -> c_int {
        if format.is_null() {
            return -1;
        }
        let fmt = unsafe { CStr::from_ptr(format) }.to_bytes();
        if count_args(fmt) > MAX_VA_ARGS {
            return -1;
        }
        let mut slots = [FormatArg::Char(0); MAX_VA_ARGS];
        let filled = extract_va_args!(fmt, args, slots);
        finish(vformat(
            RenderTarget::Device(STDOUT_FILENO),
            fmt,
            &slots[..filled],
        ))
    }

    /// C `fprintf` to descriptor `fd`.
    #[cfg_attr(not(test), unsafe(no_mangle))]
    pub unsafe extern "C" fn fprintf(fd: c_int, format: *const c_char, mut args: ...) -> c_int {
        if format.is_null() {
            return -1;
        }
        let fmt = unsafe { CStr::from_ptr(format) }.to_bytes();
        if count_args(fmt) > MAX_VA_ARGS {
            return -1;
        }
        let mut slots = [FormatArg::Char(0); MAX_VA_ARGS];
        let filled = extract_va_args!(fmt, args, slots);
        finish(vformat(RenderTarget::Device(fd), fmt, &slots[..filled]))
    }

    /// C `snprintf`. A NULL `buf` is accepted only with `size == 0`.
    #[cfg_attr(not(test), unsafe(no_mangle))]
    pub unsafe extern "C" fn snprintf(
        buf: *mut c_char,
        size: usize,
        format: *const c_char,
        mut args: ...
    ) -> c_int {
        if format.is_null() || (buf.is_null() && size != 0) {
            return -1;
        }
        let fmt = unsafe { CStr::from_ptr(format) }.to_bytes();
        if count_args(fmt) > MAX_VA_ARGS {
            return -1;
        }
        let mut slots = [FormatArg::Char(0); MAX_VA_ARGS];
        let filled = extract_va_args!(fmt, args, slots);
        let out: &mut [u8] = if size == 0 {
            &mut []
        } else {
            // SAFETY: caller guarantees buf points to size writable bytes.
            unsafe { core::slice::from_raw_parts_mut(buf.cast::<u8>(), size) }
        };
        finish(vformat(RenderTarget::Buffer(out), fmt, &slots[..filled]))
    }
}
