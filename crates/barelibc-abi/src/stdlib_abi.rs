//! `<stdlib.h>` subset: itoa, atoi, atol, reverse.

use core::ffi::{CStr, c_char, c_int, c_long};

use barelibc_core::stdlib::{self, ITOA_BUF_LEN};

abi_fn! {
    /// Render `value` in base 10 into `buf` and return `buf`.
    ///
    /// `buf` must hold at least 12 bytes (sign, 10 digits, NUL).
    fn itoa(value: c_int, buf: *mut c_char) -> *mut c_char {
        let mut scratch = [0u8; ITOA_BUF_LEN];
        let len = stdlib::itoa(i64::from(value), &mut scratch).len();
        core::ptr::copy_nonoverlapping(scratch.as_ptr(), buf.cast::<u8>(), len + 1);
        buf
    }
}

abi_fn! {
    /// C `atoi`: leading blanks, optional sign, digits; overflow wraps.
    fn atoi(s: *const c_char) -> c_int {
        if s.is_null() {
            return 0;
        }
        stdlib::atoi(CStr::from_ptr(s).to_bytes())
    }
}

abi_fn! {
    /// `long` flavor of [`atoi`].
    fn atol(s: *const c_char) -> c_long {
        if s.is_null() {
            return 0;
        }
        stdlib::atol(CStr::from_ptr(s).to_bytes()) as c_long
    }
}

abi_fn! {
    /// Reverse the NUL-terminated string at `s` in place.
    fn reverse(s: *mut c_char) {
        if s.is_null() {
            return;
        }
        let len = CStr::from_ptr(s).to_bytes().len();
        stdlib::reverse(core::slice::from_raw_parts_mut(s.cast::<u8>(), len));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn itoa_writes_terminated_text() {
        let mut buf = [0x7f as c_char; 16];
        let out = unsafe { itoa(-42, buf.as_mut_ptr()) };
        assert_eq!(out, buf.as_mut_ptr());
        let text = unsafe { CStr::from_ptr(buf.as_ptr()) };
        assert_eq!(text.to_bytes(), b"-42");
        assert_eq!(buf[4], 0x7f);
    }

    #[test]
    fn itoa_int_min_fits_twelve_bytes() {
        let mut buf = [0 as c_char; 12];
        unsafe { itoa(c_int::MIN, buf.as_mut_ptr()) };
        let text = unsafe { CStr::from_ptr(buf.as_ptr()) };
        assert_eq!(text.to_bytes(), b"-2147483648");
    }

    #[test]
    fn atoi_parses_c_string() {
        assert_eq!(unsafe { atoi(c" \t-305abc".as_ptr()) }, -305);
        assert_eq!(unsafe { atoi(c"".as_ptr()) }, 0);
        assert_eq!(unsafe { atoi(core::ptr::null()) }, 0);
    }

    #[test]
    fn atol_keeps_long_width() {
        assert_eq!(unsafe { atol(c"-2147483649".as_ptr()) }, -2_147_483_649i64 as c_long);
    }

    #[test]
    fn reverse_in_place() {
        let mut text = *b"abcd\0";
        unsafe { reverse(text.as_mut_ptr().cast()) };
        assert_eq!(&text, b"dcba\0");
    }
}
