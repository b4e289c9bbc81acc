//! `<ctype.h>` subset: isdigit, isalpha, isspace.
//!
//! Values outside `0..=255` (including EOF) classify as false.

use core::ffi::c_int;

use barelibc_core::ctype;

fn classify(c: c_int, pred: fn(u8) -> bool) -> c_int {
    match u8::try_from(c) {
        Ok(byte) => c_int::from(pred(byte)),
        Err(_) => 0,
    }
}

abi_fn! {
    fn isdigit(c: c_int) -> c_int {
        classify(c, ctype::is_digit)
    }
}

abi_fn! {
    fn isalpha(c: c_int) -> c_int {
        classify(c, ctype::is_alpha)
    }
}

abi_fn! {
    fn isspace(c: c_int) -> c_int {
        classify(c, ctype::is_space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_bytes() {
        unsafe {
            assert_eq!(isdigit(c_int::from(b'7')), 1);
            assert_eq!(isalpha(c_int::from(b'q')), 1);
            assert_eq!(isspace(0x0B), 1);
            assert_eq!(isspace(c_int::from(b'x')), 0);
        }
    }

    #[test]
    fn eof_and_out_of_range_are_false() {
        unsafe {
            assert_eq!(isdigit(-1), 0);
            assert_eq!(isalpha(256 + c_int::from(b'a')), 0);
        }
    }
}
