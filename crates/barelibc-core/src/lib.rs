//! # barelibc-core
//!
//! Freestanding replacement for the pieces of a C runtime that a statically
//! linked, library-less binary actually needs: raw kernel calls on every
//! supported instruction set, and a small printf engine built only on top of
//! those calls.
//!
//! The crate is `no_std` and never allocates. `unsafe` is denied everywhere
//! except the [`syscall`] module, which owns the inline assembly.
//!
//! ```text
//! profile table -> syscall3 -> read / write / terminate
//!                                    ^
//! itoa / hex digits -> vformat ------+--> printf / fprintf / snprintf
//! ```

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod ctype;
pub mod stdio;
pub mod stdlib;
pub mod string;
#[allow(unsafe_code)]
pub mod syscall;

pub use stdio::{
    FormatArg, FormatError, RenderTarget, fprintf, fputc, fputs, print_d, print_s, printf,
    putchar, puts, snprintf, vformat,
};
pub use stdlib::{atoi, itoa, reverse};
pub use syscall::{STDERR_FILENO, STDIN_FILENO, STDOUT_FILENO, read, terminate, write};
