#![cfg_attr(feature = "c-variadic", feature(c_variadic))]
// Every export takes raw pointers from C callers; the C contract is the
// safety contract, so per-function safety docs would be boilerplate.
#![allow(clippy::missing_safety_doc)]
//! # barelibc-abi
//!
//! C call surface for barelibc. Each symbol is a thin shim that turns C
//! pointers into slices and delegates to `barelibc-core`.
//!
//! ```text
//! C caller -> ABI entry (this crate) -> barelibc-core -> syscall3
//! ```
//!
//! The variadic printf family is only built with the `c-variadic` feature
//! on a nightly toolchain.

#[macro_use]
mod macros;

pub mod ctype_abi;
pub mod stdio_abi;
pub mod stdlib_abi;
pub mod unistd_abi;
