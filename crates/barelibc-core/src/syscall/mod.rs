//! Raw Linux syscall veneer.
//!
//! Provides the single kernel-call primitive [`syscall3`] for the build's
//! instruction set, plus the typed `read`/`write`/`terminate` wrappers the
//! rest of the crate is built on. There is no libc underneath: this module
//! IS the bottom of the stack.
//!
//! # Architecture
//!
//! The operation codes and register convention come from
//! [`ACTIVE_PROFILE`], resolved by `target_arch` at compile time. Each
//! supported instruction set has its own primitive file; only the one for
//! the build target is compiled.
//!
//! # Errors
//!
//! A negative return word is a kernel failure. The wrappers hand it back
//! untouched: no retry, no errno decoding, no short-transfer looping.
//!
//! # Safety
//!
//! [`syscall3`] and the `*_raw` wrappers are `unsafe` because the kernel
//! trusts the caller's pointers. The slice-based wrappers are safe since a
//! slice already carries a valid pointer/length pair.

mod profile;

#[cfg(target_arch = "x86_64")]
mod x86_64;
#[cfg(target_arch = "x86_64")]
use x86_64 as arch;

#[cfg(target_arch = "x86")]
mod x86;
#[cfg(target_arch = "x86")]
use x86 as arch;

#[cfg(target_arch = "aarch64")]
mod aarch64;
#[cfg(target_arch = "aarch64")]
use aarch64 as arch;

#[cfg(target_arch = "arm")]
mod arm;
#[cfg(target_arch = "arm")]
use arm as arch;

#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
mod riscv;
#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
use riscv as arch;

pub use arch::syscall3;
pub use profile::{
    AARCH64, ACTIVE_PROFILE, ARM, ArchProfile, CallingConvention, PROFILES, RISCV, X86, X86_64,
};

// -------------------------------------------------------------------------
// Operation codes and standard descriptors
// -------------------------------------------------------------------------

pub const SYS_READ: usize = ACTIVE_PROFILE.read;
pub const SYS_WRITE: usize = ACTIVE_PROFILE.write;
pub const SYS_EXIT: usize = ACTIVE_PROFILE.exit;

pub const STDIN_FILENO: i32 = 0;
pub const STDOUT_FILENO: i32 = 1;
pub const STDERR_FILENO: i32 = 2;

// -------------------------------------------------------------------------
// Error view
// -------------------------------------------------------------------------

/// A failed kernel call, holding the raw negative result word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("kernel call failed with result {0}")]
pub struct KernelError(pub isize);

/// Split a raw kernel result into success count or failure.
///
/// The failure keeps the raw word; its magnitude is not interpreted.
#[inline]
pub fn kernel_result(ret: isize) -> Result<usize, KernelError> {
    if ret < 0 {
        Err(KernelError(ret))
    } else {
        Ok(ret as usize)
    }
}

// -------------------------------------------------------------------------
// Typed syscall wrappers
// -------------------------------------------------------------------------

/// `read(fd, buf, count)` on raw parts.
///
/// # Safety
///
/// `buf` must point to a writable region of at least `count` bytes.
#[inline]
pub unsafe fn read_raw(fd: i32, buf: *mut u8, count: usize) -> isize {
    // SAFETY: caller guarantees buf validity and count bounds.
    unsafe { syscall3(SYS_READ, fd as usize, buf as usize, count) }
}

/// `write(fd, buf, count)` on raw parts.
///
/// # Safety
///
/// `buf` must point to a readable region of at least `count` bytes.
#[inline]
pub unsafe fn write_raw(fd: i32, buf: *const u8, count: usize) -> isize {
    // SAFETY: caller guarantees buf validity and count bounds.
    unsafe { syscall3(SYS_WRITE, fd as usize, buf as usize, count) }
}

/// Read up to `buf.len()` bytes from `fd` with one kernel call.
///
/// Returns bytes read (possibly fewer than requested) or the negative
/// kernel result.
#[inline]
pub fn read(fd: i32, buf: &mut [u8]) -> isize {
    // SAFETY: the slice is valid for writes of its full length.
    unsafe { read_raw(fd, buf.as_mut_ptr(), buf.len()) }
}

/// Write `buf` to `fd` with one kernel call.
///
/// Returns bytes written (possibly fewer than `buf.len()`) or the negative
/// kernel result.
#[inline]
pub fn write(fd: i32, buf: &[u8]) -> isize {
    // SAFETY: the slice is valid for reads of its full length.
    unsafe { write_raw(fd, buf.as_ptr(), buf.len()) }
}

/// Terminate the calling process with `status`.
///
/// Spins forever if the kernel ever returns from the exit call.
pub fn terminate(status: i32) -> ! {
    // SAFETY: exit takes no pointers.
    unsafe {
        syscall3(SYS_EXIT, status as usize, 0, 0);
    }
    loop {
        core::hint::spin_loop();
    }
}
