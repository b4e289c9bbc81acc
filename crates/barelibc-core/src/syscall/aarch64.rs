//! Raw AArch64 Linux kernel call.
//!
//! ```text
//! syscall number → x8
//! arg1           → x0
//! arg2           → x1
//! arg3           → x2
//! return         → x0
//! ```

use core::arch::asm;

/// Issue a kernel call with three word arguments.
///
/// # Safety
///
/// The caller must supply a valid syscall number and arguments the kernel
/// may dereference for that call.
#[inline]
pub unsafe fn syscall3(nr: usize, a1: usize, a2: usize, a3: usize) -> isize {
    let ret: usize;
    // SAFETY: Inline asm issues `svc #0`. Caller guarantees validity.
    unsafe {
        asm!(
            "svc #0",
            in("x8") nr,
            inlateout("x0") a1 => ret,
            in("x1") a2,
            in("x2") a3,
            options(nostack),
        );
    }
    ret as isize
}
