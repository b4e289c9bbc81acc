//! Raw 32-bit ARM (EABI) Linux kernel call.
//!
//! ```text
//! syscall number → r7
//! arg1           → r0
//! arg2           → r1
//! arg3           → r2
//! return         → r0
//! ```
//!
//! Thumb builds use r7 as the frame pointer, so the number is swapped into
//! r7 around the trap instead of being bound as an operand.

use core::arch::asm;

/// Issue a kernel call with three word arguments.
///
/// # Safety
///
/// The caller must supply a valid syscall number and arguments the kernel
/// may dereference for that call.
#[cfg(not(thumb_mode))]
#[inline]
pub unsafe fn syscall3(nr: usize, a1: usize, a2: usize, a3: usize) -> isize {
    let ret: usize;
    // SAFETY: Inline asm issues `svc #0`. Caller guarantees validity.
    unsafe {
        asm!(
            "svc #0",
            in("r7") nr,
            inlateout("r0") a1 => ret,
            in("r1") a2,
            in("r2") a3,
            options(nostack),
        );
    }
    ret as isize
}

/// Issue a kernel call with three word arguments.
///
/// # Safety
///
/// The caller must supply a valid syscall number and arguments the kernel
/// may dereference for that call.
#[cfg(thumb_mode)]
#[inline]
pub unsafe fn syscall3(nr: usize, a1: usize, a2: usize, a3: usize) -> isize {
    let ret: usize;
    // SAFETY: r7 is saved and restored within the asm block; the kernel
    // preserves every other register.
    unsafe {
        asm!(
            "mov {saved}, r7",
            "mov r7, {nr}",
            "svc #0",
            "mov r7, {saved}",
            nr = in(reg) nr,
            saved = out(reg) _,
            inlateout("r0") a1 => ret,
            in("r1") a2,
            in("r2") a3,
            options(nostack),
        );
    }
    ret as isize
}
