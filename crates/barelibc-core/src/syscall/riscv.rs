//! Raw RISC-V (rv32 and rv64) Linux kernel call.
//!
//! ```text
//! syscall number → a7
//! arg1           → a0
//! arg2           → a1
//! arg3           → a2
//! return         → a0
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
    // SAFETY: Inline asm issues `ecall`. Caller guarantees validity.
    unsafe {
        asm!(
            "ecall",
            in("a7") nr,
            inlateout("a0") a1 => ret,
            in("a1") a2,
            in("a2") a3,
            options(nostack),
        );
    }
    ret as isize
}
