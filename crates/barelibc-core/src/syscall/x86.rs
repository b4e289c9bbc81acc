//! Raw x86 (32-bit) Linux kernel call through the legacy `int 0x80` gate.
//!
//! ```text
//! syscall number → eax
//! arg1           → ebx
//! arg2           → ecx
//! arg3           → edx
//! return         → eax
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
    // SAFETY: Inline asm traps into the kernel. Caller guarantees validity.
    unsafe {
        asm!(
            "int 0x80",
            inlateout("eax") nr => ret,
            in("ebx") a1,
            in("ecx") a2,
            in("edx") a3,
            options(nostack, preserves_flags),
        );
    }
    ret as isize
}
