//! Architecture profiles: Linux kernel-call numbers and register conventions.
//!
//! Every profile is plain data and always compiled, so the table can be
//! inspected on any host. Exactly one of them is [`ACTIVE_PROFILE`], chosen by
//! `target_arch` at build time.

/// Register assignment for a three-argument kernel call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallingConvention {
    /// Trap instruction that enters the kernel.
    pub instruction: &'static str,
    /// Register carrying the operation code.
    pub number_register: &'static str,
    /// Registers carrying the first three word arguments, in order.
    pub arg_registers: [&'static str; 3],
    /// Register the kernel writes its signed result into.
    pub return_register: &'static str,
}

/// Kernel-call codes and calling convention for one instruction set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchProfile {
    /// `target_arch` spelling of the instruction set.
    pub arch: &'static str,
    pub read: usize,
    pub write: usize,
    pub exit: usize,
    pub convention: CallingConvention,
}

pub const X86_64: ArchProfile = ArchProfile {
    arch: "x86_64",
    read: 0,
    write: 1,
    exit: 60,
    convention: CallingConvention {
        instruction: "syscall",
        number_register: "rax",
        arg_registers: ["rdi", "rsi", "rdx"],
        return_register: "rax",
    },
};

pub const X86: ArchProfile = ArchProfile {
    arch: "x86",
    read: 3,
    write: 4,
    exit: 1,
    convention: CallingConvention {
        instruction: "int 0x80",
        number_register: "eax",
        arg_registers: ["ebx", "ecx", "edx"],
        return_register: "eax",
    },
};

pub const AARCH64: ArchProfile = ArchProfile {
    arch: "aarch64",
    read: 63,
    write: 64,
    exit: 93,
    convention: CallingConvention {
        instruction: "svc #0",
        number_register: "x8",
        arg_registers: ["x0", "x1", "x2"],
        return_register: "x0",
    },
};

pub const ARM: ArchProfile = ArchProfile {
    arch: "arm",
    read: 3,
    write: 4,
    exit: 1,
    convention: CallingConvention {
        instruction: "svc #0",
        number_register: "r7",
        arg_registers: ["r0", "r1", "r2"],
        return_register: "r0",
    },
};

/// Shared by riscv32 and riscv64; the generic syscall table is word-size agnostic.
pub const RISCV: ArchProfile = ArchProfile {
    arch: "riscv",
    read: 63,
    write: 64,
    exit: 93,
    convention: CallingConvention {
        instruction: "ecall",
        number_register: "a7",
        arg_registers: ["a0", "a1", "a2"],
        return_register: "a0",
    },
};

/// All supported profiles.
pub static PROFILES: [ArchProfile; 5] = [X86_64, X86, AARCH64, ARM, RISCV];

#[cfg(target_arch = "x86_64")]
pub const ACTIVE_PROFILE: ArchProfile = X86_64;

#[cfg(target_arch = "x86")]
pub const ACTIVE_PROFILE: ArchProfile = X86;

#[cfg(target_arch = "aarch64")]
pub const ACTIVE_PROFILE: ArchProfile = AARCH64;

#[cfg(target_arch = "arm")]
pub const ACTIVE_PROFILE: ArchProfile = ARM;

#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
pub const ACTIVE_PROFILE: ArchProfile = RISCV;

#[cfg(not(any(
    target_arch = "x86_64",
    target_arch = "x86",
    target_arch = "aarch64",
    target_arch = "arm",
    target_arch = "riscv32",
    target_arch = "riscv64",
)))]
compile_error!("barelibc: unsupported target architecture");

impl ArchProfile {
    /// Look up a profile by its `arch` name.
    #[must_use]
    pub fn find(arch: &str) -> Option<&'static ArchProfile> {
        PROFILES.iter().find(|profile| profile.arch == arch)
    }
}
