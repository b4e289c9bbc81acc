//! Integration test: the active architecture profile agrees with the host
//! libc's view of the kernel ABI.
//!
//! Run: cargo test -p barelibc-core --test syscall_numbers_test

#![cfg(target_os = "linux")]

use barelibc_core::syscall::{
    ACTIVE_PROFILE, ArchProfile, STDERR_FILENO, STDIN_FILENO, STDOUT_FILENO, SYS_EXIT, SYS_READ,
    SYS_WRITE,
};

#[test]
fn operation_codes_match_host_libc() {
    assert_eq!(SYS_READ as libc::c_long, libc::SYS_read);
    assert_eq!(SYS_WRITE as libc::c_long, libc::SYS_write);
    assert_eq!(SYS_EXIT as libc::c_long, libc::SYS_exit);
}

#[test]
fn standard_descriptors_match_host_libc() {
    assert_eq!(STDIN_FILENO, libc::STDIN_FILENO);
    assert_eq!(STDOUT_FILENO, libc::STDOUT_FILENO);
    assert_eq!(STDERR_FILENO, libc::STDERR_FILENO);
}

#[test]
fn active_profile_is_found_by_build_arch() {
    let arch = if cfg!(any(target_arch = "riscv32", target_arch = "riscv64")) {
        "riscv"
    } else {
        std::env::consts::ARCH
    };
    assert_eq!(ArchProfile::find(arch), Some(&ACTIVE_PROFILE));
}
