//! `<unistd.h>` subset: read, write, _exit.

use core::ffi::{c_int, c_void};

use barelibc_core::syscall;

abi_fn! {
    /// POSIX `read`: one kernel call, short reads are the caller's problem.
    fn read(fd: c_int, buf: *mut c_void, count: usize) -> isize {
        syscall::read_raw(fd, buf.cast(), count)
    }
}

abi_fn! {
    /// POSIX `write`: one kernel call, no retry on partial writes.
    fn write(fd: c_int, buf: *const c_void, count: usize) -> isize {
        syscall::write_raw(fd, buf.cast(), count)
    }
}

abi_fn! {
    /// POSIX `_exit`.
    fn _exit(status: c_int) -> ! {
        syscall::terminate(status)
    }
}
