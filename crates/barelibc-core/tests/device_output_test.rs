//! Integration test: device-mode rendering through real descriptors.
//!
//! A connected socket pair stands in for the output device; everything the
//! engine writes on one end is read back with the crate's own `read`.

#![cfg(target_os = "linux")]

use std::os::fd::AsRawFd;
use std::os::unix::net::UnixStream;

use barelibc_core::stdio::{FormatArg, RenderTarget, fputs, fprintf, vformat};
use barelibc_core::{read, write};

fn drain(fd: i32, expected_len: usize) -> Vec<u8> {
    let mut out = Vec::new();
    let mut chunk = [0u8; 256];
    while out.len() < expected_len {
        let n = read(fd, &mut chunk);
        assert!(n > 0, "read returned {n}");
        out.extend_from_slice(&chunk[..n as usize]);
    }
    out
}

#[test]
fn hex_scenario_emits_exactly_ff() {
    let (tx, rx) = UnixStream::pair().expect("socketpair");
    let n = fprintf(tx.as_raw_fd(), b"%x", &[FormatArg::UnsignedInt(255)]).unwrap();
    assert_eq!(n, 2);
    assert_eq!(drain(rx.as_raw_fd(), n), b"ff");
}

#[test]
fn device_and_buffer_modes_agree() {
    let (tx, rx) = UnixStream::pair().expect("socketpair");
    let args = [
        FormatArg::Str(b"pid"),
        FormatArg::SignedInt(-31),
        FormatArg::Char(b'#'),
        FormatArg::UnsignedInt(0xc0ffee),
    ];
    let fmt = b"%s=%d %c%x %q 50%";

    let device_len = vformat(RenderTarget::Device(tx.as_raw_fd()), fmt, &args).unwrap();
    let mut buf = [0u8; 64];
    let buffer_len = vformat(RenderTarget::Buffer(&mut buf), fmt, &args).unwrap();

    assert_eq!(device_len, buffer_len);
    assert_eq!(drain(rx.as_raw_fd(), device_len), &buf[..buffer_len]);
    assert_eq!(&buf[..buffer_len], b"pid=-31 #c0ffee %q 50%");
}

#[test]
fn fputs_reports_bytes_written() {
    let (tx, rx) = UnixStream::pair().expect("socketpair");
    assert_eq!(fputs(b"line\0tail", tx.as_raw_fd()), 4);
    assert_eq!(drain(rx.as_raw_fd(), 4), b"line");
}

#[test]
fn closed_peer_write_fails_without_retry() {
    let (tx, rx) = UnixStream::pair().expect("socketpair");
    drop(rx);
    // Rust ignores SIGPIPE in test binaries, so the kernel returns -EPIPE.
    assert!(write(tx.as_raw_fd(), b"x") < 0);
    assert_eq!(fputs(b"x", tx.as_raw_fd()), -1);
}
