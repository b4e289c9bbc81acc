//! Render targets for the format engine.
//!
//! A [`Sink`] receives every output fragment in order and decides what to do
//! with it. The engine alone owns the logical length; sinks only store.

use crate::string::memcpy;
use crate::syscall;

/// Destination for rendered fragments.
pub trait Sink {
    /// Accept the next output fragment.
    fn emit(&mut self, fragment: &[u8]);

    /// Called once after the last fragment.
    fn finish(&mut self) {}
}

/// Unbuffered device output: one `write` call per fragment.
///
/// Kernel failures and short writes are not retried and do not stop the
/// render; the logical length is reported regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceSink {
    fd: i32,
}

impl DeviceSink {
    #[must_use]
    pub const fn new(fd: i32) -> Self {
        Self { fd }
    }

    #[must_use]
    pub const fn fd(&self) -> i32 {
        self.fd
    }
}

impl Sink for DeviceSink {
    fn emit(&mut self, fragment: &[u8]) {
        let _ = syscall::write(self.fd, fragment);
    }
}

/// Bounded buffer output.
///
/// The byte at logical offset `i` is stored only when `i + 1 < capacity`,
/// keeping the last slot for the terminator. Bytes past that point are
/// dropped but still counted.
#[derive(Debug)]
pub struct BufferSink<'b> {
    buf: &'b mut [u8],
    total: usize,
}

impl<'b> BufferSink<'b> {
    #[must_use]
    pub fn new(buf: &'b mut [u8]) -> Self {
        Self { buf, total: 0 }
    }

    /// Capacity of the underlying buffer, terminator slot included.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes actually stored so far.
    #[must_use]
    pub fn stored(&self) -> usize {
        self.total.min(self.capacity().saturating_sub(1))
    }

    /// Logical bytes seen so far, stored or not.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }
}

impl Sink for BufferSink<'_> {
    fn emit(&mut self, fragment: &[u8]) {
        let limit = self.capacity().saturating_sub(1);
        if self.total < limit {
            let room = limit - self.total;
            memcpy(&mut self.buf[self.total..limit], fragment, room);
        }
        self.total += fragment.len();
    }

    fn finish(&mut self) {
        if self.capacity() > 0 {
            let end = self.stored();
            self.buf[end] = 0;
        }
    }
}

/// Where a formatting call sends its output.
#[derive(Debug)]
pub enum RenderTarget<'b> {
    /// An open descriptor; output is written as it is produced.
    Device(i32),
    /// A caller buffer; output is truncated to fit and NUL-terminated.
    Buffer(&'b mut [u8]),
}
