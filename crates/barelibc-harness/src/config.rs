//! Render-mode configuration.
//!
//! The harness exercises the format engine through one or both render
//! targets, chosen by the `BARELIBC_RENDER_MODE` environment variable:
//! - `device`: output goes through `write` on a socket pair and is read back.
//! - `buffer`: output goes into a bounded caller buffer.
//! - `both` (default): every case that allows it runs once per target.
//!
//! The CLI `--mode` flag overrides the environment.

use std::sync::atomic::{AtomicU8, Ordering};

/// Which render target(s) a run uses.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    Device,
    Buffer,
    #[default]
    Both,
}

impl RenderMode {
    /// Parse from string (case-insensitive). Unknown values fall back to `Both`.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "device" | "fd" | "stream" => Self::Device,
            "buffer" | "buf" | "string" => Self::Buffer,
            _ => Self::Both,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Device => "device",
            Self::Buffer => "buffer",
            Self::Both => "both",
        }
    }

    /// The concrete modes a run under `self` executes, in order.
    #[must_use]
    pub fn expand(self) -> &'static [RenderMode] {
        match self {
            Self::Device => &[Self::Device],
            Self::Buffer => &[Self::Buffer],
            Self::Both => &[Self::Device, Self::Buffer],
        }
    }

    /// Does a case tagged `case_mode` run when the active mode is `self`?
    #[must_use]
    pub fn admits(self, case_mode: &str) -> bool {
        let case = Self::from_str_loose(case_mode);
        case == Self::Both || self == Self::Both || case == self
    }
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// 0=unresolved, 1=Device, 2=Buffer, 3=Both, 255=resolving.
static CACHED_MODE: AtomicU8 = AtomicU8::new(0);

const MODE_UNRESOLVED: u8 = 0;
const MODE_DEVICE: u8 = 1;
const MODE_BUFFER: u8 = 2;
const MODE_BOTH: u8 = 3;
const MODE_RESOLVING: u8 = 255;

fn mode_to_u8(mode: RenderMode) -> u8 {
    match mode {
        RenderMode::Device => MODE_DEVICE,
        RenderMode::Buffer => MODE_BUFFER,
        RenderMode::Both => MODE_BOTH,
    }
}

fn u8_to_mode(v: u8) -> RenderMode {
    match v {
        MODE_DEVICE => RenderMode::Device,
        MODE_BUFFER => RenderMode::Buffer,
        _ => RenderMode::Both,
    }
}

/// Configured render mode (reads the environment on first call, cached after).
///
/// Callers racing the first resolution see the default until it completes.
#[must_use]
pub fn render_mode() -> RenderMode {
    let cached = CACHED_MODE.load(Ordering::Relaxed);
    if cached != MODE_UNRESOLVED && cached != MODE_RESOLVING {
        return u8_to_mode(cached);
    }
    if cached == MODE_RESOLVING {
        return RenderMode::default();
    }

    if CACHED_MODE
        .compare_exchange(
            MODE_UNRESOLVED,
            MODE_RESOLVING,
            Ordering::SeqCst,
            Ordering::Relaxed,
        )
        .is_err()
    {
        let v = CACHED_MODE.load(Ordering::Relaxed);
        return if v != MODE_UNRESOLVED && v != MODE_RESOLVING {
            u8_to_mode(v)
        } else {
            RenderMode::default()
        };
    }

    let mode = std::env::var("BARELIBC_RENDER_MODE")
        .map(|v| RenderMode::from_str_loose(&v))
        .unwrap_or_default();
    CACHED_MODE.store(mode_to_u8(mode), Ordering::Release);
    mode
}
