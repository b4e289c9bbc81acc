//! Fixture execution against `barelibc-core`.
//!
//! Device-mode cases write to one end of a Unix socket pair and read the
//! bytes back from the other end with the core's own `read`, so the whole
//! round trip goes through the raw kernel-call layer.

use std::os::fd::AsRawFd;
use std::os::unix::net::UnixStream;

use barelibc_core::stdio::{self, FormatArg, RenderTarget};
use barelibc_core::stdlib::{self, ITOA_BUF_LEN};
use barelibc_core::syscall::kernel_result;
use serde_json::Value;

use crate::config::RenderMode;
use crate::error::HarnessError;

/// Buffer capacity used for `vformat` buffer-mode cases that do not set one.
pub const DEFAULT_CAPACITY: usize = 256;

/// Observable result of one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    /// Device bytes or buffer contents, lossily decoded.
    pub output: String,
    /// The call's return value.
    pub ret: i64,
}

/// Owned form of a [`FormatArg`], parsed from `KIND:VALUE` text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnedArg {
    Str(Vec<u8>),
    Signed(i64),
    Unsigned(u64),
    Char(u8),
}

impl OwnedArg {
    #[must_use]
    pub fn as_format_arg(&self) -> FormatArg<'_> {
        match self {
            Self::Str(s) => FormatArg::Str(s),
            Self::Signed(v) => FormatArg::SignedInt(*v),
            Self::Unsigned(v) => FormatArg::UnsignedInt(*v),
            Self::Char(c) => FormatArg::Char(*c),
        }
    }
}

/// Parse `KIND:VALUE` where KIND is a conversion letter: `s`, `d`, `c` or `x`.
///
/// `x` values accept decimal or `0x`-prefixed hex.
pub fn parse_arg_spec(spec: &str) -> Result<OwnedArg, HarnessError> {
    let (kind, value) = spec
        .split_once(':')
        .ok_or_else(|| HarnessError::bad_input(spec, "expected KIND:VALUE"))?;
    match kind {
        "s" => Ok(OwnedArg::Str(value.as_bytes().to_vec())),
        "d" => value
            .parse::<i64>()
            .map(OwnedArg::Signed)
            .map_err(|e| HarnessError::bad_input(spec, e.to_string())),
        "x" => {
            let parsed = match value.strip_prefix("0x") {
                Some(hex) => u64::from_str_radix(hex, 16),
                None => value.parse::<u64>(),
            };
            parsed
                .map(OwnedArg::Unsigned)
                .map_err(|e| HarnessError::bad_input(spec, e.to_string()))
        }
        "c" => match value.as_bytes() {
            [c] => Ok(OwnedArg::Char(*c)),
            _ => Err(HarnessError::bad_input(spec, "%c takes exactly one byte")),
        },
        other => Err(HarnessError::bad_input(
            spec,
            format!("unknown argument kind '{other}'"),
        )),
    }
}

/// Run one fixture call under a concrete render mode.
pub fn execute_fixture_case(
    function: &str,
    inputs: &Value,
    mode: RenderMode,
) -> Result<Execution, HarnessError> {
    match function {
        "vformat" => match mode {
            RenderMode::Buffer => {
                let capacity = opt_usize_field(inputs, "capacity")?.unwrap_or(DEFAULT_CAPACITY);
                format_buffer(inputs, capacity)
            }
            _ => format_device(inputs),
        },
        "snprintf" => {
            require_mode(function, mode, RenderMode::Buffer)?;
            let capacity = opt_usize_field(inputs, "capacity")?
                .ok_or_else(|| HarnessError::bad_input("capacity", "snprintf needs a capacity"))?;
            format_buffer(inputs, capacity)
        }
        "fprintf" => {
            require_mode(function, mode, RenderMode::Device)?;
            format_device(inputs)
        }
        "fputs" => {
            require_mode(function, mode, RenderMode::Device)?;
            let s = str_field(inputs, "s")?;
            let (bytes, ret) = capture_device(|fd| stdio::fputs(s.as_bytes(), fd))?;
            Ok(Execution {
                output: String::from_utf8_lossy(&bytes).into_owned(),
                ret: ret as i64,
            })
        }
        "itoa" => {
            let value = inputs
                .get("value")
                .and_then(Value::as_i64)
                .ok_or_else(|| HarnessError::bad_input("value", "expected integer"))?;
            let mut buf = [0u8; ITOA_BUF_LEN];
            let digits = stdlib::itoa(value, &mut buf);
            Ok(Execution {
                output: String::from_utf8_lossy(digits).into_owned(),
                ret: digits.len() as i64,
            })
        }
        "atoi" => {
            let value = stdlib::atoi(str_field(inputs, "s")?.as_bytes());
            Ok(Execution {
                output: value.to_string(),
                ret: i64::from(value),
            })
        }
        "reverse" => {
            let mut bytes = str_field(inputs, "s")?.as_bytes().to_vec();
            stdlib::reverse(&mut bytes);
            Ok(Execution {
                ret: bytes.len() as i64,
                output: String::from_utf8_lossy(&bytes).into_owned(),
            })
        }
        other => Err(HarnessError::UnknownFunction(other.to_string())),
    }
}

fn require_mode(function: &str, mode: RenderMode, needed: RenderMode) -> Result<(), HarnessError> {
    if mode == needed {
        Ok(())
    } else {
        Err(HarnessError::ModeUnsupported {
            function: function.to_string(),
            mode: mode.as_str(),
        })
    }
}

fn format_device(inputs: &Value) -> Result<Execution, HarnessError> {
    let fmt = str_field(inputs, "format")?;
    let owned = args_field(inputs)?;
    let args: Vec<FormatArg<'_>> = owned.iter().map(OwnedArg::as_format_arg).collect();
    let (bytes, result) = capture_device(|fd| {
        stdio::vformat(RenderTarget::Device(fd), fmt.as_bytes(), &args)
    })?;
    let total = result?;
    Ok(Execution {
        output: String::from_utf8_lossy(&bytes).into_owned(),
        ret: total as i64,
    })
}

fn format_buffer(inputs: &Value, capacity: usize) -> Result<Execution, HarnessError> {
    let fmt = str_field(inputs, "format")?;
    let owned = args_field(inputs)?;
    let args: Vec<FormatArg<'_>> = owned.iter().map(OwnedArg::as_format_arg).collect();
    let mut buf = vec![0xAAu8; capacity];
    let total = stdio::snprintf(&mut buf, fmt.as_bytes(), &args)?;
    // The content may hold NUL bytes from `%c`, so the terminator is located
    // by the returned length rather than by scanning.
    let stored = total.min(capacity.saturating_sub(1));
    if capacity > 0 && buf[stored] != 0 {
        return Err(HarnessError::bad_input(
            "capacity",
            format!("no terminator at {stored}"),
        ));
    }
    Ok(Execution {
        output: String::from_utf8_lossy(&buf[..stored]).into_owned(),
        ret: total as i64,
    })
}

/// Run `f` against the write end of a fresh socket pair and collect
/// everything it wrote.
pub fn capture_device<R>(f: impl FnOnce(i32) -> R) -> Result<(Vec<u8>, R), HarnessError> {
    let (reader, writer) = UnixStream::pair()?;
    let ret = f(writer.as_raw_fd());
    drop(writer);

    let mut out = Vec::new();
    let mut chunk = [0u8; 256];
    loop {
        let n = kernel_result(barelibc_core::read(reader.as_raw_fd(), &mut chunk))
            .map_err(std::io::Error::other)?;
        if n == 0 {
            break;
        }
        out.extend_from_slice(&chunk[..n]);
    }
    Ok((out, ret))
}

fn str_field<'v>(inputs: &'v Value, field: &str) -> Result<&'v str, HarnessError> {
    inputs
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| HarnessError::bad_input(field, "expected string"))
}

fn opt_usize_field(inputs: &Value, field: &str) -> Result<Option<usize>, HarnessError> {
    match inputs.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .map(|n| Some(n as usize))
            .ok_or_else(|| HarnessError::bad_input(field, "expected non-negative integer")),
    }
}

fn args_field(inputs: &Value) -> Result<Vec<OwnedArg>, HarnessError> {
    let Some(list) = inputs.get("args") else {
        return Ok(Vec::new());
    };
    let list = list
        .as_array()
        .ok_or_else(|| HarnessError::bad_input("args", "expected array of KIND:VALUE"))?;
    list.iter()
        .map(|item| {
            item.as_str()
                .ok_or_else(|| HarnessError::bad_input("args", "expected string item"))
                .and_then(parse_arg_spec)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn arg_specs_parse() {
        assert_eq!(parse_arg_spec("s:a:b").unwrap(), OwnedArg::Str(b"a:b".to_vec()));
        assert_eq!(parse_arg_spec("d:-12").unwrap(), OwnedArg::Signed(-12));
        assert_eq!(parse_arg_spec("x:0xff").unwrap(), OwnedArg::Unsigned(255));
        assert_eq!(parse_arg_spec("x:16").unwrap(), OwnedArg::Unsigned(16));
        assert_eq!(parse_arg_spec("c:z").unwrap(), OwnedArg::Char(b'z'));
        assert!(parse_arg_spec("c:zz").is_err());
        assert!(parse_arg_spec("q:1").is_err());
        assert!(parse_arg_spec("12").is_err());
    }

    #[test]
    fn buffer_mode_truncates() {
        let run = execute_fixture_case(
            "snprintf",
            &json!({"format": "%d-%s", "args": ["d:12", "s:ok"], "capacity": 4}),
            RenderMode::Buffer,
        )
        .unwrap();
        assert_eq!(run.output, "12-");
        assert_eq!(run.ret, 5);
    }

    #[test]
    fn buffer_mode_keeps_embedded_nul_from_char() {
        let run = execute_fixture_case(
            "snprintf",
            &json!({"format": "a%cb", "args": ["c:\0"], "capacity": 8}),
            RenderMode::Buffer,
        )
        .unwrap();
        assert_eq!(run.output, "a\0b");
        assert_eq!(run.ret, 3);
    }

    #[test]
    fn buffer_mode_embedded_nul_survives_truncation() {
        let run = execute_fixture_case(
            "snprintf",
            &json!({"format": "%c%c%c", "args": ["c:\0", "c:x", "c:y"], "capacity": 3}),
            RenderMode::Buffer,
        )
        .unwrap();
        assert_eq!(run.output, "\0x");
        assert_eq!(run.ret, 3);
    }

    #[test]
    fn zero_capacity_buffer_reports_length_only() {
        let run = execute_fixture_case(
            "snprintf",
            &json!({"format": "abc", "capacity": 0}),
            RenderMode::Buffer,
        )
        .unwrap();
        assert_eq!(run.output, "");
        assert_eq!(run.ret, 3);
    }

    #[test]
    fn device_mode_reads_back_output() {
        let run = execute_fixture_case(
            "vformat",
            &json!({"format": "%x|%c", "args": ["x:255", "c:!"]}),
            RenderMode::Device,
        )
        .unwrap();
        assert_eq!(run.output, "ff|!");
        assert_eq!(run.ret, 4);
    }

    #[test]
    fn snprintf_refuses_device_mode() {
        let err = execute_fixture_case(
            "snprintf",
            &json!({"format": "x", "capacity": 2}),
            RenderMode::Device,
        )
        .unwrap_err();
        assert!(matches!(err, HarnessError::ModeUnsupported { .. }));
    }

    #[test]
    fn format_errors_surface() {
        let err = execute_fixture_case(
            "vformat",
            &json!({"format": "%d", "args": []}),
            RenderMode::Buffer,
        )
        .unwrap_err();
        assert!(matches!(err, HarnessError::Format(_)));
    }

    #[test]
    fn unknown_function() {
        let err = execute_fixture_case("sprintf", &json!({}), RenderMode::Buffer).unwrap_err();
        assert!(matches!(err, HarnessError::UnknownFunction(name) if name == "sprintf"));
    }

    #[test]
    fn conversions() {
        let itoa = execute_fixture_case("itoa", &json!({"value": -305}), RenderMode::Both).unwrap();
        assert_eq!((itoa.output.as_str(), itoa.ret), ("-305", 4));
        let atoi =
            execute_fixture_case("atoi", &json!({"s": "  +77x"}), RenderMode::Both).unwrap();
        assert_eq!((atoi.output.as_str(), atoi.ret), ("77", 77));
    }
}
