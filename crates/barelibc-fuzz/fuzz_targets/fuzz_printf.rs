#![no_main]
//! Format-string fuzzing: arbitrary formats with matching typed arguments.
//!
//! Checks that the returned length does not depend on buffer capacity, that
//! nothing past the capacity is written, and that the terminator lands at
//! `min(len, capacity - 1)`.

use barelibc_core::stdio::{Conversion, FormatArg, FormatSegment, parse_format_string, snprintf};
use libfuzzer_sys::fuzz_target;

const GUARD: u8 = 0xA5;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let capacity = usize::from(data[0] % 64);
    let split = usize::from(data[1]).min(data.len() - 2);
    let (fmt, arg_bytes) = data[2..].split_at(split);

    // One argument per conversion, derived from the trailing bytes.
    let mut args = Vec::new();
    let mut seed = arg_bytes.iter().copied().cycle();
    for seg in parse_format_string(fmt) {
        let FormatSegment::Spec(conversion) = seg else {
            continue;
        };
        let b = seed.next().unwrap_or(0);
        args.push(match conversion {
            Conversion::Str => FormatArg::Str(&arg_bytes[..usize::from(b).min(arg_bytes.len())]),
            Conversion::SignedDecimal => FormatArg::SignedInt(i64::from(b as i8) * 1_000_003),
            Conversion::Char => FormatArg::Char(b),
            Conversion::LowerHex => FormatArg::UnsignedInt(u64::from(b) << 24),
        });
    }

    let mut unbounded = vec![GUARD; 4096];
    let Ok(total) = snprintf(&mut unbounded, fmt, &args) else {
        panic!("matched arguments were rejected");
    };
    if total >= unbounded.len() {
        return;
    }
    assert_eq!(unbounded[total], 0);

    let mut bounded = vec![GUARD; capacity + 8];
    let bounded_total = snprintf(&mut bounded[..capacity], fmt, &args).expect("same arguments");
    assert_eq!(bounded_total, total);
    assert!(bounded[capacity..].iter().all(|&b| b == GUARD));
    if capacity > 0 {
        let end = total.min(capacity - 1);
        assert_eq!(bounded[..end], unbounded[..end]);
        assert_eq!(bounded[end], 0);
    }
});
