#![no_main]
use barelibc_core::stdlib::{ITOA_BUF_LEN, atoi, atol, itoa};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must never panic, and must agree with atol on the low 32 bits.
    let narrow = atoi(data);
    let wide = atol(data);
    assert_eq!(narrow, wide as i32);

    // Whatever was parsed renders back to the same value.
    let mut buf = [0u8; ITOA_BUF_LEN];
    let text = itoa(wide, &mut buf);
    assert_eq!(atol(text), wide);
});
