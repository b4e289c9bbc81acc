//! Decimal conversion helpers (`<stdlib.h>` subset).

pub mod conversion;

pub use conversion::{ITOA_BUF_LEN, atoi, atol, itoa, reverse};
