//! Shared inputs for the barelibc benchmarks.

use barelibc_core::FormatArg;

/// A named format string with its arguments.
pub struct FormatCase {
    pub name: &'static str,
    pub format: &'static [u8],
    pub args: &'static [FormatArg<'static>],
}

/// Representative workloads, from literal-only to every conversion.
pub const FORMAT_CASES: &[FormatCase] = &[
    FormatCase {
        name: "literal",
        format: b"the quick brown fox jumps over the lazy dog\n",
        args: &[],
    },
    FormatCase {
        name: "int",
        format: b"%d",
        args: &[FormatArg::SignedInt(-2_147_483_648)],
    },
    FormatCase {
        name: "hex",
        format: b"%x",
        args: &[FormatArg::UnsignedInt(0xdead_beef)],
    },
    FormatCase {
        name: "mixed",
        format: b"%s=%d %c%x\n",
        args: &[
            FormatArg::Str(b"pid"),
            FormatArg::SignedInt(-31),
            FormatArg::Char(b'#'),
            FormatArg::UnsignedInt(0xc0ffee),
        ],
    },
];
