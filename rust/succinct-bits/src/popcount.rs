//! Branch-free population count of a single word.

const M1: u64 = 0x5555_5555_5555_5555;
const M2: u64 = 0x3333_3333_3333_3333;
const M4: u64 = 0x0f0f_0f0f_0f0f_0f0f;
const M8: u64 = 0x00ff_00ff_00ff_00ff;
const M16: u64 = 0x0000_ffff_0000_ffff;
const M32: u64 = 0x0000_0000_ffff_ffff;

/// Counts the set bits of `x` by folding adjacent bit groups in parallel.
///
/// Each step adds neighboring lanes of the previous step, doubling the lane
/// width: 1-bit lanes into 2-bit sums, 2-bit into 4-bit, and so on up to a
/// single 64-bit lane holding the total.
#[inline]
pub const fn popcount_swar(x: u64) -> u32 {
    let x = (x & M1) + ((x >> 1) & M1);
    let x = (x & M2) + ((x >> 2) & M2);
    let x = (x & M4) + ((x >> 4) & M4);
    let x = (x & M8) + ((x >> 8) & M8);
    let x = (x & M16) + ((x >> 16) & M16);
    let x = (x & M32) + ((x >> 32) & M32);
    x as u32
}
