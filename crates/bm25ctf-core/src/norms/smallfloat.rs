//! Byte-sized lossy encoding of field lengths.
//!
//! A field length is squeezed into one byte with a small-float layout: a
//! 3-bit mantissa with an implicit leading bit and a 5-bit shift. The first
//! 24 byte values are "free" and store the length verbatim, so short fields
//! (the common case) stay exact.
//!
//! ```text
//! byte  0 ..= 23   → length = byte
//! byte 24 ..= 255  → length = 24 + int4_to_long(byte - 24)
//!
//! int4  0 ..= 7    → subnormal, value = int4
//! int4  8 ..= 231  → value = (0b1000 | mantissa) << (exponent - 1)
//! ```
//!
//! Every byte up to [`MAX_EXACT_BYTE`] decodes to itself. Above that the
//! decoded length under-estimates the real one by less than 1/8.
//!
//! The decode table is a `const`, so it is built at compile time and shared
//! by every scorer without synchronisation.

/// `long_to_int4(i32::MAX)`: the largest 4-bit-mantissa code we ever need.
const MAX_INT4: u32 = long_to_int4(i32::MAX as u64);

/// Byte values below this are stored verbatim.
pub const NUM_FREE_VALUES: u32 = 255 - MAX_INT4;

/// Largest byte whose decoded length is exact.
pub const MAX_EXACT_BYTE: u8 = 39;

/// Decoded length for every possible byte.
pub const LENGTH_TABLE: [u32; 256] = build_length_table();

const fn build_length_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = byte4_to_int(i as u8);
        i += 1;
    }
    table
}

/// Float-like encoding keeping the 4 most significant bits of `i`.
const fn long_to_int4(i: u64) -> u32 {
    let num_bits = 64 - i.leading_zeros();
    if num_bits < 4 {
        // subnormal
        i as u32
    } else {
        let shift = num_bits - 4;
        // the top bit is implicit
        let mantissa = (i >> shift) as u32 & 0x07;
        // shift is stored +1, 0 is reserved for subnormals
        mantissa | ((shift + 1) << 3)
    }
}

const fn int4_to_long(i: u32) -> u64 {
    let bits = (i & 0x07) as u64;
    let exponent = i >> 3;
    if exponent == 0 {
        bits
    } else {
        (bits | 0x08) << (exponent - 1)
    }
}

/// Encode a length into a byte.
///
/// Monotonic: a larger length never encodes to a smaller byte. Lengths
/// above `i32::MAX` saturate to `255`.
pub const fn int_to_byte4(i: u32) -> u8 {
    if i > i32::MAX as u32 {
        return u8::MAX;
    }
    if i < NUM_FREE_VALUES {
        i as u8
    } else {
        (NUM_FREE_VALUES + long_to_int4((i - NUM_FREE_VALUES) as u64)) as u8
    }
}

/// Decode a byte produced by [`int_to_byte4`].
pub const fn byte4_to_int(b: u8) -> u32 {
    let i = b as u32;
    if i < NUM_FREE_VALUES {
        i
    } else {
        (NUM_FREE_VALUES as u64 + int4_to_long(i - NUM_FREE_VALUES)) as u32
    }
}

/// Table lookup of the decoded length, as used on the scoring path.
#[inline]
pub fn decode_length(b: u8) -> f32 {
    LENGTH_TABLE[b as usize] as f32
}

/// Whether `b` decodes to an approximation rather than the exact length.
#[inline]
pub fn is_approximate(b: u8) -> bool {
    b > MAX_EXACT_BYTE
}
