//! BCH(31,21) check bits and even parity for POCSAG codewords.

use crate::consts::{CRC_BITS, CRC_GENERATOR, DATA_MASK};

const CRC_MASK: u32 = (1 << CRC_BITS) - 1;

/// Calculates the 10-bit CRC for a 21-bit data field.
///
/// This is a binary polynomial long division of `data << 10` by
/// [`CRC_GENERATOR`], returning the remainder. Bits of `data` above the
/// 21-bit field are ignored.
///
/// ```rust
/// use pocsag::crc::crc;
///
/// assert_eq!(crc(0), 0);
/// ```
pub fn crc(data: u32) -> u32 {
    // Align the generator's top bit with the top bit of the padded message
    let mut denominator = CRC_GENERATOR << 20;
    let mut msg = (data & DATA_MASK) << CRC_BITS;

    for column in 0..=20 {
        // XOR stands in for subtraction
        if (msg >> (30 - column)) & 1 != 0 {
            msg ^= denominator;
        }
        denominator >>= 1;
    }

    msg & CRC_MASK
}

/// Calculates the even parity bit for `x`.
///
/// Returns `1` when `x` has an odd number of set bits, so that appending the
/// result makes the total weight even.
pub fn parity(x: u32) -> u32 {
    x.count_ones() & 1
}

/// Remainder of the 31 high bits of `word` divided by the generator.
///
/// Zero for every word that carries a correct CRC, including [`SYNC`] and
/// [`IDLE`].
///
/// [`SYNC`]: crate::consts::SYNC
/// [`IDLE`]: crate::consts::IDLE
pub fn syndrome(word: u32) -> u32 {
    let mut rem = word >> 1;
    for bit in (CRC_BITS..31).rev() {
        if rem & (1 << bit) != 0 {
            rem ^= CRC_GENERATOR << (bit - CRC_BITS);
        }
    }
    rem & CRC_MASK
}
