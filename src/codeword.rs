//! Assembly of 32-bit POCSAG codewords.
//!
//! A codeword protects a 21-bit data field with the 10-bit CRC from
//! [`crate::crc`] and a trailing even-parity bit:
//!
//! ```text
//!  31   30 ........ 11   10 ..... 1    0
//! ┌────┬──────────────┬────────────┬────────┐
//! │flag│ data (20)    │ crc (10)   │ parity │
//! └────┴──────────────┴────────────┴────────┘
//! ```
//!
//! `flag = 0` marks an address word, `flag = 1` a message word.

use crate::address::FunctionCode;
use crate::consts::{CRC_BITS, DATA_MASK, FLAG_ADDRESS, FLAG_MESSAGE};
use crate::crc::{crc, parity, syndrome};

/// Encodes a 21-bit data field by appending its CRC and parity bit.
///
/// Bits above the 21-bit field are discarded; callers are expected to pass
/// masked data.
///
/// ```rust
/// use pocsag::codeword::encode_codeword;
///
/// assert_eq!(encode_codeword(0), 0);
/// ```
pub fn encode_codeword(data: u32) -> u32 {
    let data = data & DATA_MASK;
    let full_crc = (data << CRC_BITS) | crc(data);
    (full_crc << 1) | parity(full_crc)
}

/// Builds the address word for `capcode`.
///
/// Only the upper 18 bits of the capcode are carried; the low 3 bits are
/// implied by the frame the word is sent in. The function code fills the last
/// two data bits.
pub fn address_word(capcode: u32, function: FunctionCode) -> u32 {
    encode_codeword(FLAG_ADDRESS | (((capcode & DATA_MASK) >> 3) << 2) | function.bits())
}

/// Builds a message word from 20 payload bits.
pub fn message_word(payload: u32) -> u32 {
    encode_codeword(FLAG_MESSAGE | (payload & (FLAG_MESSAGE - 1)))
}

/// Returns `true` if `word` has correct check bits and even parity.
pub fn is_valid_codeword(word: u32) -> bool {
    syndrome(word) == 0 && parity(word) == 0
}
