//! Constants used across the POCSAG encoder.
//!
//! This module defines the fixed wire words, framing sizes, field widths and
//! the CRC generator of the POCSAG paging protocol.
//!
//! ## Key Concepts
//!
//! - **Sync word**: starts every batch of 16 words.
//! - **Idle word**: pads frames before an address word and marks the end of a
//!   message. It is an address-flagged word that no pager is assigned to.
//! - **Preamble**: alternating `1,0,1,0...` bits sent before the first batch so
//!   the receiver can lock onto the bit clock.
//! - **Codeword layout**: `flag(1) | data(20) | crc(10) | parity(1)`.
//!
//! These values should be used wherever framing or length logic is implemented
//! so that predicted lengths and encoded output stay in lockstep.

/// The sync word transmitted at the start of every batch.
pub const SYNC: u32 = 0x7CD2_15D8;

/// The idle word used as padding and as the end-of-message marker.
///
/// Both the idle word and the sync word carry valid check bits, so receivers
/// recognise them by value rather than by a CRC failure.
pub const IDLE: u32 = 0x7A89_C197;

/// One 32-bit slice of the preamble's alternating bit pattern.
pub const PREAMBLE_WORD: u32 = 0xAAAA_AAAA;

/// Length of the preamble in bits.
pub const PREAMBLE_LENGTH: usize = 576;

/// Length of the preamble in words.
pub const PREAMBLE_WORDS: usize = PREAMBLE_LENGTH / 32;

/// One frame consists of a pair of words.
pub const FRAME_SIZE: usize = 2;

/// One batch consists of 8 frames, 16 words (not counting its sync word).
pub const BATCH_SIZE: usize = 16;

/// First bit of an address word's 21-bit data field.
pub const FLAG_ADDRESS: u32 = 0x00_0000;

/// First bit of a message word's 21-bit data field.
pub const FLAG_MESSAGE: u32 = 0x10_0000;

/// Payload bits carried by one alphanumeric message word.
pub const TEXT_BITS_PER_WORD: usize = 20;

/// Characters are 7-bit ASCII.
pub const TEXT_BITS_PER_CHAR: usize = 7;

/// Payload bits carried by one numeric message word.
pub const NUMERIC_BITS_PER_WORD: usize = 20;

/// Numeric characters are 4-bit codes.
pub const NUMERIC_BITS_PER_DIGIT: usize = 4;

/// Length of CRC codes in bits.
pub const CRC_BITS: u32 = 10;

/// The CRC generator polynomial, `x^10 + x^9 + x^8 + x^6 + x^5 + x^3 + 1`.
pub const CRC_GENERATOR: u32 = 0b111_0110_1001;

/// Width of a codeword's data field (flag + 20 payload bits).
pub const DATA_BITS: u32 = 21;

/// Mask selecting a codeword's 21-bit data field.
pub const DATA_MASK: u32 = (1 << DATA_BITS) - 1;

/// Largest capcode representable in 21 bits.
pub const MAX_CAPCODE: u32 = DATA_MASK;

/// Number of times each message is transmitted unless configured otherwise.
pub const DEFAULT_REPEAT_COUNT: usize = 2;
