//! Payload packing for alphanumeric and numeric messages.
//!
//! This module packs message text into the 20 payload bits of consecutive
//! message codewords.
//!
//! ## Bit Order
//!
//! Characters are written least-significant bit first: the most significant
//! payload bit of a word carries the least significant bit of the first
//! character that lands in it. Characters are split across words so that every
//! payload bit is used.
//!
//! - **Alphanumeric**: 7-bit ASCII, 7 bits per character.
//! - **Numeric**: 4-bit codes from a fixed table, 4 bits per character.
//!
//! ## Batches
//!
//! The packers know where in the current 16-word batch they start writing and
//! insert a [`SYNC`] word each time a batch fills. The word counts they return
//! include those sync words.
//!
//! ## Functions
//!
//! - [`encode_alphanumeric`]: packs 7-bit characters
//! - [`encode_numeric`]: packs 4-bit numeric codes
//! - [`encode_digit`]: looks up the numeric code of one character
//! - [`check_text`]: strict check that every character has an encoding

use crate::codeword::message_word;
use crate::consts::{
    BATCH_SIZE, NUMERIC_BITS_PER_DIGIT, NUMERIC_BITS_PER_WORD, SYNC, TEXT_BITS_PER_CHAR,
    TEXT_BITS_PER_WORD,
};
use crate::error::{Error, Result};
use crate::sink::WordSink;

/// The kind of payload a message carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum MessageKind {
    /// 7-bit ASCII text.
    #[default]
    Alphanumeric,
    /// Digits and a handful of symbols, 4 bits each.
    Numeric,
}

impl MessageKind {
    /// Bits each character occupies on the air.
    pub const fn bits_per_char(self) -> usize {
        match self {
            MessageKind::Alphanumeric => TEXT_BITS_PER_CHAR,
            MessageKind::Numeric => NUMERIC_BITS_PER_DIGIT,
        }
    }

    /// Payload bits carried by one message word.
    pub const fn bits_per_word(self) -> usize {
        match self {
            MessageKind::Alphanumeric => TEXT_BITS_PER_WORD,
            MessageKind::Numeric => NUMERIC_BITS_PER_WORD,
        }
    }
}

/// How strictly input outside the protocol's ranges is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum EncodeMode {
    /// Truncate oversized capcodes and substitute unmappable characters.
    #[default]
    Lenient,
    /// Reject oversized capcodes, unmappable characters and empty batches.
    Strict,
}

/// Numeric codes for the digits `0`-`9`, before bit reversal.
static DIGITS: [u8; 10] = [
    0x00, 0x08, 0x04, 0x0c, 0x02, 0x0a, 0x06, 0x0e, 0x01, 0x09,
];

const SPACE_CODE: u8 = 0x03;
const URGENT_CODE: u8 = 0x0d;
const HYPHEN_CODE: u8 = 0x0b;
const OPEN_BRACKET_CODE: u8 = 0x0f;
const CLOSE_BRACKET_CODE: u8 = 0x07;
const FALLBACK_CODE: u8 = 0x05;

fn numeric_code(ch: char) -> Option<u8> {
    match ch {
        '0'..='9' => Some(DIGITS[ch as usize - '0' as usize]),
        ' ' => Some(SPACE_CODE),
        'U' | 'u' => Some(URGENT_CODE),
        '-' | '_' => Some(HYPHEN_CODE),
        '(' | '[' => Some(OPEN_BRACKET_CODE),
        ')' | ']' => Some(CLOSE_BRACKET_CODE),
        _ => None,
    }
}

/// Returns the 4-bit numeric code for `ch`.
///
/// Characters without a numeric representation map to `0x05`.
///
/// ```rust
/// use pocsag::encoding::{encode_digit, reverse_nibble};
///
/// assert_eq!(encode_digit('5'), 0x0a);
/// assert_eq!(reverse_nibble(encode_digit('5')), 5);
/// ```
pub fn encode_digit(ch: char) -> u8 {
    numeric_code(ch).unwrap_or(FALLBACK_CODE)
}

/// Reverses the low four bits of `n` (bit 0 ↔ bit 3, bit 1 ↔ bit 2).
pub const fn reverse_nibble(n: u8) -> u8 {
    ((n & 1) << 3) | ((n & 2) << 1) | ((n & 4) >> 1) | ((n & 8) >> 3)
}

/// Checks that every character of `text` has an encoding for `kind`.
///
/// Alphanumeric text must be ASCII; numeric text may only contain digits,
/// space, `U`/`u`, `-`/`_` and round or square brackets.
pub fn check_text(kind: MessageKind, text: &str) -> Result<()> {
    let encodable = |ch: char| match kind {
        MessageKind::Alphanumeric => ch.is_ascii(),
        MessageKind::Numeric => numeric_code(ch).is_some(),
    };
    match text.chars().enumerate().find(|&(_, ch)| !encodable(ch)) {
        Some((index, ch)) => Err(Error::UnmappableCharacter { ch, index }),
        None => Ok(()),
    }
}

/// Accumulates payload bits into message words and tracks the batch position.
struct WordPacker<'a, S: WordSink> {
    sink: &'a mut S,
    bits_per_word: usize,
    current_word: u32,
    current_bits: usize,
    position: usize,
    written: usize,
}

impl<'a, S: WordSink> WordPacker<'a, S> {
    fn new(sink: &'a mut S, initial_offset: usize, bits_per_word: usize) -> Self {
        Self {
            sink,
            bits_per_word,
            current_word: 0,
            current_bits: 0,
            position: initial_offset,
            written: 0,
        }
    }

    /// Writes the low `count` bits of `value`, bit 0 first.
    fn push_bits_lsb_first(&mut self, value: u32, count: usize) -> Result<()> {
        for i in 0..count {
            self.current_word = (self.current_word << 1) | ((value >> i) & 1);
            self.current_bits += 1;
            if self.current_bits == self.bits_per_word {
                self.emit()?;
            }
        }
        Ok(())
    }

    fn emit(&mut self) -> Result<()> {
        self.sink.push_word(message_word(self.current_word))?;
        self.current_word = 0;
        self.current_bits = 0;
        self.written += 1;

        self.position += 1;
        if self.position == BATCH_SIZE {
            trace!("batch filled after {} payload words, inserting sync", self.written);
            self.sink.push_word(SYNC)?;
            self.written += 1;
            self.position = 0;
        }
        Ok(())
    }

    /// Pads and writes any partial word, returning the total words written.
    fn finish(mut self) -> Result<usize> {
        if self.current_bits > 0 {
            self.current_word <<= self.bits_per_word - self.current_bits;
            self.emit()?;
        }
        Ok(self.written)
    }
}

/// Packs `text` as 7-bit characters into message words appended to `sink`.
///
/// `initial_offset` is the position within the current batch of the first
/// word written, so that sync words land where they belong. Only the low 7
/// bits of each character are sent.
///
/// # Returns
/// The number of words written, including inserted sync words.
pub fn encode_alphanumeric<S: WordSink>(
    initial_offset: usize,
    text: &str,
    sink: &mut S,
) -> Result<usize> {
    let mut packer = WordPacker::new(sink, initial_offset, TEXT_BITS_PER_WORD);
    for ch in text.chars() {
        packer.push_bits_lsb_first(ch as u32, TEXT_BITS_PER_CHAR)?;
    }
    packer.finish()
}

/// Packs `text` as 4-bit numeric codes into message words appended to `sink`.
///
/// Each character is looked up with [`encode_digit`] and the code is
/// bit-reversed before being written least-significant bit first.
///
/// # Returns
/// The number of words written, including inserted sync words.
pub fn encode_numeric<S: WordSink>(
    initial_offset: usize,
    text: &str,
    sink: &mut S,
) -> Result<usize> {
    let mut packer = WordPacker::new(sink, initial_offset, NUMERIC_BITS_PER_WORD);
    for ch in text.chars() {
        let digit = reverse_nibble(encode_digit(ch));
        packer.push_bits_lsb_first(u32::from(digit), NUMERIC_BITS_PER_DIGIT)?;
    }
    packer.finish()
}

/// Packs `text` with the packer matching `kind`.
pub fn encode_payload<S: WordSink>(
    kind: MessageKind,
    initial_offset: usize,
    text: &str,
    sink: &mut S,
) -> Result<usize> {
    match kind {
        MessageKind::Alphanumeric => encode_alphanumeric(initial_offset, text, sink),
        MessageKind::Numeric => encode_numeric(initial_offset, text, sink),
    }
}
