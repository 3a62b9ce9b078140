//! Pager addresses, frame placement and transmission length prediction.
//!
//! A capcode is 21 bits wide, but only its upper 18 bits travel inside the
//! address word. The remaining 3 bits select which of the 8 frames of a batch
//! the address word is sent in; the frames before it are filled with idle
//! words.
//!
//! Textual addresses may carry a trailing function letter `A`-`D`
//! (e.g. `"1234567B"`) selecting the 2-bit function code. Without a letter the
//! function code is 3 (`D`), the conventional code for alphanumeric pages.

use core::fmt;
use core::str::FromStr;

use crate::codeword::address_word;
use crate::consts::{BATCH_SIZE, FRAME_SIZE, MAX_CAPCODE, PREAMBLE_WORDS};
use crate::encoding::{EncodeMode, MessageKind};
use crate::error::{Error, Result};

/// The 2-bit function code carried in an address word.
///
/// Pagers use it to pick an alert or a message format; its meaning is up to
/// the receiving device. By convention `A` (0) marks numeric data and `D` (3)
/// alphanumeric data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum FunctionCode {
    /// Function code 0.
    A = 0,
    /// Function code 1.
    B = 1,
    /// Function code 2.
    C = 2,
    /// Function code 3, used when an address has no function letter.
    #[default]
    D = 3,
}

impl FunctionCode {
    const ALL: [FunctionCode; 4] = [
        FunctionCode::A,
        FunctionCode::B,
        FunctionCode::C,
        FunctionCode::D,
    ];

    /// The code's value as placed in the address word.
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Builds a function code from the low two bits of `bits`.
    pub const fn from_bits(bits: u32) -> Self {
        match bits & 0x3 {
            0 => FunctionCode::A,
            1 => FunctionCode::B,
            2 => FunctionCode::C,
            _ => FunctionCode::D,
        }
    }

    /// The suffix letter naming this code in a textual address.
    pub const fn letter(self) -> char {
        match self {
            FunctionCode::A => 'A',
            FunctionCode::B => 'B',
            FunctionCode::C => 'C',
            FunctionCode::D => 'D',
        }
    }
}

/// Splits a textual address into its numeric part and function code.
///
/// The letters `A`, `B`, `C` and `D` are looked for in that order; the first
/// one found after the start of the text ends the numeric part. Without such a
/// letter the whole text is numeric and the function code is [`FunctionCode::D`].
///
/// ```rust
/// use pocsag::address::{parse_address, FunctionCode};
///
/// assert_eq!(parse_address("1234567B"), ("1234567", FunctionCode::B));
/// assert_eq!(parse_address("1234567"), ("1234567", FunctionCode::D));
/// ```
pub fn parse_address(text: &str) -> (&str, FunctionCode) {
    for function in FunctionCode::ALL {
        if let Some(index) = text.find(function.letter()) {
            if index > 0 {
                return (&text[..index], function);
            }
        }
    }
    (text, FunctionCode::D)
}

/// Number of idle words that precede the address word within its batch.
///
/// This is twice the frame number held in the low 3 bits of the capcode.
pub const fn address_offset(capcode: u32) -> usize {
    (capcode & 0x7) as usize * FRAME_SIZE
}

/// Predicts the number of words one transmission of a message occupies.
///
/// Counts the idle words before the address word, the address word, the
/// packed payload, the terminating idle word, the idle padding that completes
/// the last batch, one sync word per batch and, for `repeat_index == 0`, the
/// preamble. This always equals the number of words
/// [`encode_transmission`](crate::transmission::encode_transmission) appends
/// for the same inputs.
pub fn message_length(
    kind: MessageKind,
    repeat_index: usize,
    capcode: u32,
    num_chars: usize,
) -> usize {
    let mut num_words = address_offset(capcode);

    // Address word
    num_words += 1;

    num_words += (num_chars * kind.bits_per_char()).div_ceil(kind.bits_per_word());

    // Terminating idle
    num_words += 1;

    // Padding always adds at least one word, as the assembler does
    num_words += BATCH_SIZE - num_words % BATCH_SIZE;

    // One sync word per batch
    num_words += num_words / BATCH_SIZE;

    // Added last so it doesn't skew the batch arithmetic
    if repeat_index == 0 {
        num_words += PREAMBLE_WORDS;
    }

    num_words
}

/// Predicts the length in words of an alphanumeric transmission.
pub fn text_message_length(repeat_index: usize, capcode: u32, num_chars: usize) -> usize {
    message_length(MessageKind::Alphanumeric, repeat_index, capcode, num_chars)
}

/// Predicts the length in words of a numeric transmission.
pub fn numeric_message_length(repeat_index: usize, capcode: u32, num_chars: usize) -> usize {
    message_length(MessageKind::Numeric, repeat_index, capcode, num_chars)
}

/// A resolved pager address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Address {
    /// The 21-bit capcode.
    pub capcode: u32,
    /// The function code sent in the address word.
    pub function: FunctionCode,
}

impl Address {
    /// Creates an address, keeping only the low 21 bits of `capcode`.
    pub const fn new(capcode: u32, function: FunctionCode) -> Self {
        Self {
            capcode: capcode & MAX_CAPCODE,
            function,
        }
    }

    /// Parses a textual address such as `"1234567"` or `"1234567A"`.
    ///
    /// Whitespace around the number is ignored. In
    /// [`EncodeMode::Lenient`] a capcode wider than 21 bits silently loses its
    /// high bits; [`EncodeMode::Strict`] rejects it with
    /// [`Error::AddressOutOfRange`].
    ///
    /// # Errors
    /// [`Error::InvalidAddress`] if the numeric part is not a decimal number.
    pub fn parse(text: &str, mode: EncodeMode) -> Result<Self> {
        let (number, function) = parse_address(text);
        let raw: u64 = number.trim().parse().map_err(|_| Error::InvalidAddress)?;

        if raw > u64::from(MAX_CAPCODE) {
            if mode == EncodeMode::Strict {
                return Err(Error::AddressOutOfRange(raw));
            }
            warn!("capcode {} exceeds 21 bits, truncating", raw);
        }

        Ok(Self {
            capcode: (raw & u64::from(MAX_CAPCODE)) as u32,
            function,
        })
    }

    /// Idle words preceding this address's address word.
    pub const fn offset(&self) -> usize {
        address_offset(self.capcode)
    }

    /// The frame (0-7) this address is sent in.
    pub const fn frame(&self) -> u32 {
        self.capcode & 0x7
    }

    /// The encoded address word.
    pub fn word(&self) -> u32 {
        address_word(self.capcode, self.function)
    }
}

impl FromStr for Address {
    type Err = Error;

    /// Parses in [`EncodeMode::Strict`].
    fn from_str(s: &str) -> Result<Self> {
        Address::parse(s, EncodeMode::Strict)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.capcode, self.function.letter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_offset() {
        assert_eq!(address_offset(0), 0);
        assert_eq!(address_offset(1), 2);
        assert_eq!(address_offset(1234567), 14);
        for capcode in [8, 9, 15, 2_000_000, MAX_CAPCODE] {
            assert_eq!(address_offset(capcode), (capcode as usize & 7) * 2);
        }
    }

    #[test]
    fn test_parse_address_letters() {
        assert_eq!(parse_address("1234A"), ("1234", FunctionCode::A));
        assert_eq!(parse_address("1234B"), ("1234", FunctionCode::B));
        assert_eq!(parse_address("1234C"), ("1234", FunctionCode::C));
        assert_eq!(parse_address("1234D"), ("1234", FunctionCode::D));
        assert_eq!(parse_address("1234"), ("1234", FunctionCode::D));
        assert_eq!(parse_address(""), ("", FunctionCode::D));
    }

    #[test]
    fn test_parse_address_leading_letter_is_ignored() {
        assert_eq!(parse_address("A1234"), ("A1234", FunctionCode::D));
        assert_eq!(parse_address("A12C"), ("A12", FunctionCode::C));
    }

    #[test]
    fn test_parse_address_letter_priority() {
        // 'A' is looked for before 'B', regardless of position
        assert_eq!(parse_address("12B34A"), ("12B34", FunctionCode::A));
        assert_eq!(parse_address("12B34"), ("12", FunctionCode::B));
    }

    #[test]
    fn test_address_parse_modes() {
        let addr = Address::parse("1234567B", EncodeMode::Strict).unwrap();
        assert_eq!(addr.capcode, 1234567);
        assert_eq!(addr.function, FunctionCode::B);
        assert_eq!(addr.frame(), 7);
        assert_eq!(addr.offset(), 14);

        let addr = Address::parse(" 42 ", EncodeMode::Lenient).unwrap();
        assert_eq!(addr, Address::new(42, FunctionCode::D));

        assert_eq!(
            Address::parse("2097152", EncodeMode::Strict),
            Err(Error::AddressOutOfRange(2_097_152))
        );
        let wrapped = Address::parse("2097153", EncodeMode::Lenient).unwrap();
        assert_eq!(wrapped.capcode, 1);
    }

    #[test]
    fn test_address_parse_rejects_non_numeric() {
        assert_eq!(
            Address::parse("pager", EncodeMode::Lenient),
            Err(Error::InvalidAddress)
        );
        assert_eq!(
            Address::parse("", EncodeMode::Lenient),
            Err(Error::InvalidAddress)
        );
        assert_eq!(
            Address::parse("A100", EncodeMode::Lenient),
            Err(Error::InvalidAddress)
        );
        assert_eq!("12x".parse::<Address>(), Err(Error::InvalidAddress));
    }

    #[test]
    fn test_address_display_and_from_str() {
        let addr: Address = "8C".parse().unwrap();
        assert_eq!(addr, Address::new(8, FunctionCode::C));
        assert_eq!(addr.to_string(), "8C");
        assert_eq!(Address::new(77, FunctionCode::default()).to_string(), "77D");
    }

    #[test]
    fn test_function_code_bits() {
        for function in FunctionCode::ALL {
            assert_eq!(FunctionCode::from_bits(function.bits()), function);
        }
        assert_eq!(FunctionCode::from_bits(6), FunctionCode::C);
    }

    #[test]
    fn test_address_word_fields() {
        let addr = Address::new(1234567, FunctionCode::A);
        assert_eq!((addr.word() >> 13) & 0x3_FFFF, 1234567 >> 3);
        assert_eq!((addr.word() >> 11) & 0x3, 0);
    }

    #[test]
    fn test_message_lengths() {
        // Preamble + one padded batch
        assert_eq!(text_message_length(0, 0, 0), 35);
        assert_eq!(text_message_length(1, 0, 0), 17);
        // 14 idles + address + idle land exactly on 16 and pad a whole batch
        assert_eq!(text_message_length(1, 7, 0), 34);
        // "HELLO" is 35 bits, 2 words
        assert_eq!(text_message_length(1, 0, 5), 17);
        // 13 numeric words + address + idle = 15
        assert_eq!(numeric_message_length(1, 0, 65), 17);
        assert_eq!(numeric_message_length(1, 0, 70), 34);
        assert_eq!(numeric_message_length(0, 0, 70), 52);
    }
}
