//! Error type shared by every encoder stage.

/// Errors that can occur while encoding a POCSAG transmission.
///
/// In the default lenient mode only [`Error::InvalidAddress`] and
/// [`Error::BufferFull`] can occur; the remaining variants are reported by
/// [`EncodeMode::Strict`](crate::encoding::EncodeMode::Strict).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Error {
    /// The capcode does not fit the 21-bit address space.
    #[error("capcode {0} exceeds the 21-bit address range")]
    AddressOutOfRange(u64),

    /// The address text (without its function letter) is not a decimal number.
    #[error("address is not a decimal capcode")]
    InvalidAddress,

    /// A batch was requested with no messages in it.
    #[error("message batch is empty")]
    EmptyBatch,

    /// A character has no encoding for the message kind.
    #[error("character {ch:?} at index {index} cannot be encoded")]
    UnmappableCharacter {
        /// The offending character.
        ch: char,
        /// Its position in the message text, in characters.
        index: usize,
    },

    /// The output buffer cannot hold the words or bytes to be written.
    #[error("output buffer full ({needed} needed, {available} available)")]
    BufferFull {
        /// Words (or bytes, when serializing) the operation needs.
        needed: usize,
        /// Space left in the buffer.
        available: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
