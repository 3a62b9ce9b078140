//! Batch encoding of several messages into one keyed byte stream.
//!
//! [`encode_tx_batch`] (or [`encode_tx_batch_into`] without `std`) takes a
//! list of [`Message`]s, transmits each of them [`BatchConfig::repeat_count`]
//! times and serializes the resulting words big-endian, four bytes per word,
//! ready to be clocked out to an OOK/FSK transmitter.
//!
//! ## Example
//!
//! ```rust
//! use pocsag::batch::{encode_tx_batch, BatchConfig, Message};
//!
//! let messages = [Message::alphanumeric("1234567", "HELLO WORLD")];
//! let bytes = encode_tx_batch(&messages, &BatchConfig::default()).unwrap();
//! // Two transmissions of two batches each, the first led by the preamble
//! assert_eq!(bytes.len(), (18 + 34 + 34) * 4);
//! ```
//!
//! ## Polarity
//!
//! Target transmitters key the carrier on a `0` bit, so by default every word
//! is complemented before serialization ([`Polarity::Inverted`]).
//! [`Polarity::Direct`] writes the words as they are.

use crate::address::{message_length, Address};
use crate::consts::DEFAULT_REPEAT_COUNT;
use crate::encoding::{check_text, EncodeMode, MessageKind};
use crate::error::{Error, Result};
use crate::sink::WordSink;
use crate::transmission::encode_transmission;

/// One message to page: its kind, textual address and text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Message<'a> {
    /// How the text is packed.
    pub kind: MessageKind,
    /// The capcode, optionally followed by a function letter `A`-`D`.
    pub address: &'a str,
    /// The message body.
    pub text: &'a str,
}

impl<'a> Message<'a> {
    /// Creates a message.
    pub const fn new(kind: MessageKind, address: &'a str, text: &'a str) -> Self {
        Self {
            kind,
            address,
            text,
        }
    }

    /// Creates an alphanumeric message.
    pub const fn alphanumeric(address: &'a str, text: &'a str) -> Self {
        Self::new(MessageKind::Alphanumeric, address, text)
    }

    /// Creates a numeric message.
    pub const fn numeric(address: &'a str, text: &'a str) -> Self {
        Self::new(MessageKind::Numeric, address, text)
    }
}

/// Bit polarity of the serialized byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Polarity {
    /// Every bit is complemented before serialization.
    #[default]
    Inverted,
    /// Words are serialized unchanged.
    Direct,
}

impl Polarity {
    /// Applies the polarity to one word.
    pub const fn apply(self, word: u32) -> u32 {
        match self {
            Polarity::Inverted => !word,
            Polarity::Direct => word,
        }
    }
}

/// Which transmissions of a batch are led by a preamble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum PreamblePolicy {
    /// Only the very first transmission of the whole batch.
    #[default]
    FirstOnly,
    /// The first transmission of every message.
    EveryMessage,
    /// Every transmission, repeats included.
    EveryTransmission,
}

impl PreamblePolicy {
    /// The repeat index handed to the transmission assembler, which sends a
    /// preamble for index 0.
    const fn repeat_index(self, sequence: usize, repeat: usize) -> usize {
        match self {
            PreamblePolicy::FirstOnly => sequence,
            PreamblePolicy::EveryMessage => repeat,
            PreamblePolicy::EveryTransmission => 0,
        }
    }
}

/// Settings for encoding a batch of messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct BatchConfig {
    /// How many times each message is transmitted. Default: 2.
    pub repeat_count: usize,
    /// Polarity of the serialized bytes. Default: [`Polarity::Inverted`].
    pub polarity: Polarity,
    /// Preamble placement. Default: [`PreamblePolicy::FirstOnly`].
    pub preamble: PreamblePolicy,
    /// Input checking. Default: [`EncodeMode::Lenient`].
    pub mode: EncodeMode,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            repeat_count: DEFAULT_REPEAT_COUNT,
            polarity: Polarity::default(),
            preamble: PreamblePolicy::default(),
            mode: EncodeMode::default(),
        }
    }
}

impl BatchConfig {
    /// Sets the number of transmissions per message.
    pub const fn with_repeat_count(mut self, repeat_count: usize) -> Self {
        self.repeat_count = repeat_count;
        self
    }

    /// Sets the output polarity.
    pub const fn with_polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    /// Sets the preamble policy.
    pub const fn with_preamble(mut self, preamble: PreamblePolicy) -> Self {
        self.preamble = preamble;
        self
    }

    /// Sets the input checking mode.
    pub const fn with_mode(mut self, mode: EncodeMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Resolves and checks one message without writing anything.
fn prepare(message: &Message<'_>, mode: EncodeMode) -> Result<Address> {
    let address = Address::parse(message.address, mode)?;
    if let Err(err) = check_text(message.kind, message.text) {
        if mode == EncodeMode::Strict {
            return Err(err);
        }
        warn!("capcode {}: text has unencodable characters, substituting", address.capcode);
    }
    Ok(address)
}

/// Words taken up by all repeats of one message, starting at `sequence`.
fn repeats_length(
    message: &Message<'_>,
    address: &Address,
    config: &BatchConfig,
    sequence: usize,
) -> usize {
    let num_chars = message.text.chars().count();
    (0..config.repeat_count)
        .map(|repeat| {
            let index = config.preamble.repeat_index(sequence + repeat, repeat);
            message_length(message.kind, index, address.capcode, num_chars)
        })
        .sum()
}

/// Predicts the total number of words a batch encodes to.
///
/// # Errors
/// The same address and text errors as [`encode_tx_batch_into`].
pub fn batch_length(messages: &[Message<'_>], config: &BatchConfig) -> Result<usize> {
    if messages.is_empty() && config.mode == EncodeMode::Strict {
        return Err(Error::EmptyBatch);
    }
    let mut total = 0;
    for (i, message) in messages.iter().enumerate() {
        let address = prepare(message, config.mode)?;
        total += repeats_length(message, &address, config, i * config.repeat_count);
    }
    Ok(total)
}

/// Encodes every message of the batch into `sink`.
///
/// Each message is transmitted `config.repeat_count` times. A message whose
/// address or text is rejected, or that does not fit the sink, appends no
/// words; messages before it stay in the sink.
///
/// # Returns
/// The number of words appended.
///
/// # Errors
/// - [`Error::InvalidAddress`] for a non-numeric address
/// - [`Error::AddressOutOfRange`], [`Error::UnmappableCharacter`] and
///   [`Error::EmptyBatch`] in [`EncodeMode::Strict`]
/// - [`Error::BufferFull`] if a fixed-capacity sink runs out
pub fn encode_tx_batch_into<S: WordSink>(
    messages: &[Message<'_>],
    config: &BatchConfig,
    sink: &mut S,
) -> Result<usize> {
    if messages.is_empty() && config.mode == EncodeMode::Strict {
        return Err(Error::EmptyBatch);
    }

    let mut written = 0;
    let mut sequence = 0;
    for message in messages {
        let address = prepare(message, config.mode)?;
        sink.reserve_words(repeats_length(message, &address, config, sequence))?;

        for repeat in 0..config.repeat_count {
            let index = config.preamble.repeat_index(sequence, repeat);
            written += encode_transmission(
                message.kind,
                index,
                address.capcode,
                address.function,
                message.text,
                sink,
            )?;
            sequence += 1;
        }
    }

    debug!(
        "encoded {} messages x{} into {} words",
        messages.len(),
        config.repeat_count,
        written
    );
    Ok(written)
}

/// Serializes `words` big-endian into `out`, applying `polarity`.
///
/// # Returns
/// The number of bytes written.
///
/// # Errors
/// [`Error::BufferFull`] if `out` is shorter than four bytes per word.
pub fn serialize_words(words: &[u32], polarity: Polarity, out: &mut [u8]) -> Result<usize> {
    let needed = words.len() * 4;
    if out.len() < needed {
        return Err(Error::BufferFull {
            needed,
            available: out.len(),
        });
    }
    for (chunk, &word) in out.chunks_exact_mut(4).zip(words) {
        chunk.copy_from_slice(&polarity.apply(word).to_be_bytes());
    }
    Ok(needed)
}

/// Serializes `words` big-endian into a new byte vector, applying `polarity`.
#[cfg(feature = "std")]
pub fn words_to_bytes(words: &[u32], polarity: Polarity) -> Vec<u8> {
    words
        .iter()
        .flat_map(|&word| polarity.apply(word).to_be_bytes())
        .collect()
}

/// Encodes a batch of messages into the byte stream for the transmitter.
///
/// See [`encode_tx_batch_into`] for the encoding and its errors.
#[cfg(feature = "std")]
pub fn encode_tx_batch(messages: &[Message<'_>], config: &BatchConfig) -> Result<Vec<u8>> {
    let mut words: Vec<u32> = Vec::new();
    let _ = encode_tx_batch_into(messages, config, &mut words)?;
    Ok(words_to_bytes(&words, config.polarity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::text_message_length;
    use crate::consts::{PREAMBLE_WORD, SYNC};

    fn preambles(words: &[u32]) -> usize {
        words
            .windows(2)
            .filter(|w| w[0] != PREAMBLE_WORD && w[1] == PREAMBLE_WORD)
            .count()
            + usize::from(words.first() == Some(&PREAMBLE_WORD))
    }

    #[test]
    fn test_sync_word_polarity() {
        assert_eq!(words_to_bytes(&[SYNC], Polarity::Direct), vec![0x7C, 0xD2, 0x15, 0xD8]);
        assert_eq!(words_to_bytes(&[SYNC], Polarity::Inverted), vec![0x83, 0x2D, 0xEA, 0x27]);
    }

    #[test]
    fn test_serialize_words_into_slice() {
        let mut out = [0u8; 8];
        assert_eq!(serialize_words(&[SYNC, 0x0102_0304], Polarity::Direct, &mut out), Ok(8));
        assert_eq!(out, [0x7C, 0xD2, 0x15, 0xD8, 0x01, 0x02, 0x03, 0x04]);

        let mut short = [0u8; 7];
        assert_eq!(
            serialize_words(&[SYNC, SYNC], Polarity::Inverted, &mut short),
            Err(Error::BufferFull {
                needed: 8,
                available: 7
            })
        );
    }

    #[test]
    fn test_default_config() {
        let config = BatchConfig::default();
        assert_eq!(config.repeat_count, 2);
        assert_eq!(config.polarity, Polarity::Inverted);
        assert_eq!(config.preamble, PreamblePolicy::FirstOnly);
        assert_eq!(config.mode, EncodeMode::Lenient);
    }

    #[test]
    fn test_repeats_share_one_preamble() {
        let messages = [Message::alphanumeric("1234567", "HELLO WORLD")];
        let mut words: Vec<u32> = Vec::new();
        let written = encode_tx_batch_into(&messages, &BatchConfig::default(), &mut words).unwrap();

        let first = text_message_length(0, 1234567, 11);
        let second = text_message_length(1, 1234567, 11);
        assert_eq!(written, first + second);
        assert_eq!(words.len(), written);
        assert!(words[..18].iter().all(|&w| w == PREAMBLE_WORD));
        assert_eq!(words[18], SYNC);
        assert_eq!(words[first], SYNC);
        assert_eq!(preambles(&words), 1);
    }

    #[test]
    fn test_one_preamble_across_messages() {
        let messages = [
            Message::alphanumeric("100", "FIRST"),
            Message::numeric("200A", "0123"),
        ];
        let mut words: Vec<u32> = Vec::new();
        let _ = encode_tx_batch_into(&messages, &BatchConfig::default(), &mut words).unwrap();
        assert_eq!(preambles(&words), 1);
        assert_eq!(words.len(), 18 + 4 * 17);
    }

    #[test]
    fn test_preamble_policies() {
        let messages = [
            Message::alphanumeric("100", "FIRST"),
            Message::alphanumeric("200", "SECOND"),
        ];
        let count = |policy| {
            let config = BatchConfig::default()
                .with_repeat_count(3)
                .with_preamble(policy);
            let mut words: Vec<u32> = Vec::new();
            let written = encode_tx_batch_into(&messages, &config, &mut words).unwrap();
            assert_eq!(batch_length(&messages, &config).unwrap(), written);
            preambles(&words)
        };
        assert_eq!(count(PreamblePolicy::FirstOnly), 1);
        assert_eq!(count(PreamblePolicy::EveryMessage), 2);
        assert_eq!(count(PreamblePolicy::EveryTransmission), 6);
    }

    #[test]
    fn test_batch_bytes_are_inverted_words() {
        let messages = [Message::numeric("8", "911")];
        let config = BatchConfig::default().with_repeat_count(1);
        let mut words: Vec<u32> = Vec::new();
        let _ = encode_tx_batch_into(&messages, &config, &mut words).unwrap();

        let bytes = encode_tx_batch(&messages, &config).unwrap();
        assert_eq!(bytes, words_to_bytes(&words, Polarity::Inverted));
        let direct = encode_tx_batch(&messages, &config.with_polarity(Polarity::Direct)).unwrap();
        assert!(bytes.iter().zip(&direct).all(|(a, b)| *a == !*b));
    }

    #[test]
    fn test_empty_batch() {
        let config = BatchConfig::default();
        assert_eq!(encode_tx_batch(&[], &config), Ok(Vec::new()));
        assert_eq!(
            encode_tx_batch(&[], &config.with_mode(EncodeMode::Strict)),
            Err(Error::EmptyBatch)
        );
        assert_eq!(
            batch_length(&[], &config.with_mode(EncodeMode::Strict)),
            Err(Error::EmptyBatch)
        );
    }

    #[test]
    fn test_zero_repeats_writes_nothing() {
        let messages = [Message::alphanumeric("1", "X")];
        let config = BatchConfig::default().with_repeat_count(0);
        assert_eq!(encode_tx_batch(&messages, &config), Ok(Vec::new()));
    }

    #[test]
    fn test_strict_failure_keeps_prior_messages() {
        let config = BatchConfig::default().with_mode(EncodeMode::Strict);
        let good = [Message::alphanumeric("100", "OK")];
        let mut expected: Vec<u32> = Vec::new();
        let _ = encode_tx_batch_into(&good, &config, &mut expected).unwrap();

        for bad in [
            Message::alphanumeric("3000000", "TOO FAR"),
            Message::numeric("200", "12*"),
            Message::alphanumeric("200", "\u{e9}t\u{e9}"),
            Message::alphanumeric("abc", "X"),
        ] {
            let mut words: Vec<u32> = Vec::new();
            let result = encode_tx_batch_into(&[good[0], bad], &config, &mut words);
            assert!(result.is_err());
            assert_eq!(words, expected);
        }
    }

    #[test]
    fn test_strict_errors() {
        let config = BatchConfig::default().with_mode(EncodeMode::Strict);
        assert_eq!(
            encode_tx_batch(&[Message::alphanumeric("2097152", "X")], &config),
            Err(Error::AddressOutOfRange(2_097_152))
        );
        assert_eq!(
            encode_tx_batch(&[Message::numeric("5", "12x")], &config),
            Err(Error::UnmappableCharacter { ch: 'x', index: 2 })
        );
    }

    #[test]
    fn test_lenient_substitutes() {
        let config = BatchConfig::default();
        let lenient = encode_tx_batch(&[Message::numeric("5", "12x")], &config).unwrap();
        let fallback = encode_tx_batch(&[Message::numeric("5", "12?")], &config).unwrap();
        assert_eq!(lenient, fallback);

        let wide = encode_tx_batch(&[Message::alphanumeric("2097157", "X")], &config).unwrap();
        let narrow = encode_tx_batch(&[Message::alphanumeric("5", "X")], &config).unwrap();
        assert_eq!(wide, narrow);
    }

    #[test]
    fn test_fixed_sink_rejects_whole_message() {
        let messages = [
            Message::alphanumeric("0", ""),
            Message::alphanumeric("0", ""),
        ];
        // Room for the first message (35 + 17 words) but not the second
        let mut words: heapless::Vec<u32, 60> = heapless::Vec::new();
        let result = encode_tx_batch_into(&messages, &BatchConfig::default(), &mut words);
        assert_eq!(
            result,
            Err(Error::BufferFull {
                needed: 34,
                available: 8
            })
        );
        assert_eq!(words.len(), 52);
    }
}
