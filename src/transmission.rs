//! Framing of a single POCSAG transmission.
//!
//! A transmission carries one message to one pager:
//!
//! ```text
//! [preamble × 18] SYNC [IDLE × offset] ADDRESS [payload ...] IDLE [IDLE padding]
//!                 └──────────── multiple of 17 words (16 + SYNC) ────────────┘
//! ```
//!
//! The preamble is only sent for `repeat_index == 0`. Payload words that cross
//! a batch boundary are preceded by a fresh sync word, inserted by the packers
//! in [`crate::encoding`].

use crate::address::{address_offset, message_length, FunctionCode};
use crate::codeword::address_word;
use crate::consts::{BATCH_SIZE, IDLE, PREAMBLE_WORD, PREAMBLE_WORDS, SYNC};
use crate::encoding::{encode_payload, MessageKind};
use crate::error::Result;
use crate::sink::WordSink;

/// Appends one complete transmission of `text` to `sink`.
///
/// In order, this writes:
/// 1. the preamble, if `repeat_index == 0`
/// 2. a sync word
/// 3. idle words up to the address's frame
/// 4. the address word (capcode bits 3-20 and `function`)
/// 5. the packed payload
/// 6. one idle word marking the end of the message
/// 7. idle words completing the last batch
///
/// Inputs are not validated. The predicted length of the transmission is
/// reserved up front, so a fixed-capacity sink that is too small is left
/// untouched.
///
/// # Returns
/// The number of words appended.
///
/// # Errors
/// [`Error::BufferFull`](crate::error::Error::BufferFull) if `sink` cannot
/// hold the transmission.
///
/// ```rust
/// use pocsag::address::FunctionCode;
/// use pocsag::encoding::MessageKind;
/// use pocsag::transmission::encode_transmission;
///
/// let mut words: pocsag::heapless::Vec<u32, 64> = pocsag::heapless::Vec::new();
/// let written =
///     encode_transmission(MessageKind::Alphanumeric, 0, 0, FunctionCode::A, "", &mut words)
///         .unwrap();
/// assert_eq!(written, 35);
/// ```
pub fn encode_transmission<S: WordSink>(
    kind: MessageKind,
    repeat_index: usize,
    capcode: u32,
    function: FunctionCode,
    text: &str,
    sink: &mut S,
) -> Result<usize> {
    let expected = message_length(kind, repeat_index, capcode, text.chars().count());
    sink.reserve_words(expected)?;

    debug!(
        "encoding transmission: capcode {}, function {}, repeat {}, {} words",
        capcode,
        function.bits(),
        repeat_index,
        expected
    );

    // Alternating 1,0,1,0 bits for the receiver to synchronise with
    let mut out = 0;
    if repeat_index == 0 {
        sink.push_repeated(PREAMBLE_WORD, PREAMBLE_WORDS)?;
        out += PREAMBLE_WORDS;
    }
    let start = out;

    sink.push_word(SYNC)?;
    out += 1;

    let prefix_length = address_offset(capcode);
    sink.push_repeated(IDLE, prefix_length)?;
    out += prefix_length;

    // The low 3 bits of the capcode are carried by the frame position
    sink.push_word(address_word(capcode, function))?;
    out += 1;

    out += encode_payload(kind, prefix_length + 1, text, sink)?;

    sink.push_word(IDLE)?;
    out += 1;

    // Pad to a multiple of BATCH_SIZE + 1 words, the + 1 being the sync word
    let written = out - start;
    let padding = (BATCH_SIZE + 1) - written % (BATCH_SIZE + 1);
    sink.push_repeated(IDLE, padding)?;
    out += padding;

    Ok(out)
}
