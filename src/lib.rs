//! # pocsag
//!
//! A portable, no_std Rust encoder for the POCSAG paging protocol, turning
//! pager messages into the 32-bit words a transmitter keys onto the air.
//!
//! The encoder implements:
//! - BCH(31,21) check bits computed by binary polynomial division, plus even parity
//! - Alphanumeric (7-bit) and numeric (4-bit) payload packing, LSB first
//! - Address-to-frame placement, batch framing with sync and idle words
//! - Exact length prediction for sizing fixed buffers
//! - Batch encoding with repeats, a single leading preamble and big-endian
//!   byte serialization with selectable polarity
//!
//! ## Crate features
//! | Feature          | Description |
//! |------------------|-------------|
//! | `std` (default)  | Enables `Vec`-backed sinks and byte vector output |
//! | `log`            | Uses `log` logging |
//! | `defmt-0-3`      | Uses `defmt` logging and derives `defmt::Format` |
//!
//! Without `std`, words are collected into a `heapless::Vec<u32, N>`.
//!
//! ## Usage
//!
//! ```rust
//! use pocsag::batch::{encode_tx_batch, BatchConfig, Message};
//!
//! let messages = [
//!     Message::alphanumeric("1234567", "HELLO WORLD"),
//!     Message::numeric("1234560A", "0123-456"),
//! ];
//! let bytes = encode_tx_batch(&messages, &BatchConfig::default()).unwrap();
//! assert_eq!(bytes.len() % 4, 0);
//! ```
//!
//! Or encode a single transmission into a fixed buffer:
//!
//! ```rust
//! use pocsag::address::{text_message_length, FunctionCode};
//! use pocsag::encoding::MessageKind;
//! use pocsag::transmission::encode_transmission;
//!
//! let mut words: pocsag::heapless::Vec<u32, 128> = pocsag::heapless::Vec::new();
//! let written = encode_transmission(
//!     MessageKind::Alphanumeric,
//!     0,
//!     1234567,
//!     FunctionCode::D,
//!     "HELLO",
//!     &mut words,
//! )
//! .unwrap();
//! assert_eq!(written, text_message_length(0, 1234567, 5));
//! ```
//!
//! ## Integration Notes
//!
//! - The encoder performs no I/O; keying the words onto a radio is up to the caller
//! - All functions are pure and may run concurrently on independent buffers
//! - By default input is handled leniently (truncated capcodes, substituted
//!   characters); [`encoding::EncodeMode::Strict`] rejects such input instead

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

pub use heapless;

#[macro_use]
mod fmt;

pub mod address;
pub mod batch;
pub mod codeword;
pub mod consts;
pub mod crc;
pub mod encoding;
pub mod error;
pub mod sink;
pub mod transmission;

pub use address::{Address, FunctionCode};
pub use batch::{BatchConfig, Message, Polarity, PreamblePolicy};
#[cfg(feature = "std")]
pub use batch::encode_tx_batch;
pub use encoding::{EncodeMode, MessageKind};
pub use error::{Error, Result};
pub use sink::WordSink;
