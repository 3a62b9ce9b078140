//! Output buffers for encoded words.
//!
//! Every encoder stage appends to a caller-owned [`WordSink`]. With the `std`
//! feature a growable `Vec<u32>` can be used; `heapless::Vec<u32, N>` works in
//! every build and reports [`Error::BufferFull`] once its capacity is spent.

use crate::error::{Error, Result};

/// A growable, append-only sequence of transmission words.
pub trait WordSink {
    /// Appends one word.
    fn push_word(&mut self, word: u32) -> Result<()>;

    /// Number of words currently held.
    fn word_count(&self) -> usize;

    /// Words that can still be appended, or `None` if the sink grows on demand.
    fn remaining(&self) -> Option<usize>;

    /// Checks that `needed` more words fit before anything is appended.
    fn reserve_words(&mut self, needed: usize) -> Result<()> {
        match self.remaining() {
            Some(available) if available < needed => Err(Error::BufferFull { needed, available }),
            _ => Ok(()),
        }
    }

    /// Appends `count` copies of `word`.
    fn push_repeated(&mut self, word: u32, count: usize) -> Result<()> {
        for _ in 0..count {
            self.push_word(word)?;
        }
        Ok(())
    }
}

#[cfg(feature = "std")]
impl WordSink for Vec<u32> {
    fn push_word(&mut self, word: u32) -> Result<()> {
        self.push(word);
        Ok(())
    }

    fn word_count(&self) -> usize {
        self.len()
    }

    fn remaining(&self) -> Option<usize> {
        None
    }

    fn reserve_words(&mut self, needed: usize) -> Result<()> {
        self.reserve(needed);
        Ok(())
    }
}

impl<const N: usize> WordSink for heapless::Vec<u32, N> {
    fn push_word(&mut self, word: u32) -> Result<()> {
        self.push(word).map_err(|_| Error::BufferFull {
            needed: 1,
            available: 0,
        })
    }

    fn word_count(&self) -> usize {
        self.len()
    }

    fn remaining(&self) -> Option<usize> {
        Some(N - self.len())
    }
}
