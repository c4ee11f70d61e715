//! Codec configuration and per-stream scratch state.
//!
//! A [`CompressState`] / [`DecompressState`] carries the match history of
//! one logical stream: the trailing window of uncompressed bytes that the
//! next packet may reference.  A fresh state is empty (the equivalent of a
//! zero-initialised scratch buffer); the codec appends each block it
//! processes, and the caller must not touch it between packets.  Unrelated
//! streams need separate states, or a [`reset`](CompressState::reset) in
//! between, so history never leaks from one stream into another.

use crate::config::{COMPRESSION_LEVEL, STREAMING_BUFFER};
use crate::error::{Error, Result};

/// Largest back-reference distance the block codec can express.
pub const MAX_HISTORY: usize = 64 * 1024;

// ─────────────────────────────────────────────────────────────────────────────
// Codec configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Level and streaming-buffer size shared by a producer and its consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    level: u8,
    streaming_buffer: usize,
}

impl CodecConfig {
    /// The compile-time configuration from [`crate::config`].
    pub const DEFAULT: CodecConfig = CodecConfig {
        level: COMPRESSION_LEVEL,
        streaming_buffer: STREAMING_BUFFER,
    };

    /// Builds a configuration, rejecting levels outside `1..=3` and a zero
    /// streaming buffer.
    pub fn new(level: u8, streaming_buffer: usize) -> Result<Self> {
        if !(1..=3).contains(&level) {
            return Err(Error::InvalidConfig(format!(
                "compression level must be 1, 2 or 3 (got {level})"
            )));
        }
        if streaming_buffer == 0 {
            return Err(Error::InvalidConfig(
                "streaming buffer must be non-zero".to_owned(),
            ));
        }
        Ok(CodecConfig {
            level,
            streaming_buffer,
        })
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn streaming_buffer(&self) -> usize {
        self.streaming_buffer
    }

    /// Two-bit class recorded in packet headers for the streaming buffer.
    pub fn stream_class(&self) -> u8 {
        match self.streaming_buffer {
            0 => 0,
            1..=100_000 => 1,
            100_001..=1_000_000 => 2,
            _ => 3,
        }
    }

    /// Bytes of history carried from one packet to the next.
    ///
    /// Level 1 keeps 16 KiB, level 2 32 KiB, level 3 64 KiB, never more than
    /// the streaming buffer.
    pub fn history_window(&self) -> usize {
        let by_level = (16 * 1024usize) << (self.level.saturating_sub(1));
        by_level.min(MAX_HISTORY).min(self.streaming_buffer)
    }

    /// File suffix tagging streams produced with this level (`.qz3`).
    pub fn suffix(&self) -> String {
        format!(".qz{}", self.level)
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig::DEFAULT
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// History window
// ─────────────────────────────────────────────────────────────────────────────

/// Sliding window over the most recent uncompressed bytes of a stream.
#[derive(Debug, Clone)]
struct History {
    window: usize,
    bytes: Vec<u8>,
}

impl History {
    fn new(window: usize) -> Self {
        History {
            window,
            bytes: Vec::with_capacity(window),
        }
    }

    fn absorb(&mut self, block: &[u8]) {
        if block.len() >= self.window {
            self.bytes.clear();
            self.bytes.extend_from_slice(&block[block.len() - self.window..]);
            return;
        }
        let keep = self.window - block.len();
        if self.bytes.len() > keep {
            let excess = self.bytes.len() - keep;
            self.bytes.drain(..excess);
        }
        self.bytes.extend_from_slice(block);
    }

    fn clear(&mut self) {
        self.bytes.clear();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scratch states
// ─────────────────────────────────────────────────────────────────────────────

/// Compression-side scratch state for one stream.
#[derive(Debug, Clone)]
pub struct CompressState {
    config: CodecConfig,
    history: History,
    packets: u64,
}

impl CompressState {
    /// A zeroed state for `config`.
    pub fn new(config: CodecConfig) -> Self {
        CompressState {
            config,
            history: History::new(config.history_window()),
            packets: 0,
        }
    }

    pub fn config(&self) -> CodecConfig {
        self.config
    }

    /// Number of packets compressed with this state.
    pub fn packets(&self) -> u64 {
        self.packets
    }

    /// Clears the history so the state can serve an unrelated stream.
    pub fn reset(&mut self) {
        self.history.clear();
        self.packets = 0;
    }

    pub(crate) fn dictionary(&self) -> &[u8] {
        &self.history.bytes
    }

    pub(crate) fn absorb(&mut self, block: &[u8]) {
        self.history.absorb(block);
        self.packets += 1;
    }
}

impl Default for CompressState {
    fn default() -> Self {
        CompressState::new(CodecConfig::DEFAULT)
    }
}

/// Decompression-side scratch state for one stream.
#[derive(Debug, Clone)]
pub struct DecompressState {
    config: CodecConfig,
    history: History,
    packets: u64,
}

impl DecompressState {
    /// A zeroed state for `config`.
    pub fn new(config: CodecConfig) -> Self {
        DecompressState {
            config,
            history: History::new(config.history_window()),
            packets: 0,
        }
    }

    pub fn config(&self) -> CodecConfig {
        self.config
    }

    /// Number of packets decompressed with this state.
    pub fn packets(&self) -> u64 {
        self.packets
    }

    /// Clears the history so the state can serve an unrelated stream.
    pub fn reset(&mut self) {
        self.history.clear();
        self.packets = 0;
    }

    pub(crate) fn dictionary(&self) -> &[u8] {
        &self.history.bytes
    }

    pub(crate) fn absorb(&mut self, block: &[u8]) {
        self.history.absorb(block);
        self.packets += 1;
    }
}

impl Default for DecompressState {
    fn default() -> Self {
        DecompressState::new(CodecConfig::DEFAULT)
    }
}
