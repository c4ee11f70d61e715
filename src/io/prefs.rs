// prefs.rs: runtime preferences for the stream and file layers.
//
// The codec configuration itself is fixed at build time (see config.rs);
// `Prefs` carries it alongside the knobs that do not affect the wire format
// and so may differ between producer and consumer.

use crate::config::{MAX_BLOCK_SIZE_LIMIT, MAX_BUF_SIZE};
use crate::error::{Error, Result};
use crate::packet::CodecConfig;

/// What to do with the remaining file arguments after one of them fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Report the failure and move on to the next file.
    #[default]
    Continue,
    /// Report the failure and skip every remaining file.
    Abort,
}

/// Tunable parameters for compression, decompression, and file handling.
#[derive(Clone, Debug)]
pub struct Prefs {
    /// Level and streaming buffer; must match between producer and consumer.
    pub codec: CodecConfig,
    /// Largest input chunk turned into one packet. Default: 1 MiB.
    pub block_size: usize,
    /// Multi-file failure policy. Default: continue.
    pub error_policy: ErrorPolicy,
    /// Leave the temporary file in place when a transaction fails. Default: false.
    pub keep_failed_temp: bool,
    /// Copy permissions, ownership, and mtime from source to output. Default: true.
    pub preserve_file_stat: bool,
}

impl Default for Prefs {
    fn default() -> Self {
        Prefs {
            codec: CodecConfig::DEFAULT,
            block_size: MAX_BUF_SIZE,
            error_policy: ErrorPolicy::Continue,
            keep_failed_temp: false,
            preserve_file_stat: true,
        }
    }
}

impl Prefs {
    /// Sets the block bound, rejecting zero and anything above
    /// [`MAX_BLOCK_SIZE_LIMIT`].  Returns the value stored.
    pub fn set_block_size(&mut self, block_size: usize) -> Result<usize> {
        if block_size == 0 || block_size > MAX_BLOCK_SIZE_LIMIT {
            return Err(Error::InvalidConfig(format!(
                "block size must be between 1 and {MAX_BLOCK_SIZE_LIMIT} bytes (got {block_size})"
            )));
        }
        self.block_size = block_size;
        Ok(block_size)
    }

    pub fn set_error_policy(&mut self, policy: ErrorPolicy) -> ErrorPolicy {
        self.error_policy = policy;
        policy
    }

    pub fn set_keep_failed_temp(&mut self, keep: bool) -> bool {
        self.keep_failed_temp = keep;
        keep
    }

    pub fn set_preserve_file_stat(&mut self, preserve: bool) -> bool {
        self.preserve_file_stat = preserve;
        preserve
    }

    /// Level-tagged suffix for this configuration (`.qz3`).
    pub fn suffix(&self) -> String {
        self.codec.suffix()
    }
}
