//! # Assembler Security
//!
//! Bounds on the block input buffer. Every tracked identity may hold up to
//! `MAX_BLOBS_PER_BLOCK` sidecars of ~128 KiB each, so the identity bound is
//! the memory bound.

use super::config::AssemblerConfig;
use thiserror::Error;

pub mod limits {
    /// At least one identity must fit, or nothing ever completes.
    pub const MIN_CACHED_BLOCK_INPUTS: usize = 1;

    /// Roughly 800 MiB of blob data at six blobs per block.
    pub const MAX_CACHED_BLOCK_INPUTS: usize = 1024;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblerSecurityError {
    #[error("buffer size {value} below minimum {minimum}")]
    BufferTooSmall { value: usize, minimum: usize },

    #[error("buffer size {value} exceeds maximum {maximum}")]
    BufferTooLarge { value: usize, maximum: usize },
}

/// Validate assembler configuration against the limits above.
pub fn validate_config(config: &AssemblerConfig) -> Result<(), AssemblerSecurityError> {
    if config.max_cached_block_inputs < limits::MIN_CACHED_BLOCK_INPUTS {
        return Err(AssemblerSecurityError::BufferTooSmall {
            value: config.max_cached_block_inputs,
            minimum: limits::MIN_CACHED_BLOCK_INPUTS,
        });
    }

    if config.max_cached_block_inputs > limits::MAX_CACHED_BLOCK_INPUTS {
        return Err(AssemblerSecurityError::BufferTooLarge {
            value: config.max_cached_block_inputs,
            maximum: limits::MAX_CACHED_BLOCK_INPUTS,
        });
    }

    Ok(())
}
