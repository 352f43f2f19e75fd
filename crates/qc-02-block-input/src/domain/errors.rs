//! # Domain Errors
//!
//! Error types for the Block Input subsystem. Every variant is fatal to the
//! block identity it names, never to the process.

use super::assembler::security::AssemblerSecurityError;
use super::block_input::BlockInputType;
use shared_types::{ForkName, Root, Slot};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockInputError {
    /// More sidecars cached than the block declares commitments for.
    #[error("received {have} blobs but block {block_root:?} at slot {slot} commits to {expected}")]
    TooManyBlobs {
        block_root: Root,
        slot: Slot,
        have: usize,
        expected: usize,
    },

    /// Finalization found a gap in the sidecar indices.
    #[error("missing blob sidecar at index {index} for block {block_root:?}")]
    MissingBlobSidecar { block_root: Root, index: u64 },

    /// The block's fork cannot form the requested kind of block input.
    #[error("block at slot {slot} ({fork}) cannot form a {input_type} block input")]
    ForkMismatch {
        slot: Slot,
        fork: ForkName,
        input_type: BlockInputType,
    },

    #[error("invalid assembler config: {0}")]
    InvalidConfig(#[from] AssemblerSecurityError),
}

impl BlockInputError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TooManyBlobs { .. } => "too_many_blobs",
            Self::MissingBlobSidecar { .. } => "missing_blob_sidecar",
            Self::ForkMismatch { .. } => "fork_mismatch",
            Self::InvalidConfig(_) => "invalid_config",
        }
    }
}
