//! # Domain Errors
//!
//! Errors of the Data Availability subsystem. A block failing with any of
//! them must not be imported.

use shared_types::{BlobIndex, Root, Slot};
use thiserror::Error;

/// Blob set does not back the block's commitments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlobValidationError {
    #[error("{blobs} blobs for {commitments} commitments")]
    CountMismatch { blobs: usize, commitments: usize },

    #[error("blob at position {position} has index {index}")]
    IndexMismatch { position: usize, index: BlobIndex },

    #[error("blob {index} is for slot {found}, block is at slot {expected}")]
    SlotMismatch {
        index: BlobIndex,
        expected: Slot,
        found: Slot,
    },

    #[error("blob {index} names block {found:?}")]
    BlockRootMismatch { index: BlobIndex, found: Root },

    #[error("blob {index} commitment does not match the block")]
    CommitmentMismatch { index: BlobIndex },

    #[error("invalid kzg proof batch")]
    InvalidProof,

    #[error("kzg verification failed: {0}")]
    Kzg(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataAvailabilityError {
    #[error("no blocks to verify")]
    EmptyInput,

    /// Blobs did not arrive before the availability cutoff.
    #[error("data unavailable for block {block_root:?} at slot {slot}")]
    DataUnavailable { slot: Slot, block_root: Root },

    #[error("invalid blob data for block {block_root:?} at slot {slot}: {source}")]
    InvalidData {
        slot: Slot,
        block_root: Root,
        #[source]
        source: BlobValidationError,
    },
}
