//! # Gossip Messages
//!
//! What the gossip layer hands the assembler, and what it gets back.

use super::block_input::BlockInput;
use shared_types::{SignedBlobSidecar, SignedBlock};
use std::sync::Arc;

/// A block or blob sidecar received on gossip, with its raw bytes if the
/// transport kept them.
#[derive(Debug, Clone)]
pub enum GossipedInput {
    Block {
        block: Arc<SignedBlock>,
        bytes: Option<Vec<u8>>,
    },
    Blob {
        sidecar: SignedBlobSidecar,
        bytes: Option<Vec<u8>>,
    },
}

impl GossipedInput {
    pub fn input_type(&self) -> GossipedInputType {
        match self {
            Self::Block { .. } => GossipedInputType::Block,
            Self::Blob { .. } => GossipedInputType::Blob,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GossipedInputType {
    Block,
    Blob,
}

/// Completeness of a block identity after a gossip message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockInputMeta {
    /// The kind of message still outstanding, if any.
    pub pending: Option<GossipedInputType>,
    pub have_blobs: usize,
    /// Commitment count of the block; `None` until the block arrives.
    pub expected_blobs: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct GossipBlockInputResult {
    /// `None` while the block itself has not arrived.
    pub block_input: Option<BlockInput>,
    pub meta: BlockInputMeta,
}
