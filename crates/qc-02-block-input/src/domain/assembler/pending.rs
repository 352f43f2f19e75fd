//! # Pending Block Input
//!
//! Everything received so far for one block identity.

use crate::domain::availability::{availability_channel, AvailabilityHandle, AvailabilityResolver};
use crate::domain::block_input::{BlobsCache, BlockInput, BlockInputBlobs, BlockSource, CachedBlob};
use crate::domain::errors::BlockInputError;
use crate::domain::gossip::{BlockInputMeta, GossipBlockInputResult, GossipedInputType};
use shared_types::{BlobSidecar, ChainConfig, Root, SignedBlock};
use std::sync::Arc;

/// A block identity awaiting its block and blobs.
///
/// The availability signal is created with the entry, so blobs arriving
/// before their block share the same signal a later waiter will observe.
#[derive(Debug)]
pub struct PendingBlockInput {
    /// Block root (key for this entry).
    pub block_root: Root,
    /// Position in first-insertion order, used for eviction.
    pub inserted_seq: u64,
    pub block: Option<Arc<SignedBlock>>,
    pub block_bytes: Option<Arc<[u8]>>,
    pub blobs: BlobsCache,
    resolver: AvailabilityResolver,
}

impl PendingBlockInput {
    pub fn new(block_root: Root, inserted_seq: u64) -> Self {
        let (resolver, _) = availability_channel();
        Self {
            block_root,
            inserted_seq,
            block: None,
            block_bytes: None,
            blobs: BlobsCache::new(),
            resolver,
        }
    }

    /// Replace the cached block and its bytes.
    pub fn set_block(&mut self, block: Arc<SignedBlock>, bytes: Option<Vec<u8>>) {
        self.block = Some(block);
        self.block_bytes = bytes.map(Arc::from);
    }

    /// Upsert a sidecar at its declared index.
    pub fn insert_blob(&mut self, sidecar: BlobSidecar, bytes: Option<Vec<u8>>) {
        let index = sidecar.index;
        self.blobs.insert(index, CachedBlob::new(sidecar, bytes));
    }

    pub fn have_blobs(&self) -> usize {
        self.blobs.len()
    }

    /// Commitment count of the cached block; `None` without a block or
    /// before Deneb.
    pub fn expected_blobs(&self) -> Option<usize> {
        self.block
            .as_ref()
            .and_then(|block| block.blob_kzg_commitments())
            .map(|commitments| commitments.len())
    }

    pub fn is_resolved(&self) -> bool {
        self.resolver.is_resolved()
    }

    pub fn availability(&self) -> AvailabilityHandle {
        self.resolver.handle()
    }

    /// Evaluate completeness and build the block input, resolving the
    /// availability signal when the last blob is in.
    ///
    /// Returns the result and whether this call resolved the signal.
    pub fn evaluate(
        &self,
        config: &ChainConfig,
    ) -> Result<(GossipBlockInputResult, bool), BlockInputError> {
        let have_blobs = self.have_blobs();
        let Some(block) = self.block.clone() else {
            let meta = BlockInputMeta {
                pending: Some(GossipedInputType::Block),
                have_blobs,
                expected_blobs: None,
            };
            return Ok((
                GossipBlockInputResult {
                    block_input: None,
                    meta,
                },
                false,
            ));
        };

        let Some(expected_blobs) = self.expected_blobs() else {
            let block_input =
                BlockInput::pre_deneb(config, block, BlockSource::Gossip, self.block_bytes.clone())?;
            let meta = BlockInputMeta {
                pending: None,
                have_blobs,
                expected_blobs: Some(0),
            };
            return Ok((
                GossipBlockInputResult {
                    block_input: Some(block_input),
                    meta,
                },
                false,
            ));
        };

        if have_blobs > expected_blobs {
            return Err(BlockInputError::TooManyBlobs {
                block_root: self.block_root,
                slot: block.slot(),
                have: have_blobs,
                expected: expected_blobs,
            });
        }

        if have_blobs == expected_blobs {
            let blobs = BlockInputBlobs::from_cache(self.block_root, &self.blobs)?;
            let resolved = self.resolver.resolve(blobs.clone());
            let block_input = BlockInput::post_deneb(
                config,
                block,
                BlockSource::Gossip,
                blobs,
                self.block_bytes.clone(),
            )?;
            let meta = BlockInputMeta {
                pending: None,
                have_blobs,
                expected_blobs: Some(expected_blobs),
            };
            return Ok((
                GossipBlockInputResult {
                    block_input: Some(block_input),
                    meta,
                },
                resolved,
            ));
        }

        let block_input = BlockInput::blobs_promise(
            config,
            block,
            BlockSource::Gossip,
            self.blobs.clone(),
            self.block_bytes.clone(),
            self.availability(),
        )?;
        let meta = BlockInputMeta {
            pending: Some(GossipedInputType::Blob),
            have_blobs,
            expected_blobs: Some(expected_blobs),
        };
        Ok((
            GossipBlockInputResult {
                block_input: Some(block_input),
                meta,
            },
            false,
        ))
    }
}
