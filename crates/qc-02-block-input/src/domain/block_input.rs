//! # Block Input
//!
//! A signed block together with whatever blob data its import needs. The
//! three states are an explicit sum type so every consumer matches
//! exhaustively:
//!
//! - `PreDeneb`: no blob requirement
//! - `PostDeneb`: all committed blobs attached
//! - `BlobsPromise`: blobs still arriving; carries a cache snapshot and the
//!   entry's availability handle

use super::availability::AvailabilityHandle;
use super::errors::BlockInputError;
use shared_types::{
    BlobIndex, BlobSidecar, ChainConfig, ForkName, Root, SignedBlock, Slot,
    BLOB_SIDECAR_FIXED_SIZE,
};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Where a block came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockSource {
    Gossip,
    Api,
    ByRange,
    ByRoot,
}

impl BlockSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gossip => "gossip",
            Self::Api => "api",
            Self::ByRange => "req_resp_by_range",
            Self::ByRoot => "req_resp_by_root",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockInputType {
    PreDeneb,
    PostDeneb,
    BlobsPromise,
}

impl BlockInputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreDeneb => "pre_deneb",
            Self::PostDeneb => "post_deneb",
            Self::BlobsPromise => "blobs_promise",
        }
    }
}

impl fmt::Display for BlockInputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sidecar and, when it arrived serialized, its bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedBlob {
    pub sidecar: Arc<BlobSidecar>,
    /// Unsigned sidecar bytes; never longer than `BLOB_SIDECAR_FIXED_SIZE`.
    pub bytes: Option<Arc<[u8]>>,
}

impl CachedBlob {
    /// Cache a sidecar, cutting `bytes` down to the unsigned message.
    ///
    /// `BlobSidecar` is fixed size, so the signature of a signed sidecar is
    /// everything past `BLOB_SIDECAR_FIXED_SIZE`.
    pub fn new(sidecar: BlobSidecar, bytes: Option<Vec<u8>>) -> Self {
        let bytes = bytes.map(|bytes| {
            let end = bytes.len().min(BLOB_SIDECAR_FIXED_SIZE);
            Arc::from(&bytes[..end])
        });
        Self {
            sidecar: Arc::new(sidecar),
            bytes,
        }
    }

    pub fn index(&self) -> BlobIndex {
        self.sidecar.index
    }
}

/// Sidecars received so far for one block, by index.
pub type BlobsCache = BTreeMap<BlobIndex, CachedBlob>;

/// The complete blob set of a block, ordered by index `0..n`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockInputBlobs {
    pub blobs: Vec<CachedBlob>,
}

impl BlockInputBlobs {
    /// Collect the first `cache.len()` indices in order.
    ///
    /// ## Errors
    ///
    /// - `MissingBlobSidecar`: an index in `0..cache.len()` has no sidecar
    pub fn from_cache(block_root: Root, cache: &BlobsCache) -> Result<Self, BlockInputError> {
        let blobs = (0..cache.len() as BlobIndex)
            .map(|index| {
                cache
                    .get(&index)
                    .cloned()
                    .ok_or(BlockInputError::MissingBlobSidecar { block_root, index })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { blobs })
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    pub fn sidecars(&self) -> impl Iterator<Item = &BlobSidecar> {
        self.blobs.iter().map(|blob| blob.sidecar.as_ref())
    }
}

#[derive(Debug, Clone)]
pub enum BlockInputData {
    PreDeneb,
    PostDeneb(BlockInputBlobs),
    BlobsPromise {
        cache: BlobsCache,
        availability: AvailabilityHandle,
    },
}

/// A block ready to be handed to availability verification.
#[derive(Debug, Clone)]
pub struct BlockInput {
    pub block: Arc<SignedBlock>,
    pub source: BlockSource,
    pub block_bytes: Option<Arc<[u8]>>,
    pub data: BlockInputData,
}

impl BlockInput {
    pub fn pre_deneb(
        config: &ChainConfig,
        block: Arc<SignedBlock>,
        source: BlockSource,
        block_bytes: Option<Arc<[u8]>>,
    ) -> Result<Self, BlockInputError> {
        check_fork(config, &block, BlockInputType::PreDeneb)?;
        Ok(Self {
            block,
            source,
            block_bytes,
            data: BlockInputData::PreDeneb,
        })
    }

    pub fn post_deneb(
        config: &ChainConfig,
        block: Arc<SignedBlock>,
        source: BlockSource,
        blobs: BlockInputBlobs,
        block_bytes: Option<Arc<[u8]>>,
    ) -> Result<Self, BlockInputError> {
        check_fork(config, &block, BlockInputType::PostDeneb)?;
        Ok(Self {
            block,
            source,
            block_bytes,
            data: BlockInputData::PostDeneb(blobs),
        })
    }

    pub fn blobs_promise(
        config: &ChainConfig,
        block: Arc<SignedBlock>,
        source: BlockSource,
        cache: BlobsCache,
        block_bytes: Option<Arc<[u8]>>,
        availability: AvailabilityHandle,
    ) -> Result<Self, BlockInputError> {
        check_fork(config, &block, BlockInputType::BlobsPromise)?;
        Ok(Self {
            block,
            source,
            block_bytes,
            data: BlockInputData::BlobsPromise {
                cache,
                availability,
            },
        })
    }

    pub fn input_type(&self) -> BlockInputType {
        match self.data {
            BlockInputData::PreDeneb => BlockInputType::PreDeneb,
            BlockInputData::PostDeneb(_) => BlockInputType::PostDeneb,
            BlockInputData::BlobsPromise { .. } => BlockInputType::BlobsPromise,
        }
    }

    pub fn slot(&self) -> Slot {
        self.block.slot()
    }

    pub fn block_root(&self) -> Root {
        self.block.block_root()
    }
}

fn check_fork(
    config: &ChainConfig,
    block: &SignedBlock,
    input_type: BlockInputType,
) -> Result<(), BlockInputError> {
    let slot = block.slot();
    let fork = config.fork_at_slot(slot);
    let post_deneb = fork >= ForkName::Deneb;
    if post_deneb == (input_type == BlockInputType::PreDeneb) {
        return Err(BlockInputError::ForkMismatch {
            slot,
            fork,
            input_type,
        });
    }
    Ok(())
}

/// Whether importing the block at `block_slot` needs its blobs, seen from
/// `clock_slot`.
///
/// Blobs older than the sidecar retention window cannot be requested from
/// peers, so blocks that old import without them.
pub fn block_requires_blobs(config: &ChainConfig, block_slot: Slot, clock_slot: Slot) -> bool {
    config.fork_at_slot(block_slot) >= ForkName::Deneb
        && config.epoch_at_slot(block_slot)
            >= config
                .epoch_at_slot(clock_slot)
                .saturating_sub(config.min_epochs_for_blob_sidecar_requests)
}
