//! Test fixtures: a settable slot clock, a scripted KZG verifier, and
//! Deneb block inputs.

use crate::ports::outbound::{KzgProofVerifier, SlotClock};
use qc_02_block_input::{
    availability_channel, AvailabilityResolver, BlobsCache, BlockInput, BlockInputBlobs,
    BlockSource, CachedBlob,
};
use shared_types::test_utils::{full_block, sidecar_for, slot_in_fork, test_config};
use shared_types::{Blob, ChainConfig, ForkName, KzgCommitment, KzgProof, SignedBlock, Slot};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

pub const GENESIS_TIME: u64 = 1_606_824_023;

pub struct MockSlotClock {
    genesis_time: u64,
    now_ms: AtomicU64,
}

impl MockSlotClock {
    pub fn new(now_ms: u64) -> Self {
        Self {
            genesis_time: GENESIS_TIME,
            now_ms: AtomicU64::new(now_ms),
        }
    }

    /// Clock reading `offset_ms` after the start of `slot`.
    pub fn at_slot(config: &ChainConfig, slot: Slot, offset_ms: u64) -> Self {
        Self::new(config.time_at_slot(slot, GENESIS_TIME) * 1000 + offset_ms)
    }

    pub fn set(&self, now_ms: u64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }
}

impl SlotClock for MockSlotClock {
    fn genesis_time(&self) -> u64 {
        self.genesis_time
    }

    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

/// KZG verifier answering every batch with a fixed verdict.
pub struct MockKzgVerifier {
    valid: bool,
    calls: AtomicUsize,
}

impl MockKzgVerifier {
    pub fn accepting() -> Self {
        Self {
            valid: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            valid: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl KzgProofVerifier for MockKzgVerifier {
    fn verify_blob_kzg_proof_batch(
        &self,
        blobs: &[&Blob],
        commitments: &[&KzgCommitment],
        proofs: &[&KzgProof],
    ) -> Result<bool, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if blobs.len() != commitments.len() || blobs.len() != proofs.len() {
            return Err("batch length mismatch".to_string());
        }
        Ok(self.valid)
    }
}

pub fn config() -> Arc<ChainConfig> {
    Arc::new(test_config())
}

pub fn deneb_slot() -> Slot {
    slot_in_fork(ForkName::Deneb)
}

pub fn deneb_block(blob_count: usize) -> Arc<SignedBlock> {
    Arc::new(full_block(ForkName::Deneb, deneb_slot(), blob_count))
}

/// Blobs `0..count` matching `block`.
pub fn blobs_for(block: &SignedBlock, count: u64) -> BlockInputBlobs {
    let cache: BlobsCache = (0..count)
        .map(|index| (index, CachedBlob::new(sidecar_for(block, index).message, None)))
        .collect();
    BlockInputBlobs { blobs: cache.into_values().collect() }
}

pub fn complete_input(blob_count: u64) -> BlockInput {
    let block = deneb_block(blob_count as usize);
    let blobs = blobs_for(&block, blob_count);
    BlockInput::post_deneb(&test_config(), block, BlockSource::Gossip, blobs, None)
        .expect("deneb block")
}

/// A block input still waiting on its blobs, with the resolver that will
/// deliver them and the blobs it should deliver.
pub fn pending_input(blob_count: u64) -> (BlockInput, AvailabilityResolver, BlockInputBlobs) {
    let block = deneb_block(blob_count as usize);
    let blobs = blobs_for(&block, blob_count);
    let (resolver, handle) = availability_channel();
    let input = BlockInput::blobs_promise(
        &test_config(),
        block,
        BlockSource::Gossip,
        BlobsCache::new(),
        None,
        handle,
    )
    .expect("deneb block");
    (input, resolver, blobs)
}

pub fn pre_deneb_input() -> BlockInput {
    let block = Arc::new(full_block(
        ForkName::Capella,
        slot_in_fork(ForkName::Capella),
        0,
    ));
    BlockInput::pre_deneb(&test_config(), block, BlockSource::ByRange, None).expect("capella block")
}
