//! # Block Input Buffer
//!
//! Blocks and blob sidecars travel on separate gossip topics and may arrive
//! in any order. The buffer keys partial inputs by block root until the
//! block and every committed blob are present.

use super::config::AssemblerConfig;
use super::pending::PendingBlockInput;
use shared_types::{BlobSidecar, Root, SignedBlock};
use std::collections::HashMap;
use std::sync::Arc;

/// Buffer of partial block inputs.
///
/// ## Eviction
///
/// Bounded to `max_cached_block_inputs` identities. Eviction is by first
/// insertion only: completed entries stay until pushed out, and a stalled
/// entry lingers until newer identities displace it.
#[derive(Debug)]
pub struct BlockInputBuffer {
    /// Pending inputs keyed by block root.
    pending: HashMap<Root, PendingBlockInput>,
    /// Sequence number handed to the next new identity.
    next_seq: u64,
    config: AssemblerConfig,
}

impl BlockInputBuffer {
    pub fn new(config: AssemblerConfig) -> Self {
        Self {
            pending: HashMap::new(),
            next_seq: 0,
            config,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(AssemblerConfig::default())
    }

    fn entry(&mut self, block_root: Root) -> &mut PendingBlockInput {
        let next_seq = &mut self.next_seq;
        self.pending.entry(block_root).or_insert_with(|| {
            let seq = *next_seq;
            *next_seq += 1;
            PendingBlockInput::new(block_root, seq)
        })
    }

    /// Store a gossiped block under its root, replacing any earlier copy.
    pub fn add_block(
        &mut self,
        block_root: Root,
        block: Arc<SignedBlock>,
        bytes: Option<Vec<u8>>,
    ) -> &PendingBlockInput {
        let entry = self.entry(block_root);
        entry.set_block(block, bytes);
        entry
    }

    /// Store a gossiped sidecar under the block root it names.
    pub fn add_blob(&mut self, sidecar: BlobSidecar, bytes: Option<Vec<u8>>) -> &PendingBlockInput {
        let entry = self.entry(sidecar.block_root);
        entry.insert_blob(sidecar, bytes);
        entry
    }

    pub fn get(&self, block_root: &Root) -> Option<&PendingBlockInput> {
        self.pending.get(block_root)
    }

    /// Evict the earliest-inserted identities beyond the bound.
    ///
    /// Returns the evicted roots, oldest first. Waiters on an evicted entry
    /// that had not resolved observe it as dropped.
    pub fn enforce_max_cached(&mut self) -> Vec<Root> {
        if self.pending.len() <= self.config.max_cached_block_inputs {
            return vec![];
        }

        let mut entries: Vec<_> = self
            .pending
            .iter()
            .map(|(root, entry)| (*root, entry.inserted_seq))
            .collect();
        entries.sort_by_key(|(_, seq)| *seq);

        let to_remove = self.pending.len() - self.config.max_cached_block_inputs;
        let evicted: Vec<Root> = entries
            .iter()
            .take(to_remove)
            .map(|(root, _)| *root)
            .collect();

        for root in &evicted {
            self.pending.remove(root);
        }

        evicted
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
