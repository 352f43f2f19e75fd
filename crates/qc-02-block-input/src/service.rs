//! # Gossip Block Input Service
//!
//! Shares one [`BlockInputBuffer`] between concurrent gossip handlers.

use crate::domain::assembler::security::validate_config;
use crate::domain::{
    AssemblerConfig, AvailabilityHandle, BlockInputBuffer, BlockInputError,
    GossipBlockInputResult, GossipedInput,
};
use crate::ports::inbound::GossipBlockInputApi;
use parking_lot::Mutex;
use quantum_telemetry::{
    metric_inc, BLOCK_INPUTS_COMPLETED, BLOCK_INPUT_CACHE_SIZE, BLOCK_INPUT_EVICTIONS,
    GOSSIP_BLOBS_RECEIVED, GOSSIP_BLOCKS_RECEIVED, SUBSYSTEM_ERRORS,
};
use shared_types::{ChainConfig, Root};
use std::sync::Arc;
use tracing::{debug, warn};

/// The Gossip Block Input Service.
pub struct GossipBlockInputService {
    config: Arc<ChainConfig>,
    buffer: Mutex<BlockInputBuffer>,
}

impl GossipBlockInputService {
    /// Service with the default bound of five tracked identities.
    pub fn new(config: Arc<ChainConfig>) -> Self {
        Self {
            config,
            buffer: Mutex::new(BlockInputBuffer::with_defaults()),
        }
    }

    pub fn with_assembler_config(
        config: Arc<ChainConfig>,
        assembler: AssemblerConfig,
    ) -> Result<Self, BlockInputError> {
        validate_config(&assembler)?;
        Ok(Self {
            config,
            buffer: Mutex::new(BlockInputBuffer::new(assembler)),
        })
    }
}

impl GossipBlockInputApi for GossipBlockInputService {
    fn on_gossip(&self, input: GossipedInput) -> Result<GossipBlockInputResult, BlockInputError> {
        let mut buffer = self.buffer.lock();

        let (block_root, evaluated) = match input {
            GossipedInput::Block { block, bytes } => {
                metric_inc!(GOSSIP_BLOCKS_RECEIVED);
                let block_root = block.block_root();
                debug!(slot = block.slot(), ?block_root, "Gossip block received");
                let entry = buffer.add_block(block_root, block, bytes);
                (block_root, entry.evaluate(&self.config))
            }
            GossipedInput::Blob { sidecar, bytes } => {
                metric_inc!(GOSSIP_BLOBS_RECEIVED);
                let sidecar = sidecar.message;
                let block_root = sidecar.block_root;
                debug!(
                    slot = sidecar.slot,
                    index = sidecar.index,
                    ?block_root,
                    "Gossip blob sidecar received"
                );
                let entry = buffer.add_blob(sidecar, bytes);
                (block_root, entry.evaluate(&self.config))
            }
        };

        for evicted in buffer.enforce_max_cached() {
            warn!(block_root = ?evicted, "Block input cache full, evicted oldest entry");
            metric_inc!(BLOCK_INPUT_EVICTIONS);
        }
        BLOCK_INPUT_CACHE_SIZE.set(buffer.len() as f64);
        drop(buffer);

        let (result, resolved) = evaluated.inspect_err(|err| {
            warn!(?block_root, error = %err, "Rejected gossip block input");
            metric_inc!(SUBSYSTEM_ERRORS, &["block-input", err.kind()]);
        })?;
        if resolved {
            metric_inc!(BLOCK_INPUTS_COMPLETED);
            debug!(
                ?block_root,
                blobs = result.meta.have_blobs,
                "Block input complete"
            );
        }
        Ok(result)
    }

    fn availability(&self, block_root: &Root) -> Option<AvailabilityHandle> {
        self.buffer
            .lock()
            .get(block_root)
            .map(|entry| entry.availability())
    }

    fn cached_block_inputs(&self) -> usize {
        self.buffer.lock().len()
    }
}
