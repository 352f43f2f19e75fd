//! # Data Availability Verifier
//!
//! Decides, per block input, whether the block's blob data is present and
//! valid. Blocks still waiting on blobs are given until
//! `slot start + availability timeout` for the remaining sidecars to arrive.

use crate::domain::{DataAvailabilityError, DataAvailableStatus, ImportBlockOpts, ValidateBlobsOpts};
use crate::ports::inbound::DataAvailabilityApi;
use crate::ports::outbound::{BlobSidecarValidator, SlotClock};
use async_trait::async_trait;
use qc_02_block_input::{
    AvailabilityError, AvailabilityHandle, BlockInput, BlockInputBlobs, BlockInputData,
};
use quantum_telemetry::{
    log_block_event, metric_inc, time_histogram, AVAILABILITY_WAIT_DURATION,
    DATA_AVAILABILITY_OUTCOMES,
};
use shared_types::{ChainConfig, KzgCommitment, Slot};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;


/// Grace period after the start of a block's slot for its blobs to arrive.
pub const BLOB_AVAILABILITY_TIMEOUT: Duration = Duration::from_millis(3_000);

pub struct DataAvailabilityVerifier<C, V> {
    config: Arc<ChainConfig>,
    clock: C,
    validator: V,
    availability_timeout: Duration,
}

impl<C: SlotClock, V: BlobSidecarValidator> DataAvailabilityVerifier<C, V> {
    pub fn new(config: Arc<ChainConfig>, clock: C, validator: V) -> Self {
        Self {
            config,
            clock,
            validator,
            availability_timeout: BLOB_AVAILABILITY_TIMEOUT,
        }
    }

    pub fn with_availability_timeout(mut self, timeout: Duration) -> Self {
        self.availability_timeout = timeout;
        self
    }

    pub fn availability_timeout(&self) -> Duration {
        self.availability_timeout
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Milliseconds left before the blob cutoff of `slot`; zero or negative
    /// once it has passed.
    pub fn cutoff_ms(&self, slot: Slot) -> i64 {
        let slot_start_ms = self
            .config
            .time_at_slot(slot, self.clock.genesis_time())
            .saturating_mul(1000);
        let timeout_ms = u64::try_from(self.availability_timeout.as_millis()).unwrap_or(u64::MAX);
        let cutoff = i64::try_from(slot_start_ms.saturating_add(timeout_ms)).unwrap_or(i64::MAX);
        let now = i64::try_from(self.clock.now_ms()).unwrap_or(i64::MAX);
        cutoff.saturating_sub(now)
    }

    async fn maybe_validate_blobs(
        &self,
        input: &BlockInput,
        opts: &ImportBlockOpts,
    ) -> Result<DataAvailableStatus, DataAvailabilityError> {
        let awaited;
        let blobs = match &input.data {
            BlockInputData::PreDeneb => return Ok(DataAvailableStatus::PreDeneb),
            _ if opts.blobs_fully_validated() => return Ok(DataAvailableStatus::Available),
            BlockInputData::PostDeneb(blobs) => blobs,
            BlockInputData::BlobsPromise { availability, .. } => {
                awaited = self.race_with_cutoff(input, availability.clone()).await?;
                &awaited
            }
        };

        let slot = input.slot();
        let block_root = input.block_root();
        let commitments: &[KzgCommitment] = input
            .block
            .blob_kzg_commitments()
            .map(|commitments| &commitments[..])
            .unwrap_or_default();
        let validate_opts = ValidateBlobsOpts {
            skip_proofs_check: opts.skip_proofs_check(),
        };
        self.validator
            .validate(slot, block_root, commitments, blobs, validate_opts)
            .map_err(|source| DataAvailabilityError::InvalidData {
                slot,
                block_root,
                source,
            })?;

        Ok(DataAvailableStatus::Available)
    }

    /// Wait for the blobs of `input` until its cutoff.
    ///
    /// Blobs that are already available are returned without checking the
    /// cutoff. Otherwise a passed cutoff fails at once, and a wait that hits
    /// the cutoff is dropped.
    async fn race_with_cutoff(
        &self,
        input: &BlockInput,
        availability: AvailabilityHandle,
    ) -> Result<BlockInputBlobs, DataAvailabilityError> {
        let slot = input.slot();
        let block_root = input.block_root();
        if let Some(blobs) = availability.try_get() {
            return Ok(blobs);
        }

        let unavailable = DataAvailabilityError::DataUnavailable { slot, block_root };
        let cutoff_ms = self.cutoff_ms(slot);
        if cutoff_ms <= 0 {
            log_block_event!(
                warn,
                "data-availability",
                "Blob cutoff already passed",
                slot,
                block_root,
                cutoff_ms = cutoff_ms
            );
            return Err(unavailable);
        }

        debug!(slot, ?block_root, cutoff_ms, "Waiting for blobs");
        let _timer = time_histogram!(AVAILABILITY_WAIT_DURATION);
        let cutoff = Duration::from_millis(cutoff_ms.unsigned_abs());
        match tokio::time::timeout(cutoff, availability.wait()).await {
            Ok(Ok(blobs)) => {
                debug!(slot, ?block_root, blobs = blobs.len(), "Blobs became available");
                Ok(blobs)
            }
            Ok(Err(AvailabilityError::Dropped)) => {
                log_block_event!(
                    warn,
                    "data-availability",
                    "Block input evicted while waiting for blobs",
                    slot,
                    block_root
                );
                Err(unavailable)
            }
            Err(_) => {
                log_block_event!(
                    warn,
                    "data-availability",
                    "Blobs not available before cutoff",
                    slot,
                    block_root,
                    cutoff_ms = cutoff_ms
                );
                Err(unavailable)
            }
        }
    }
}

#[async_trait]
impl<C: SlotClock, V: BlobSidecarValidator> DataAvailabilityApi for DataAvailabilityVerifier<C, V> {
    async fn verify_blocks_data_availability(
        &self,
        blocks: &[BlockInput],
        opts: &ImportBlockOpts,
    ) -> Result<Vec<DataAvailableStatus>, DataAvailabilityError> {
        if blocks.is_empty() {
            return Err(DataAvailabilityError::EmptyInput);
        }

        let mut statuses = Vec::with_capacity(blocks.len());
        for input in blocks {
            let status = self.maybe_validate_blobs(input, opts).await;
            let outcome = match &status {
                Ok(status) => status.as_str(),
                Err(DataAvailabilityError::InvalidData { .. }) => "invalid",
                Err(_) => "unavailable",
            };
            metric_inc!(DATA_AVAILABILITY_OUTCOMES, &[outcome]);
            statuses.push(status?);
        }

        Ok(statuses)
    }
}
