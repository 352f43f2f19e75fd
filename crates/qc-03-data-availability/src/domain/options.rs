//! # Import Options
//!
//! Flags a caller passes along with a batch of blocks to import. Only
//! `valid_blob_sidecars` affects availability checking; the rest travel
//! with the batch for later import stages.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttestationImportOpt {
    Skip,
    Force,
}

/// How much blob validation already happened upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobSidecarValidation {
    /// Sidecars were verified one by one as they arrived on gossip; proofs
    /// need not be checked again, but blobs must still match the block.
    Individual,
    /// The caller vouches for the complete blob set. No checks at all.
    Full,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportBlockOpts {
    pub import_attestations: Option<AttestationImportOpt>,
    /// Skip blocks that are already known instead of failing.
    pub ignore_if_known: bool,
    /// Skip blocks at or before the finalized slot instead of failing.
    pub ignore_if_finalized: bool,
    /// Range-synced blocks are never attested to, so a syncing execution
    /// engine is acceptable.
    pub from_range_sync: bool,
    pub bls_verify_on_main_thread: bool,
    /// Only the proposer signature has been verified.
    pub valid_proposer_signature: bool,
    /// All signatures, proposer included, have been verified.
    pub valid_signatures: bool,
    pub valid_blob_sidecars: Option<BlobSidecarValidation>,
    pub seen_timestamp_sec: Option<u64>,
    pub eager_persist_block: bool,
}

impl ImportBlockOpts {
    /// Whether the caller vouches for the full blob set.
    pub fn blobs_fully_validated(&self) -> bool {
        self.valid_blob_sidecars == Some(BlobSidecarValidation::Full)
    }

    /// Whether KZG proofs were already checked per sidecar.
    pub fn skip_proofs_check(&self) -> bool {
        self.valid_blob_sidecars == Some(BlobSidecarValidation::Individual)
    }
}
