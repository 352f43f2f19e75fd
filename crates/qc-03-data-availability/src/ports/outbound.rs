//! # Outbound Ports (Driven Ports)
//!
//! Collaborators the verifier needs from the host node.

use crate::domain::validation::ValidateBlobsOpts;
use crate::domain::BlobValidationError;
use qc_02_block_input::BlockInputBlobs;
use shared_types::{Blob, KzgCommitment, KzgProof, Root, Slot};

/// Wall clock and chain genesis.
pub trait SlotClock: Send + Sync {
    /// Genesis time in seconds since the Unix epoch.
    fn genesis_time(&self) -> u64;

    /// Current wall-clock time in milliseconds since the Unix epoch.
    fn now_ms(&self) -> u64;
}

/// Slot clock backed by the system time.
#[derive(Debug, Clone, Copy)]
pub struct SystemSlotClock {
    genesis_time: u64,
}

impl SystemSlotClock {
    pub fn new(genesis_time: u64) -> Self {
        Self { genesis_time }
    }
}

impl SlotClock for SystemSlotClock {
    fn genesis_time(&self) -> u64 {
        self.genesis_time
    }

    fn now_ms(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Confirms that a complete blob set backs a block's commitments.
pub trait BlobSidecarValidator: Send + Sync {
    fn validate(
        &self,
        slot: Slot,
        block_root: Root,
        commitments: &[KzgCommitment],
        blobs: &BlockInputBlobs,
        opts: ValidateBlobsOpts,
    ) -> Result<(), BlobValidationError>;
}

/// Raw KZG proof primitive (c-kzg or equivalent).
pub trait KzgProofVerifier: Send + Sync {
    /// Verify one proof per blob against its commitment, as a batch.
    ///
    /// `Err` is reserved for malformed inputs; an invalid proof is `Ok(false)`.
    fn verify_blob_kzg_proof_batch(
        &self,
        blobs: &[&Blob],
        commitments: &[&KzgCommitment],
        proofs: &[&KzgProof],
    ) -> Result<bool, String>;
}
