//! # Blob Sidecar Validation
//!
//! Checks that a complete blob set backs a block's commitments: one sidecar
//! per commitment, in index order, each naming the block and carrying the
//! matching commitment. KZG proofs are checked last, as one batch.

use super::errors::BlobValidationError;
use crate::ports::outbound::{BlobSidecarValidator, KzgProofVerifier};
use qc_02_block_input::BlockInputBlobs;
use shared_types::{BlobSidecar, KzgCommitment, Root, Slot};
use tracing::debug;

/// Options for a single validation call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidateBlobsOpts {
    /// Proofs were already verified per sidecar.
    pub skip_proofs_check: bool,
}

/// Default validator: structural checks here, proofs through `K`.
#[derive(Debug, Clone, Default)]
pub struct KzgBlobSidecarValidator<K> {
    kzg: K,
}

impl<K: KzgProofVerifier> KzgBlobSidecarValidator<K> {
    pub fn new(kzg: K) -> Self {
        Self { kzg }
    }

    pub fn kzg(&self) -> &K {
        &self.kzg
    }
}

impl<K: KzgProofVerifier> BlobSidecarValidator for KzgBlobSidecarValidator<K> {
    fn validate(
        &self,
        slot: Slot,
        block_root: Root,
        commitments: &[KzgCommitment],
        blobs: &BlockInputBlobs,
        opts: ValidateBlobsOpts,
    ) -> Result<(), BlobValidationError> {
        if blobs.len() != commitments.len() {
            return Err(BlobValidationError::CountMismatch {
                blobs: blobs.len(),
                commitments: commitments.len(),
            });
        }

        for (position, (sidecar, commitment)) in blobs.sidecars().zip(commitments).enumerate() {
            check_sidecar(position, sidecar, slot, block_root, commitment)?;
        }

        if opts.skip_proofs_check || blobs.is_empty() {
            return Ok(());
        }

        let sidecars: Vec<&BlobSidecar> = blobs.sidecars().collect();
        let blob_refs: Vec<_> = sidecars.iter().map(|sidecar| &sidecar.blob).collect();
        let commitment_refs: Vec<_> = sidecars.iter().map(|sidecar| &sidecar.kzg_commitment).collect();
        let proof_refs: Vec<_> = sidecars.iter().map(|sidecar| &sidecar.kzg_proof).collect();

        let valid = self
            .kzg
            .verify_blob_kzg_proof_batch(&blob_refs, &commitment_refs, &proof_refs)
            .map_err(BlobValidationError::Kzg)?;
        if !valid {
            return Err(BlobValidationError::InvalidProof);
        }
        debug!(slot, blobs = blobs.len(), "Blob kzg proofs verified");
        Ok(())
    }
}

fn check_sidecar(
    position: usize,
    sidecar: &BlobSidecar,
    slot: Slot,
    block_root: Root,
    commitment: &KzgCommitment,
) -> Result<(), BlobValidationError> {
    let index = sidecar.index;
    if index != position as u64 {
        return Err(BlobValidationError::IndexMismatch { position, index });
    }
    if sidecar.slot != slot {
        return Err(BlobValidationError::SlotMismatch {
            index,
            expected: slot,
            found: sidecar.slot,
        });
    }
    if sidecar.block_root != block_root {
        return Err(BlobValidationError::BlockRootMismatch {
            index,
            found: sidecar.block_root,
        });
    }
    if &sidecar.kzg_commitment != commitment {
        return Err(BlobValidationError::CommitmentMismatch { index });
    }
    Ok(())
}
