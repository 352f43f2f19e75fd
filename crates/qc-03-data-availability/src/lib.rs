//! # Data Availability (qc-03)
//!
//! Confirms that the blob data a block commits to is present and valid
//! before the block is imported.
//!
//! ```text
//! BlockInput ──→ PreDeneb ──────────────────────────────→ PreDeneb
//!            ──→ PostDeneb(blobs) ───────────┐
//!            ──→ BlobsPromise ──race cutoff──┴─→ validate ──→ Available
//! ```
//!
//! The cutoff for a block is the wall-clock start of its slot plus a 3000 ms
//! grace period. A block whose blobs are not in by then fails with
//! `DataUnavailable`.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Ordered Checks | Blocks are checked one at a time, in input order |
//! | 2 | Bounded Wait | No wait extends past a block's cutoff; a passed cutoff fails at once |
//! | 3 | Commitment Match | Every blob matches its block, index and commitment |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Statuses, import options, blob validation, errors
//! - `ports/` - `DataAvailabilityApi` (inbound); `SlotClock`,
//!   `BlobSidecarValidator`, `KzgProofVerifier` (outbound)
//! - `service/` - `DataAvailabilityVerifier`
//!
//! ## Usage
//!
//! ```ignore
//! use qc_03_data_availability::{DataAvailabilityApi, DataAvailabilityVerifier, SystemSlotClock};
//!
//! let verifier = DataAvailabilityVerifier::new(
//!     config,
//!     SystemSlotClock::new(genesis_time),
//!     KzgBlobSidecarValidator::new(kzg),
//! );
//! let statuses = verifier
//!     .verify_blocks_data_availability(&block_inputs, &ImportBlockOpts::default())
//!     .await?;
//! ```

pub mod domain;
pub mod ports;
pub mod service;

#[cfg(test)]
mod test_utils;

pub use domain::{
    AttestationImportOpt, BlobSidecarValidation, BlobValidationError, DataAvailabilityError,
    DataAvailableStatus, ExecutionStatus, FullyVerifiedBlock, ImportBlockOpts,
    KzgBlobSidecarValidator, ValidateBlobsOpts,
};
pub use ports::{
    BlobSidecarValidator, DataAvailabilityApi, KzgProofVerifier, SlotClock, SystemSlotClock,
};
pub use service::{DataAvailabilityVerifier, BLOB_AVAILABILITY_TIMEOUT};
