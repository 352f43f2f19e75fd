//! Domain layer for the Data Availability subsystem.

pub mod errors;
pub mod options;
pub mod status;
pub mod validation;
pub mod verified;


pub use errors::{BlobValidationError, DataAvailabilityError};
pub use options::{AttestationImportOpt, BlobSidecarValidation, ImportBlockOpts};
pub use status::DataAvailableStatus;
pub use validation::{KzgBlobSidecarValidator, ValidateBlobsOpts};
pub use verified::{ExecutionStatus, FullyVerifiedBlock};
