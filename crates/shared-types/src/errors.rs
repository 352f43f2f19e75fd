//! # Error Types
//!
//! Errors raised while decoding or configuring the shared schema.

use crate::fork::ForkName;
use thiserror::Error;

/// Errors produced by the schema layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    /// Bytes did not decode as the requested container.
    #[error("SSZ decode failed: {0}")]
    SszDecode(String),

    /// Blinded blocks only exist from Bellatrix onward.
    #[error("Fork {fork} has no blinded block representation")]
    BlindedBeforeBellatrix { fork: ForkName },

    /// Fork name not recognised.
    #[error("Unknown fork name: {0}")]
    UnknownFork(String),

    /// Chain configuration is inconsistent.
    #[error("Invalid chain config: {0}")]
    InvalidConfig(String),
}

impl From<ssz::DecodeError> for TypesError {
    fn from(err: ssz::DecodeError) -> Self {
        TypesError::SszDecode(format!("{:?}", err))
    }
}
