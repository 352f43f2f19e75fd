//! Error types for the Block Codec subsystem

use shared_types::{ForkName, TypesError};

/// Codec error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The buffer does not match any known layout for its fork.
    #[error("Unsupported encoding for {fork}: {reason}")]
    UnsupportedEncoding { fork: ForkName, reason: String },

    /// A read or write would fall outside the buffer.
    #[error("Access out of bounds: position {position}, buffer length {len}")]
    OutOfBounds { position: usize, len: usize },

    /// The externally delivered payload body lacks a list the fork requires.
    #[error("External payload body is missing {missing}")]
    IncompleteExternalBody { missing: &'static str },

    /// A sliced sub-list failed to decode.
    #[error("SSZ decode failed: {0}")]
    SszDecode(String),

    /// The buffer is too short to carry a slot.
    #[error("Buffer of {len} bytes is too short to carry a slot")]
    InvalidSlot { len: usize },

    /// Schema-level failure.
    #[error(transparent)]
    Types(#[from] TypesError),
}

impl From<ssz::DecodeError> for CodecError {
    fn from(err: ssz::DecodeError) -> Self {
        CodecError::SszDecode(format!("{:?}", err))
    }
}

impl CodecError {
    pub(crate) fn unsupported(fork: ForkName, reason: impl Into<String>) -> Self {
        CodecError::UnsupportedEncoding {
            fork,
            reason: reason.into(),
        }
    }
}
