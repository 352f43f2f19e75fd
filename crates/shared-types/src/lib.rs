//! # Shared Types Crate
//!
//! The beacon-chain schema shared by every subsystem: fork schedule, chain
//! configuration, and the SSZ containers for blocks (full and blinded) and
//! blob sidecars.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every wire layout the codec reasons about
//!   byte-by-byte is derived from the containers defined here.
//! - **Closed Set**: [`SignedBlock`] enumerates every concrete block schema;
//!   fork dispatch is a `match`, never a lookup table.
//! - **Opaque Crypto**: signatures, commitments and proofs are fixed-size
//!   byte vectors. Verification lives behind ports in the subsystems.

pub mod blob;
pub mod block;
pub mod body;
pub mod config;
pub mod errors;
pub mod execution;
pub mod fork;
pub mod operations;
pub mod primitives;

pub use blob::{BlobSidecar, SignedBlobSidecar};
pub use block::*;
pub use body::*;
pub use config::ChainConfig;
pub use errors::TypesError;
pub use execution::*;
pub use fork::ForkName;
pub use operations::*;
pub use primitives::*;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
