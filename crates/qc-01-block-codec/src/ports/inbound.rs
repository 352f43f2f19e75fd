//! # Inbound Ports (Driving Ports)
//!
//! The API other subsystems use to move blocks across the full/blinded
//! boundary.

use crate::domain::{CodecError, ExecutionPayloadBody, FullBlockBytesStream};
use futures::future::BoxFuture;
use shared_types::SignedBlock;

/// Full/blinded block conversion.
///
/// Byte-level operations take the fork from the block's own slot.
pub trait BlockCodecApi: Send + Sync {
    /// Replace the execution payload with its header. No-op for blinded
    /// and pre-Bellatrix blocks.
    fn to_blinded(&self, block: SignedBlock) -> SignedBlock;

    /// Rebuild the execution payload from its header and `body`.
    ///
    /// ## Errors
    ///
    /// - `IncompleteExternalBody`: transactions (or, from Capella,
    ///   withdrawals) missing from `body`
    fn to_full(
        &self,
        block: SignedBlock,
        body: ExecutionPayloadBody,
    ) -> Result<SignedBlock, CodecError>;

    /// Blind serialized full block bytes without decoding the block.
    ///
    /// ## Errors
    ///
    /// - `InvalidSlot`: buffer too short to carry a slot
    /// - `UnsupportedEncoding` / `OutOfBounds`: layout not valid for the fork
    fn to_blinded_bytes(&self, bytes: &[u8]) -> Result<Vec<u8>, CodecError>;

    /// Stream full block bytes rebuilt from blinded bytes and a body that
    /// is still being fetched.
    fn to_full_bytes(
        &self,
        blinded: Vec<u8>,
        body: BoxFuture<'static, ExecutionPayloadBody>,
    ) -> FullBlockBytesStream;

    /// Whether serialized block bytes are blinded.
    fn is_blinded_bytes(&self, bytes: &[u8]) -> Result<bool, CodecError>;

    /// Decode a block of unknown fork and representation.
    fn deserialize(&self, bytes: &[u8]) -> Result<SignedBlock, CodecError>;
}
