//! # Wire Detection
//!
//! Classifies serialized blocks without decoding them: the fork comes from
//! the leading slot, the representation from the payload's `extra_data`
//! offset.

use super::error::CodecError;
use super::layout::{read_slot, BlockLayout};
use shared_types::{ChainConfig, ForkName, SignedBlock, Slot};

/// Slot of a serialized signed block, read at its fixed position.
pub fn slot_from_signed_block_bytes(bytes: &[u8]) -> Option<Slot> {
    read_slot(bytes).ok()
}

/// Whether serialized block bytes of `fork` carry a payload header.
///
/// Always `false` before Bellatrix.
pub fn is_serialized_blinded(fork: ForkName, bytes: &[u8]) -> Result<bool, CodecError> {
    if !fork.has_execution_payload() {
        return Ok(false);
    }
    BlockLayout::resolve(bytes, fork).map(|layout| layout.blinded)
}

pub fn serialize_full_or_blinded(block: &SignedBlock) -> Vec<u8> {
    block.as_ssz_bytes()
}

/// Decode a block whose fork and representation are only known from its bytes.
pub fn deserialize_full_or_blinded(
    config: &ChainConfig,
    bytes: &[u8],
) -> Result<SignedBlock, CodecError> {
    let slot = read_slot(bytes)?;
    let fork = config.fork_at_slot(slot);
    let blinded = is_serialized_blinded(fork, bytes)?;
    Ok(SignedBlock::from_ssz_bytes(bytes, fork, blinded)?)
}
