//! # Byte-Level Blinding
//!
//! Turns serialized full block bytes into serialized blinded block bytes
//! without decoding the block. Only the transaction and withdrawal lists are
//! decoded, because their roots have to be computed.
//!
//! ```text
//! full:    [..payload fixed to +504] offs(tx) [offs(wd)] [gas] extra txs [wds] | bls.. kzg..
//! blinded: [..payload fixed to +504] tx_root [wd_root]   [gas] extra          | bls.. kzg..
//! ```
//!
//! Everything before the payload keeps its position. The `extra_data`
//! offset grows to the header's fixed length, and the body offsets that
//! point past the payload move by however much the payload shrank.

use super::error::CodecError;
use super::layout::{
    slice, slice_range, write_offset, BlockLayout, BLOB_COMMITMENTS_OFFSET_POSITION,
    BLOB_GAS_FIELDS_LEN, BLS_CHANGES_OFFSET_POSITION, EXTRA_DATA_OFFSET_POSITION,
    TRANSACTIONS_POSITION,
};
use shared_types::{ForkName, Transactions, Withdrawals};
use ssz::Decode;
use tree_hash::TreeHash;

/// Blind a serialized full block.
///
/// Pre-Bellatrix and already-blinded input is returned unchanged.
pub fn blind_block_bytes(fork: ForkName, bytes: &[u8]) -> Result<Vec<u8>, CodecError> {
    if !fork.has_execution_payload() {
        return Ok(bytes.to_vec());
    }
    let layout = BlockLayout::resolve(bytes, fork)?;
    if layout.blinded {
        return Ok(bytes.to_vec());
    }

    let schema = layout.schema;
    let sections = layout.full_payload_sections(bytes)?;

    let transactions_root =
        Transactions::from_ssz_bytes(slice_range(bytes, &sections.transactions)?)?.tree_hash_root();
    let withdrawals_root = sections
        .withdrawals
        .as_ref()
        .map(|range| -> Result<_, CodecError> {
            Ok(Withdrawals::from_ssz_bytes(slice_range(bytes, range)?)?.tree_hash_root())
        })
        .transpose()?;

    let extra_data = slice_range(bytes, &sections.extra_data)?;
    let trailing = slice(bytes, layout.payload_end, bytes.len())?;
    let header_len = schema.header_fixed_len + extra_data.len();

    let mut out = Vec::with_capacity(layout.payload_start + header_len + trailing.len());
    out.extend_from_slice(slice(bytes, 0, layout.payload_field(TRANSACTIONS_POSITION))?);
    out.extend_from_slice(transactions_root.as_bytes());
    if let Some(root) = withdrawals_root {
        out.extend_from_slice(root.as_bytes());
    }
    if let Some(position) = schema.full_blob_gas_position() {
        let start = layout.payload_field(position);
        out.extend_from_slice(slice(bytes, start, start + BLOB_GAS_FIELDS_LEN)?);
    }
    write_offset(
        &mut out,
        layout.payload_field(EXTRA_DATA_OFFSET_POSITION),
        schema.header_fixed_len,
    )?;
    out.extend_from_slice(extra_data);

    if let Some(bls_changes_start) = layout.bls_changes_start {
        let relocated = layout.payload_start + header_len - layout.body_start;
        write_offset(
            &mut out,
            layout.body_field(BLS_CHANGES_OFFSET_POSITION),
            relocated,
        )?;
        if let Some(commitments_start) = layout.blob_commitments_start {
            write_offset(
                &mut out,
                layout.body_field(BLOB_COMMITMENTS_OFFSET_POSITION),
                relocated + (commitments_start - bls_changes_start),
            )?;
        }
    }
    out.extend_from_slice(trailing);

    Ok(out)
}
