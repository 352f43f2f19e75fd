//! # Streaming Reassembly
//!
//! Rebuilds full block bytes from blinded block bytes plus a payload body
//! that arrives later. The part of the block that does not depend on the
//! body is yielded first so it can be written to the wire while the body is
//! still being fetched.
//!
//! Chunk boundaries:
//!
//! - Bellatrix: the payload is the last variable body field, so chunk 1 runs
//!   through `extra_data` (with a freshly computed transactions offset) and
//!   chunk 2 is the serialized transactions.
//! - Capella and later: the body offsets to `bls_to_execution_changes` and
//!   `blob_kzg_commitments` depend on the payload size, so chunk 1 stops
//!   right before them and chunk 2 carries those offsets, the operations,
//!   the rebuilt payload and the untouched trailing lists.

use super::entities::ExecutionPayloadBody;
use super::error::CodecError;
use super::layout::{
    encode_offset, slice, slice_range, write_offset, BlockLayout,
    BLOB_GAS_FIELDS_LEN, BLS_CHANGES_OFFSET_POSITION, EXTRA_DATA_OFFSET_POSITION,
    FULL_WITHDRAWALS_OFFSET_POSITION, OFFSET_SIZE, TRANSACTIONS_POSITION,
};
use futures::future::{self, Future};
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use shared_types::ForkName;
use ssz::Encode;

/// Chunks of a full serialized block.
pub type FullBlockBytesStream = BoxStream<'static, Result<Vec<u8>, CodecError>>;

/// Stream full block bytes rebuilt from `blinded` and the delivered `body`.
///
/// Pre-Bellatrix and already-full input is yielded unchanged as one chunk
/// and `body` is never polled.
pub fn reassemble_full_block_bytes<F>(
    fork: ForkName,
    blinded: Vec<u8>,
    body: F,
) -> FullBlockBytesStream
where
    F: Future<Output = ExecutionPayloadBody> + Send + 'static,
{
    if !fork.has_execution_payload() {
        return stream::once(future::ready(Ok(blinded))).boxed();
    }

    let layout = match BlockLayout::resolve(&blinded, fork) {
        Ok(layout) => layout,
        Err(err) => return stream::once(future::ready(Err(err))).boxed(),
    };
    if !layout.blinded {
        return stream::once(future::ready(Ok(blinded))).boxed();
    }

    let head = match head_chunk(&layout, &blinded) {
        Ok(head) => head,
        Err(err) => return stream::once(future::ready(Err(err))).boxed(),
    };

    let tail = async move {
        let body = body.await;
        tail_chunk(&layout, &blinded, body)
    };

    stream::once(future::ready(Ok(head)))
        .chain(stream::once(tail))
        .boxed()
}

/// Concatenate a reassembly stream into one buffer.
pub async fn collect_full_block_bytes(
    stream: FullBlockBytesStream,
) -> Result<Vec<u8>, CodecError> {
    stream.try_concat().await
}

fn head_chunk(layout: &BlockLayout, blinded: &[u8]) -> Result<Vec<u8>, CodecError> {
    if layout.fork().has_withdrawals() {
        return Ok(slice(blinded, 0, layout.body_field(BLS_CHANGES_OFFSET_POSITION))?.to_vec());
    }

    let full_fixed_len = layout.schema.full_fixed_len;
    let extra_data = slice_range(blinded, &layout.header_extra_data())?;

    let mut chunk = slice(blinded, 0, layout.payload_field(TRANSACTIONS_POSITION))?.to_vec();
    write_offset(
        &mut chunk,
        layout.payload_field(EXTRA_DATA_OFFSET_POSITION),
        full_fixed_len,
    )?;
    chunk.extend_from_slice(&encode_offset(full_fixed_len + extra_data.len())?);
    chunk.extend_from_slice(extra_data);
    Ok(chunk)
}

fn tail_chunk(
    layout: &BlockLayout,
    blinded: &[u8],
    mut body: ExecutionPayloadBody,
) -> Result<Vec<u8>, CodecError> {
    let transactions = body.take_transactions()?.as_ssz_bytes();
    let Some(bls_changes_start) = layout.bls_changes_start else {
        return Ok(transactions);
    };
    let withdrawals = body.take_withdrawals()?.as_ssz_bytes();

    let schema = layout.schema;
    let extra_data = slice_range(blinded, &layout.header_extra_data())?;

    let mut payload = Vec::with_capacity(
        schema.full_fixed_len + extra_data.len() + transactions.len() + withdrawals.len(),
    );
    payload.extend_from_slice(slice(
        blinded,
        layout.payload_start,
        layout.payload_field(TRANSACTIONS_POSITION),
    )?);
    // transactions and withdrawals offsets, filled in below
    payload.extend_from_slice(&[0u8; 2 * OFFSET_SIZE]);
    if let Some(position) = schema.header_blob_gas_position() {
        let start = layout.payload_field(position);
        payload.extend_from_slice(slice(blinded, start, start + BLOB_GAS_FIELDS_LEN)?);
    }
    let transactions_offset = schema.full_fixed_len + extra_data.len();
    let withdrawals_offset = transactions_offset + transactions.len();
    write_offset(&mut payload, EXTRA_DATA_OFFSET_POSITION, schema.full_fixed_len)?;
    write_offset(&mut payload, TRANSACTIONS_POSITION, transactions_offset)?;
    write_offset(&mut payload, FULL_WITHDRAWALS_OFFSET_POSITION, withdrawals_offset)?;
    payload.extend_from_slice(extra_data);
    payload.extend_from_slice(&transactions);
    payload.extend_from_slice(&withdrawals);

    let relocated = layout.payload_start - layout.body_start + payload.len();
    let operations = slice(blinded, layout.body_fixed_end(), layout.payload_start)?;
    let trailing = slice(blinded, bls_changes_start, blinded.len())?;

    let mut chunk =
        Vec::with_capacity(2 * OFFSET_SIZE + operations.len() + payload.len() + trailing.len());
    chunk.extend_from_slice(&encode_offset(relocated)?);
    if let Some(commitments_start) = layout.blob_commitments_start {
        chunk.extend_from_slice(&encode_offset(
            relocated + (commitments_start - bls_changes_start),
        )?);
    }
    chunk.extend_from_slice(operations);
    chunk.extend_from_slice(&payload);
    chunk.extend_from_slice(trailing);
    Ok(chunk)
}
