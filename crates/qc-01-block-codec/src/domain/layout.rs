//! # Wire Layout
//!
//! Fixed positions of every offset the codec touches, per fork, and the
//! bounds-checked accessors used to read and rewrite them. Nothing else in
//! this crate indexes a block buffer directly.
//!
//! ```text
//! SignedBeaconBlock  [0]     offset(message) = 100
//!                    [4]     signature (96 bytes)
//! BeaconBlock        [+0]    slot | proposer_index | parent_root | state_root
//!                    [+80]   offset(body) = 84
//! BeaconBlockBody    [+380]  offset(execution_payload)
//!                    [+384]  offset(bls_to_execution_changes)      capella+
//!                    [+388]  offset(blob_kzg_commitments)          deneb
//! ExecutionPayload   [+436]  offset(extra_data)
//!                    [+504]  offset(transactions) | transactions_root
//!                    [+508]  offset(withdrawals)                   capella+, full
//!                    [+536]  withdrawals_root                      capella+, blinded
//!                    [+512 | +568]  blob_gas_used, excess_blob_gas deneb
//! ```
//!
//! Offsets are 4-byte little-endian and relative to the start of the
//! container that holds them. The first variable field of a container always
//! starts right after its fixed part, so the `extra_data` offset of a payload
//! equals the payload's fixed length. That is what tells a full payload from
//! a header.

use super::error::CodecError;
use shared_types::{ForkName, Slot, ROOT_SIZE};
use std::ops::Range;

/// Width of an SSZ offset.
pub const OFFSET_SIZE: usize = 4;

/// Fixed part of `SignedBeaconBlock`: message offset plus signature.
pub const SIGNED_BLOCK_FIXED_LEN: usize = 100;

/// Absolute position of the block slot.
pub const SLOT_POSITION: usize = SIGNED_BLOCK_FIXED_LEN;

/// Body offset, relative to the message.
pub const BODY_OFFSET_POSITION: usize = 80;

/// Fixed part of `BeaconBlock`.
pub const BLOCK_FIXED_LEN: usize = 84;

// Relative to the body.
pub const EXECUTION_PAYLOAD_OFFSET_POSITION: usize = 380;
pub const BLS_CHANGES_OFFSET_POSITION: usize = 384;
pub const BLOB_COMMITMENTS_OFFSET_POSITION: usize = 388;

// Relative to the payload.
pub const TIMESTAMP_POSITION: usize = 428;
pub const EXTRA_DATA_OFFSET_POSITION: usize = 436;
pub const TRANSACTIONS_POSITION: usize = 504;
pub const FULL_WITHDRAWALS_OFFSET_POSITION: usize = 508;
pub const HEADER_WITHDRAWALS_ROOT_POSITION: usize = 536;

/// `blob_gas_used` and `excess_blob_gas`.
pub const BLOB_GAS_FIELDS_LEN: usize = 16;

/// Fixed part of the block body for `fork`.
pub fn body_fixed_len(fork: ForkName) -> usize {
    match fork {
        ForkName::Phase0 => 220,
        ForkName::Altair => 380,
        ForkName::Bellatrix => 384,
        ForkName::Capella => 388,
        ForkName::Deneb => 392,
    }
}

/// Per-fork execution payload geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadSchema {
    pub fork: ForkName,
    /// Fixed part of the full `ExecutionPayload`.
    pub full_fixed_len: usize,
    /// Fixed part of the `ExecutionPayloadHeader`.
    pub header_fixed_len: usize,
}

impl PayloadSchema {
    /// `None` before Bellatrix.
    pub fn for_fork(fork: ForkName) -> Option<Self> {
        let (full_fixed_len, header_fixed_len) = match fork {
            ForkName::Phase0 | ForkName::Altair => return None,
            ForkName::Bellatrix => (508, 536),
            ForkName::Capella => (512, 568),
            ForkName::Deneb => (528, 584),
        };
        Some(Self {
            fork,
            full_fixed_len,
            header_fixed_len,
        })
    }

    /// Where the blob gas fields sit in a full payload.
    pub fn full_blob_gas_position(&self) -> Option<usize> {
        self.fork
            .has_blob_commitments()
            .then_some(FULL_WITHDRAWALS_OFFSET_POSITION + OFFSET_SIZE)
    }

    /// Where the blob gas fields sit in a header.
    pub fn header_blob_gas_position(&self) -> Option<usize> {
        self.fork
            .has_blob_commitments()
            .then_some(HEADER_WITHDRAWALS_ROOT_POSITION + ROOT_SIZE)
    }

    /// Decide the representation from the observed `extra_data` offset.
    pub fn classify(&self, extra_data_offset: usize) -> Result<bool, CodecError> {
        if extra_data_offset == self.header_fixed_len {
            Ok(true)
        } else if extra_data_offset == self.full_fixed_len {
            Ok(false)
        } else {
            Err(CodecError::unsupported(
                self.fork,
                format!(
                    "extra_data offset {} matches neither payload ({}) nor header ({})",
                    extra_data_offset, self.full_fixed_len, self.header_fixed_len
                ),
            ))
        }
    }
}

/// Absolute positions resolved from a serialized execution-fork block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLayout {
    pub schema: PayloadSchema,
    pub body_start: usize,
    pub payload_start: usize,
    /// End of the payload: the next variable body field, or end of buffer.
    pub payload_end: usize,
    /// Capella onward.
    pub bls_changes_start: Option<usize>,
    /// Deneb onward.
    pub blob_commitments_start: Option<usize>,
    pub blinded: bool,
}

/// Variable sections of a full payload, absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullPayloadSections {
    pub extra_data: Range<usize>,
    pub transactions: Range<usize>,
    pub withdrawals: Option<Range<usize>>,
}

impl BlockLayout {
    /// Walk the offset chain from the signed wrapper down to the payload.
    pub fn resolve(bytes: &[u8], fork: ForkName) -> Result<Self, CodecError> {
        let schema = PayloadSchema::for_fork(fork)
            .ok_or_else(|| CodecError::unsupported(fork, "fork has no execution payload"))?;

        let message_offset = read_offset(bytes, 0)?;
        if message_offset != SIGNED_BLOCK_FIXED_LEN {
            return Err(CodecError::unsupported(
                fork,
                format!("message offset {} != {}", message_offset, SIGNED_BLOCK_FIXED_LEN),
            ));
        }

        let body_offset = read_offset(bytes, message_offset + BODY_OFFSET_POSITION)?;
        if body_offset != BLOCK_FIXED_LEN {
            return Err(CodecError::unsupported(
                fork,
                format!("body offset {} != {}", body_offset, BLOCK_FIXED_LEN),
            ));
        }
        let body_start = message_offset + body_offset;

        let payload_start =
            body_start + read_offset(bytes, body_start + EXECUTION_PAYLOAD_OFFSET_POSITION)?;

        let bls_changes_start = if fork.has_withdrawals() {
            Some(body_start + read_offset(bytes, body_start + BLS_CHANGES_OFFSET_POSITION)?)
        } else {
            None
        };
        let blob_commitments_start = if fork.has_blob_commitments() {
            Some(body_start + read_offset(bytes, body_start + BLOB_COMMITMENTS_OFFSET_POSITION)?)
        } else {
            None
        };

        let payload_end = bls_changes_start.unwrap_or(bytes.len());

        // Variable sections must appear in field order and inside the buffer.
        let ordered = [
            body_start + body_fixed_len(fork),
            payload_start,
            payload_end,
            blob_commitments_start.unwrap_or(payload_end),
            bytes.len(),
        ];
        if ordered.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(CodecError::unsupported(fork, "offsets are not monotonic"));
        }

        let extra_data_offset = read_offset(bytes, payload_start + EXTRA_DATA_OFFSET_POSITION)?;
        let blinded = schema.classify(extra_data_offset)?;

        let fixed_len = if blinded {
            schema.header_fixed_len
        } else {
            schema.full_fixed_len
        };
        if payload_start + fixed_len > payload_end {
            return Err(CodecError::unsupported(
                fork,
                "payload shorter than its fixed part",
            ));
        }

        Ok(Self {
            schema,
            body_start,
            payload_start,
            payload_end,
            bls_changes_start,
            blob_commitments_start,
            blinded,
        })
    }

    pub fn fork(&self) -> ForkName {
        self.schema.fork
    }

    /// Absolute position of a payload-relative field.
    pub fn payload_field(&self, relative: usize) -> usize {
        self.payload_start + relative
    }

    /// Absolute position of a body-relative field.
    pub fn body_field(&self, relative: usize) -> usize {
        self.body_start + relative
    }

    /// End of the body's fixed part; the first variable body field starts here.
    pub fn body_fixed_end(&self) -> usize {
        self.body_start + body_fixed_len(self.fork())
    }

    /// Extra data of a blinded payload: from its offset to the payload end.
    pub fn header_extra_data(&self) -> Range<usize> {
        self.payload_field(self.schema.header_fixed_len)..self.payload_end
    }

    /// Variable sections of a full payload.
    pub fn full_payload_sections(&self, bytes: &[u8]) -> Result<FullPayloadSections, CodecError> {
        let fork = self.fork();
        let extra_data_start = self.payload_field(self.schema.full_fixed_len);
        let transactions_start =
            self.payload_field(read_offset(bytes, self.payload_field(TRANSACTIONS_POSITION))?);

        let withdrawals_start = if fork.has_withdrawals() {
            Some(self.payload_field(read_offset(
                bytes,
                self.payload_field(FULL_WITHDRAWALS_OFFSET_POSITION),
            )?))
        } else {
            None
        };
        let transactions_end = withdrawals_start.unwrap_or(self.payload_end);

        if extra_data_start > transactions_start
            || transactions_start > transactions_end
            || transactions_end > self.payload_end
        {
            return Err(CodecError::unsupported(
                fork,
                "payload offsets are not monotonic",
            ));
        }

        Ok(FullPayloadSections {
            extra_data: extra_data_start..transactions_start,
            transactions: transactions_start..transactions_end,
            withdrawals: withdrawals_start.map(|start| start..self.payload_end),
        })
    }
}

/// Read a 4-byte little-endian offset.
pub fn read_offset(bytes: &[u8], position: usize) -> Result<usize, CodecError> {
    let raw = slice(bytes, position, position.saturating_add(OFFSET_SIZE))?;
    let mut buf = [0u8; OFFSET_SIZE];
    buf.copy_from_slice(raw);
    Ok(u32::from_le_bytes(buf) as usize)
}

/// Overwrite a 4-byte little-endian offset in place.
pub fn write_offset(bytes: &mut [u8], position: usize, value: usize) -> Result<(), CodecError> {
    let encoded = encode_offset(value)?;
    let len = bytes.len();
    let target = bytes
        .get_mut(position..position.saturating_add(OFFSET_SIZE))
        .ok_or(CodecError::OutOfBounds { position, len })?;
    target.copy_from_slice(&encoded);
    Ok(())
}

/// Encode an offset, rejecting values that do not fit in 32 bits.
pub fn encode_offset(value: usize) -> Result<[u8; OFFSET_SIZE], CodecError> {
    u32::try_from(value)
        .map(u32::to_le_bytes)
        .map_err(|_| CodecError::OutOfBounds {
            position: value,
            len: u32::MAX as usize,
        })
}

/// `bytes[start..end]`, or `OutOfBounds`.
pub fn slice(bytes: &[u8], start: usize, end: usize) -> Result<&[u8], CodecError> {
    if start > end {
        return Err(CodecError::OutOfBounds {
            position: start,
            len: bytes.len(),
        });
    }
    bytes.get(start..end).ok_or(CodecError::OutOfBounds {
        position: end,
        len: bytes.len(),
    })
}

/// `bytes[range]`, or `OutOfBounds`.
pub fn slice_range<'a>(bytes: &'a [u8], range: &Range<usize>) -> Result<&'a [u8], CodecError> {
    slice(bytes, range.start, range.end)
}

/// Read the block slot without decoding.
pub fn read_slot(bytes: &[u8]) -> Result<Slot, CodecError> {
    let raw = bytes
        .get(SLOT_POSITION..SLOT_POSITION + 8)
        .ok_or(CodecError::InvalidSlot { len: bytes.len() })?;
    let mut buf = [0u8; 8];
    buf.copy_from_slice(raw);
    Ok(u64::from_le_bytes(buf))
}
