//! # Block Codec (qc-01)
//!
//! Converts beacon blocks between their two wire representations:
//!
//! - **full**: the body carries the complete `ExecutionPayload`
//! - **blinded**: the body carries an `ExecutionPayloadHeader`, with the
//!   transaction and withdrawal lists replaced by their roots
//!
//! Both conversions exist on decoded blocks and on raw SSZ bytes. The byte
//! paths never decode the block; they walk the offset chain
//!
//! ```text
//! SignedBeaconBlock -> BeaconBlock -> BeaconBlockBody -> ExecutionPayload -> lists
//! ```
//!
//! using per-fork fixed positions (see [`domain::layout`]) and splice the
//! buffer directly.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Root Preservation | A block and its blinded form share one block root |
//! | 2 | Representation Detection | `extra_data` offset equals the payload or header fixed length, nothing else |
//! | 3 | Bounded Access | Every buffer read/write is bounds-checked |
//! | 4 | Complete Body | Unblinding without the lists a fork needs fails |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Layout constants, detection, conversions
//! - `ports/` - `BlockCodecApi`
//! - `service.rs` - `BlockCodec`, bound to a `ChainConfig`
//!
//! ## Usage
//!
//! ```ignore
//! use qc_01_block_codec::{BlockCodec, BlockCodecApi};
//!
//! let codec = BlockCodec::new(Arc::new(ChainConfig::mainnet()));
//! let blinded = codec.to_blinded_bytes(&full_bytes)?;
//! let full = collect_full_block_bytes(codec.to_full_bytes(blinded, body_future)).await?;
//! ```

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    blind_block_bytes, collect_full_block_bytes, deserialize_full_or_blinded,
    is_serialized_blinded, reassemble_full_block_bytes, serialize_full_or_blinded,
    slot_from_signed_block_bytes, to_blinded, to_full, CodecError, ExecutionPayloadBody,
    FullBlockBytesStream,
};
pub use ports::inbound::BlockCodecApi;
pub use service::BlockCodec;
