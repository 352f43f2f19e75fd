//! # Block Input (qc-02)
//!
//! Assembles gossiped blocks and blob sidecars into [`BlockInput`]s ready
//! for data-availability verification.
//!
//! ```text
//! gossip block ──────┐
//!                    ├──→ BlockInputBuffer (keyed by block root, bound 5)
//! gossip sidecar(s) ─┘          │
//!                               ↓
//!          PreDeneb | PostDeneb(blobs) | BlobsPromise(cache, handle)
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Commitment Bound | Cached sidecars never exceed the block's commitments |
//! | 2 | Single Resolution | An entry's availability signal fires at most once, when counts match |
//! | 3 | Contiguous Indices | Blobs are assembled from indices `0..n`; a gap is an error |
//! | 4 | Unsigned Bytes | Cached sidecar bytes are cut to the fixed sidecar size |
//! | 5 | Bounded Cache | At most 5 identities tracked; earliest inserted evicted first |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - BlockInput, availability signal, assembler buffer
//! - `ports/` - `GossipBlockInputApi`
//! - `service.rs` - `GossipBlockInputService`, the buffer behind a mutex
//!
//! ## Usage
//!
//! ```ignore
//! use qc_02_block_input::{GossipBlockInputApi, GossipBlockInputService, GossipedInput};
//!
//! let service = GossipBlockInputService::new(Arc::new(ChainConfig::mainnet()));
//! let result = service.on_gossip(GossipedInput::Blob { sidecar, bytes: Some(raw) })?;
//! if result.meta.pending.is_none() {
//!     // block and all blobs present
//! }
//! ```

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    availability_channel, block_requires_blobs, AssemblerConfig, AvailabilityError,
    AvailabilityHandle, AvailabilityResolver, BlobsCache, BlockInput, BlockInputBlobs,
    BlockInputData, BlockInputError, BlockInputMeta, BlockInputType, BlockSource, CachedBlob,
    GossipBlockInputResult, GossipedInput, GossipedInputType,
};
pub use ports::inbound::GossipBlockInputApi;
pub use service::GossipBlockInputService;
