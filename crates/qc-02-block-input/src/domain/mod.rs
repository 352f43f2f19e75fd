//! Domain layer for the Block Input subsystem.

pub mod assembler;
pub mod availability;
pub mod block_input;
pub mod errors;
pub mod gossip;


pub use assembler::{AssemblerConfig, BlockInputBuffer, PendingBlockInput};
pub use availability::{availability_channel, AvailabilityError, AvailabilityHandle, AvailabilityResolver};
pub use block_input::{
    block_requires_blobs, BlobsCache, BlockInput, BlockInputBlobs, BlockInputData,
    BlockInputType, BlockSource, CachedBlob,
};
pub use errors::BlockInputError;
pub use gossip::{BlockInputMeta, GossipBlockInputResult, GossipedInput, GossipedInputType};
