//! # Inbound Ports (Driving Ports)
//!
//! The API the gossip layer drives.

use crate::domain::{AvailabilityHandle, BlockInputError, GossipBlockInputResult, GossipedInput};
use shared_types::Root;

/// Assembly of gossiped blocks and blob sidecars.
pub trait GossipBlockInputApi: Send + Sync {
    /// Merge one gossip message into the cache and report the block
    /// identity's completeness.
    ///
    /// ## Errors
    ///
    /// - `TooManyBlobs`: more sidecars than the block commits to
    /// - `MissingBlobSidecar`: sidecar indices are not contiguous from zero
    /// - `ForkMismatch`: the block's variant disagrees with the fork schedule
    fn on_gossip(&self, input: GossipedInput) -> Result<GossipBlockInputResult, BlockInputError>;

    /// Waiter on the blobs of a cached block identity.
    fn availability(&self, block_root: &Root) -> Option<AvailabilityHandle>;

    /// Number of block identities currently tracked.
    fn cached_block_inputs(&self) -> usize;
}
