//! Blocks that passed every pre-import check.

use super::status::DataAvailableStatus;
use qc_02_block_input::BlockInput;
use shared_types::{Root, Slot};

/// Execution-layer verdict on a block's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStatus {
    Valid,
    /// The execution engine is syncing; the payload is optimistically
    /// accepted.
    Syncing,
    /// The block predates the merge.
    PreMerge,
}

/// A block ready to import.
///
/// `S` is the post-state produced by the state transition, owned by the
/// caller's state layer.
#[derive(Debug, Clone)]
pub struct FullyVerifiedBlock<S> {
    pub block_input: BlockInput,
    pub post_state: S,
    pub parent_block_slot: Slot,
    pub proposer_balance_delta: i64,
    pub execution_status: ExecutionStatus,
    pub data_available_status: DataAvailableStatus,
    pub seen_timestamp_sec: u64,
}

impl<S> FullyVerifiedBlock<S> {
    pub fn slot(&self) -> Slot {
        self.block_input.slot()
    }

    pub fn block_root(&self) -> Root {
        self.block_input.block_root()
    }
}
