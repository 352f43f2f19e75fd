//! # Inbound Ports (Driving Ports)
//!
//! The API block import drives.

use crate::domain::{DataAvailabilityError, DataAvailableStatus, ImportBlockOpts};
use async_trait::async_trait;
use qc_02_block_input::BlockInput;

#[async_trait]
pub trait DataAvailabilityApi: Send + Sync {
    /// Determine the availability status of each block, in input order.
    ///
    /// Blocks are checked one after another; a block whose blobs are still
    /// arriving is waited on until its cutoff before the next is looked at.
    ///
    /// ## Errors
    ///
    /// - `EmptyInput`: `blocks` is empty
    /// - `DataUnavailable`: blobs missing at the cutoff
    /// - `InvalidData`: blobs do not back the block's commitments
    async fn verify_blocks_data_availability(
        &self,
        blocks: &[BlockInput],
        opts: &ImportBlockOpts,
    ) -> Result<Vec<DataAvailableStatus>, DataAvailabilityError>;
}
