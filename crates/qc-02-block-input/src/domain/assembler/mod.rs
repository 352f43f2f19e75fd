//! # Gossip Block Assembler
//!
//! Merges independently arriving block and blob sidecar messages into one
//! [`BlockInput`](crate::domain::BlockInput) per block root.
//!
//! ## Module Structure
//!
//! - `buffer` - BlockInputBuffer, the bounded identity cache
//! - `config` - AssemblerConfig
//! - `pending` - PendingBlockInput and completeness evaluation
//! - `security` - Configuration bounds

mod buffer;
mod config;
mod pending;
pub mod security;


pub use buffer::BlockInputBuffer;
pub use config::{AssemblerConfig, DEFAULT_MAX_CACHED_BLOCK_INPUTS};
pub use pending::PendingBlockInput;
