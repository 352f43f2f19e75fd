//! # Assembler Configuration

/// Default bound on tracked block identities.
pub const DEFAULT_MAX_CACHED_BLOCK_INPUTS: usize = 5;

/// Configuration for the block input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblerConfig {
    /// Maximum number of block identities tracked at once (default: 5).
    ///
    /// When exceeded, the identity first seen earliest is evicted, complete
    /// or not.
    pub max_cached_block_inputs: usize,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            max_cached_block_inputs: DEFAULT_MAX_CACHED_BLOCK_INPUTS,
        }
    }
}

impl AssemblerConfig {
    pub fn new(max_cached_block_inputs: usize) -> Self {
        Self {
            max_cached_block_inputs,
        }
    }
}
