//! Availability outcome of a single block input.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataAvailableStatus {
    /// The block predates blobs; nothing to check.
    PreDeneb,
    /// Every committed blob is present and valid.
    Available,
}

impl DataAvailableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreDeneb => "pre_deneb",
            Self::Available => "available",
        }
    }
}

impl fmt::Display for DataAvailableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
