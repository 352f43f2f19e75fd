//! # Fork Schedule
//!
//! Protocol schema versions in activation order. Ordering is meaningful:
//! every capability switches on at one fork and stays on afterwards.

use crate::errors::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A beacon-chain schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForkName {
    Phase0,
    Altair,
    Bellatrix,
    Capella,
    Deneb,
}

impl ForkName {
    /// All forks in activation order.
    pub const ALL: [ForkName; 5] = [
        ForkName::Phase0,
        ForkName::Altair,
        ForkName::Bellatrix,
        ForkName::Capella,
        ForkName::Deneb,
    ];

    /// Forks whose bodies carry an execution payload (and so have a blinded form).
    pub const EXECUTION: [ForkName; 3] = [ForkName::Bellatrix, ForkName::Capella, ForkName::Deneb];

    /// Body carries a sync aggregate.
    pub fn has_sync_aggregate(self) -> bool {
        self >= ForkName::Altair
    }

    /// Body carries an execution payload.
    pub fn has_execution_payload(self) -> bool {
        self >= ForkName::Bellatrix
    }

    /// Execution payload carries withdrawals and the body carries BLS-to-execution changes.
    pub fn has_withdrawals(self) -> bool {
        self >= ForkName::Capella
    }

    /// Body carries blob KZG commitments; blocks require data availability.
    pub fn has_blob_commitments(self) -> bool {
        self >= ForkName::Deneb
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ForkName::Phase0 => "phase0",
            ForkName::Altair => "altair",
            ForkName::Bellatrix => "bellatrix",
            ForkName::Capella => "capella",
            ForkName::Deneb => "deneb",
        }
    }
}

impl fmt::Display for ForkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ForkName {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ForkName::ALL
            .into_iter()
            .find(|fork| fork.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| TypesError::UnknownFork(s.to_string()))
    }
}
