//! # Chain Configuration
//!
//! Slot timing and the fork activation schedule. Every fork-dependent
//! decision in the workspace goes through [`ChainConfig::fork_at_slot`].

use crate::errors::TypesError;
use crate::fork::ForkName;
use crate::primitives::{Epoch, Slot, FAR_FUTURE_EPOCH, MIN_EPOCHS_FOR_BLOB_SIDECARS_REQUESTS};
use serde::{Deserialize, Serialize};

/// Runtime chain parameters.
///
/// Deserializes from JSON with any missing field taken from [`ChainConfig::mainnet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Slot duration in seconds (mainnet: 12).
    pub seconds_per_slot: u64,
    /// Slots per epoch (mainnet: 32).
    pub slots_per_epoch: u64,
    pub altair_fork_epoch: Epoch,
    pub bellatrix_fork_epoch: Epoch,
    pub capella_fork_epoch: Epoch,
    pub deneb_fork_epoch: Epoch,
    /// Retention window for blob sidecars, in epochs.
    pub min_epochs_for_blob_sidecar_requests: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::mainnet()
    }
}

impl ChainConfig {
    /// Ethereum mainnet schedule.
    pub fn mainnet() -> Self {
        Self {
            seconds_per_slot: 12,
            slots_per_epoch: 32,
            altair_fork_epoch: 74_240,
            bellatrix_fork_epoch: 144_896,
            capella_fork_epoch: 194_048,
            deneb_fork_epoch: 269_568,
            min_epochs_for_blob_sidecar_requests: MIN_EPOCHS_FOR_BLOB_SIDECARS_REQUESTS,
        }
    }

    /// Minimal preset timing with no forks scheduled past phase0.
    pub fn minimal() -> Self {
        Self {
            seconds_per_slot: 6,
            slots_per_epoch: 8,
            altair_fork_epoch: FAR_FUTURE_EPOCH,
            bellatrix_fork_epoch: FAR_FUTURE_EPOCH,
            capella_fork_epoch: FAR_FUTURE_EPOCH,
            deneb_fork_epoch: FAR_FUTURE_EPOCH,
            min_epochs_for_blob_sidecar_requests: MIN_EPOCHS_FOR_BLOB_SIDECARS_REQUESTS,
        }
    }

    /// Override the fork schedule.
    pub fn with_fork_epochs(
        mut self,
        altair: Epoch,
        bellatrix: Epoch,
        capella: Epoch,
        deneb: Epoch,
    ) -> Self {
        self.altair_fork_epoch = altair;
        self.bellatrix_fork_epoch = bellatrix;
        self.capella_fork_epoch = capella;
        self.deneb_fork_epoch = deneb;
        self
    }

    /// Parse a JSON document; absent fields fall back to mainnet values.
    pub fn from_json(json: &str) -> Result<Self, TypesError> {
        let config: ChainConfig =
            serde_json::from_str(json).map_err(|e| TypesError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check timing is non-zero and forks activate in order.
    pub fn validate(&self) -> Result<(), TypesError> {
        if self.seconds_per_slot == 0 {
            return Err(TypesError::InvalidConfig(
                "seconds_per_slot must be non-zero".to_string(),
            ));
        }
        if self.slots_per_epoch == 0 {
            return Err(TypesError::InvalidConfig(
                "slots_per_epoch must be non-zero".to_string(),
            ));
        }

        let schedule = [
            (ForkName::Altair, self.altair_fork_epoch),
            (ForkName::Bellatrix, self.bellatrix_fork_epoch),
            (ForkName::Capella, self.capella_fork_epoch),
            (ForkName::Deneb, self.deneb_fork_epoch),
        ];
        for pair in schedule.windows(2) {
            let (prev_fork, prev_epoch) = pair[0];
            let (fork, epoch) = pair[1];
            if epoch < prev_epoch {
                return Err(TypesError::InvalidConfig(format!(
                    "{} fork epoch {} precedes {} fork epoch {}",
                    fork, epoch, prev_fork, prev_epoch
                )));
            }
        }

        Ok(())
    }

    /// Activation epoch of `fork`.
    pub fn fork_epoch(&self, fork: ForkName) -> Epoch {
        match fork {
            ForkName::Phase0 => 0,
            ForkName::Altair => self.altair_fork_epoch,
            ForkName::Bellatrix => self.bellatrix_fork_epoch,
            ForkName::Capella => self.capella_fork_epoch,
            ForkName::Deneb => self.deneb_fork_epoch,
        }
    }

    /// Schema version active at `epoch`.
    pub fn fork_at_epoch(&self, epoch: Epoch) -> ForkName {
        ForkName::ALL
            .into_iter()
            .rev()
            .find(|fork| epoch >= self.fork_epoch(*fork))
            .unwrap_or(ForkName::Phase0)
    }

    /// Schema version active at `slot`.
    pub fn fork_at_slot(&self, slot: Slot) -> ForkName {
        self.fork_at_epoch(self.epoch_at_slot(slot))
    }

    pub fn epoch_at_slot(&self, slot: Slot) -> Epoch {
        slot / self.slots_per_epoch.max(1)
    }

    pub fn start_slot_at_epoch(&self, epoch: Epoch) -> Slot {
        epoch.saturating_mul(self.slots_per_epoch)
    }

    /// Wall-clock start of `slot`, in unix seconds.
    pub fn time_at_slot(&self, slot: Slot, genesis_time: u64) -> u64 {
        genesis_time.saturating_add(slot.saturating_mul(self.seconds_per_slot))
    }
}
