//! Ports (hexagonal architecture)

pub mod inbound;
pub mod outbound;

pub use inbound::DataAvailabilityApi;
pub use outbound::{BlobSidecarValidator, KzgProofVerifier, SlotClock, SystemSlotClock};
