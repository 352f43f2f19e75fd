//! Domain layer for the Block Codec subsystem
//!
//! - layout: fixed wire positions and bounds-checked accessors
//! - wire: fork and representation detection on raw bytes
//! - blinding: full <-> blinded on decoded blocks
//! - splice: full -> blinded on raw bytes
//! - reassembly: blinded -> full on raw bytes, streamed

mod blinding;
mod entities;
mod error;
pub mod layout;
mod reassembly;
mod splice;
mod wire;

#[cfg(test)]
mod tests;

pub use blinding::*;
pub use entities::*;
pub use error::*;
pub use reassembly::*;
pub use splice::*;
pub use wire::*;
