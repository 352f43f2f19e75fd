//! # Integration Tests
//!
//! Flows spanning the block codec (qc-01), block input assembly (qc-02)
//! and data availability (qc-03).

pub mod flows;
