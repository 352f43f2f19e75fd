//! # Quantum-Chain Test Suite
//!
//! Unified test crate for flows that cross subsystem boundaries.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/
//! │   └── codec_benchmarks.rs   # byte-level vs structured blinding
//! └── src/
//!     └── integration/          # codec → block input → data availability
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p qc-tests
//!
//! # Benchmarks
//! cargo bench -p qc-tests
//! ```

pub mod integration;
