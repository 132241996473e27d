//! Test support for the cryptolib workspace
//!
//! Hosts the statistical constant-time harness used by the integration
//! tests under `tests/`.

pub mod suites;
