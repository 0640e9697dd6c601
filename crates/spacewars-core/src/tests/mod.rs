//! Crate-level scenario tests.
//!
//! - `determinism.rs`: same seed and inputs give identical worlds
//! - `integration.rs`: end-to-end game scenarios through the public commands
//! - `helpers.rs`: game factories and a scripted test object

pub mod helpers;
