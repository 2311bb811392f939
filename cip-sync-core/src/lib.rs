#![doc = "cip-sync-core: core pipeline library for cip-sync."]

//! This crate contains the data models and the whole content
//! transformation pipeline for mirroring the CIP corpus into a local
//! documentation tree. The CLI crate wires these modules to the real
//! network and filesystem; tests wire them to mocks.

pub mod config;
pub mod extract;
pub mod fetch;
pub mod metadata;
pub mod mirror;
pub mod normalise;
pub mod synchronise;
