//! Core pinfreq library (sampling, frequency reports, line sources).
//!
//! This crate contains:
//! - `sampler`: per-line transition counting over a tight poll loop
//! - `report`: frequency derivation and table rows
//! - `window`: monotonic measurement windows
//! - `source`: line source abstraction and the GPIO character-device backend
//! - `interrupt`: signal handling for graceful interruption

pub mod interrupt;
pub mod report;
pub mod sampler;
pub mod source;
pub mod window;
