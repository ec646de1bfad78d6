//! Verification state machine coordinating the whole pipeline.
//!
//! This module provides:
//! - `core`: session aggregate, state enum, and transition rules
//! - `tasks`: the async stage driver (fetch -> prove -> seal+upload ->
//!   submit)
//! - `tests`: unit tests for the transition rules and driver

pub mod core;
pub mod tasks;

pub use core::{CancelHandle, ProofReady, SessionState, VerificationSession};

#[cfg(test)]
mod tests;
