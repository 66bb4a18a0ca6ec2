//! # UndoKV Testkit
//!
//! Test utilities for UndoKV.
//!
//! This crate provides:
//! - Test fixtures and script helpers
//! - Property-based test generators using proptest
//! - A snapshot-based reference model of the engine
//! - A harness that drives the engine and the model in lockstep
//! - Stress testing utilities
//!
//! ## Usage
//!
//! ```rust
//! use undokv_testkit::prelude::*;
//! use undokv_core::Command;
//!
//! let mut harness = IntegrationHarness::new();
//! harness.apply(Command::set("a", "10"));
//! harness.apply(Command::Begin);
//! harness.apply(Command::delete("a"));
//! harness.apply(Command::Rollback);
//! harness.verify();
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod integration;
pub mod model;
pub mod stress;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::integration::*;
    pub use crate::model::*;
    pub use crate::stress::*;
}

pub use fixtures::*;
pub use generators::*;
pub use integration::*;
pub use model::*;
pub use stress::*;
