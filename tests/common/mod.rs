//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Custom assertion macros
//! - Test server fixtures backed by a mock upstream API

pub mod assertions;
#[cfg(feature = "ssr")]
pub mod fixtures;

// Re-export commonly used utilities
#[cfg(feature = "ssr")]
pub use fixtures::*;
