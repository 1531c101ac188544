//! Test suite for the render server
//!
//! This module organizes all tests

pub mod common;
pub mod integration;
pub mod property;
