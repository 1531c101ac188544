//! Property-based tests

mod embed_proptest;
mod toggle_proptest;
