//! Upstream API access for page effects

pub mod client;

pub use client::ApiClient;
