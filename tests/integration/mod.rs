//! Integration tests
//!
//! End-to-end requests through the router, pipeline and mock upstream

#[cfg(feature = "ssr")]
mod render_test;
#[cfg(feature = "ssr")]
mod pipeline_test;
