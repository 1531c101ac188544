//! Route Configuration Module
//!
//! ```text
//! routes/
//! ├── mod.rs     - Module exports and documentation
//! └── router.rs  - Main router creation
//! ```
//!
//! - `GET /static/...` - static assets
//! - `GET` anything else - server-side rendered pages

pub mod router;

pub use router::create_router;
