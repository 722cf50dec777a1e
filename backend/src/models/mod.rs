//! Database models for the Mycoforage server
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
