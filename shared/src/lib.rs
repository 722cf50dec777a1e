//! Shared types and models for the Mycoforage platform
//!
//! This crate contains the foraging condition evaluator and the types shared
//! between the backend, the browser (via WASM), and other components.

pub mod foraging;
pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
