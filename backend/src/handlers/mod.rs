//! HTTP request handlers

pub mod admin;
pub mod auth;
pub mod foraging;
pub mod forum;
pub mod health;
pub mod journal;

pub use health::health_check;
