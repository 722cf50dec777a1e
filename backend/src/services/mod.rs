//! Business logic services for the Mycoforage platform

pub mod admin;
pub mod auth;
pub mod foraging;
pub mod forum;
pub mod journal;

pub use auth::TokenIssuer;
pub use foraging::ForagingService;
