//! Domain models for the Mycoforage platform

mod forum;
mod journal;
mod user;
mod weather;

pub use forum::*;
pub use journal::*;
pub use user::*;
pub use weather::*;
