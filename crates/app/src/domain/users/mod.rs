//! Users
//!
//! Users are owned by the external auth subsystem; this module only consumes
//! their identity and minimal public profile by reference.

mod directory;
pub mod models;

pub use directory::*;
