//! Products

pub(crate) mod errors;
pub(crate) mod handlers;
mod models;
mod multipart;

pub(crate) use handlers::*;
pub(crate) use models::*;
