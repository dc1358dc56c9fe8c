//! Token value types.

pub mod cached;
pub mod secret;
