//! Bearer-token models, the caching token provider, and the request-signing capability.

pub mod provider;
pub mod signer;
pub mod token;

pub use provider::*;
pub use signer::*;
pub use token::{cached::*, secret::*};
