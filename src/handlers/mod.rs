//! HTTP handlers for heroes, powers and hero powers.

pub mod roster;
pub use roster::*;
