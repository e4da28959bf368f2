//! Operations behind the HTTP surface and the request-shape validators they take.

mod roster;
mod validation;
pub use roster::RosterService;
pub use validation::{NewHeroPower, PowerPatch};
