pub mod tracker;

pub use tracker::{PresenceError, PresenceTracker};
