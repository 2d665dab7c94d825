//! Powers: bounded numeric resources (money, mood, health, ...).

pub mod tracker;

pub use tracker::{Boundary, PowerState, PowerTracker};
