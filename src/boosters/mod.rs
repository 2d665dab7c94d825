//! Boosters: temporary modifiers that raise power caps or scale effects.
//!
//! - `Booster`: configured modifier bundle with a duration in turns
//! - `BoosterModifier`: `PowerCap` or `EffectModifier`, targeting a power or `*`
//! - `BoosterRegistry`: active boosters, ticked once per turn

pub mod definition;
pub mod registry;

pub use definition::{Booster, BoosterId, BoosterModifier, EffectKind, WILDCARD_POWER};
pub use registry::{ActiveBooster, BoosterRegistry};
