//! Core engine types: configuration, errors and the session RNG.
//!
//! Games configure the engine via `GameConfig` rather than modifying it.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{GameConfig, PowerConfig, ScenarioSet, DEFAULT_POWER_MAX, DEFAULT_POWER_MIN};
pub use error::{EngineError, Result};
pub use rng::GameRng;
