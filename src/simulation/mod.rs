//! Headless batch simulation for balancing.
//!
//! Drives many independent engines through the public API only; the core
//! never depends on this module.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use choice_core::simulation::{SimulationConfig, Simulator};
//!
//! let settings = SimulationConfig::default().with_runs(1000).with_seed(42);
//! let report = Simulator::new(config, settings).run_batch()?;
//!
//! println!("average length: {:.1}", report.average_game_length);
//! for (reason, count) in &report.game_over_reasons {
//!     println!("{reason}: {count}");
//! }
//! ```

pub mod runner;
pub mod trajectory;

pub use runner::{ChoicePolicy, RandomPolicy, SimulationConfig, Simulator};
pub use trajectory::{BatchReport, Move, PowerDistribution, Trajectory};
