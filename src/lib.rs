//! # choice-core
//!
//! Decision engine for card-based narrative life simulations.
//!
//! The player sees one card at a time and swipes left or right. Each choice
//! moves bounded "powers" (money, mood, health, ...), may activate temporary
//! boosters, and may accept or reject a story. Stories are multi-card arcs
//! that trigger after a number of cards or after other stories complete, and
//! whose cards are mixed into the upcoming draws.
//!
//! ## Design Principles
//!
//! 1. **Configuration Over Convention**: powers, cards, boosters and stories
//!    all come from `GameConfig`. Nothing game-specific is hardcoded.
//!
//! 2. **One Owner Per Session**: an `Engine` owns all mutable state of a game,
//!    including its RNG. Sessions never share state.
//!
//! 3. **Deterministic When Seeded**: every shuffle, insertion and roll draws
//!    from the session's `GameRng`.
//!
//! ## Modules
//!
//! - `core`: Configuration, errors, RNG
//! - `cards`: Card definitions and the catalogue
//! - `powers`: Power values and bounds
//! - `boosters`: Temporary cap raises and effect multipliers
//! - `deck`: Pending draw order and card injection
//! - `stories`: Story lifecycle and card mixing
//! - `engine`: Per-turn orchestration and game-over reporting
//! - `simulation`: Headless batch runs for balancing

pub mod core;
pub mod cards;
pub mod powers;
pub mod boosters;
pub mod deck;
pub mod stories;
pub mod engine;
pub mod simulation;

// Re-export commonly used types
pub use crate::core::{EngineError, GameConfig, GameRng, PowerConfig, Result, ScenarioSet};

pub use crate::cards::{Card, CardId, CardRegistry, Choice, Direction, Effect};

pub use crate::powers::{Boundary, PowerState, PowerTracker};

pub use crate::boosters::{ActiveBooster, Booster, BoosterId, BoosterModifier, BoosterRegistry, EffectKind};

pub use crate::deck::DeckManager;

pub use crate::stories::{
    MixPolicy, Story, StoryCard, StoryContext, StoryCoordinator, StoryId, StoryPhase, StoryState, StoryTrigger,
};

pub use crate::engine::{Engine, GameOverInfo, HistoryEntry};

pub use crate::simulation::{BatchReport, ChoicePolicy, RandomPolicy, SimulationConfig, Simulator, Trajectory};
