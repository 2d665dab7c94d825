//! Session orchestration.
//!
//! `Engine` wires powers, boosters, deck and stories together and runs one
//! player turn per `choose` call. A typical driver loop:
//!
//! ```rust,ignore
//! let mut card = engine.entry_card().unwrap();
//! loop {
//!     engine.choose(&card, ask_player(&card));
//!     if let Some(info) = engine.game_over_info() {
//!         show_game_over(&info, engine.game_over_scenario(&info));
//!         break;
//!     }
//!     card = engine.draw()?;
//! }
//! ```

pub mod session;

pub use session::{Engine, GameOverInfo, HistoryEntry};
