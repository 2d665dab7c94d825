//! Stories: multi-card narrative arcs.
//!
//! ## Key Types
//!
//! - `Story`: trigger conditions, card list, mixing options, trigger cards
//! - `StoryCard`: normalized card-list entry (reference, embedded, probabilistic)
//! - `StoryCoordinator`: per-session lifecycle state and one-time card mixing
//!
//! ## Mixing policies
//!
//! - every entry has a `probability`: each card rolls on its own and lands
//!   within its `mix_in_next` range
//! - positive `insert_window`: random positions near the front, earlier cards
//!   biased toward appearing sooner
//! - otherwise: the whole list goes to the front in order

pub mod coordinator;
pub mod definition;

pub use coordinator::{StoryContext, StoryCoordinator, StoryPhase, StoryState};
pub use definition::{MixPolicy, Story, StoryCard, StoryId, StoryTrigger, DEFAULT_MIX_WINDOW};
