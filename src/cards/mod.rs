//! Card system: definitions and the session catalogue.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for cards
//! - `Card`: A prompt with a `left` and a `right` `Choice`
//! - `Choice`: Effects, follow-up, booster and story decisions of one side
//! - `CardRegistry`: Ordered catalogue with lookup by id

pub mod definition;
pub mod registry;

pub use definition::{Card, CardId, Choice, Direction, Effect};
pub use registry::CardRegistry;
