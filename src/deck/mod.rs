//! Deck: the ordered sequence of card ids awaiting draw.

pub mod manager;

pub use manager::DeckManager;
