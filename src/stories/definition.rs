//! Story definitions.
//!
//! A story is a multi-card arc. Its card list accepts three shapes in
//! configuration: a bare card id, an embedded card, or an embedded card with a
//! `probability` and `mix_in_next`. All of them normalize into `StoryCard` at
//! deserialization so the coordinator never inspects raw shapes.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};

/// Default insertion range for probabilistic story cards.
pub const DEFAULT_MIX_WINDOW: usize = 15;

/// Story identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(String);

impl StoryId {
    /// Create a new story ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StoryId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// When a story becomes ready to trigger.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryTrigger {
    /// Minimum number of played cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_cards: Option<usize>,

    /// Stories that must be completed first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires_story_completed: Vec<StoryId>,
}

/// One normalized entry of a story's card list.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "RawStoryCard")]
pub struct StoryCard {
    pub id: CardId,
    /// Chance to be mixed in, for probabilistic stories.
    pub probability: Option<f64>,
    /// Insertion range for probabilistic mixing (`mix_in_next`).
    pub mix_window: Option<usize>,
    /// Card carried inline, registered into the catalogue when mixed.
    pub embedded: Option<Card>,
}

impl StoryCard {
    /// Reference a catalogue card by id.
    pub fn reference(id: impl Into<CardId>) -> Self {
        Self {
            id: id.into(),
            probability: None,
            mix_window: None,
            embedded: None,
        }
    }

    /// Carry a card inline.
    #[must_use]
    pub fn embedded(card: Card) -> Self {
        Self {
            id: card.id.clone(),
            probability: None,
            mix_window: None,
            embedded: Some(card),
        }
    }

    /// Make this entry probabilistic.
    #[must_use]
    pub fn with_probability(mut self, probability: f64, mix_window: Option<usize>) -> Self {
        self.probability = Some(probability);
        self.mix_window = mix_window;
        self
    }

    #[must_use]
    pub fn is_probabilistic(&self) -> bool {
        self.probability.is_some()
    }

    /// Insertion range, falling back to `DEFAULT_MIX_WINDOW`.
    #[must_use]
    pub fn mix_window_or_default(&self) -> usize {
        self.mix_window.unwrap_or(DEFAULT_MIX_WINDOW)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStoryCard {
    Id(CardId),
    Embedded {
        #[serde(flatten)]
        card: Card,
        #[serde(default)]
        probability: Option<f64>,
        #[serde(default)]
        mix_in_next: Option<usize>,
    },
}

impl From<RawStoryCard> for StoryCard {
    fn from(raw: RawStoryCard) -> Self {
        match raw {
            RawStoryCard::Id(id) => StoryCard::reference(id),
            RawStoryCard::Embedded {
                card,
                probability,
                mix_in_next,
            } => StoryCard {
                id: card.id.clone(),
                probability,
                mix_window: mix_in_next,
                embedded: Some(card),
            },
        }
    }
}

/// How a story's cards enter the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MixPolicy {
    /// Every entry rolls against its own probability.
    Probabilistic,
    /// Random positions within the first `n` cards.
    Windowed(usize),
    /// A block at the front of the deck.
    Front,
}

/// A multi-card narrative arc.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Story {
    pub id: StoryId,

    #[serde(default)]
    pub trigger: StoryTrigger,

    #[serde(default, alias = "story_cards")]
    pub cards: Vec<StoryCard>,

    #[serde(default)]
    pub insert_window: Option<i64>,

    /// Cards that let the player accept or reject this story.
    #[serde(default)]
    pub trigger_cards: Vec<Card>,
}

impl Story {
    /// Create a story with no cards that triggers immediately.
    pub fn new(id: impl Into<StoryId>) -> Self {
        Self {
            id: id.into(),
            trigger: StoryTrigger::default(),
            cards: Vec::new(),
            insert_window: None,
            trigger_cards: Vec::new(),
        }
    }

    #[must_use]
    pub fn after_cards(mut self, count: usize) -> Self {
        self.trigger.after_cards = Some(count);
        self
    }

    #[must_use]
    pub fn requires(mut self, story: impl Into<StoryId>) -> Self {
        self.trigger.requires_story_completed.push(story.into());
        self
    }

    #[must_use]
    pub fn with_card(mut self, card: StoryCard) -> Self {
        self.cards.push(card);
        self
    }

    #[must_use]
    pub fn with_insert_window(mut self, window: i64) -> Self {
        self.insert_window = Some(window);
        self
    }

    #[must_use]
    pub fn with_trigger_card(mut self, card: Card) -> Self {
        self.trigger_cards.push(card);
        self
    }

    /// Card ids in story order.
    #[must_use]
    pub fn card_ids(&self) -> Vec<CardId> {
        self.cards.iter().map(|c| c.id.clone()).collect()
    }

    /// Id of the card that completes the story.
    #[must_use]
    pub fn last_card_id(&self) -> Option<&CardId> {
        self.cards.last().map(|c| &c.id)
    }

    /// How this story's cards are mixed into the deck.
    #[must_use]
    pub fn mix_policy(&self) -> MixPolicy {
        if !self.cards.is_empty() && self.cards.iter().all(StoryCard::is_probabilistic) {
            return MixPolicy::Probabilistic;
        }
        match self.insert_window {
            Some(window) if window > 0 => MixPolicy::Windowed(window as usize),
            _ => MixPolicy::Front,
        }
    }

    /// Does the player have to accept this story before its cards are mixed?
    ///
    /// Checks the trigger cards, or the embedded story cards when the story
    /// has no trigger cards.
    #[must_use]
    pub fn is_acceptance_gated(&self) -> bool {
        if self.trigger_cards.is_empty() {
            self.cards
                .iter()
                .filter_map(|c| c.embedded.as_ref())
                .any(|card| card.offers_decision_for(&self.id))
        } else {
            self.trigger_cards
                .iter()
                .any(|card| card.offers_decision_for(&self.id))
        }
    }
}
