//! Card definitions.
//!
//! A card is a prompt with two choices, `left` and `right`. Each choice can
//! change powers, schedule a follow-up card, activate a booster, or accept or
//! reject a pending story.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::boosters::BoosterId;
use crate::stories::StoryId;

/// Card identifier, unique within a catalogue.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Create a new card ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CardId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Which side of a card the player picked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Both directions, left first.
    pub const ALL: [Direction; 2] = [Direction::Left, Direction::Right];
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Left => f.write_str("left"),
            Direction::Right => f.write_str("right"),
        }
    }
}

/// One effect entry: power name -> delta.
///
/// Entries usually hold a single power, but several are allowed.
pub type Effect = BTreeMap<String, f64>;

/// One branch of a card.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub label: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<Effect>,

    /// Card forced to the front of the deck for the next draw.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<CardId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booster: Option<BoosterId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept_story: Option<StoryId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reject_story: Option<StoryId>,
}

impl Choice {
    /// Create a choice with a label and no consequences.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Add a single-power effect entry.
    #[must_use]
    pub fn with_effect(mut self, power: impl Into<String>, delta: f64) -> Self {
        let mut effect = Effect::new();
        effect.insert(power.into(), delta);
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn with_follow_up(mut self, card: impl Into<CardId>) -> Self {
        self.follow_up = Some(card.into());
        self
    }

    #[must_use]
    pub fn with_booster(mut self, booster: impl Into<BoosterId>) -> Self {
        self.booster = Some(booster.into());
        self
    }

    #[must_use]
    pub fn accepting(mut self, story: impl Into<StoryId>) -> Self {
        self.accept_story = Some(story.into());
        self
    }

    #[must_use]
    pub fn rejecting(mut self, story: impl Into<StoryId>) -> Self {
        self.reject_story = Some(story.into());
        self
    }

    /// Does this choice accept or reject the given story?
    #[must_use]
    pub fn decides(&self, story: &StoryId) -> bool {
        self.accept_story.as_ref() == Some(story) || self.reject_story.as_ref() == Some(story)
    }
}

/// A playable card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default)]
    pub left: Choice,

    #[serde(default)]
    pub right: Choice,
}

impl Card {
    /// Create a card whose choices do nothing.
    pub fn new(id: impl Into<CardId>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            image: None,
            left: Choice::new("left"),
            right: Choice::new("right"),
        }
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    #[must_use]
    pub fn with_left(mut self, choice: Choice) -> Self {
        self.left = choice;
        self
    }

    #[must_use]
    pub fn with_right(mut self, choice: Choice) -> Self {
        self.right = choice;
        self
    }

    /// The branch for a direction.
    #[must_use]
    pub fn choice(&self, direction: Direction) -> &Choice {
        match direction {
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }

    /// Does either side of this card accept or reject the given story?
    #[must_use]
    pub fn offers_decision_for(&self, story: &StoryId) -> bool {
        self.left.decides(story) || self.right.decides(story)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_builder() {
        let card = Card::new("coffee", "Another coffee?")
            .with_left(Choice::new("No").with_effect("nerves", -5.0))
            .with_right(Choice::new("Yes").with_effect("money", -3.0).with_follow_up("jitters"));

        assert_eq!(card.id, CardId::new("coffee"));
        assert_eq!(card.choice(Direction::Left).label, "No");
        assert_eq!(card.choice(Direction::Right).effects.len(), 1);
        assert_eq!(card.right.follow_up, Some(CardId::new("jitters")));
    }

    #[test]
    fn test_offers_decision_for() {
        let story = StoryId::new("move");
        let card = Card::new("offer", "Move to the city?")
            .with_left(Choice::new("Stay").rejecting("move"))
            .with_right(Choice::new("Go"));

        assert!(card.offers_decision_for(&story));
        assert!(!card.offers_decision_for(&StoryId::new("other")));
    }

    #[test]
    fn test_deserialize_card() {
        let json = r#"{
            "id": "rain",
            "description": "It is raining.",
            "left": { "label": "Stay in", "effects": [{ "mood": -5 }] },
            "right": { "label": "Go out", "effects": [{ "mood": 5, "health": -2 }], "booster": "umbrella" }
        }"#;
        let card: Card = serde_json::from_str(json).unwrap();

        assert_eq!(card.left.effects[0]["mood"], -5.0);
        assert_eq!(card.right.effects[0].len(), 2);
        assert_eq!(card.right.booster, Some(BoosterId::new("umbrella")));
        assert!(card.image.is_none());
    }

    #[test]
    fn test_direction_serde() {
        assert_eq!(serde_json::to_string(&Direction::Left).unwrap(), "\"left\"");
        let d: Direction = serde_json::from_str("\"right\"").unwrap();
        assert_eq!(d, Direction::Right);
        assert_eq!(d.to_string(), "right");
    }
}
