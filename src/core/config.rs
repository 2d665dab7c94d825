//! Game configuration types.
//!
//! A game provides one `GameConfig` with:
//! - `powers`: tracked resources and their ranges
//! - `cards`: the catalogue
//! - `boosters`: temporary modifiers cards can activate
//! - `stories`: narrative arcs mixed into the deck
//! - `entry_card`: the first card shown, excluded from the initial deck
//! - `game_over_scenarios`: texts shown when a power hits a bound
//!
//! Manifests are deserialized with serde. Heterogeneous shapes (a power given
//! as a bare name, a story card given as a bare id) are normalized here so
//! the engine only sees one representation.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::boosters::{Booster, BoosterId};
use crate::cards::{Card, CardId, CardRegistry};
use crate::powers::Boundary;
use crate::stories::Story;

use super::error::{EngineError, Result};

/// Default lower bound of a power.
pub const DEFAULT_POWER_MIN: f64 = 0.0;

/// Default upper bound of a power.
pub const DEFAULT_POWER_MAX: f64 = 100.0;

/// Range of one power.
///
/// Accepts either `"money"` or `{"name": "money", "min": 0, "max": 200}`;
/// missing bounds default to 0 and 100.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPowerConfig")]
pub struct PowerConfig {
    pub name: String,
    pub min: f64,
    pub max: f64,
}

impl PowerConfig {
    /// Create a power with explicit bounds.
    pub fn new(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            min,
            max,
        }
    }

    /// Create a power with the default `[0, 100]` range.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, DEFAULT_POWER_MIN, DEFAULT_POWER_MAX)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPowerConfig {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
}

impl From<RawPowerConfig> for PowerConfig {
    fn from(raw: RawPowerConfig) -> Self {
        match raw {
            RawPowerConfig::Name(name) => PowerConfig::named(name),
            RawPowerConfig::Full { name, min, max } => PowerConfig::new(
                name,
                min.unwrap_or(DEFAULT_POWER_MIN),
                max.unwrap_or(DEFAULT_POWER_MAX),
            ),
        }
    }
}

/// Game-over texts for one power.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSet {
    /// Shown when the power drops to its minimum.
    #[serde(default)]
    pub min: Vec<String>,
    /// Shown when the power reaches its cap.
    #[serde(default)]
    pub max: Vec<String>,
}

impl ScenarioSet {
    /// Texts for a boundary.
    #[must_use]
    pub fn for_boundary(&self, boundary: Boundary) -> &[String] {
        match boundary {
            Boundary::Min => &self.min,
            Boundary::Max => &self.max,
        }
    }
}

/// Complete game configuration.
///
/// Games provide this at startup; the engine treats it as immutable.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub powers: Vec<PowerConfig>,

    #[serde(default)]
    pub cards: Vec<Card>,

    #[serde(default)]
    pub boosters: Vec<Booster>,

    #[serde(default)]
    pub stories: Vec<Story>,

    #[serde(default)]
    pub entry_card: Option<CardId>,

    #[serde(default)]
    pub game_over_scenarios: BTreeMap<String, ScenarioSet>,

    #[serde(default)]
    pub default_game_over_scenario: Option<String>,
}

impl GameConfig {
    /// Create an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON manifest.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for defects the engine cannot recover from.
    pub fn validate(&self) -> Result<()> {
        let mut powers = FxHashSet::default();
        for power in &self.powers {
            if !powers.insert(power.name.as_str()) {
                return Err(EngineError::InvalidConfig(format!("duplicate power: {}", power.name)));
            }
            if power.min > power.max {
                return Err(EngineError::InvalidConfig(format!(
                    "power {} has min {} above max {}",
                    power.name, power.min, power.max
                )));
            }
        }

        let mut cards = FxHashSet::default();
        for card in &self.cards {
            if !cards.insert(&card.id) {
                return Err(EngineError::DuplicateCard(card.id.clone()));
            }
        }

        let catalogue = self.catalogue();
        if catalogue.is_empty() {
            return Err(EngineError::InvalidConfig("no cards configured".into()));
        }
        if let Some(entry) = &self.entry_card {
            if !catalogue.contains(entry) {
                return Err(EngineError::MissingEntryCard(entry.clone()));
            }
        }
        Ok(())
    }

    /// Build the card catalogue: configured cards followed by story trigger
    /// cards not already present.
    #[must_use]
    pub fn catalogue(&self) -> CardRegistry {
        let trigger_cards = self.stories.iter().flat_map(|s| s.trigger_cards.iter());
        self.cards.iter().chain(trigger_cards).cloned().collect()
    }

    /// Add a power.
    #[must_use]
    pub fn with_power(mut self, power: PowerConfig) -> Self {
        self.powers.push(power);
        self
    }

    /// Add a card to the catalogue.
    #[must_use]
    pub fn with_card(mut self, card: Card) -> Self {
        self.cards.push(card);
        self
    }

    #[must_use]
    pub fn with_booster(mut self, booster: Booster) -> Self {
        self.boosters.push(booster);
        self
    }

    #[must_use]
    pub fn with_story(mut self, story: Story) -> Self {
        self.stories.push(story);
        self
    }

    #[must_use]
    pub fn with_entry_card(mut self, card: impl Into<CardId>) -> Self {
        self.entry_card = Some(card.into());
        self
    }

    /// Set game-over texts for a power.
    #[must_use]
    pub fn with_scenarios(mut self, power: impl Into<String>, scenarios: ScenarioSet) -> Self {
        self.game_over_scenarios.insert(power.into(), scenarios);
        self
    }

    /// Set the text used when a power has no scenarios.
    #[must_use]
    pub fn with_default_scenario(mut self, text: impl Into<String>) -> Self {
        self.default_game_over_scenario = Some(text.into());
        self
    }

    /// Get a power config by name.
    #[must_use]
    pub fn get_power(&self, name: &str) -> Option<&PowerConfig> {
        self.powers.iter().find(|p| p.name == name)
    }

    /// Get a booster by ID.
    #[must_use]
    pub fn get_booster(&self, id: &BoosterId) -> Option<&Booster> {
        self.boosters.iter().find(|b| &b.id == id)
    }

    /// Game-over texts for a power and boundary (may be empty).
    #[must_use]
    pub fn scenarios(&self, power: &str, boundary: Boundary) -> &[String] {
        self.game_over_scenarios
            .get(power)
            .map(|set| set.for_boundary(boundary))
            .unwrap_or_default()
    }
}
