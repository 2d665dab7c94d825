//! Booster definitions.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Power name that matches every power.
pub const WILDCARD_POWER: &str = "*";

/// Booster identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoosterId(String);

impl BoosterId {
    /// Create a new booster ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BoosterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BoosterId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Which sign of delta an effect modifier scales.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    /// Positive deltas.
    Gain,
    /// Negative deltas.
    Loss,
}

/// A single modifier carried by a booster.
///
/// Serialized externally tagged, e.g. `{"power_cap": {"power": "money", "value": 250}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoosterModifier {
    /// Raise a power's cap while active.
    PowerCap { power: String, value: f64 },

    /// Multiply gains or losses of a power while active.
    EffectModifier {
        power: String,
        #[serde(rename = "type")]
        kind: EffectKind,
        multiplier: f64,
    },
}

impl BoosterModifier {
    /// The power this modifier targets (may be the wildcard).
    #[must_use]
    pub fn power(&self) -> &str {
        match self {
            BoosterModifier::PowerCap { power, .. } | BoosterModifier::EffectModifier { power, .. } => power,
        }
    }

    /// Does this modifier apply to the named power?
    #[must_use]
    pub fn applies_to(&self, power: &str) -> bool {
        let target = self.power();
        target == power || target == WILDCARD_POWER
    }
}

/// A temporary modifier bundle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Booster {
    pub id: BoosterId,

    #[serde(default)]
    pub modifiers: SmallVec<[BoosterModifier; 2]>,

    /// Number of turns the booster stays active.
    #[serde(default)]
    pub duration: u32,
}

impl Booster {
    /// Create a booster with no modifiers.
    pub fn new(id: impl Into<BoosterId>, duration: u32) -> Self {
        Self {
            id: id.into(),
            modifiers: SmallVec::new(),
            duration,
        }
    }

    /// Add a power cap modifier.
    #[must_use]
    pub fn with_power_cap(mut self, power: impl Into<String>, value: f64) -> Self {
        self.modifiers.push(BoosterModifier::PowerCap {
            power: power.into(),
            value,
        });
        self
    }

    /// Add an effect multiplier.
    #[must_use]
    pub fn with_effect_modifier(mut self, power: impl Into<String>, kind: EffectKind, multiplier: f64) -> Self {
        self.modifiers.push(BoosterModifier::EffectModifier {
            power: power.into(),
            kind,
            multiplier,
        });
        self
    }
}
