//! Power values and bounds enforcement.
//!
//! Every power has a configured `[min, max]` range. Boosters may raise the
//! upper bound temporarily, so the tracker always asks the `BoosterRegistry`
//! for the effective cap instead of using `max` directly.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::boosters::BoosterRegistry;
use crate::core::config::PowerConfig;

/// Which bound a power has reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    Min,
    Max,
}

impl std::fmt::Display for Boundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Boundary::Min => f.write_str("min"),
            Boundary::Max => f.write_str("max"),
        }
    }
}

/// Current value and configured range of one power.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerState {
    pub value: f64,
    pub min: f64,
    /// Configured cap, before boosters.
    pub max: f64,
}

/// Tracks all powers of a session in configuration order.
#[derive(Clone, Debug, Default)]
pub struct PowerTracker {
    order: Vec<String>,
    states: FxHashMap<String, PowerState>,
}

impl PowerTracker {
    /// Initialize every configured power at `floor(max / 2)`.
    #[must_use]
    pub fn new(configs: &[PowerConfig]) -> Self {
        let mut tracker = Self::default();
        for config in configs {
            if tracker.states.contains_key(&config.name) {
                continue;
            }
            let value = (config.max / 2.0).floor().max(config.min);
            tracker.order.push(config.name.clone());
            tracker.states.insert(
                config.name.clone(),
                PowerState {
                    value,
                    min: config.min,
                    max: config.max,
                },
            );
        }
        tracker
    }

    /// Apply a raw delta through the active boosters and clamp the result.
    ///
    /// Returns the new value, or `None` for an unknown power.
    pub fn apply_delta(&mut self, name: &str, raw: f64, boosters: &BoosterRegistry) -> Option<f64> {
        let modified = boosters.modify_effect(name, raw);
        let state = self.states.get_mut(name)?;
        let cap = boosters.effective_cap(name, state.max);
        state.value = clamp(state.value + modified, state.min, cap);
        Some(state.value)
    }

    /// Re-clamp every power to its current effective cap.
    ///
    /// Needed after boosters expire and caps fall back to their base.
    pub fn clamp_all(&mut self, boosters: &BoosterRegistry) {
        for (name, state) in &mut self.states {
            let cap = boosters.effective_cap(name, state.max);
            state.value = clamp(state.value, state.min, cap);
        }
    }

    /// Effective cap of a power under the active boosters.
    #[must_use]
    pub fn effective_cap(&self, name: &str, boosters: &BoosterRegistry) -> Option<f64> {
        self.states
            .get(name)
            .map(|state| boosters.effective_cap(name, state.max))
    }

    /// The bound a power sits on, if any. `min` wins when both coincide.
    #[must_use]
    pub fn boundary(&self, name: &str, boosters: &BoosterRegistry) -> Option<Boundary> {
        let state = self.states.get(name)?;
        if state.value <= state.min {
            Some(Boundary::Min)
        } else if state.value >= boosters.effective_cap(name, state.max) {
            Some(Boundary::Max)
        } else {
            None
        }
    }

    /// Is the power at or beyond one of its bounds?
    #[must_use]
    pub fn is_at_boundary(&self, name: &str, boosters: &BoosterRegistry) -> bool {
        self.boundary(name, boosters).is_some()
    }

    /// Get a power by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PowerState> {
        self.states.get(name)
    }

    /// Iterate powers in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PowerState)> {
        self.order
            .iter()
            .filter_map(|name| self.states.get(name).map(|s| (name.as_str(), s)))
    }

    /// Current values keyed by power name.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, f64> {
        self.states
            .iter()
            .map(|(name, state)| (name.clone(), state.value))
            .collect()
    }

    /// Number of tracked powers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if no power is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

// Not f64::clamp, which panics when min > cap. The lower bound wins.
fn clamp(value: f64, min: f64, cap: f64) -> f64 {
    value.min(cap).max(min)
}
