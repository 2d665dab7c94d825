//! Recorded games and aggregate statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, Direction};
use crate::core::error::Result;
use crate::engine::GameOverInfo;

/// A single decision in a simulated game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Move {
    pub card: CardId,
    pub choice: Direction,
    /// Power values right before the choice was resolved.
    pub powers_before: BTreeMap<String, f64>,
}

/// A complete simulated game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Trajectory {
    /// Seed of the engine that played this game.
    pub seed: u64,
    pub initial_powers: BTreeMap<String, f64>,
    pub moves: Vec<Move>,
    pub final_powers: BTreeMap<String, f64>,
    /// `None` when the move limit was reached first.
    pub game_over: Option<GameOverInfo>,
    pub cards_drawn: u64,
}

impl Trajectory {
    /// Create an empty trajectory.
    pub fn new(seed: u64, initial_powers: BTreeMap<String, f64>) -> Self {
        Self {
            seed,
            final_powers: initial_powers.clone(),
            initial_powers,
            moves: Vec::new(),
            game_over: None,
            cards_drawn: 0,
        }
    }

    pub fn push(&mut self, step: Move) {
        self.moves.push(step);
    }

    /// Number of decisions.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// `"<power>_<boundary>"`, e.g. `"money_min"`.
    pub fn game_over_reason(&self) -> Option<String> {
        self.game_over
            .as_ref()
            .map(|info| format!("{}_{}", info.power, info.boundary))
    }
}

/// Spread of one power's final values across a batch.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerDistribution {
    pub min: f64,
    pub max: f64,
    pub average: f64,
    pub median: f64,
}

impl PowerDistribution {
    /// Summarize a set of values. Returns `None` for an empty set.
    pub fn from_values(mut values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        values.sort_by(f64::total_cmp);
        let sum: f64 = values.iter().sum();
        Some(Self {
            min: values[0],
            max: values[values.len() - 1],
            average: sum / values.len() as f64,
            median: values[values.len() / 2],
        })
    }
}

/// Aggregate statistics over a batch of simulated games.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub total_games: usize,
    /// Mean number of cards drawn per game.
    pub average_game_length: f64,
    /// Games ended per `"<power>_<boundary>"`.
    pub game_over_reasons: BTreeMap<String, usize>,
    /// Games that hit the move limit.
    pub unfinished_games: usize,
    pub power_distributions: BTreeMap<String, PowerDistribution>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trajectories: Vec<Trajectory>,
}

impl BatchReport {
    /// Aggregate trajectories. Powers are taken from `power_names`.
    pub fn from_trajectories<'a>(
        trajectories: &[Trajectory],
        power_names: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut report = Self {
            total_games: trajectories.len(),
            ..Self::default()
        };
        if trajectories.is_empty() {
            return report;
        }

        let total_drawn: u64 = trajectories.iter().map(|t| t.cards_drawn).sum();
        report.average_game_length = total_drawn as f64 / trajectories.len() as f64;

        for trajectory in trajectories {
            match trajectory.game_over_reason() {
                Some(reason) => *report.game_over_reasons.entry(reason).or_insert(0) += 1,
                None => report.unfinished_games += 1,
            }
        }

        for name in power_names {
            let values: Vec<f64> = trajectories
                .iter()
                .filter_map(|t| t.final_powers.get(name).copied())
                .collect();
            if let Some(distribution) = PowerDistribution::from_values(values) {
                report.power_distributions.insert(name.to_string(), distribution);
            }
        }
        report
    }

    /// Share of games that ended for a given reason, in `[0, 1]`.
    pub fn reason_share(&self, reason: &str) -> f64 {
        if self.total_games == 0 {
            return 0.0;
        }
        self.game_over_reasons.get(reason).copied().unwrap_or(0) as f64 / self.total_games as f64
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
