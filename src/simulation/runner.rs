//! Batch runner for headless games.
//!
//! Plays many independent sessions with a choice policy and aggregates the
//! results. Every game gets its own engine seeded from a fork of the batch
//! RNG, so a batch seed reproduces the whole report.

use crate::cards::{Card, Direction};
use crate::core::config::GameConfig;
use crate::core::error::Result;
use crate::core::rng::GameRng;
use crate::engine::Engine;

use super::trajectory::{BatchReport, Move, Trajectory};

/// Configuration for a simulation batch.
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    /// Number of games to play.
    pub runs: usize,

    /// Maximum decisions per game (to prevent endless games).
    pub max_moves: usize,

    /// Seed for the batch RNG.
    pub seed: u64,

    /// Keep every trajectory in the report.
    pub keep_trajectories: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            runs: 1000,
            max_moves: 1000,
            seed: 0,
            keep_trajectories: false,
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        self
    }

    pub fn with_max_moves(mut self, max: usize) -> Self {
        self.max_moves = max;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_trajectories(mut self, keep: bool) -> Self {
        self.keep_trajectories = keep;
        self
    }
}

/// Decides which side of a card to pick.
pub trait ChoicePolicy {
    fn choose(&mut self, card: &Card, engine: &Engine, rng: &mut GameRng) -> Direction;
}

/// Picks left or right with equal probability.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomPolicy;

impl ChoicePolicy for RandomPolicy {
    fn choose(&mut self, _card: &Card, _engine: &Engine, rng: &mut GameRng) -> Direction {
        if rng.gen_bool(0.5) {
            Direction::Left
        } else {
            Direction::Right
        }
    }
}

/// Runs headless games against one configuration.
pub struct Simulator<P: ChoicePolicy = RandomPolicy> {
    config: GameConfig,
    settings: SimulationConfig,
    policy: P,
}

impl Simulator<RandomPolicy> {
    /// Create a simulator with the uniform random policy.
    pub fn new(config: GameConfig, settings: SimulationConfig) -> Self {
        Self::with_policy(config, settings, RandomPolicy)
    }
}

impl<P: ChoicePolicy> Simulator<P> {
    pub fn with_policy(config: GameConfig, settings: SimulationConfig, policy: P) -> Self {
        Self {
            config,
            settings,
            policy,
        }
    }

    pub fn settings(&self) -> &SimulationConfig {
        &self.settings
    }

    /// Play one game from the entry card (or a first draw when there is none).
    ///
    /// Stops at game over or after `max_moves` decisions.
    pub fn run_single(&mut self, seed: u64) -> Result<Trajectory> {
        let mut engine = Engine::new(&self.config, seed);
        let mut policy_rng = GameRng::new(seed).fork();
        let mut trajectory = Trajectory::new(seed, engine.power_snapshot());

        let mut card = match engine.entry_card() {
            Some(card) => card,
            None => engine.draw()?,
        };

        for _ in 0..self.settings.max_moves {
            if engine.is_game_over() {
                break;
            }
            let direction = self.policy.choose(&card, &engine, &mut policy_rng);
            trajectory.push(Move {
                card: card.id.clone(),
                choice: direction,
                powers_before: engine.power_snapshot(),
            });

            engine.choose(&card, direction);
            if engine.is_game_over() {
                break;
            }
            card = engine.draw()?;
        }

        trajectory.final_powers = engine.power_snapshot();
        trajectory.game_over = engine.game_over_info();
        trajectory.cards_drawn = engine.cards_drawn();
        Ok(trajectory)
    }

    /// Play `runs` games and aggregate them.
    pub fn run_batch(&mut self) -> Result<BatchReport> {
        let mut root = GameRng::new(self.settings.seed);
        let mut trajectories = Vec::with_capacity(self.settings.runs);

        for _ in 0..self.settings.runs {
            let seed = root.fork().seed();
            trajectories.push(self.run_single(seed)?);
        }

        let names: Vec<String> = self.config.powers.iter().map(|p| p.name.clone()).collect();
        let mut report = BatchReport::from_trajectories(&trajectories, names.iter().map(String::as_str));
        if self.settings.keep_trajectories {
            report.trajectories = trajectories;
        }
        tracing::info!(
            games = report.total_games,
            average_length = report.average_game_length,
            unfinished = report.unfinished_games,
            "simulation batch finished"
        );
        Ok(report)
    }
}
