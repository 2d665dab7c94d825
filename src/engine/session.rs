//! One game session.

use std::collections::BTreeMap;

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::boosters::{ActiveBooster, BoosterRegistry};
use crate::cards::{Card, CardId, CardRegistry, Direction};
use crate::core::config::GameConfig;
use crate::core::error::Result;
use crate::core::rng::GameRng;
use crate::deck::DeckManager;
use crate::powers::{Boundary, PowerState, PowerTracker};
use crate::stories::{StoryContext, StoryCoordinator, StoryId, StoryState};

/// One resolved choice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub card: CardId,
    pub choice: Direction,
}

/// Why the game ended.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameOverInfo {
    pub power: String,
    pub value: f64,
    pub boundary: Boundary,
    /// Cards drawn from the deck so far.
    pub card_count: u64,
}

/// Decision engine for a single session.
///
/// Owns every piece of mutable state: powers, boosters, deck, story states,
/// history and the RNG. Nothing is shared between sessions.
///
/// ## Usage
///
/// ```
/// use choice_core::cards::{Card, Choice, Direction};
/// use choice_core::core::{GameConfig, PowerConfig};
/// use choice_core::engine::Engine;
///
/// let config = GameConfig::new()
///     .with_power(PowerConfig::named("mood"))
///     .with_card(Card::new("rain", "It is raining.")
///         .with_left(Choice::new("Stay in").with_effect("mood", -10.0))
///         .with_right(Choice::new("Go out").with_effect("mood", 5.0)));
///
/// let mut engine = Engine::new(&config, 42);
/// let card = engine.draw().unwrap();
/// engine.choose(&card, Direction::Left);
///
/// assert_eq!(engine.power("mood").unwrap().value, 40.0);
/// assert_eq!(engine.history().len(), 1);
/// assert!(!engine.is_game_over());
/// ```
#[derive(Clone, Debug)]
pub struct Engine {
    config: GameConfig,
    catalogue: CardRegistry,
    powers: PowerTracker,
    boosters: BoosterRegistry,
    deck: DeckManager,
    stories: StoryCoordinator,
    history: Vector<HistoryEntry>,
    rng: GameRng,
}

impl Engine {
    /// Create a seeded session.
    #[must_use]
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        Self::with_rng(config, GameRng::new(seed))
    }

    /// Create a session seeded from entropy.
    #[must_use]
    pub fn from_entropy(config: &GameConfig) -> Self {
        Self::with_rng(config, GameRng::from_entropy())
    }

    /// Create a session drawing all randomness from `rng`.
    ///
    /// The initial deck holds every catalogue card except the entry card and
    /// cards that belong to a story.
    #[must_use]
    pub fn with_rng(config: &GameConfig, mut rng: GameRng) -> Self {
        let catalogue = config.catalogue();
        let stories = StoryCoordinator::new(&config.stories);
        let story_cards = stories.story_card_ids();

        let mut deck = DeckManager::from_ids(
            catalogue
                .ids()
                .filter(|id| config.entry_card.as_ref() != Some(*id) && !story_cards.contains(*id))
                .cloned(),
        );
        deck.shuffle(&mut rng);
        debug!(deck = deck.len(), catalogue = catalogue.len(), seed = rng.seed(), "session initialized");

        Self {
            config: config.clone(),
            catalogue,
            powers: PowerTracker::new(&config.powers),
            boosters: BoosterRegistry::new(),
            deck,
            stories,
            history: Vector::new(),
            rng,
        }
    }

    /// Start over from the configuration, continuing the RNG stream.
    pub fn reset(&mut self) {
        let rng = self.rng.clone();
        let config = std::mem::take(&mut self.config);
        *self = Self::with_rng(&config, rng);
    }

    /// The configured entry card, if any.
    #[must_use]
    pub fn entry_card(&self) -> Option<Card> {
        let id = self.config.entry_card.as_ref()?;
        self.catalogue.get(id).cloned()
    }

    /// Draw the next card.
    ///
    /// Fails only when the catalogue is empty.
    pub fn draw(&mut self) -> Result<Card> {
        self.deck.draw(&self.catalogue, &mut self.rng)
    }

    /// Resolve the player's choice on `card`.
    ///
    /// Order within the turn:
    /// 1. apply effects
    /// 2. queue the follow-up card
    /// 3. activate the booster
    /// 4. record story acceptance / rejection
    /// 5. tick boosters
    /// 6. append to history
    /// 7. story completion check, then trigger check
    pub fn choose(&mut self, card: &Card, direction: Direction) {
        let choice = card.choice(direction);

        for effect in &choice.effects {
            for (power, &delta) in effect {
                if self.powers.apply_delta(power, delta, &self.boosters).is_none() {
                    debug!(power = %power, card = %card.id, "effect on unknown power ignored");
                }
            }
        }

        if let Some(next) = &choice.follow_up {
            self.deck.push_front(next.clone());
        }

        if let Some(id) = &choice.booster {
            match self.config.get_booster(id) {
                Some(booster) => {
                    debug!(booster = %id, duration = booster.duration, "booster activated");
                    self.boosters.activate(booster);
                }
                None => warn!(booster = %id, card = %card.id, "unknown booster ignored"),
            }
        }

        if let Some(story) = &choice.accept_story {
            let mut ctx = StoryContext {
                catalogue: &mut self.catalogue,
                deck: &mut self.deck,
                rng: &mut self.rng,
            };
            self.stories.accept(story, &mut ctx);
        }
        if let Some(story) = &choice.reject_story {
            self.stories.reject(story);
        }

        self.boosters.tick();
        self.powers.clamp_all(&self.boosters);

        self.history.push_back(HistoryEntry {
            card: card.id.clone(),
            choice: direction,
        });

        let played = self.history.len();
        let mut ctx = StoryContext {
            catalogue: &mut self.catalogue,
            deck: &mut self.deck,
            rng: &mut self.rng,
        };
        self.stories.end_turn(&card.id, played, &mut ctx);
    }

    /// Is any power at one of its bounds?
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.powers
            .iter()
            .any(|(name, _)| self.powers.is_at_boundary(name, &self.boosters))
    }

    /// The first power, in configuration order, sitting on a bound.
    #[must_use]
    pub fn game_over_info(&self) -> Option<GameOverInfo> {
        self.powers.iter().find_map(|(name, state)| {
            let boundary = self.powers.boundary(name, &self.boosters)?;
            Some(GameOverInfo {
                power: name.to_string(),
                value: state.value,
                boundary,
                card_count: self.deck.cards_drawn(),
            })
        })
    }

    /// Pick a game-over text for `info`.
    ///
    /// Chooses uniformly among the power's texts for that boundary, falling
    /// back to the configured default.
    pub fn game_over_scenario(&mut self, info: &GameOverInfo) -> Option<String> {
        let texts = self.config.scenarios(&info.power, info.boundary);
        self.rng
            .choose(texts)
            .cloned()
            .or_else(|| self.config.default_game_over_scenario.clone())
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The catalogue, including story cards registered so far.
    #[must_use]
    pub fn catalogue(&self) -> &CardRegistry {
        &self.catalogue
    }

    #[must_use]
    pub fn powers(&self) -> &PowerTracker {
        &self.powers
    }

    /// Current state of one power.
    #[must_use]
    pub fn power(&self, name: &str) -> Option<PowerState> {
        self.powers.get(name).copied()
    }

    /// Current power values keyed by name.
    #[must_use]
    pub fn power_snapshot(&self) -> BTreeMap<String, f64> {
        self.powers.snapshot()
    }

    /// Cap of a power under the active boosters.
    #[must_use]
    pub fn effective_cap(&self, name: &str) -> Option<f64> {
        self.powers.effective_cap(name, &self.boosters)
    }

    #[must_use]
    pub fn active_boosters(&self) -> &[ActiveBooster] {
        self.boosters.active()
    }

    /// Pending card ids, next draw first.
    pub fn pending_deck(&self) -> impl Iterator<Item = &CardId> {
        self.deck.pending()
    }

    #[must_use]
    pub fn history(&self) -> &Vector<HistoryEntry> {
        &self.history
    }

    /// Cards drawn from the deck.
    #[must_use]
    pub fn cards_drawn(&self) -> u64 {
        self.deck.cards_drawn()
    }

    /// Choices resolved.
    #[must_use]
    pub fn cards_played(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn story_state(&self, id: &StoryId) -> Option<&StoryState> {
        self.stories.state(id)
    }

    pub fn triggered_stories(&self) -> impl Iterator<Item = &StoryId> {
        self.stories.triggered()
    }

    pub fn completed_stories(&self) -> impl Iterator<Item = &StoryId> {
        self.stories.completed()
    }

    pub fn accepted_stories(&self) -> impl Iterator<Item = &StoryId> {
        self.stories.accepted()
    }

    pub fn rejected_stories(&self) -> impl Iterator<Item = &StoryId> {
        self.stories.rejected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boosters::Booster;
    use crate::cards::Choice;
    use crate::core::{PowerConfig, ScenarioSet};
    use crate::stories::{Story, StoryCard};

    fn config() -> GameConfig {
        GameConfig::new()
            .with_power(PowerConfig::new("money", 0.0, 200.0))
            .with_power(PowerConfig::named("mood"))
            .with_card(Card::new("start", "Welcome"))
            .with_card(
                Card::new("bill", "A bill arrives.")
                    .with_left(Choice::new("Pay").with_effect("money", -150.0))
                    .with_right(Choice::new("Ignore").with_effect("mood", -10.0).with_follow_up("reminder")),
            )
            .with_card(Card::new("reminder", "Second notice."))
            .with_card(Card::new("chapter", "A story card."))
            .with_story(Story::new("saga").after_cards(100).with_card(StoryCard::reference("chapter")))
            .with_entry_card("start")
    }

    #[test]
    fn test_initial_state() {
        let engine = Engine::new(&config(), 1);

        assert_eq!(engine.power("money").unwrap().value, 100.0);
        assert_eq!(engine.power("mood").unwrap().value, 50.0);
        assert_eq!(engine.entry_card().unwrap().id.as_str(), "start");

        let pending: Vec<_> = engine.pending_deck().map(CardId::as_str).collect();
        assert_eq!(pending.len(), 2);
        assert!(!pending.contains(&"start"));
        assert!(!pending.contains(&"chapter"));
    }

    #[test]
    fn test_game_over_at_min() {
        let mut engine = Engine::new(&config(), 1);
        let bill = engine.catalogue().get(&CardId::new("bill")).cloned().unwrap();

        assert!(!engine.is_game_over());
        assert!(engine.game_over_info().is_none());

        engine.choose(&bill, Direction::Left);

        assert!(engine.is_game_over());
        let info = engine.game_over_info().unwrap();
        assert_eq!(info.power, "money");
        assert_eq!(info.value, 0.0);
        assert_eq!(info.boundary, Boundary::Min);
    }

    #[test]
    fn test_follow_up_drawn_next() {
        let mut engine = Engine::new(&config(), 1);
        let bill = engine.catalogue().get(&CardId::new("bill")).cloned().unwrap();

        engine.choose(&bill, Direction::Right);

        assert_eq!(engine.draw().unwrap().id.as_str(), "reminder");
        assert_eq!(engine.cards_drawn(), 1);
    }

    #[test]
    fn test_unknown_booster_and_power_ignored() {
        let config = config().with_card(
            Card::new("odd", "")
                .with_left(Choice::new("?").with_booster("nope").with_effect("fame", 10.0)),
        );
        let mut engine = Engine::new(&config, 1);
        let card = engine.catalogue().get(&CardId::new("odd")).cloned().unwrap();

        engine.choose(&card, Direction::Left);

        assert!(engine.active_boosters().is_empty());
        assert!(engine.power("fame").is_none());
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_booster_lifecycle() {
        let config = config()
            .with_booster(Booster::new("payday", 2).with_power_cap("money", 250.0))
            .with_card(Card::new("job", "").with_left(Choice::new("Work").with_booster("payday")));
        let mut engine = Engine::new(&config, 1);
        let job = engine.catalogue().get(&CardId::new("job")).cloned().unwrap();
        let start = engine.entry_card().unwrap();

        engine.choose(&job, Direction::Left);
        assert_eq!(engine.active_boosters().len(), 1);
        assert_eq!(engine.active_boosters()[0].remaining, 1);
        assert_eq!(engine.effective_cap("money"), Some(250.0));

        engine.choose(&start, Direction::Left);
        assert!(engine.active_boosters().is_empty());
        assert_eq!(engine.effective_cap("money"), Some(200.0));
    }

    #[test]
    fn test_game_over_scenario() {
        let config = config().with_scenarios(
            "money",
            ScenarioSet {
                min: vec!["Broke.".into()],
                max: vec![],
            },
        );
        let mut engine = Engine::new(&config, 1);

        let min = GameOverInfo { power: "money".into(), value: 0.0, boundary: Boundary::Min, card_count: 0 };
        assert_eq!(engine.game_over_scenario(&min).as_deref(), Some("Broke."));

        let max = GameOverInfo { boundary: Boundary::Max, ..min.clone() };
        assert_eq!(engine.game_over_scenario(&max), None);

        let config = config.with_default_scenario("Life goes on.");
        let mut engine = Engine::new(&config, 1);
        assert_eq!(engine.game_over_scenario(&max).as_deref(), Some("Life goes on."));
    }

    #[test]
    fn test_reset() {
        let mut engine = Engine::new(&config(), 1);
        let bill = engine.catalogue().get(&CardId::new("bill")).cloned().unwrap();
        engine.choose(&bill, Direction::Left);
        engine.draw().unwrap();

        engine.reset();

        assert!(engine.history().is_empty());
        assert_eq!(engine.cards_drawn(), 0);
        assert_eq!(engine.power("money").unwrap().value, 100.0);
    }
}
