//! Story lifecycle and card mixing.
//!
//! Each configured story moves through `NotTriggered -> Triggered -> Completed`
//! and never goes back. Acceptance and rejection are recorded independently
//! of the phase, since a player can decide before or after the story's trigger
//! conditions are met. Mixing happens at most once per story per session.
//!
//! ## Turn order
//!
//! 1. `accept` / `reject` run while the choice is being resolved.
//! 2. `check_completions` marks stories whose last card was just played.
//! 3. `check_triggers` evaluates every untriggered story in configuration
//!    order, mixing its cards unless it is rejected or still awaits acceptance.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cards::{CardId, CardRegistry};
use crate::core::rng::GameRng;
use crate::deck::DeckManager;

use super::definition::{MixPolicy, Story, StoryId};

/// Lifecycle phase of a story.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoryPhase {
    #[default]
    NotTriggered,
    Triggered,
    Completed,
}

/// Per-story session state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryState {
    pub phase: StoryPhase,
    pub accepted: bool,
    pub rejected: bool,
    /// Set once the story's cards have been injected into the deck.
    pub mixed: bool,
}

impl StoryState {
    /// Triggered or completed.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.phase != StoryPhase::NotTriggered
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.phase == StoryPhase::Completed
    }
}

/// Mutable session pieces that mixing touches.
pub struct StoryContext<'a> {
    pub catalogue: &'a mut CardRegistry,
    pub deck: &'a mut DeckManager,
    pub rng: &'a mut GameRng,
}

/// Owns the state of every configured story for one session.
#[derive(Clone, Debug, Default)]
pub struct StoryCoordinator {
    stories: Vec<Story>,
    states: Vec<StoryState>,
    /// Cached `Story::is_acceptance_gated`, parallel to `stories`.
    gated: Vec<bool>,
    index: FxHashMap<StoryId, usize>,
}

impl StoryCoordinator {
    /// Create a coordinator with every story untriggered.
    #[must_use]
    pub fn new(stories: &[Story]) -> Self {
        let mut coordinator = Self::default();
        for story in stories {
            if coordinator.index.contains_key(&story.id) {
                continue;
            }
            coordinator.index.insert(story.id.clone(), coordinator.stories.len());
            coordinator.gated.push(story.is_acceptance_gated());
            coordinator.states.push(StoryState::default());
            coordinator.stories.push(story.clone());
        }
        coordinator
    }

    /// Ids of every card that belongs to a story's card list.
    #[must_use]
    pub fn story_card_ids(&self) -> FxHashSet<CardId> {
        self.stories
            .iter()
            .flat_map(|s| s.cards.iter().map(|c| c.id.clone()))
            .collect()
    }

    /// Record acceptance, mixing immediately if the story already triggered.
    ///
    /// A rejected story is never mixed, even if accepted later.
    pub fn accept(&mut self, id: &StoryId, ctx: &mut StoryContext<'_>) {
        let Some(&idx) = self.index.get(id) else {
            debug!(story = %id, "accept for unknown story ignored");
            return;
        };
        info!(story = %id, "story accepted");
        let state = &mut self.states[idx];
        state.accepted = true;
        if state.is_triggered() && !state.mixed && !state.rejected {
            self.mix(idx, ctx);
        }
    }

    /// Record rejection. Mixing is suppressed for the rest of the session.
    pub fn reject(&mut self, id: &StoryId) {
        let Some(&idx) = self.index.get(id) else {
            debug!(story = %id, "reject for unknown story ignored");
            return;
        };
        info!(story = %id, "story rejected");
        self.states[idx].rejected = true;
    }

    /// Mark triggered stories whose last card is `resolved` as completed.
    pub fn check_completions(&mut self, resolved: &CardId) {
        for (story, state) in self.stories.iter().zip(self.states.iter_mut()) {
            if state.phase != StoryPhase::Triggered {
                continue;
            }
            if story.last_card_id() == Some(resolved) {
                state.phase = StoryPhase::Completed;
                info!(story = %story.id, "story completed");
            }
        }
    }

    /// Trigger every ready story, in configuration order.
    ///
    /// `played` is the number of cards the player has resolved so far.
    pub fn check_triggers(&mut self, played: usize, ctx: &mut StoryContext<'_>) {
        for idx in 0..self.stories.len() {
            if self.states[idx].is_triggered() || !self.is_ready(idx, played) {
                continue;
            }
            let id = self.stories[idx].id.clone();
            let state = self.states[idx];

            if state.rejected {
                debug!(story = %id, "story triggered after rejection, not mixing");
            } else if self.gated[idx] && !state.accepted {
                debug!(story = %id, "story triggered, waiting for acceptance");
            } else {
                self.mix(idx, ctx);
            }
            self.states[idx].phase = StoryPhase::Triggered;
            info!(story = %id, played, "story triggered");
        }
    }

    /// Completion check followed by trigger check.
    pub fn end_turn(&mut self, resolved: &CardId, played: usize, ctx: &mut StoryContext<'_>) {
        self.check_completions(resolved);
        self.check_triggers(played, ctx);
    }

    fn is_ready(&self, idx: usize, played: usize) -> bool {
        let trigger = &self.stories[idx].trigger;
        let enough_cards = trigger.after_cards.map_or(true, |after| played >= after);
        enough_cards
            && trigger.requires_story_completed.iter().all(|req| {
                self.index
                    .get(req)
                    .is_some_and(|&r| self.states[r].is_completed())
            })
    }

    fn mix(&mut self, idx: usize, ctx: &mut StoryContext<'_>) {
        if self.states[idx].mixed {
            return;
        }
        self.states[idx].mixed = true;
        let story = &self.stories[idx];

        for card in story.cards.iter().filter_map(|c| c.embedded.as_ref()) {
            if ctx.catalogue.register(card.clone()) {
                debug!(story = %story.id, card = %card.id, "registered embedded story card");
            }
        }

        let policy = story.mix_policy();
        match policy {
            MixPolicy::Probabilistic => {
                for card in &story.cards {
                    let probability = card.probability.unwrap_or(1.0);
                    ctx.deck
                        .inject_probabilistic(&card.id, probability, card.mix_window_or_default(), ctx.rng);
                }
            }
            MixPolicy::Windowed(window) => ctx.deck.inject_windowed(&story.card_ids(), window, ctx.rng),
            MixPolicy::Front => ctx.deck.inject_front(&story.card_ids()),
        }
        debug!(story = %story.id, ?policy, deck = ctx.deck.len(), "story cards mixed");
    }

    /// State of a story, if configured.
    #[must_use]
    pub fn state(&self, id: &StoryId) -> Option<&StoryState> {
        self.index.get(id).map(|&i| &self.states[i])
    }

    /// Configured stories in order.
    #[must_use]
    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    /// Stories that have triggered (completed ones included).
    pub fn triggered(&self) -> impl Iterator<Item = &StoryId> {
        self.matching(StoryState::is_triggered)
    }

    pub fn completed(&self) -> impl Iterator<Item = &StoryId> {
        self.matching(StoryState::is_completed)
    }

    pub fn accepted(&self) -> impl Iterator<Item = &StoryId> {
        self.matching(|s| s.accepted)
    }

    pub fn rejected(&self) -> impl Iterator<Item = &StoryId> {
        self.matching(|s| s.rejected)
    }

    /// Stories whose cards have been mixed into the deck.
    pub fn mixed(&self) -> impl Iterator<Item = &StoryId> {
        self.matching(|s| s.mixed)
    }

    fn matching<F>(&self, predicate: F) -> impl Iterator<Item = &StoryId>
    where
        F: Fn(&StoryState) -> bool,
    {
        self.stories
            .iter()
            .zip(self.states.iter())
            .filter(move |(_, state)| predicate(state))
            .map(|(story, _)| &story.id)
    }
}
