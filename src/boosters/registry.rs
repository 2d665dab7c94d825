//! Active booster tracking.
//!
//! The registry keeps boosters in activation order. Order matters for
//! `modify_effect`, which applies every matching multiplier in sequence to the
//! running value.

use serde::{Deserialize, Serialize};

use super::definition::{Booster, BoosterModifier, EffectKind};

/// A booster with its remaining duration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActiveBooster {
    pub booster: Booster,
    /// Turns left before the booster expires.
    pub remaining: u32,
}

/// Registry of active boosters.
#[derive(Clone, Debug, Default)]
pub struct BoosterRegistry {
    active: Vec<ActiveBooster>,
}

impl BoosterRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate a booster for its configured duration.
    ///
    /// Activating the same booster twice stacks two independent entries.
    pub fn activate(&mut self, booster: &Booster) {
        self.active.push(ActiveBooster {
            booster: booster.clone(),
            remaining: booster.duration,
        });
    }

    /// Advance one turn: decrement durations and drop expired boosters.
    pub fn tick(&mut self) {
        for active in &mut self.active {
            active.remaining = active.remaining.saturating_sub(1);
        }
        self.active.retain(|a| a.remaining > 0);
    }

    /// Effective cap for a power: the largest of `base` and every matching
    /// power cap modifier.
    #[must_use]
    pub fn effective_cap(&self, power: &str, base: f64) -> f64 {
        self.modifiers()
            .filter(|m| m.applies_to(power))
            .fold(base, |cap, m| match m {
                BoosterModifier::PowerCap { value, .. } if *value > cap => *value,
                _ => cap,
            })
    }

    /// Scale a raw delta by every matching effect modifier, in activation order.
    ///
    /// A `loss` modifier only scales a negative running value and a `gain`
    /// modifier only a positive one; each multiplier sees the value produced
    /// by the previous one.
    #[must_use]
    pub fn modify_effect(&self, power: &str, raw: f64) -> f64 {
        let mut value = raw;
        for modifier in self.modifiers().filter(|m| m.applies_to(power)) {
            if let BoosterModifier::EffectModifier { kind, multiplier, .. } = modifier {
                match kind {
                    EffectKind::Loss if value < 0.0 => value *= multiplier,
                    EffectKind::Gain if value > 0.0 => value *= multiplier,
                    _ => {}
                }
            }
        }
        value
    }

    /// Active boosters in activation order.
    #[must_use]
    pub fn active(&self) -> &[ActiveBooster] {
        &self.active
    }

    /// Number of active boosters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Check if no booster is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    fn modifiers(&self) -> impl Iterator<Item = &BoosterModifier> {
        self.active.iter().flat_map(|a| a.booster.modifiers.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_and_tick() {
        let mut registry = BoosterRegistry::new();
        registry.activate(&Booster::new("short", 1));
        registry.activate(&Booster::new("long", 3));
        assert_eq!(registry.len(), 2);

        registry.tick();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.active()[0].booster.id.as_str(), "long");
        assert_eq!(registry.active()[0].remaining, 2);

        registry.tick();
        registry.tick();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_zero_duration_expires_on_first_tick() {
        let mut registry = BoosterRegistry::new();
        registry.activate(&Booster::new("instant", 0));
        assert_eq!(registry.len(), 1);

        registry.tick();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_effective_cap_raises_only() {
        let mut registry = BoosterRegistry::new();
        assert_eq!(registry.effective_cap("money", 200.0), 200.0);

        registry.activate(&Booster::new("raise", 2).with_power_cap("money", 250.0));
        registry.activate(&Booster::new("lower", 2).with_power_cap("money", 150.0));

        assert_eq!(registry.effective_cap("money", 200.0), 250.0);
        assert_eq!(registry.effective_cap("mood", 100.0), 100.0);
    }

    #[test]
    fn test_effective_cap_wildcard() {
        let mut registry = BoosterRegistry::new();
        registry.activate(&Booster::new("all", 2).with_power_cap("*", 120.0));

        assert_eq!(registry.effective_cap("mood", 100.0), 120.0);
        assert_eq!(registry.effective_cap("money", 200.0), 200.0);
    }

    #[test]
    fn test_modify_effect_respects_sign() {
        let mut registry = BoosterRegistry::new();
        registry.activate(&Booster::new("shield", 2).with_effect_modifier("mood", EffectKind::Loss, 0.5));

        assert_eq!(registry.modify_effect("mood", -10.0), -5.0);
        assert_eq!(registry.modify_effect("mood", 10.0), 10.0);
        assert_eq!(registry.modify_effect("money", -10.0), -10.0);
    }

    #[test]
    fn test_modify_effect_compounds() {
        let mut registry = BoosterRegistry::new();
        registry.activate(&Booster::new("a", 2).with_effect_modifier("mood", EffectKind::Gain, 2.0));
        registry.activate(&Booster::new("b", 2).with_effect_modifier("*", EffectKind::Gain, 1.5));

        assert_eq!(registry.modify_effect("mood", 10.0), 30.0);
    }

    #[test]
    fn test_modify_effect_uses_running_value() {
        // A negative multiplier flips the sign, so a later loss modifier applies.
        let mut registry = BoosterRegistry::new();
        registry.activate(
            &Booster::new("flip", 2)
                .with_effect_modifier("mood", EffectKind::Gain, -1.0)
                .with_effect_modifier("mood", EffectKind::Loss, 2.0),
        );

        assert_eq!(registry.modify_effect("mood", 5.0), -10.0);
    }
}
