//! Timed status effects applied by collectibles.
//!
//! Every effect counts down independently. Speed boost and slowdown share one
//! signed timer: negative values count up towards zero while boosted, positive
//! values count down while slowed, so picking one cancels the other.

use serde::{Deserialize, Serialize};

use crate::config::{
    FREEZE_DURATION, INVINCIBLE_DURATION, REVERSE_CONTROLS_DURATION, SPEED_EFFECT_DURATION,
};

/// Effect granted by picking up a collectible.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum EffectGrant {
    SpeedBoost,
    Slowdown,
    Invincibility,
    ReverseControls,
    Freeze,
}

/// Movement speed modifier currently in force.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SpeedModifier {
    Normal,
    Boosted,
    Slowed,
}

/// Remaining duration of every effect, in frames.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StatusEffects {
    slowdown: i32,
    invincible: u32,
    reverse_controls: u32,
    freeze: u32,
}

impl StatusEffects {
    /// Starts (or restarts) the timer for `grant`.
    pub fn apply(&mut self, grant: EffectGrant) {
        match grant {
            EffectGrant::SpeedBoost => self.slowdown = -signed(SPEED_EFFECT_DURATION),
            EffectGrant::Slowdown => self.slowdown = signed(SPEED_EFFECT_DURATION),
            EffectGrant::Invincibility => self.invincible = INVINCIBLE_DURATION,
            EffectGrant::ReverseControls => self.reverse_controls = REVERSE_CONTROLS_DURATION,
            EffectGrant::Freeze => self.freeze = FREEZE_DURATION,
        }
    }

    /// Counts down invincibility, reversed controls and freeze by one tick.
    pub fn tick(&mut self) {
        self.invincible = self.invincible.saturating_sub(1);
        self.reverse_controls = self.reverse_controls.saturating_sub(1);
        self.freeze = self.freeze.saturating_sub(1);
    }

    /// Returns the speed modifier for this frame and moves the speed timer one
    /// step towards zero.
    pub fn consume_speed_frame(&mut self) -> SpeedModifier {
        match self.slowdown {
            0 => SpeedModifier::Normal,
            t if t < 0 => {
                self.slowdown += 1;
                SpeedModifier::Boosted
            }
            _ => {
                self.slowdown -= 1;
                SpeedModifier::Slowed
            }
        }
    }

    /// Signed speed timer: negative while boosted, positive while slowed.
    #[must_use]
    pub fn slowdown_timer(&self) -> i32 {
        self.slowdown
    }

    #[must_use]
    pub fn invincible_timer(&self) -> u32 {
        self.invincible
    }

    #[must_use]
    pub fn reverse_controls_timer(&self) -> u32 {
        self.reverse_controls
    }

    #[must_use]
    pub fn freeze_timer(&self) -> u32 {
        self.freeze
    }

    #[must_use]
    pub fn is_invincible(&self) -> bool {
        self.invincible > 0
    }

    #[must_use]
    pub fn controls_reversed(&self) -> bool {
        self.reverse_controls > 0
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.freeze > 0
    }
}

fn signed(frames: u32) -> i32 {
    i32::try_from(frames).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{EffectGrant, SpeedModifier, StatusEffects};

    #[test]
    fn timers_count_down_to_zero_and_stop() {
        let mut effects = StatusEffects::default();
        effects.apply(EffectGrant::Freeze);
        assert_eq!(effects.freeze_timer(), 30);

        for _ in 0..40 {
            effects.tick();
        }

        assert_eq!(effects.freeze_timer(), 0);
        assert!(!effects.is_frozen());
    }

    #[test]
    fn timers_are_independent() {
        let mut effects = StatusEffects::default();
        effects.apply(EffectGrant::Invincibility);
        effects.tick();
        effects.apply(EffectGrant::ReverseControls);

        assert_eq!(effects.invincible_timer(), 299);
        assert_eq!(effects.reverse_controls_timer(), 180);
        assert_eq!(effects.slowdown_timer(), 0);
    }

    #[test]
    fn speed_boost_counts_up_to_zero() {
        let mut effects = StatusEffects::default();
        effects.apply(EffectGrant::SpeedBoost);
        assert_eq!(effects.slowdown_timer(), -150);

        for _ in 0..150 {
            assert_eq!(effects.consume_speed_frame(), SpeedModifier::Boosted);
        }

        assert_eq!(effects.consume_speed_frame(), SpeedModifier::Normal);
        assert_eq!(effects.slowdown_timer(), 0);
    }

    #[test]
    fn slowdown_replaces_running_boost() {
        let mut effects = StatusEffects::default();
        effects.apply(EffectGrant::SpeedBoost);
        effects.consume_speed_frame();
        effects.apply(EffectGrant::Slowdown);

        assert_eq!(effects.consume_speed_frame(), SpeedModifier::Slowed);
        assert_eq!(effects.slowdown_timer(), 149);
    }

    #[test]
    fn speed_timer_is_untouched_by_tick() {
        let mut effects = StatusEffects::default();
        effects.apply(EffectGrant::Slowdown);
        effects.tick();

        assert_eq!(effects.slowdown_timer(), 150);
    }
}
