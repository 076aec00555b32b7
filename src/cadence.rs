use crate::config::{
    BASE_MOVE_INTERVAL, MAX_MOVE_INTERVAL, MIN_MOVE_INTERVAL, SPEED_EFFECT_FRAMES,
    THROTTLE_DEADZONE,
};
use crate::effects::{SpeedModifier, StatusEffects};

/// Frame counter deciding on which frames the snake moves.
///
/// Runs on the same frame clock as the per-frame update but fires only every
/// `interval` frames. The interval is recomputed each frame from the analog
/// throttle and the active speed effect.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct MovementCadence {
    frame_counter: u32,
    last_interval: u32,
}

impl MovementCadence {
    /// Counts one frame and returns true when the snake should advance.
    ///
    /// The counter keeps running while movement is frozen; a due step is
    /// simply dropped.
    pub fn on_frame(&mut self, effects: &mut StatusEffects, throttle: f32) -> bool {
        let interval = apply_speed_modifier(
            base_interval_for_throttle(throttle),
            effects.consume_speed_frame(),
        );
        self.last_interval = interval;

        self.frame_counter += 1;
        if self.frame_counter < interval {
            return false;
        }

        self.frame_counter = 0;
        !effects.is_frozen()
    }

    /// Interval used on the most recent frame.
    #[must_use]
    pub fn interval(&self) -> u32 {
        if self.last_interval == 0 {
            BASE_MOVE_INTERVAL
        } else {
            self.last_interval
        }
    }
}

/// Maps an analog throttle in `0.0..=1.0` to a movement interval.
///
/// Released throttle gives the base interval; full throttle gives the minimum.
#[must_use]
pub fn base_interval_for_throttle(throttle: f32) -> u32 {
    if throttle <= THROTTLE_DEADZONE || throttle.is_nan() {
        return BASE_MOVE_INTERVAL;
    }

    let span = (BASE_MOVE_INTERVAL - MIN_MOVE_INTERVAL) as f32;
    let frames = BASE_MOVE_INTERVAL as f32 - throttle.min(1.0) * span;
    (frames as u32).max(MIN_MOVE_INTERVAL)
}

/// Applies boost/slowdown to a base interval within the cadence limits.
#[must_use]
pub fn apply_speed_modifier(base: u32, modifier: SpeedModifier) -> u32 {
    match modifier {
        SpeedModifier::Normal => base,
        SpeedModifier::Boosted => base.saturating_sub(SPEED_EFFECT_FRAMES).max(MIN_MOVE_INTERVAL),
        SpeedModifier::Slowed => (base + SPEED_EFFECT_FRAMES).min(MAX_MOVE_INTERVAL),
    }
}
