use crate::util::EnumExt;
use enum_map::{Enum, EnumMap};
use std::fmt;
use std::time::Duration;

/// A timed power-up granted by eating food
#[derive(Clone, Copy, Debug, Enum, Eq, Hash, PartialEq)]
pub(crate) enum Effect {
    /// Shortens the tick interval
    SpeedBoost,

    /// Disables wall collisions; the snake wraps around the grid's edges
    GhostMode,

    /// Doubles the points awarded for food
    DoublePoints,

    /// Disables collisions with the snake's own body and with obstacles
    Invincible,
}

impl Effect {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Effect::SpeedBoost => "Speed Boost",
            Effect::GhostMode => "Ghost Mode",
            Effect::DoublePoints => "Double Points",
            Effect::Invincible => "Invincible",
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Countdown state for a single effect
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct Timer {
    /// Time left before the effect expires; `None` if the effect is inactive
    remaining: Option<Duration>,

    /// How long the effect has been continuously active
    active_for: Duration,
}

/// The set of independent effect flags and their expiry countdowns.
///
/// There is exactly one countdown per effect, so re-triggering an effect
/// replaces its deadline instead of leaving a stale one behind.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct EffectTimers {
    timers: EnumMap<Effect, Timer>,
}

impl EffectTimers {
    pub(crate) fn new() -> EffectTimers {
        EffectTimers::default()
    }

    /// Activate `effect` for `duration`, restarting its countdown if it is
    /// already active.  Returns `true` if the effect was previously inactive.
    pub(crate) fn trigger(&mut self, effect: Effect, duration: Duration) -> bool {
        let timer = &mut self.timers[effect];
        let fresh = timer.remaining.is_none();
        if fresh {
            timer.active_for = Duration::ZERO;
        }
        timer.remaining = Some(duration);
        fresh
    }

    /// Deactivate `effect`.  Returns how long it had been active, or `None` if
    /// it was not active.
    pub(crate) fn expire(&mut self, effect: Effect) -> Option<Duration> {
        let timer = &mut self.timers[effect];
        timer.remaining.take()?;
        Some(std::mem::take(&mut timer.active_for))
    }

    pub(crate) fn is_active(&self, effect: Effect) -> bool {
        self.timers[effect].remaining.is_some()
    }

    /// Return the time remaining on `effect`, if active
    pub(crate) fn remaining(&self, effect: Effect) -> Option<Duration> {
        self.timers[effect].remaining
    }

    /// Count every active effect down by `dt`.  Returns the effects that
    /// expired along with how long each had been active.
    pub(crate) fn advance(&mut self, dt: Duration) -> Vec<(Effect, Duration)> {
        let mut expired = Vec::new();
        for (effect, timer) in &mut self.timers {
            let Some(remaining) = timer.remaining else {
                continue;
            };
            if remaining <= dt {
                timer.active_for += remaining;
                timer.remaining = None;
                expired.push((effect, std::mem::take(&mut timer.active_for)));
            } else {
                timer.active_for += dt;
                timer.remaining = Some(remaining - dt);
            }
        }
        expired
    }

    /// Deactivate all effects, returning the ones that had been active
    pub(crate) fn clear(&mut self) -> Vec<(Effect, Duration)> {
        Effect::iter()
            .filter_map(|e| self.expire(e).map(|d| (e, d)))
            .collect()
    }
}
