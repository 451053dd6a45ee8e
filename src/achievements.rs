use crate::engine::{Effect, FoodKind, GameEvent};
use crate::util::EnumExt;
use enum_map::{Enum, EnumMap};
use std::fmt;
use std::time::Duration;

/// Number of speed boosts that must be collected in one game for
/// [`Achievement::SpeedDemon`]
const SPEED_DEMON_BOOSTS: u32 = 3;

/// Total ghost-mode time needed for [`Achievement::GhostMaster`]
const GHOST_MASTER_TIME: Duration = Duration::from_secs(30);

/// Combo count needed for [`Achievement::ComboKing`]
const COMBO_KING_COMBO: u32 = 5;

#[derive(Clone, Copy, Debug, Enum, Eq, Hash, PartialEq)]
pub(crate) enum Achievement {
    FirstBite,
    SpeedDemon,
    GhostMaster,
    ComboKing,
}

impl Achievement {
    pub(crate) fn title(self) -> &'static str {
        match self {
            Achievement::FirstBite => "First Bite",
            Achievement::SpeedDemon => "Speed Demon",
            Achievement::GhostMaster => "Ghost Master",
            Achievement::ComboKing => "Combo King",
        }
    }

    pub(crate) fn description(self) -> &'static str {
        match self {
            Achievement::FirstBite => "Eat your first fruit",
            Achievement::SpeedDemon => "Collect 3 speed boosts in one game",
            Achievement::GhostMaster => "Stay in ghost mode for 30 seconds total",
            Achievement::ComboKing => "Achieve a 5x combo",
        }
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.title())
    }
}

/// Achievement progress for the current session.  Nothing here is saved
/// between runs.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Achievements {
    unlocked: EnumMap<Achievement, bool>,

    /// Speed boosts collected since the last reset
    speed_boosts: u32,

    /// Total time spent in ghost mode across all games this session
    ghost_time: Duration,
}

impl Achievements {
    pub(crate) fn new() -> Achievements {
        Achievements::default()
    }

    pub(crate) fn unlocked(&self) -> impl Iterator<Item = Achievement> + '_ {
        Achievement::iter().filter(|&a| self.unlocked[a])
    }

    /// Update progress in response to an engine event and return any
    /// achievements unlocked as a result
    pub(crate) fn observe(&mut self, event: &GameEvent) -> Vec<Achievement> {
        let mut unlocked = Vec::new();
        match *event {
            GameEvent::FoodEaten { kind, .. } => {
                self.unlock(Achievement::FirstBite, &mut unlocked);
                if kind == FoodKind::Apple {
                    self.speed_boosts = self.speed_boosts.saturating_add(1);
                    if self.speed_boosts >= SPEED_DEMON_BOOSTS {
                        self.unlock(Achievement::SpeedDemon, &mut unlocked);
                    }
                }
            }
            GameEvent::ComboReached { combo } if combo >= COMBO_KING_COMBO => {
                self.unlock(Achievement::ComboKing, &mut unlocked);
            }
            GameEvent::EffectExpired {
                effect: Effect::GhostMode,
                active_for,
            } => {
                self.ghost_time = self.ghost_time.saturating_add(active_for);
                if self.ghost_time >= GHOST_MASTER_TIME {
                    self.unlock(Achievement::GhostMaster, &mut unlocked);
                }
            }
            GameEvent::Reset => self.speed_boosts = 0,
            _ => (),
        }
        unlocked
    }

    fn unlock(&mut self, achievement: Achievement, newly: &mut Vec<Achievement>) {
        if !std::mem::replace(&mut self.unlocked[achievement], true) {
            log::info!("Achievement unlocked: {achievement}");
            newly.push(achievement);
        }
    }
}
