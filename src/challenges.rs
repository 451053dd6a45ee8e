use crate::engine::{FoodKind, GameEvent};
use crate::skins::Skin;
use crate::util::EnumExt;
use chrono::NaiveDate;
use enum_map::Enum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Deserialize, Enum, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum ChallengeKind {
    HighScorer,
    ComboMaster,
    GhostRunner,
}

impl ChallengeKind {
    pub(crate) fn title(self) -> &'static str {
        match self {
            ChallengeKind::HighScorer => "High Scorer",
            ChallengeKind::ComboMaster => "Combo Master",
            ChallengeKind::GhostRunner => "Ghost Runner",
        }
    }

    pub(crate) fn description(self) -> &'static str {
        match self {
            ChallengeKind::HighScorer => "Score 1000 points in a single game",
            ChallengeKind::ComboMaster => "Achieve a 10x combo",
            ChallengeKind::GhostRunner => "Collect 5 ghost power-ups",
        }
    }

    pub(crate) fn requirement(self) -> u32 {
        match self {
            ChallengeKind::HighScorer => 1000,
            ChallengeKind::ComboMaster => 10,
            ChallengeKind::GhostRunner => 5,
        }
    }

    pub(crate) fn reward(self) -> Reward {
        match self {
            ChallengeKind::HighScorer => Reward::Points(500),
            ChallengeKind::ComboMaster => Reward::Points(300),
            ChallengeKind::GhostRunner => Reward::Skin(Skin::Neon),
        }
    }
}

impl fmt::Display for ChallengeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.title())
    }
}

/// What the player receives for completing a challenge
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Reward {
    /// Points added to the skin wallet
    Points(u32),
    /// A skin unlocked for free
    Skin(Skin),
}

impl fmt::Display for Reward {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reward::Points(n) => write!(f, "{n} points"),
            Reward::Skin(skin) => write!(f, "the {skin} skin"),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct Challenge {
    pub(crate) kind: ChallengeKind,
    /// Never exceeds `kind.requirement()`
    pub(crate) progress: u32,
    pub(crate) completed: bool,
}

impl Challenge {
    fn new(kind: ChallengeKind) -> Challenge {
        Challenge {
            kind,
            progress: 0,
            completed: false,
        }
    }

    /// Set the progress to `value` (clamped to the requirement), and return
    /// `true` if this completes the challenge for the first time
    fn set_progress(&mut self, value: u32) -> bool {
        self.progress = value.min(self.kind.requirement());
        if !self.completed && self.progress >= self.kind.requirement() {
            self.completed = true;
            true
        } else {
            false
        }
    }
}

/// The set of challenges for one calendar day
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct DailyChallenges {
    day: NaiveDate,
    challenges: Vec<Challenge>,
}

impl DailyChallenges {
    pub(crate) fn new(day: NaiveDate) -> DailyChallenges {
        DailyChallenges {
            day,
            challenges: ChallengeKind::iter().map(Challenge::new).collect(),
        }
    }

    pub(crate) fn challenges(&self) -> &[Challenge] {
        &self.challenges
    }

    /// Replace the challenges with a fresh set if `today` is not the day they
    /// were generated for.  Returns `true` if they were replaced.
    pub(crate) fn refresh(&mut self, today: NaiveDate) -> bool {
        if self.day == today && self.is_complete_set() {
            false
        } else {
            log::info!("Generating daily challenges for {today}");
            *self = DailyChallenges::new(today);
            true
        }
    }

    /// Whether every kind of challenge is present exactly once
    fn is_complete_set(&self) -> bool {
        self.challenges.len() == ChallengeKind::LENGTH
            && ChallengeKind::iter().all(|k| self.challenges.iter().any(|c| c.kind == k))
    }

    /// Update progress in response to an engine event.  Returns the kinds
    /// of any challenges completed as a result.
    pub(crate) fn observe(&mut self, event: &GameEvent) -> Vec<ChallengeKind> {
        let mut completed = Vec::new();
        for ch in &mut self.challenges {
            let value = match (ch.kind, *event) {
                (ChallengeKind::HighScorer, GameEvent::ScoreChanged { score }) => score,
                (ChallengeKind::ComboMaster, GameEvent::ComboReached { combo }) => combo,
                (
                    ChallengeKind::GhostRunner,
                    GameEvent::FoodEaten {
                        kind: FoodKind::Cherry,
                        ..
                    },
                ) => ch.progress.saturating_add(1),
                _ => continue,
            };
            if value > ch.progress && ch.set_progress(value) {
                log::info!("Daily challenge completed: {}", ch.kind);
                completed.push(ch.kind);
            }
        }
        completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn progress(dc: &DailyChallenges, kind: ChallengeKind) -> (u32, bool) {
        let ch = dc.challenges().iter().find(|c| c.kind == kind).unwrap();
        (ch.progress, ch.completed)
    }

    #[test]
    fn new_set() {
        let dc = DailyChallenges::new(day(1));
        assert_eq!(
            dc.challenges().iter().map(|c| c.kind).collect::<Vec<_>>(),
            [
                ChallengeKind::HighScorer,
                ChallengeKind::ComboMaster,
                ChallengeKind::GhostRunner
            ]
        );
        assert!(dc.challenges().iter().all(|c| c.progress == 0 && !c.completed));
    }

    #[test]
    fn score_progress_is_clamped_and_completes_once() {
        let mut dc = DailyChallenges::new(day(1));
        assert!(dc.observe(&GameEvent::ScoreChanged { score: 400 }).is_empty());
        assert_eq!(progress(&dc, ChallengeKind::HighScorer), (400, false));
        assert_eq!(
            dc.observe(&GameEvent::ScoreChanged { score: 1250 }),
            [ChallengeKind::HighScorer]
        );
        assert_eq!(progress(&dc, ChallengeKind::HighScorer), (1000, true));
        assert!(dc.observe(&GameEvent::ScoreChanged { score: 2000 }).is_empty());
        assert_eq!(progress(&dc, ChallengeKind::HighScorer), (1000, true));
    }

    #[test]
    fn lower_score_in_later_game_keeps_progress() {
        let mut dc = DailyChallenges::new(day(1));
        dc.observe(&GameEvent::ScoreChanged { score: 600 });
        dc.observe(&GameEvent::ScoreChanged { score: 5 });
        assert_eq!(progress(&dc, ChallengeKind::HighScorer), (600, false));
    }

    #[test]
    fn combo_progress() {
        let mut dc = DailyChallenges::new(day(1));
        for combo in 2..10 {
            assert!(dc.observe(&GameEvent::ComboReached { combo }).is_empty());
        }
        assert_eq!(
            dc.observe(&GameEvent::ComboReached { combo: 10 }),
            [ChallengeKind::ComboMaster]
        );
        assert_eq!(ChallengeKind::ComboMaster.reward(), Reward::Points(300));
    }

    #[test]
    fn ghost_runner_counts_cherries() {
        let mut dc = DailyChallenges::new(day(1));
        let cherry = GameEvent::FoodEaten {
            kind: FoodKind::Cherry,
            points: 2,
        };
        let apple = GameEvent::FoodEaten {
            kind: FoodKind::Apple,
            points: 1,
        };
        for _ in 0..4 {
            assert!(dc.observe(&cherry).is_empty());
            assert!(dc.observe(&apple).is_empty());
        }
        assert_eq!(progress(&dc, ChallengeKind::GhostRunner), (4, false));
        assert_eq!(dc.observe(&cherry), [ChallengeKind::GhostRunner]);
        assert!(dc.observe(&cherry).is_empty());
        assert_eq!(progress(&dc, ChallengeKind::GhostRunner), (5, true));
        assert_eq!(ChallengeKind::GhostRunner.reward(), Reward::Skin(Skin::Neon));
    }

    #[test]
    fn refresh_on_new_day() {
        let mut dc = DailyChallenges::new(day(1));
        dc.observe(&GameEvent::ScoreChanged { score: 1000 });
        assert!(!dc.refresh(day(1)));
        assert_eq!(progress(&dc, ChallengeKind::HighScorer), (1000, true));
        assert!(dc.refresh(day(2)));
        assert_eq!(dc, DailyChallenges::new(day(2)));
    }

    #[test]
    fn refresh_repairs_incomplete_set() {
        let mut dc: DailyChallenges = serde_json::from_value(serde_json::json!({
            "day": "2025-06-01",
            "challenges": [
                {"kind": "high-scorer", "progress": 10, "completed": false},
            ],
        }))
        .unwrap();
        assert!(dc.refresh(day(1)));
        assert_eq!(dc, DailyChallenges::new(day(1)));
    }
}
