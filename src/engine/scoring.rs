use super::food::FoodKind;
use crate::consts;
use std::time::Duration;

/// Compute the points awarded for eating a food of the given kind
pub(crate) fn food_score(kind: FoodKind, combo: u32, double_points: bool) -> u32 {
    let doubling = if double_points { 2 } else { 1 };
    kind.points() * doubling * combo_multiplier(combo)
}

/// The score multiplier for a combo count, capped at
/// [`MAX_COMBO_MULTIPLIER`][consts::MAX_COMBO_MULTIPLIER]
pub(crate) fn combo_multiplier(combo: u32) -> u32 {
    combo.saturating_add(1).min(consts::MAX_COMBO_MULTIPLIER)
}

/// Return the 1-based level for `score`: the index of the highest entry in
/// [`LEVEL_THRESHOLDS`][consts::LEVEL_THRESHOLDS] that `score` has reached
pub(crate) fn level_for_score(score: u32) -> u32 {
    let reached = consts::LEVEL_THRESHOLDS
        .iter()
        .take_while(|&&t| t <= score)
        .count();
    u32::try_from(reached.max(1)).unwrap_or(u32::MAX)
}

/// Score, level, and combo bookkeeping for the current game, plus the
/// all-time high score
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Progression {
    score: u32,
    high_score: u32,
    level: u32,
    combo: u32,

    /// Time left before the combo decays to zero
    combo_idle: Option<Duration>,

    /// The high score as of the start of the game
    previous_best: u32,
}

impl Progression {
    pub(crate) fn new(high_score: u32) -> Progression {
        Progression {
            score: 0,
            high_score,
            level: 1,
            combo: 0,
            combo_idle: None,
            previous_best: high_score,
        }
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn high_score(&self) -> u32 {
        self.high_score
    }

    pub(crate) fn level(&self) -> u32 {
        self.level
    }

    pub(crate) fn combo(&self) -> u32 {
        self.combo
    }

    /// Add `points` to the score and raise the level as needed.  Returns the
    /// new level if it went up.
    pub(crate) fn add_points(&mut self, points: u32) -> Option<u32> {
        self.score = self.score.saturating_add(points);
        let level = level_for_score(self.score);
        (level > self.level).then(|| {
            self.level = level;
            level
        })
    }

    /// Register a food pickup: bump the combo counter and restart the
    /// combo-idle countdown.  Returns the new combo count.
    pub(crate) fn food_eaten(&mut self, combo_timeout: Duration) -> u32 {
        self.combo = self.combo.saturating_add(1);
        self.combo_idle = Some(combo_timeout);
        self.combo
    }

    /// Count the combo-idle timer down by `dt`, resetting the combo if it runs
    /// out
    pub(crate) fn advance(&mut self, dt: Duration) {
        if let Some(remaining) = self.combo_idle {
            if remaining <= dt {
                self.combo = 0;
                self.combo_idle = None;
            } else {
                self.combo_idle = Some(remaining - dt);
            }
        }
    }

    /// Fold the current score into the high score
    pub(crate) fn update_high_score(&mut self) {
        self.high_score = self.high_score.max(self.score);
    }

    /// Has the current game beaten the high score it started with?
    pub(crate) fn is_new_record(&self) -> bool {
        self.score > self.previous_best
    }

    /// Start a new game, keeping only the high score
    pub(crate) fn reset(&mut self) {
        *self = Progression::new(self.high_score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 1)]
    #[case(1, 2)]
    #[case(4, 5)]
    #[case(5, 5)]
    #[case(100, 5)]
    #[case(u32::MAX, 5)]
    fn test_combo_multiplier(#[case] combo: u32, #[case] mult: u32) {
        assert_eq!(combo_multiplier(combo), mult);
    }

    #[rstest]
    #[case(FoodKind::Apple, 0, false, 1)]
    #[case(FoodKind::Banana, 0, false, 5)]
    #[case(FoodKind::Banana, 0, true, 10)]
    #[case(FoodKind::Grape, 2, false, 9)]
    #[case(FoodKind::Cherry, 7, true, 20)]
    fn test_food_score(
        #[case] kind: FoodKind,
        #[case] combo: u32,
        #[case] double: bool,
        #[case] points: u32,
    ) {
        assert_eq!(food_score(kind, combo, double), points);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(99, 1)]
    #[case(100, 2)]
    #[case(150, 2)]
    #[case(300, 3)]
    #[case(999, 4)]
    #[case(1000, 5)]
    #[case(4999, 9)]
    #[case(5000, 10)]
    #[case(1_000_000, 10)]
    fn test_level_for_score(#[case] score: u32, #[case] level: u32) {
        assert_eq!(level_for_score(score), level);
    }

    #[test]
    fn level_is_monotonic() {
        let mut prog = Progression::new(0);
        let mut last = prog.level();
        for _ in 0..600 {
            prog.add_points(10);
            assert!(prog.level() >= last);
            last = prog.level();
        }
        assert_eq!(prog.level(), 10);
    }

    #[test]
    fn add_points_reports_level_up() {
        let mut prog = Progression::new(0);
        assert_eq!(prog.add_points(50), None);
        assert_eq!(prog.add_points(100), Some(2));
        assert_eq!(prog.add_points(100), None);
        assert_eq!(prog.add_points(1000), Some(5));
        assert_eq!(prog.score(), 1250);
    }

    #[test]
    fn combo_decays_when_idle() {
        let timeout = Duration::from_secs(3);
        let mut prog = Progression::new(0);
        assert_eq!(prog.food_eaten(timeout), 1);
        prog.advance(Duration::from_secs(2));
        assert_eq!(prog.food_eaten(timeout), 2);
        prog.advance(Duration::from_secs(2));
        assert_eq!(prog.combo(), 2);
        prog.advance(Duration::from_secs(1));
        assert_eq!(prog.combo(), 0);
        prog.advance(Duration::from_secs(10));
        assert_eq!(prog.combo(), 0);
    }

    #[test]
    fn high_score_survives_reset() {
        let mut prog = Progression::new(40);
        prog.add_points(30);
        prog.update_high_score();
        assert_eq!(prog.high_score(), 40);
        assert!(!prog.is_new_record());
        prog.add_points(30);
        prog.update_high_score();
        assert_eq!(prog.high_score(), 60);
        assert!(prog.is_new_record());
        prog.food_eaten(Duration::from_secs(3));
        prog.reset();
        assert_eq!(prog, Progression::new(60));
    }
}
