use super::effects::Effect;
use super::food::FoodKind;
use super::grid::Cell;
use std::fmt;
use std::time::Duration;

/// Notable occurrences reported by the engine for the front-end and for
/// achievement & challenge tracking
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameEvent {
    /// The game was started or resumed
    Started,
    Paused,
    FoodEaten {
        kind: FoodKind,
        points: u32,
    },
    ScoreChanged {
        score: u32,
    },
    LevelUp {
        level: u32,
    },
    /// Emitted for every pickup that extends a combo to two or more
    ComboReached {
        combo: u32,
    },
    /// An effect was activated or had its countdown restarted
    EffectActivated(Effect),
    EffectExpired {
        effect: Effect,
        /// How long the effect was continuously active
        active_for: Duration,
    },
    ObstacleSpawned(Cell),
    /// The game ended with a score above the high score it started with
    NewHighScore {
        score: u32,
    },
    GameOver {
        cause: GameOverCause,
        score: u32,
    },
    Reset,
}

/// Why a game ended
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum GameOverCause {
    Collision(Collision),
    /// There was no free cell left in which to place food or an obstacle
    GridFull,
}

impl fmt::Display for GameOverCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOverCause::Collision(c) => write!(f, "{c}"),
            GameOverCause::GridFull => write!(f, "ran out of room"),
        }
    }
}

/// The things the snake's head can run into
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Collision {
    Wall,
    /// The snake ran into its own body
    SelfBody,
    Obstacle,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Collision::Wall => "hit a wall",
            Collision::SelfBody => "bit its own tail",
            Collision::Obstacle => "hit an obstacle",
        };
        f.pad(s)
    }
}
