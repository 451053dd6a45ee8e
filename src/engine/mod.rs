//! The game simulation: snake movement, collisions, food & obstacle spawning,
//! timed effects, and scoring.
//!
//! The engine does not keep time on its own.  Its driver calls
//! [`Engine::tick()`] once every [`Engine::tick_interval()`] to move the snake
//! and [`Engine::update()`] with elapsed wall-clock time to run the effect,
//! combo, and obstacle timers.
mod effects;
mod events;
mod food;
mod grid;
mod scoring;
mod snake;
pub(crate) use self::effects::Effect;
use self::effects::EffectTimers;
pub(crate) use self::events::{Collision, GameEvent, GameOverCause};
pub(crate) use self::food::{Food, FoodKind};
use self::food::{spawn_food, spawn_obstacle};
pub(crate) use self::grid::{Cell, Direction, Grid, GridFull};
use self::scoring::{food_score, Progression};
use self::snake::Snake;
use crate::consts;
use enum_map::{enum_map, EnumMap};
use rand::Rng;
use std::collections::HashSet;
use std::time::Duration;

/// Adjustable timing parameters of the engine
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Tuning {
    /// Tick interval at level 1
    pub(crate) base_tick: Duration,

    /// How much the tick interval shrinks with each level above 1
    pub(crate) level_tick_step: Duration,

    /// Lower bound on the level-derived tick interval
    pub(crate) min_tick: Duration,

    /// Upper bound on the tick interval while speed-boost is active
    pub(crate) speed_boost_tick: Duration,

    /// Time without eating after which the combo resets
    pub(crate) combo_timeout: Duration,

    /// Time between obstacle spawns
    pub(crate) obstacle_interval: Duration,

    /// Obstacles only spawn from this level onwards
    pub(crate) obstacle_min_level: u32,

    pub(crate) durations: EnumMap<Effect, Duration>,
}

impl Default for Tuning {
    fn default() -> Tuning {
        Tuning {
            base_tick: consts::BASE_TICK,
            level_tick_step: consts::LEVEL_TICK_STEP,
            min_tick: consts::MIN_TICK,
            speed_boost_tick: consts::SPEED_BOOST_TICK,
            combo_timeout: consts::COMBO_TIMEOUT,
            obstacle_interval: consts::OBSTACLE_INTERVAL,
            obstacle_min_level: consts::OBSTACLE_MIN_LEVEL,
            durations: enum_map! {
                Effect::SpeedBoost => consts::SPEED_BOOST_DURATION,
                Effect::GhostMode => consts::GHOST_MODE_DURATION,
                Effect::DoublePoints => consts::DOUBLE_POINTS_DURATION,
                Effect::Invincible => consts::INVINCIBLE_DURATION,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Phase {
    /// Not running, either because the game has not yet been started or
    /// because it was paused
    Paused,
    Running,
    GameOver(GameOverCause),
}

/// A read-only copy of everything the front-end needs to show the game
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snapshot {
    pub(crate) grid_size: i32,
    /// Head first
    pub(crate) snake: Vec<Cell>,
    pub(crate) food: Option<Food>,
    pub(crate) obstacles: HashSet<Cell>,
    /// The direction the snake will move in on the next tick
    pub(crate) direction: Direction,
    pub(crate) score: u32,
    pub(crate) high_score: u32,
    pub(crate) level: u32,
    pub(crate) combo: u32,
    pub(crate) phase: Phase,
    /// Time remaining on each active effect
    pub(crate) effects: EnumMap<Effect, Option<Duration>>,
    /// Number of ticks since the last reset
    pub(crate) ticks: u64,
}

impl Snapshot {
    pub(crate) fn is_active(&self, effect: Effect) -> bool {
        self.effects[effect].is_some()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Engine<R = rand::rngs::ThreadRng> {
    rng: R,
    grid: Grid,
    tuning: Tuning,
    phase: Phase,
    snake: Snake,
    food: Option<Food>,
    obstacles: HashSet<Cell>,
    effects: EffectTimers,
    progress: Progression,
    /// Time accumulated towards the next obstacle spawn
    obstacle_clock: Duration,
    ticks: u64,
    events: Vec<GameEvent>,
}

impl<R: Rng> Engine<R> {
    /// Create an engine in the initial paused state.  `high_score` is the best
    /// score from previous sessions.
    pub(crate) fn new(tuning: Tuning, high_score: u32, rng: R) -> Result<Engine<R>, GridFull> {
        let mut engine = Engine {
            rng,
            grid: Grid::default(),
            tuning,
            phase: Phase::Paused,
            snake: Snake::new(consts::START_CELL, consts::START_DIRECTION),
            food: None,
            obstacles: HashSet::new(),
            effects: EffectTimers::new(),
            progress: Progression::new(high_score),
            obstacle_clock: Duration::ZERO,
            ticks: 0,
            events: Vec::new(),
        };
        engine.place_food()?;
        Ok(engine)
    }

    /// Return to the initial paused state, keeping the high score.  A record
    /// set by an unfinished game is reported before it is discarded.
    pub(crate) fn reset(&mut self) -> Result<(), GridFull> {
        if !matches!(self.phase, Phase::GameOver(_)) && self.progress.is_new_record() {
            let score = self.progress.score();
            self.events.push(GameEvent::NewHighScore { score });
        }
        for (effect, active_for) in self.effects.clear() {
            self.events
                .push(GameEvent::EffectExpired { effect, active_for });
        }
        self.snake = Snake::new(consts::START_CELL, consts::START_DIRECTION);
        self.food = None;
        self.obstacles.clear();
        self.progress.reset();
        self.obstacle_clock = Duration::ZERO;
        self.ticks = 0;
        self.phase = Phase::Paused;
        self.events.push(GameEvent::Reset);
        log::info!("Game reset");
        self.place_food()
    }

    /// Advance the snake by one cell.  Does nothing unless the game is
    /// running.
    ///
    /// # Errors
    ///
    /// Returns [`GridFull`] if the food eaten this tick cannot be replaced, in
    /// which case the game is over.
    pub(crate) fn tick(&mut self) -> Result<(), GridFull> {
        if self.phase != Phase::Running {
            return Ok(());
        }
        let ghost = self.effects.is_active(Effect::GhostMode);
        let invincible = self.effects.is_active(Effect::Invincible);
        let mut head = self.snake.next_head();
        if ghost {
            head = self.grid.wrap(head);
        }
        let collision = if !ghost && !self.grid.in_bounds(head) {
            Some(Collision::Wall)
        } else if !invincible && self.snake.body_contains(head) {
            Some(Collision::SelfBody)
        } else if !invincible && self.obstacles.contains(&head) {
            Some(Collision::Obstacle)
        } else {
            None
        };
        if let Some(c) = collision {
            self.end(GameOverCause::Collision(c));
            return Ok(());
        }
        self.ticks += 1;
        let eaten = self.food.filter(|f| f.cell == head);
        self.snake.advance(head, eaten.is_some());
        if let Some(food) = eaten {
            self.eat(food)?;
        }
        Ok(())
    }

    /// Run the effect, combo, and obstacle timers forwards by `dt`.  Does
    /// nothing unless the game is running.
    ///
    /// # Errors
    ///
    /// Returns [`GridFull`] if an obstacle is due but there is no room for it,
    /// in which case the game is over.
    pub(crate) fn update(&mut self, dt: Duration) -> Result<(), GridFull> {
        if self.phase != Phase::Running {
            return Ok(());
        }
        for (effect, active_for) in self.effects.advance(dt) {
            log::debug!("{effect} expired after {active_for:?}");
            self.events
                .push(GameEvent::EffectExpired { effect, active_for });
        }
        self.progress.advance(dt);
        if self.progress.level() >= self.tuning.obstacle_min_level {
            self.obstacle_clock += dt;
            let interval = self.tuning.obstacle_interval;
            while !interval.is_zero() && self.obstacle_clock >= interval {
                self.obstacle_clock -= interval;
                self.place_obstacle()?;
            }
        }
        Ok(())
    }

    fn eat(&mut self, food: Food) -> Result<(), GridFull> {
        let double = self.effects.is_active(Effect::DoublePoints);
        let points = food_score(food.kind, self.progress.combo(), double);
        let level_up = self.progress.add_points(points);
        self.progress.update_high_score();
        let score = self.progress.score();
        self.events.push(GameEvent::FoodEaten {
            kind: food.kind,
            points,
        });
        self.events.push(GameEvent::ScoreChanged { score });
        if let Some(level) = level_up {
            log::info!("Reached level {level} with score {score}");
            self.events.push(GameEvent::LevelUp { level });
        }
        let combo = self.progress.food_eaten(self.tuning.combo_timeout);
        if combo > 1 {
            self.events.push(GameEvent::ComboReached { combo });
        }
        let effect = food.kind.effect();
        if self.effects.trigger(effect, self.tuning.durations[effect]) {
            log::debug!("{effect} activated");
        } else {
            log::debug!("{effect} renewed");
        }
        self.events.push(GameEvent::EffectActivated(effect));
        self.food = None;
        self.place_food()
    }

    fn place_food(&mut self) -> Result<(), GridFull> {
        match spawn_food(
            self.grid,
            &mut self.rng,
            self.snake.body(),
            &self.obstacles,
        ) {
            Ok(food) => {
                self.food = Some(food);
                Ok(())
            }
            Err(e) => {
                self.end(GameOverCause::GridFull);
                Err(e)
            }
        }
    }

    fn place_obstacle(&mut self) -> Result<(), GridFull> {
        match spawn_obstacle(
            self.grid,
            &mut self.rng,
            self.snake.body(),
            &self.obstacles,
            self.food,
        ) {
            Ok(cell) => {
                log::debug!("Obstacle placed at ({}, {})", cell.x, cell.y);
                self.obstacles.insert(cell);
                self.events.push(GameEvent::ObstacleSpawned(cell));
                Ok(())
            }
            Err(e) => {
                self.end(GameOverCause::GridFull);
                Err(e)
            }
        }
    }
}

impl<R> Engine<R> {
    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    /// Request that the snake turn towards `direction` on the next tick.
    /// Requests to reverse straight back into the snake's body are ignored, as
    /// are all requests once the game is over.  Returns whether the request
    /// was accepted.
    pub(crate) fn set_direction(&mut self, direction: Direction) -> bool {
        if matches!(self.phase, Phase::GameOver(_)) {
            return false;
        }
        self.snake.turn(direction)
    }

    /// Start or resume a paused game, or pause a running one.  Once the game
    /// is over, it must be reset before it can be started again.
    pub(crate) fn toggle_pause(&mut self) {
        match self.phase {
            Phase::Paused => {
                log::info!("Game started");
                self.phase = Phase::Running;
                self.events.push(GameEvent::Started);
            }
            Phase::Running => {
                log::info!("Game paused");
                self.phase = Phase::Paused;
                self.events.push(GameEvent::Paused);
            }
            Phase::GameOver(_) => (),
        }
    }

    /// Time that should elapse between ticks given the current level and
    /// effects
    pub(crate) fn tick_interval(&self) -> Duration {
        let steps = self.progress.level().saturating_sub(1);
        let interval = self
            .tuning
            .base_tick
            .saturating_sub(self.tuning.level_tick_step.saturating_mul(steps))
            .max(self.tuning.min_tick);
        if self.effects.is_active(Effect::SpeedBoost) {
            interval.min(self.tuning.speed_boost_tick)
        } else {
            interval
        }
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid_size: self.grid.size(),
            snake: self.snake.body().iter().copied().collect(),
            food: self.food,
            obstacles: self.obstacles.clone(),
            direction: self.snake.heading(),
            score: self.progress.score(),
            high_score: self.progress.high_score(),
            level: self.progress.level(),
            combo: self.progress.combo(),
            phase: self.phase,
            effects: EnumMap::from_fn(|e| self.effects.remaining(e)),
            ticks: self.ticks,
        }
    }

    /// Take the events that have occurred since the last call
    pub(crate) fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// End the game.  The snake, combo, and effects are left as they were so
    /// that the final state can still be displayed.
    fn end(&mut self, cause: GameOverCause) {
        self.progress.update_high_score();
        let score = self.progress.score();
        log::info!("Game over ({cause}) with score {score}");
        self.phase = Phase::GameOver(cause);
        if self.progress.is_new_record() {
            self.events.push(GameEvent::NewHighScore { score });
        }
        self.events.push(GameEvent::GameOver { cause, score });
    }
}
