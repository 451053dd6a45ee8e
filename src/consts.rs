//! Assorted constants & hard-coded configuration
use crate::engine::{Cell, Direction};
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Width & height of the playing field
pub(crate) const GRID_SIZE: i32 = 20;

/// Where the snake's single segment is placed at the start of a game
pub(crate) const START_CELL: Cell = Cell::new(10, 10);

/// The direction the snake faces at the start of a game
pub(crate) const START_DIRECTION: Direction = Direction::East;

/// How many random cells to try when spawning something before falling back
/// to scanning the whole grid for a free cell
pub(crate) const SPAWN_ATTEMPTS: usize = 100;

/// Scores at which each level begins; level `n` starts at
/// `LEVEL_THRESHOLDS[n - 1]`
pub(crate) const LEVEL_THRESHOLDS: [u32; 10] = [0, 100, 300, 600, 1000, 1500, 2000, 3000, 4000, 5000];

/// The combo multiplier never exceeds this
pub(crate) const MAX_COMBO_MULTIPLIER: u32 = 5;

/// Time between movements of the snake at level 1
pub(crate) const BASE_TICK: Duration = Duration::from_millis(150);

/// Reduction in the time between movements for each level gained
pub(crate) const LEVEL_TICK_STEP: Duration = Duration::from_millis(10);

/// Shortest time between movements that levelling up can produce
pub(crate) const MIN_TICK: Duration = Duration::from_millis(60);

/// Longest time between movements while speed-boost is active
pub(crate) const SPEED_BOOST_TICK: Duration = Duration::from_millis(80);

/// The combo is lost if no food is eaten for this long
pub(crate) const COMBO_TIMEOUT: Duration = Duration::from_secs(3);

/// Time between obstacle spawns once obstacles are enabled
pub(crate) const OBSTACLE_INTERVAL: Duration = Duration::from_secs(30);

/// Obstacles start spawning once this level is reached
pub(crate) const OBSTACLE_MIN_LEVEL: u32 = 2;

pub(crate) const SPEED_BOOST_DURATION: Duration = Duration::from_secs(5);
pub(crate) const GHOST_MODE_DURATION: Duration = Duration::from_secs(7);
pub(crate) const DOUBLE_POINTS_DURATION: Duration = Duration::from_secs(10);
pub(crate) const INVINCIBLE_DURATION: Duration = Duration::from_secs(8);

/// Name of the program's directories under the user's config & data
/// directories
pub(crate) const APP_DIR: &str = "powersnake";

/// Store namespace under which the all-time high score is saved
pub(crate) const HIGH_SCORE_KEY: &str = "snake-game-high-score";

/// Store namespace under which the daily challenges are saved
pub(crate) const CHALLENGES_KEY: &str = "snake-game-challenges";

/// Store namespace under which the skin wallet is saved
pub(crate) const SKINS_KEY: &str = "snake-game-skins";

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Each grid cell is drawn this many terminal columns wide so that the board
/// looks roughly square
pub(crate) const CELL_WIDTH: u16 = 2;

/// Glyph for the snake's head when it is moving north/up
pub(crate) const SNAKE_HEAD_NORTH_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving south/down
pub(crate) const SNAKE_HEAD_SOUTH_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving east/right
pub(crate) const SNAKE_HEAD_EAST_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving west/left
pub(crate) const SNAKE_HEAD_WEST_SYMBOL: char = '>';

/// Glyph for food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph for obstacles
pub(crate) const OBSTACLE_SYMBOL: char = '█';

/// Glyph for the snake's head when it's collided with something
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for apples
pub(crate) const APPLE_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for cherries
pub(crate) const CHERRY_STYLE: Style = Style::new().fg(Color::LightMagenta);

/// Style for grapes
pub(crate) const GRAPE_STYLE: Style = Style::new().fg(Color::Magenta);

/// Style for bananas
pub(crate) const BANANA_STYLE: Style = Style::new().fg(Color::LightYellow);

/// Style for obstacles
pub(crate) const OBSTACLE_STYLE: Style = Style::new().fg(Color::Gray);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Extra styling for the snake while ghost-mode is active
pub(crate) const GHOST_MODIFIER: Modifier = Modifier::DIM;

/// Extra styling for the snake while invincible
pub(crate) const INVINCIBLE_MODIFIER: Modifier = Modifier::SLOW_BLINK;

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the names of active effects
pub(crate) const EFFECT_STYLE: Style = Style::new().fg(Color::LightGreen);

/// Style for achievement & challenge notices
pub(crate) const NOTICE_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);
