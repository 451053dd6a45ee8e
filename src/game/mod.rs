mod paused;
use self::paused::{PauseOpt, Paused};
use crate::achievements::Achievement;
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::engine::{
    Cell, Direction, Effect, Engine, FoodKind, GameOverCause, GridFull, Phase, Snapshot, Tuning,
};
use crate::profile::{Notice, Profile};
use crate::skins::Skin;
use crate::util::{center_rect, get_display_area, EnumExt};
use chrono::Local;
use crossterm::event::{poll, read, Event};
use enum_map::Enum;
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect, Size},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::time::Instant;

/// The game screen: drives an [`Engine`] from terminal input & wall-clock
/// time, draws it, and passes what happens on to the player's [`Profile`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    engine: Engine<R>,
    profile: Profile,
    /// The pause menu, shown once a game in progress has been paused
    menu: Option<Paused>,
    /// The latest message for the player
    notice: Option<Notice>,
    next_tick: Option<Instant>,
    /// When the engine's timers were last advanced; `None` while the game is
    /// not running
    last_update: Option<Instant>,
}

impl<R: Rng> Game<R> {
    pub(crate) fn new(tuning: Tuning, profile: Profile, rng: R) -> Result<Game<R>, GridFull> {
        let engine = Engine::new(tuning, profile.high_score(), rng)?;
        Ok(Game {
            engine,
            profile,
            menu: None,
            notice: None,
            next_tick: None,
            last_update: None,
        })
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        if self.engine.phase() == Phase::Running {
            let now = Instant::now();
            if self.last_update.is_none() {
                self.last_update = Some(now);
            }
            let when = *self
                .next_tick
                .get_or_insert_with(|| now + self.engine.tick_interval());
            let wait = when.saturating_duration_since(now);
            if wait.is_zero() || !poll(wait)? {
                self.advance(Instant::now());
                Ok(None)
            } else {
                Ok(self.handle_event(read()?))
            }
        } else {
            Ok(self.handle_event(read()?))
        }
    }

    /// Run the engine's timers up to `now`, then move the snake
    fn advance(&mut self, now: Instant) {
        self.sync_timers(now);
        if let Err(e) = self.engine.tick() {
            log::warn!("Game ended while moving: {e}");
        }
        self.next_tick = None;
        if self.engine.phase() != Phase::Running {
            self.last_update = None;
        }
        self.dispatch_events();
    }

    /// Run the engine's timers up to `now` without moving the snake
    fn sync_timers(&mut self, now: Instant) {
        if let Some(last) = self.last_update.replace(now) {
            if let Err(e) = self.engine.update(now.saturating_duration_since(last)) {
                log::warn!("Game ended while updating timers: {e}");
            }
        }
    }

    fn pause(&mut self) {
        if self.engine.phase() == Phase::Running {
            self.sync_timers(Instant::now());
            self.engine.toggle_pause();
            if self.engine.phase() == Phase::Paused {
                self.menu = Some(Paused::new());
            }
            self.stop_clock();
            self.dispatch_events();
        }
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match self.engine.phase() {
            Phase::Running => {
                if event == Event::FocusLost {
                    self.pause();
                    return None;
                }
                match Command::from_key_event(event.as_key_press_event()?)? {
                    Command::Quit | Command::Q => return Some(self.quit()),
                    Command::Esc | Command::Space | Command::P => self.pause(),
                    Command::R => self.reset(),
                    cmd => self.steer_or_shop(cmd),
                }
            }
            Phase::Paused => {
                if let Some(ref mut menu) = self.menu {
                    match menu.handle_event(event)? {
                        PauseOpt::Resume => self.resume(),
                        PauseOpt::Reset => self.reset(),
                        PauseOpt::Quit => return Some(self.quit()),
                    }
                } else {
                    match Command::from_key_event(event.as_key_press_event()?)? {
                        Command::Quit | Command::Q => return Some(self.quit()),
                        Command::Space | Command::P | Command::Enter => self.resume(),
                        cmd @ (Command::Up | Command::Down | Command::Left | Command::Right) => {
                            self.steer_or_shop(cmd);
                            self.resume();
                        }
                        cmd => self.steer_or_shop(cmd),
                    }
                }
            }
            Phase::GameOver(_) => match Command::from_key_event(event.as_key_press_event()?)? {
                Command::Quit | Command::Q => return Some(self.quit()),
                Command::R | Command::Enter | Command::Space => self.reset(),
                cmd => self.steer_or_shop(cmd),
            },
        }
        None
    }

    fn reset(&mut self) {
        if let Err(e) = self.engine.reset() {
            log::warn!("Could not set up a new game: {e}");
        }
        self.menu = None;
        self.stop_clock();
        self.dispatch_events();
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    /// Handle the commands that act the same way in every phase
    fn steer_or_shop(&mut self, cmd: Command) {
        match cmd {
            Command::Up => {
                self.engine.set_direction(Direction::North);
            }
            Command::Down => {
                self.engine.set_direction(Direction::South);
            }
            Command::Left => {
                self.engine.set_direction(Direction::West);
            }
            Command::Right => {
                self.engine.set_direction(Direction::East);
            }
            Command::Next => self.notice = Some(self.profile.cycle_skin()),
            Command::B => self.notice = Some(self.profile.buy_next_skin()),
            _ => (),
        }
    }

    fn resume(&mut self) {
        if self.engine.phase() == Phase::Paused {
            self.engine.toggle_pause();
            self.menu = None;
            self.dispatch_events();
        }
    }

    fn quit(&mut self) -> Screen {
        self.profile.save(self.engine.snapshot().high_score);
        Screen::Quit
    }

    fn stop_clock(&mut self) {
        self.next_tick = None;
        self.last_update = None;
    }

    fn dispatch_events(&mut self) {
        let today = Local::now().date_naive();
        for event in self.engine.drain_events() {
            log::trace!("{event:?}");
            if let Some(notice) = self.profile.observe(&event, today).pop() {
                self.notice = Some(notice);
            }
        }
    }

    /// Lines for the panel to the right of the board
    fn side_panel(&self, snapshot: &Snapshot) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from("Effects:")];
        let mut any_effect = false;
        for effect in Effect::iter() {
            if let Some(left) = snapshot.effects[effect] {
                any_effect = true;
                lines.push(Line::styled(
                    format!("  {:<14}{:>5.1}s", effect, left.as_secs_f64()),
                    consts::EFFECT_STYLE,
                ));
            }
        }
        if !any_effect {
            lines.push(Line::from("  none"));
        }
        lines.push(Line::default());
        lines.push(Line::from("Daily Challenges:"));
        for ch in self.profile.challenges().challenges() {
            let mut line = Line::from(format!(
                "  {:<14}{:>5}/{}",
                ch.kind,
                ch.progress,
                ch.kind.requirement()
            ));
            if ch.completed {
                line.push_span(Span::styled(" ✓", consts::EFFECT_STYLE));
            }
            lines.push(line);
        }
        lines.push(Line::default());
        let unlocked = self.profile.achievements().unlocked().collect::<Vec<_>>();
        lines.push(Line::from(format!(
            "Achievements: {}/{}",
            unlocked.len(),
            Achievement::LENGTH
        )));
        for a in unlocked {
            lines.push(Line::from(format!("  {a}")));
        }
        lines.push(Line::default());
        lines.push(Line::from(format!("Moves: {}", snapshot.ticks)));
        lines.push(Line::from(format!(
            "Skin: {}   Wallet: {}",
            self.profile.skin(),
            self.profile.wallet_points()
        )));
        lines.push(Line::from_iter([
            Span::styled("Tab", consts::KEY_STYLE),
            Span::raw(": next skin   "),
            Span::styled("b", consts::KEY_STYLE),
            Span::raw(": buy skin"),
        ]));
        lines
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snapshot = self.engine.snapshot();
        let display = get_display_area(area);
        let [score_area, main_area, msg_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(
            format!(
                " Score: {}   High Score: {}   Level: {}   Combo: {}x",
                snapshot.score, snapshot.high_score, snapshot.level, snapshot.combo
            ),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let board_size = board_size(snapshot.grid_size);
        let [board_column, _, panel_area] = Layout::horizontal([
            Constraint::Length(board_size.width),
            Constraint::Length(2),
            Constraint::Fill(1),
        ])
        .areas(main_area);
        let board_area = center_rect(board_column, board_size);
        Board {
            snapshot: &snapshot,
            skin: self.profile.skin(),
        }
        .render(board_area, buf);

        for (line, row) in self.side_panel(&snapshot).into_iter().zip(panel_area.rows()) {
            line.render(row, buf);
        }

        message_line(snapshot.phase, self.menu.is_some(), self.notice).render(msg_area, buf);

        if let Some(menu) = self.menu {
            let pause_area = center_rect(
                board_area,
                Size {
                    width: Paused::WIDTH,
                    height: Paused::HEIGHT,
                },
            );
            menu.render(pause_area, buf);
        }
    }
}

/// Size of the bordered board for a grid `grid_size` cells on a side
fn board_size(grid_size: i32) -> Size {
    let cells = u16::try_from(grid_size).unwrap_or(0);
    Size {
        width: cells.saturating_mul(consts::CELL_WIDTH).saturating_add(2),
        height: cells.saturating_add(2),
    }
}

/// The line at the bottom of the screen
fn message_line(phase: Phase, menu_open: bool, notice: Option<Notice>) -> Line<'static> {
    match phase {
        Phase::GameOver(cause) => Line::from_iter([
            Span::raw(format!(" GAME OVER: the snake {cause}.  Reset (")),
            Span::styled("r", consts::KEY_STYLE),
            Span::raw(") · Quit ("),
            Span::styled("q", consts::KEY_STYLE),
            Span::raw(")"),
        ]),
        Phase::Paused if !menu_open => Line::from_iter([
            Span::raw(" Press "),
            Span::styled("Space", consts::KEY_STYLE),
            Span::raw(" or an arrow key to start · Quit ("),
            Span::styled("q", consts::KEY_STYLE),
            Span::raw(")"),
        ]),
        _ => match notice {
            Some(n) => Line::styled(format!(" {n}"), consts::NOTICE_STYLE),
            None => Line::default(),
        },
    }
}

fn food_style(kind: FoodKind) -> Style {
    match kind {
        FoodKind::Apple => consts::APPLE_STYLE,
        FoodKind::Cherry => consts::CHERRY_STYLE,
        FoodKind::Grape => consts::GRAPE_STYLE,
        FoodKind::Banana => consts::BANANA_STYLE,
    }
}

fn head_symbol(direction: Direction) -> char {
    match direction {
        Direction::North => consts::SNAKE_HEAD_NORTH_SYMBOL,
        Direction::South => consts::SNAKE_HEAD_SOUTH_SYMBOL,
        Direction::East => consts::SNAKE_HEAD_EAST_SYMBOL,
        Direction::West => consts::SNAKE_HEAD_WEST_SYMBOL,
    }
}

/// The playing field and everything on it
#[derive(Debug)]
struct Board<'a> {
    snapshot: &'a Snapshot,
    skin: Skin,
}

impl Widget for Board<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snap = self.snapshot;
        let ghost = snap.is_active(Effect::GhostMode);
        if ghost {
            DottedBorder.render(area, buf);
        } else {
            Block::bordered().render(area, buf);
        }
        let mut modifier = Modifier::empty();
        if ghost {
            modifier |= consts::GHOST_MODIFIER;
        }
        if snap.is_active(Effect::Invincible) {
            modifier |= consts::INVINCIBLE_MODIFIER;
        }
        let mut canvas = Canvas {
            area: area.inner(Margin::new(1, 1)),
            buf,
        };
        for &cell in &snap.obstacles {
            canvas.draw_cell(cell, consts::OBSTACLE_SYMBOL, consts::OBSTACLE_STYLE);
        }
        if let Some(food) = snap.food {
            canvas.draw_cell(food.cell, consts::FOOD_SYMBOL, food_style(food.kind));
        }
        for (i, &cell) in snap.snake.iter().enumerate().skip(1) {
            canvas.draw_cell(
                cell,
                self.skin.body_symbol(),
                self.skin.segment_style(i).add_modifier(modifier),
            );
        }
        // Draw the head last so that, if it's a collision, we overwrite
        // whatever it's colliding with
        if let Some(&head) = snap.snake.first() {
            if matches!(snap.phase, Phase::GameOver(GameOverCause::Collision(_))) {
                canvas.draw_cell(head, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
            } else {
                canvas.draw_cell(
                    head,
                    head_symbol(snap.direction),
                    self.skin.segment_style(0).add_modifier(modifier),
                );
            }
        }
    }
}

/// Draws grid cells into a region of a buffer, each cell
/// [`consts::CELL_WIDTH`] columns wide
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, cell: Cell, symbol: char, style: Style) {
        let Some((x, y)) = self.position(cell) else {
            return;
        };
        if let Some(bufcell) = self.buf.cell_mut((x, y)) {
            bufcell.set_char(symbol);
            bufcell.set_style(Style::reset().patch(style));
        }
    }

    fn position(&self, cell: Cell) -> Option<(u16, u16)> {
        let x = u16::try_from(cell.x)
            .ok()?
            .checked_mul(consts::CELL_WIDTH)?
            .checked_add(self.area.x)?;
        let y = u16::try_from(cell.y).ok()?.checked_add(self.area.y)?;
        (x < self.area.right() && y < self.area.bottom()).then_some((x, y))
    }
}

/// Border drawn around the board while ghost-mode lets the snake pass
/// through the walls
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct DottedBorder;

impl Widget for DottedBorder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let mut put = |x: u16, y: u16, symbol: char| {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(symbol);
            }
        };
        let (left, top) = (area.left(), area.top());
        let right = area.right().saturating_sub(1);
        let bottom = area.bottom().saturating_sub(1);
        for y in [top, bottom] {
            put(left, y, '·');
            put(right, y, '·');
            for x in (left + 1)..right {
                put(x, y, '⋯');
            }
        }
        for y in (top + 1)..bottom {
            put(left, y, '⋮');
            put(right, y, '⋮');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Collision;
    use crate::store::Store;
    use chrono::NaiveDate;
    use crossterm::event::KeyCode;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::time::Duration;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn new_game() -> Game<ChaCha12Rng> {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let profile = Profile::load(Store::in_memory(), today);
        Game::new(
            Tuning::default(),
            profile,
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        )
        .unwrap()
    }

    fn press(game: &mut Game<ChaCha12Rng>, code: KeyCode) -> Option<Screen> {
        game.handle_event(Event::Key(code.into()))
    }

    fn render(game: &Game<ChaCha12Rng>) -> Buffer {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        game.render(area, &mut buffer);
        buffer
    }

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect::<String>()
            .trim_end()
            .to_owned()
    }

    #[test]
    fn new_game_screen() {
        let game = new_game();
        let buffer = render(&game);
        assert_eq!(
            row_text(&buffer, 0),
            " Score: 0   High Score: 0   Level: 1   Combo: 0x"
        );
        assert_eq!(buffer[(0, 1)].symbol(), "┌");
        assert_eq!(buffer[(41, 1)].symbol(), "┐");
        assert_eq!(buffer[(0, 22)].symbol(), "└");
        assert_eq!(buffer[(41, 22)].symbol(), "┘");
        assert_eq!(buffer[(21, 12)].symbol(), "<");
        assert_eq!(buffer[(21, 12)].fg, Skin::Default.segment_style(0).fg.unwrap());
        let food = game.engine.snapshot().food.unwrap();
        let fx = u16::try_from(food.cell.x).unwrap() * 2 + 1;
        let fy = u16::try_from(food.cell.y).unwrap() + 2;
        assert_eq!(buffer[(fx, fy)].symbol(), "●");
        assert_eq!(buffer[(fx, fy)].fg, food_style(food.kind).fg.unwrap());
        assert!(row_text(&buffer, 1).ends_with("┐  Effects:"));
        assert!(row_text(&buffer, 2).ends_with("│    none"));
        assert!(row_text(&buffer, 23).starts_with(" Press Space or an arrow key to start"));
    }

    #[test]
    fn start_and_move() {
        let mut game = new_game();
        assert!(press(&mut game, KeyCode::Char(' ')).is_none());
        assert_eq!(game.engine.phase(), Phase::Running);
        game.advance(Instant::now());
        let snap = game.engine.snapshot();
        assert_eq!(snap.snake[0], Cell::new(11, 10));
        assert_eq!(snap.ticks, 1);
    }

    #[test]
    fn arrow_key_starts_game() {
        let mut game = new_game();
        assert!(press(&mut game, KeyCode::Up).is_none());
        assert_eq!(game.engine.phase(), Phase::Running);
        game.advance(Instant::now());
        assert_eq!(game.engine.snapshot().snake[0], Cell::new(10, 9));
    }

    #[test]
    fn pause_menu() {
        let mut game = new_game();
        press(&mut game, KeyCode::Char(' '));
        assert!(press(&mut game, KeyCode::Esc).is_none());
        assert_eq!(game.engine.phase(), Phase::Paused);
        assert!(game.menu.is_some());
        let buffer = render(&game);
        let rows = (0..24).map(|y| row_text(&buffer, y)).collect::<Vec<_>>();
        assert!(rows.iter().any(|r| r.contains("┌──── PAUSED ────┐")));
        assert!(rows.iter().any(|r| r.contains("» Resume (Esc) │")));
        assert!(press(&mut game, KeyCode::Esc).is_none());
        assert_eq!(game.engine.phase(), Phase::Running);
        assert!(game.menu.is_none());
    }

    #[test]
    fn reset_from_pause_menu() {
        let mut game = new_game();
        press(&mut game, KeyCode::Char(' '));
        game.advance(Instant::now());
        game.advance(Instant::now());
        press(&mut game, KeyCode::Char('p'));
        assert!(press(&mut game, KeyCode::Char('r')).is_none());
        let snap = game.engine.snapshot();
        assert_eq!(snap.phase, Phase::Paused);
        assert_eq!(snap.ticks, 0);
        assert_eq!(snap.snake, [consts::START_CELL]);
        assert!(game.menu.is_none());
    }

    /// Steer the snake onto the current food, one tick at a time, and return
    /// the kind eaten
    fn eat_food(game: &mut Game<ChaCha12Rng>) -> FoodKind {
        let food = game.engine.snapshot().food.unwrap();
        for _ in 0..100 {
            if game.engine.snapshot().score > 0 {
                return food.kind;
            }
            let head = game.engine.snapshot().snake[0];
            let toward = if head.x < food.cell.x {
                Direction::East
            } else if head.x > food.cell.x {
                Direction::West
            } else if head.y < food.cell.y {
                Direction::South
            } else {
                Direction::North
            };
            if !game.engine.set_direction(toward) {
                let side = if head.y < food.cell.y {
                    Direction::South
                } else {
                    Direction::North
                };
                game.engine.set_direction(side);
            }
            game.advance(Instant::now());
        }
        panic!("snake never reached the food");
    }

    fn file_profile(path: &std::path::Path) -> Profile {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        Profile::load(Store::open(path.to_owned()).unwrap(), today)
    }

    #[test]
    fn record_survives_reset_and_quit() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("store.json");
        let mut game = Game::new(
            Tuning::default(),
            file_profile(&path),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        )
        .unwrap();
        press(&mut game, KeyCode::Char(' '));
        eat_food(&mut game);
        let record = game.engine.snapshot().high_score;
        assert!(record > 0);
        press(&mut game, KeyCode::Char('r'));
        assert_eq!(game.engine.phase(), Phase::Paused);
        assert_eq!(game.notice, Some(Notice::NewHighScore(record)));
        assert_eq!(file_profile(&path).high_score(), record);
        assert!(matches!(press(&mut game, KeyCode::Char('q')), Some(Screen::Quit)));
        assert_eq!(file_profile(&path).high_score(), record);
    }

    #[test]
    fn quit_saves_record_of_unfinished_game() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("store.json");
        let mut game = Game::new(
            Tuning::default(),
            file_profile(&path),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        )
        .unwrap();
        press(&mut game, KeyCode::Char(' '));
        eat_food(&mut game);
        let record = game.engine.snapshot().high_score;
        assert!(matches!(press(&mut game, KeyCode::Char('q')), Some(Screen::Quit)));
        assert_eq!(file_profile(&path).high_score(), record);
    }

    #[test]
    fn pausing_keeps_elapsed_time() {
        let mut game = new_game();
        press(&mut game, KeyCode::Char(' '));
        let effect = eat_food(&mut game).effect();
        let full = game.engine.snapshot().effects[effect].unwrap();
        game.last_update = Instant::now().checked_sub(Duration::from_secs(2));
        press(&mut game, KeyCode::Esc);
        assert_eq!(game.engine.phase(), Phase::Paused);
        let left = game.engine.snapshot().effects[effect].unwrap();
        assert!(left + Duration::from_secs(2) <= full);
    }

    #[test]
    fn quit_from_anywhere() {
        let mut game = new_game();
        assert!(matches!(press(&mut game, KeyCode::Char('q')), Some(Screen::Quit)));
        let mut game = new_game();
        press(&mut game, KeyCode::Char(' '));
        assert!(matches!(press(&mut game, KeyCode::Char('q')), Some(Screen::Quit)));
    }

    #[test]
    fn focus_lost_pauses() {
        let mut game = new_game();
        press(&mut game, KeyCode::Char(' '));
        assert!(game.handle_event(Event::FocusLost).is_none());
        assert_eq!(game.engine.phase(), Phase::Paused);
    }

    #[test]
    fn skin_keys_set_notice() {
        let mut game = new_game();
        press(&mut game, KeyCode::Tab);
        assert_eq!(game.notice, Some(Notice::SkinSelected(Skin::Default)));
        press(&mut game, KeyCode::Char('b'));
        assert!(matches!(game.notice, Some(Notice::SkinUnavailable(_))));
        press(&mut game, KeyCode::Char(' '));
        let buffer = render(&game);
        assert!(row_text(&buffer, 23).starts_with(" Cannot buy: the neon skin costs 1000 points"));
    }

    #[test]
    fn game_over_message() {
        let line = message_line(
            Phase::GameOver(GameOverCause::Collision(Collision::SelfBody)),
            false,
            None,
        );
        assert_eq!(
            line.to_string(),
            " GAME OVER: the snake bit its own tail.  Reset (r) · Quit (q)"
        );
        let line = message_line(Phase::GameOver(GameOverCause::GridFull), false, None);
        assert!(line.to_string().starts_with(" GAME OVER: the snake ran out of room."));
    }

    #[test]
    fn notice_shown_while_running() {
        let line = message_line(
            Phase::Running,
            false,
            Some(Notice::NewHighScore(120)),
        );
        assert_eq!(line.to_string(), " New high score: 120!");
        assert_eq!(message_line(Phase::Running, false, None).to_string(), "");
    }

    #[test]
    fn dotted_border() {
        let area = Rect::new(0, 0, 4, 3);
        let mut buffer = Buffer::empty(area);
        DottedBorder.render(area, &mut buffer);
        assert_eq!(buffer, Buffer::with_lines(["·⋯⋯·", "⋮  ⋮", "·⋯⋯·"]));
    }

    #[test]
    fn canvas_clips_to_area() {
        let area = Rect::new(0, 0, 6, 2);
        let mut buffer = Buffer::empty(area);
        let mut canvas = Canvas {
            area,
            buf: &mut buffer,
        };
        canvas.draw_cell(Cell::new(1, 1), 'x', Style::new());
        canvas.draw_cell(Cell::new(3, 0), 'y', Style::new());
        canvas.draw_cell(Cell::new(-1, 0), 'z', Style::new());
        assert_eq!(row_text(&buffer, 0), "");
        assert_eq!(row_text(&buffer, 1), "  x");
    }
}
