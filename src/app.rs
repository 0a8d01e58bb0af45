use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ratatui::layout::Rect;
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::game::{Game, PickOutcome, Player, ASCII_SYMBOLS, CARD_COUNT, EMOJI_SYMBOLS};

/// Board dimensions for rendering and cursor movement.
pub const BOARD_COLS: usize = 4;
pub const BOARD_ROWS: usize = CARD_COUNT / BOARD_COLS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
    GameOver,
}

pub struct App {
    pub game: Game,
    pub popup: Popup,

    // Board cursor (keyboard selection), 0..CARD_COUNT
    pub cursor: usize,

    // Config
    pub config: AppConfig,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,

    // Screen rects of the card cells, written on every draw so mouse
    // clicks can be mapped back to board positions
    pub card_areas: Vec<Rect>,

    // Mismatch hold: picks are ignored until this deadline passes
    flip_back_at: Option<Instant>,
    flip_back_delay: Duration,

    rng: ChaCha8Rng,
}

impl App {
    pub fn new(config: AppConfig, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let symbols = if config.ascii_symbols {
            &ASCII_SYMBOLS
        } else {
            &EMOJI_SYMBOLS
        };
        let game = Game::new(symbols, &mut rng);
        tracing::info!(seed, "new game started");

        let flip_back_delay = Duration::from_millis(config.flip_back_ms);
        let mut app = Self {
            game,
            popup: Popup::None,
            cursor: 0,
            config,
            status_message: None,
            status_message_time: None,
            card_areas: Vec::new(),
            flip_back_at: None,
            flip_back_delay,
            rng,
        };
        app.set_status(format!("{} starts", app.player_name(Player::One)));
        app
    }

    pub fn player_name(&self, player: Player) -> &str {
        match player {
            Player::One => &self.config.player_one,
            Player::Two => &self.config.player_two,
        }
    }

    /// Set a status message (auto-clears after 3 seconds)
    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Whether the mismatch hold is currently running.
    pub fn holding(&self) -> bool {
        self.flip_back_at.is_some()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.popup != Popup::None {
            return self.handle_popup_key(key);
        }
        self.handle_normal_key(key)
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            // Cursor movement, wrapping at board edges
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(1, 0),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(0, -1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(0, 1),

            // Flip the card under the cursor
            KeyCode::Char(' ') | KeyCode::Enter => self.pick(self.cursor),

            // Abandon the current game and reshuffle
            KeyCode::Char('n') => self.new_game(),

            KeyCode::Char('?') => self.popup = Popup::Help,

            _ => {}
        }
        Ok(())
    }

    fn handle_popup_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.popup {
            Popup::Help => {
                if matches!(
                    key.code,
                    KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter | KeyCode::Char('q')
                ) {
                    self.popup = Popup::None;
                }
            }
            Popup::GameOver => {
                // Acknowledging the result starts the next game
                if matches!(
                    key.code,
                    KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('n')
                ) {
                    self.new_game();
                }
            }
            Popup::None => {}
        }
        Ok(())
    }

    /// Mouse click at screen coordinates; the terminal analog of tapping
    /// a card.
    pub fn handle_click(&mut self, column: u16, row: u16) {
        if self.popup != Popup::None {
            return;
        }
        let hit = self
            .card_areas
            .iter()
            .position(|r| contains(r, column, row));
        if let Some(index) = hit {
            self.cursor = index;
            self.pick(index);
        }
    }

    fn move_cursor(&mut self, dx: isize, dy: isize) {
        let col = (self.cursor % BOARD_COLS) as isize;
        let row = (self.cursor / BOARD_COLS) as isize;
        let col = (col + dx).rem_euclid(BOARD_COLS as isize);
        let row = (row + dy).rem_euclid(BOARD_ROWS as isize);
        self.cursor = row as usize * BOARD_COLS + col as usize;
    }

    fn pick(&mut self, index: usize) {
        match self.game.pick(index) {
            PickOutcome::Ignored | PickOutcome::Flipped => {}
            PickOutcome::Matched => {
                let name = self.player_name(self.game.current_player()).to_string();
                tracing::info!(player = %name, "pair matched");
                self.set_status(format!("{} found a pair, go again", name));
            }
            PickOutcome::Mismatched => {
                self.flip_back_at = Some(Instant::now() + self.flip_back_delay);
                self.set_status("No match");
            }
            PickOutcome::Won => {
                let winner = self.game.winner();
                tracing::info!(winner = ?winner, "game over");
                self.popup = Popup::GameOver;
            }
        }
    }

    fn new_game(&mut self) {
        self.game.reset(&mut self.rng);
        self.popup = Popup::None;
        self.flip_back_at = None;
        tracing::info!("board reshuffled");
        self.set_status(format!("New game — {} starts", self.config.player_one));
    }

    pub fn tick(&mut self) {
        // Flip mismatched cards back once the hold elapses
        if let Some(at) = self.flip_back_at {
            if Instant::now() >= at {
                self.flip_back_at = None;
                self.game.resolve_mismatch();
                let name = self.player_name(self.game.current_player()).to_string();
                self.set_status(format!("{}'s turn", name));
            }
        }

        // Clear status message after 3 seconds
        if let Some(time) = self.status_message_time {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }
}

fn contains(r: &Rect, column: u16, row: u16) -> bool {
    column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
}
