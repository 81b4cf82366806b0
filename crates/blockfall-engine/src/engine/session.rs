use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    ConfigError, PieceCollisionError,
    core::{ActivePiece, Board, PieceKind},
};

use super::{
    SessionConfig, SessionSnapshot,
    fall_timer::FallTimer,
    game_stats::{GameStats, fall_interval},
    piece_generator::{PieceGenerator, PieceSeed},
};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, derive_more::IsVariant,
)]
pub enum SessionState {
    /// Created but not started yet.
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

/// Player command accepted while the session is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
}

impl Command {
    pub const ALL: [Command; 4] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDrop,
        Command::Rotate,
    ];
}

/// Result of a single fall tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickOutcome {
    /// The session was not running; nothing happened.
    Ignored,
    /// The active piece moved down one row.
    Moved,
    /// The active piece landed and a new one spawned.
    Landed { cleared_lines: usize, level_up: bool },
    /// The active piece landed and the next one could not spawn.
    GameOver { final_score: usize },
}

/// Result of a player [`Command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum CommandOutcome {
    /// The session was not running; nothing happened.
    Ignored,
    /// The move or rotation would collide and was not applied.
    Blocked,
    /// The move or rotation was applied.
    Applied,
    /// A soft drop ran one fall tick.
    Tick(TickOutcome),
}

/// A single game, from start to game over and across resets.
///
/// All transitions are synchronous methods on `&mut self`. Gravity is driven
/// by feeding elapsed time to [`GameSession::advance`], or by calling
/// [`GameSession::fall_tick`] directly.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::{Command, GameSession, SessionConfig, SessionState, TickOutcome};
///
/// let mut session = GameSession::new(SessionConfig::default())?;
/// session.start();
/// assert_eq!(session.state(), SessionState::Running);
///
/// session.apply(Command::MoveLeft);
/// assert_eq!(session.advance(Duration::from_millis(800)), Some(TickOutcome::Moved));
///
/// session.toggle_pause();
/// assert_eq!(session.advance(Duration::from_secs(1)), None);
/// # Ok::<(), blockfall_engine::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    board: Board,
    active: Option<ActivePiece>,
    next: Option<PieceKind>,
    stats: GameStats,
    state: SessionState,
    generator: PieceGenerator,
    fall_timer: FallTimer,
    play_time: Duration,
}

impl GameSession {
    /// Creates an idle session. Call [`Self::start`] to begin playing.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let generator = config
            .seed
            .map_or_else(PieceGenerator::new, PieceGenerator::with_seed);
        Ok(Self {
            config,
            board: config.new_board(),
            active: None,
            next: None,
            stats: GameStats::new(),
            state: SessionState::Idle,
            generator,
            fall_timer: FallTimer::new(),
            play_time: Duration::ZERO,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Seed of the piece sequence, including a randomly chosen one.
    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.generator.seed()
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active_piece(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn next_piece(&self) -> Option<PieceKind> {
        self.next
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn fall_timer(&self) -> &FallTimer {
        &self.fall_timer
    }

    /// Time spent in the running state since the last start.
    #[must_use]
    pub fn play_time(&self) -> Duration {
        self.play_time
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(self)
    }

    /// Starts a fresh game from `Idle` or `GameOver`; no-op otherwise.
    pub fn start(&mut self) {
        if !(self.state.is_idle() || self.state.is_game_over()) {
            return;
        }
        self.board.clear();
        self.stats = GameStats::new();
        self.play_time = Duration::ZERO;
        self.active = None;
        self.next = Some(self.generator.draw());
        self.state = SessionState::Running;
        log::info!(
            "session started: board={}x{} seed={}",
            self.config.width,
            self.config.height,
            self.generator.seed()
        );

        if self.spawn_next().is_err() {
            self.game_over();
            return;
        }
        self.fall_timer.arm(fall_interval(self.stats.level()));
    }

    /// Suspends a running game; no-op otherwise.
    pub fn pause(&mut self) {
        if !self.state.is_running() {
            return;
        }
        self.fall_timer.cancel();
        self.state = SessionState::Paused;
        log::info!("session paused");
    }

    /// Continues a paused game; no-op otherwise.
    pub fn resume(&mut self) {
        if !self.state.is_paused() {
            return;
        }
        self.state = SessionState::Running;
        self.fall_timer.arm(fall_interval(self.stats.level()));
        log::info!("session resumed");
    }

    pub fn toggle_pause(&mut self) {
        match self.state {
            SessionState::Running => self.pause(),
            SessionState::Paused => self.resume(),
            SessionState::Idle | SessionState::GameOver => {}
        }
    }

    /// Discards the current game and starts a new one.
    pub fn reset(&mut self) {
        self.fall_timer.cancel();
        self.state = SessionState::Idle;
        log::info!("session reset");
        self.start();
    }

    /// Feeds wall-clock time to the fall timer and runs the tick that
    /// becomes due, if any.
    ///
    /// Returns `None` when no tick ran, including whenever the session is
    /// not running.
    pub fn advance(&mut self, elapsed: Duration) -> Option<TickOutcome> {
        if !self.state.is_running() {
            return None;
        }
        self.play_time += elapsed;
        self.fall_timer.advance(elapsed);
        self.fall_timer.take_due().then(|| self.fall_tick())
    }

    /// One gravity step: move the active piece down, or land it.
    ///
    /// Landing freezes the piece, clears full lines, applies scoring and
    /// spawns the next piece. A spawn collision ends the game.
    pub fn fall_tick(&mut self) -> TickOutcome {
        if !self.state.is_running() {
            return TickOutcome::Ignored;
        }
        let Some(active) = self.active.as_mut() else {
            return TickOutcome::Ignored;
        };
        if active.try_move(&self.board, 0, 1).is_ok() {
            log::trace!("piece fell to row {}", active.row());
            return TickOutcome::Moved;
        }
        self.land()
    }

    /// Applies a player command. Ignored unless the session is running.
    pub fn apply(&mut self, command: Command) -> CommandOutcome {
        if !self.state.is_running() {
            return CommandOutcome::Ignored;
        }
        let d_col = match command {
            Command::SoftDrop => return CommandOutcome::Tick(self.fall_tick()),
            Command::MoveLeft => -1,
            Command::MoveRight => 1,
            Command::Rotate => 0,
        };
        let Some(active) = self.active.as_mut() else {
            return CommandOutcome::Ignored;
        };
        let result = if command == Command::Rotate {
            active.try_rotate(&self.board)
        } else {
            active.try_move(&self.board, d_col, 0)
        };
        match result {
            Ok(()) => CommandOutcome::Applied,
            Err(PieceCollisionError) => CommandOutcome::Blocked,
        }
    }

    fn land(&mut self) -> TickOutcome {
        let Some(piece) = self.active.take() else {
            return TickOutcome::Ignored;
        };
        piece.freeze_into(&mut self.board);
        let cleared_lines = self.board.clear_full_lines();
        let level_up = self.stats.complete_piece_drop(cleared_lines);
        log::debug!(
            "piece {:?} landed at ({}, {}), {cleared_lines} line(s) cleared, score {}",
            piece.kind(),
            piece.column(),
            piece.row(),
            self.stats.score()
        );
        if level_up {
            log::debug!("level up: {}", self.stats.level());
            self.fall_timer.reschedule(fall_interval(self.stats.level()));
        }

        if self.spawn_next().is_err() {
            return self.game_over();
        }
        TickOutcome::Landed {
            cleared_lines,
            level_up,
        }
    }

    /// Promotes `next` to the active piece and draws a new `next`.
    fn spawn_next(&mut self) -> Result<(), PieceCollisionError> {
        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.generator.draw(),
        };
        self.next = Some(self.generator.draw());
        self.active = Some(ActivePiece::spawn(kind, &self.board)?);
        Ok(())
    }

    fn game_over(&mut self) -> TickOutcome {
        let final_score = self.stats.score();
        self.active = None;
        self.fall_timer.cancel();
        self.state = SessionState::GameOver;
        log::info!(
            "game over: score={final_score} level={} lines={} pieces={}",
            self.stats.level(),
            self.stats.total_cleared_lines(),
            self.stats.completed_pieces()
        );
        TickOutcome::GameOver { final_score }
    }
}
