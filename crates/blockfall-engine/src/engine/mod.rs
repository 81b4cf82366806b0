//! Game engine logic and state management.
//!
//! This module drives the core data structures through a game:
//!
//! - [`GameSession`] - State machine owning the board, the active piece and the fall timer
//! - [`GameStats`] - Score, level and line statistics
//! - [`PieceGenerator`] - Uniform, seedable source of upcoming pieces
//! - [`FallTimer`] - Clock-agnostic gravity trigger
//! - [`SessionSnapshot`] - Read-only projection handed to renderers
//! - [`SessionConfig`] - Board dimensions and seed
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] from a [`SessionConfig`] and call `start`
//! 2. Feed elapsed time through `advance`; each due tick moves the piece down
//! 3. Apply player [`Command`]s between ticks
//! 4. A piece that cannot move down lands, full lines are cleared and the
//!    next piece spawns
//! 5. The game ends when a new piece collides at its spawn position
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Command, GameSession, SessionConfig, SessionState, TickOutcome};
//!
//! let mut session = GameSession::new(SessionConfig::default())?;
//! session.start();
//!
//! while session.state().is_running() {
//!     session.apply(Command::Rotate);
//!     if let TickOutcome::GameOver { final_score } = session.fall_tick() {
//!         println!("Game over! score: {final_score}");
//!     }
//! }
//! assert_eq!(session.state(), SessionState::GameOver);
//! # Ok::<(), blockfall_engine::ConfigError>(())
//! ```

pub use self::{
    config::*, fall_timer::*, game_stats::*, piece_generator::*, session::*, snapshot::*,
};

mod config;
mod fall_timer;
mod game_stats;
mod piece_generator;
mod session;
mod snapshot;
