use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Base score values for line clears, multiplied by the current level.
///
/// Index corresponds to number of lines cleared simultaneously:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Clears of more than 4 lines (only possible on tall pieces that never
/// occur in the catalog) score as 4.
pub const SCORE_TABLE: [usize; 5] = [0, 40, 100, 300, 1200];

/// Level a new session starts at.
pub const INITIAL_LEVEL: usize = 1;

/// Highest reachable level.
pub const MAX_LEVEL: usize = 3;

/// Lines needed per level to advance: the threshold at level `n` is `n * 10`.
pub const LINES_PER_LEVEL: usize = 10;

/// Returns the gravity interval for `level`.
///
/// Levels outside `1..=MAX_LEVEL` are clamped.
#[must_use]
pub fn fall_interval(level: usize) -> Duration {
    match level.clamp(INITIAL_LEVEL, MAX_LEVEL) {
        1 => Duration::from_millis(800),
        2 => Duration::from_millis(500),
        _ => Duration::from_millis(300),
    }
}

/// Game statistics tracking score, level, lines cleared, and piece count.
///
/// Score and level only change through [`GameStats::complete_piece_drop`].
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// let level_up = stats.complete_piece_drop(4);
///
/// assert!(!level_up);
/// assert_eq!(stats.score(), 1200);
/// assert_eq!(stats.level(), 1);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameStats {
    score: usize,
    level: usize,
    lines_since_level_up: usize,
    total_cleared_lines: usize,
    completed_pieces: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new tracker at level 1 with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: INITIAL_LEVEL,
            lines_since_level_up: 0,
            total_cleared_lines: 0,
            completed_pieces: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Lines cleared since the last level change.
    #[must_use]
    pub const fn lines_since_level_up(&self) -> usize {
        self.lines_since_level_up
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Number of pieces frozen into the board.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    /// Returns a histogram of landings by lines cleared.
    ///
    /// Index 0 counts landings that cleared nothing; index 4 counts quads
    /// (and anything larger).
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Applies the scoring transition for one landing.
    ///
    /// Awards `SCORE_TABLE[lines] * level` at the level in effect before the
    /// landing, then raises the level once the lines accumulated since the
    /// last level change reach `level * 10` (up to [`MAX_LEVEL`]).
    ///
    /// Returns `true` when the level went up.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) -> bool {
        let bucket = cleared_lines.min(SCORE_TABLE.len() - 1);
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        self.line_cleared_counter[bucket] += 1;
        self.score += SCORE_TABLE[bucket] * self.level;

        self.lines_since_level_up += cleared_lines;
        if self.level < MAX_LEVEL && self.lines_since_level_up >= self.level * LINES_PER_LEVEL {
            self.level += 1;
            self.lines_since_level_up = 0;
            return true;
        }
        false
    }
}
