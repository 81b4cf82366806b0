use std::time::Duration;

use serde::Serialize;

use crate::core::{ActivePiece, Cell, PieceKind, PieceRotation, PieceShape, PieceSnapshot};

use super::{GameSession, SessionState};

/// Read-only projection of a [`GameSession`] for rendering and reporting.
///
/// `board` holds the settled cells with the active piece merged in; active
/// cells above the top edge are left out. `ghost` is where the active piece
/// would land if dropped straight down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub width: u16,
    pub height: u16,
    pub board: Vec<Vec<Cell>>,
    pub active: Option<PieceSnapshot>,
    pub ghost: Option<PieceSnapshot>,
    pub next: Option<PieceKind>,
    pub score: usize,
    pub level: usize,
    pub lines: usize,
    pub completed_pieces: usize,
    pub line_cleared_counter: [usize; 5],
    pub play_time: Duration,
}

impl SessionSnapshot {
    pub(crate) fn capture(session: &GameSession) -> Self {
        let board = session.board();
        let mut cells: Vec<Vec<Cell>> = board
            .rows()
            .map(|row| row.cells().to_vec())
            .collect();

        let active = session.active_piece();
        if let Some(piece) = active {
            for (col, row) in piece.occupied_cells() {
                let (Ok(col), Ok(row)) = (usize::try_from(col), usize::try_from(row)) else {
                    continue;
                };
                if let Some(cell) = cells.get_mut(row).and_then(|r| r.get_mut(col)) {
                    *cell = Cell::Piece(piece.kind());
                }
            }
        }

        let stats = session.stats();
        Self {
            state: session.state(),
            width: board.width(),
            height: board.height(),
            board: cells,
            active: active.map(ActivePiece::snapshot),
            ghost: active.map(|piece| piece.drop_position(board).snapshot()),
            next: session.next_piece(),
            score: stats.score(),
            level: stats.level(),
            lines: stats.total_cleared_lines(),
            completed_pieces: stats.completed_pieces(),
            line_cleared_counter: *stats.line_cleared_counter(),
            play_time: session.play_time(),
        }
    }

    /// Spawn-orientation bitmap of the next piece.
    #[must_use]
    pub fn next_preview(&self) -> Option<&'static PieceShape> {
        self.next.map(|kind| kind.shape(PieceRotation::SPAWN))
    }

    /// Returns the merged cell at (`col`, `row`), or `None` when out of bounds.
    #[must_use]
    pub fn cell(&self, col: usize, row: usize) -> Option<Cell> {
        self.board.get(row)?.get(col).copied()
    }
}
