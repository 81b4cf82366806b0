use serde::Serialize;

use crate::PieceCollisionError;

use super::{
    board::Board,
    piece::{PieceKind, PieceRotation, PieceShape},
};

/// Immutable view of an [`ActivePiece`], handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub rotation: PieceRotation,
    pub column: i32,
    pub row: i32,
    #[serde(skip)]
    pub shape: &'static PieceShape,
}

impl PieceSnapshot {
    /// Absolute `(col, row)` positions of the occupied cells.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let (column, row) = (self.column, self.row);
        self.shape
            .occupied_cells()
            .map(move |(dx, dy)| (column + dx, row + dy))
    }
}

/// The piece currently under player control.
///
/// The origin is the top-left corner of the rotation bitmap and uses signed
/// coordinates, so part of the bitmap may sit above the board. Every mutation
/// validates the new placement against the board first and leaves the piece
/// untouched when the placement is rejected.
///
/// # Example
///
/// ```
/// use blockfall_engine::{ActivePiece, Board, PieceKind};
///
/// let board = Board::default();
/// let mut piece = ActivePiece::spawn(PieceKind::T, &board)?;
/// assert_eq!((piece.column(), piece.row()), (5, 0));
///
/// piece.try_move(&board, -1, 0)?;
/// piece.try_rotate(&board)?;
/// assert_eq!(piece.column(), 4);
/// # Ok::<(), blockfall_engine::PieceCollisionError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    kind: PieceKind,
    rotation: PieceRotation,
    column: i32,
    row: i32,
}

impl ActivePiece {
    /// Places a new piece of `kind` at the spawn origin.
    ///
    /// The spawn origin is column `width / 2 - 2`, row 0, rotation 0. Fails
    /// when that placement collides, which the session treats as game over.
    pub fn spawn(kind: PieceKind, board: &Board) -> Result<Self, PieceCollisionError> {
        let piece = Self {
            kind,
            rotation: PieceRotation::SPAWN,
            column: i32::from(board.width() / 2) - 2,
            row: 0,
        };
        if piece.fits(board) {
            Ok(piece)
        } else {
            Err(PieceCollisionError)
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    #[must_use]
    pub const fn shape(&self) -> &'static PieceShape {
        self.kind.shape(self.rotation)
    }

    fn fits(&self, board: &Board) -> bool {
        board.can_place(self.shape(), self.column, self.row)
    }

    /// Shifts the piece by (`d_col`, `d_row`) if the target placement is legal.
    pub fn try_move(
        &mut self,
        board: &Board,
        d_col: i32,
        d_row: i32,
    ) -> Result<(), PieceCollisionError> {
        let moved = Self {
            column: self.column + d_col,
            row: self.row + d_row,
            ..*self
        };
        if !moved.fits(board) {
            return Err(PieceCollisionError);
        }
        *self = moved;
        Ok(())
    }

    /// Advances to the next rotation state in place, without kicks.
    pub fn try_rotate(&mut self, board: &Board) -> Result<(), PieceCollisionError> {
        let rotated = Self {
            rotation: self.rotation.next_for(self.kind),
            ..*self
        };
        if !rotated.fits(board) {
            return Err(PieceCollisionError);
        }
        *self = rotated;
        Ok(())
    }

    /// Returns the position this piece would land at if dropped straight down.
    #[must_use]
    pub fn drop_position(&self, board: &Board) -> Self {
        let mut landed = *self;
        while landed.try_move(board, 0, 1).is_ok() {}
        landed
    }

    /// Writes the piece into `board`, dropping cells above the top edge.
    pub fn freeze_into(&self, board: &mut Board) {
        board.freeze(self.shape(), self.kind, self.column, self.row);
    }

    /// Absolute `(col, row)` positions of the occupied cells.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let (column, row) = (self.column, self.row);
        self.shape()
            .occupied_cells()
            .map(move |(dx, dy)| (column + dx, row + dy))
    }

    #[must_use]
    pub fn snapshot(&self) -> PieceSnapshot {
        PieceSnapshot {
            kind: self.kind,
            rotation: self.rotation,
            column: self.column,
            row: self.row,
            shape: self.shape(),
        }
    }
}
