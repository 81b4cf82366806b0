use std::fmt;

use serde::{Deserialize, Serialize};

use super::piece::{PieceKind, PieceShape};

/// Default board width in columns.
pub const DEFAULT_BOARD_WIDTH: u16 = 15;
/// Default board height in rows.
pub const DEFAULT_BOARD_HEIGHT: u16 = 25;

/// A single settled cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum Cell {
    /// No settled block.
    #[default]
    Empty,
    /// Settled block left behind by a piece of the given kind.
    Piece(PieceKind),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[must_use]
    pub fn piece(self) -> Option<PieceKind> {
        match self {
            Cell::Empty => None,
            Cell::Piece(kind) => Some(kind),
        }
    }

    /// Character used by the plain-text board dump (`.` for empty cells).
    #[must_use]
    pub fn as_char(self) -> char {
        self.piece().map_or('.', PieceKind::as_char)
    }
}

/// A single row of settled cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRow {
    cells: Box<[Cell]>,
}

impl BoardRow {
    fn empty(width: usize) -> Self {
        Self {
            cells: vec![Cell::Empty; width].into_boxed_slice(),
        }
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Checks if every cell in the row is occupied.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }
}

/// Grid of settled cells.
///
/// Rows are ordered top to bottom and columns left to right, so `(0, 0)` is
/// the top-left cell. Piece origins use signed coordinates: a piece may hang
/// above the top edge (negative rows) while it spawns, but never past the
/// side walls or the floor.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, PieceKind, PieceRotation};
///
/// let mut board = Board::default();
/// let shape = PieceKind::O.shape(PieceRotation::SPAWN);
///
/// assert!(board.can_place(shape, 0, 23));
/// board.freeze(shape, PieceKind::O, 0, 23);
/// assert!(!board.is_empty_cell(0, 24));
/// assert!(!board.can_place(shape, 0, 22));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u16,
    height: u16,
    rows: Vec<BoardRow>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT)
    }
}

impl Board {
    /// Creates an empty board with the given dimensions.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0 && height > 0, "board dimensions must be non-zero");
        let rows = (0..height)
            .map(|_| BoardRow::empty(usize::from(width)))
            .collect();
        Self {
            width,
            height,
            rows,
        }
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &BoardRow> + '_ {
        self.rows.iter()
    }

    fn index(&self, col: i32, row: i32) -> Option<(usize, usize)> {
        let col = usize::try_from(col)
            .ok()
            .filter(|&col| col < usize::from(self.width))?;
        let row = usize::try_from(row)
            .ok()
            .filter(|&row| row < usize::from(self.height))?;
        Some((col, row))
    }

    /// Returns the cell at (`col`, `row`), or `None` when out of bounds.
    #[must_use]
    pub fn cell(&self, col: i32, row: i32) -> Option<Cell> {
        self.index(col, row)
            .map(|(col, row)| self.rows[row].cells[col])
    }

    /// Returns `true` iff (`col`, `row`) is within bounds and holds no block.
    #[must_use]
    pub fn is_empty_cell(&self, col: i32, row: i32) -> bool {
        self.cell(col, row).is_some_and(Cell::is_empty)
    }

    /// Overwrites a single cell.
    ///
    /// Returns `false` (and leaves the board untouched) when out of bounds.
    pub fn fill_cell_at(&mut self, col: i32, row: i32, cell: Cell) -> bool {
        match self.index(col, row) {
            Some((col, row)) => {
                self.rows[row].cells[col] = cell;
                true
            }
            None => false,
        }
    }

    /// Checks whether `shape` can be placed with its origin at (`col`, `row`).
    ///
    /// Every occupied sub-cell must land inside the side walls and above the
    /// floor. Sub-cells above the top edge are accepted; sub-cells inside the
    /// board must land on empty cells.
    #[must_use]
    pub fn can_place(&self, shape: &PieceShape, col: i32, row: i32) -> bool {
        shape.occupied_cells().all(|(dx, dy)| {
            let (x, y) = (col + dx, row + dy);
            if x < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
                return false;
            }
            y < 0 || self.is_empty_cell(x, y)
        })
    }

    /// Writes `kind` into every occupied sub-cell of `shape` at (`col`, `row`).
    ///
    /// Sub-cells above the top edge are dropped.
    pub fn freeze(&mut self, shape: &PieceShape, kind: PieceKind, col: i32, row: i32) {
        for (dx, dy) in shape.occupied_cells() {
            // rows < 0 and anything out of bounds have no index
            self.fill_cell_at(col + dx, row + dy, Cell::Piece(kind));
        }
    }

    /// Checks if the row at `row` is completely filled.
    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows.get(row).is_some_and(BoardRow::is_filled)
    }

    /// Removes every full row and returns how many were removed.
    ///
    /// Rows are scanned bottom to top. A full row is spliced out and an empty
    /// row is inserted at the top; the same index is then examined again,
    /// since it now holds the row that used to sit above it.
    pub fn clear_full_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut row = self.rows.len();
        while row > 0 {
            if self.is_row_full(row - 1) {
                self.rows.remove(row - 1);
                self.rows.insert(0, BoardRow::empty(usize::from(self.width)));
                cleared += 1;
            } else {
                row -= 1;
            }
        }
        cleared
    }

    /// Empties every cell.
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.cells.fill(Cell::Empty);
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for cell in row.cells() {
                write!(f, "{}", cell.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
