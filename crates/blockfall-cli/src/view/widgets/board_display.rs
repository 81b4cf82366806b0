use std::iter;

use blockfall_engine::{PieceSnapshot, SessionSnapshot};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::view::widgets::{BlockDisplay, Tile};

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    snapshot: &'a SessionSnapshot,
    ghost: Option<PieceSnapshot>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    /// Renders the settled cells with the active piece already merged in.
    pub fn new(snapshot: &'a SessionSnapshot) -> Self {
        Self {
            snapshot,
            ghost: None,
            block: None,
        }
    }

    pub fn ghost(self, ghost: Option<PieceSnapshot>) -> Self {
        Self { ghost, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        self.snapshot.width * BlockDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        self.snapshot.height * BlockDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }

    fn tiles(&self) -> Vec<Vec<Tile>> {
        let mut tiles: Vec<Vec<Tile>> = self
            .snapshot
            .board
            .iter()
            .map(|row| row.iter().copied().map(Tile::from).collect())
            .collect();
        let Some(ghost) = self.ghost else {
            return tiles;
        };
        for (col, row) in ghost.occupied_cells() {
            let (Ok(col), Ok(row)) = (usize::try_from(col), usize::try_from(row)) else {
                continue;
            };
            if let Some(tile) = tiles.get_mut(row).and_then(|r| r.get_mut(col))
                && *tile == Tile::Empty
            {
                *tile = Tile::Ghost;
            }
        }
        tiles
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..self.snapshot.width).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints =
            (0..self.snapshot.height).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.tiles()) {
            for (grid_cell, tile) in iter::zip(grid_row, row) {
                let block_display = BlockDisplay::from_tile(tile, true);
                block_display.render(grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{GameSession, SessionConfig};

    use super::*;

    fn snapshot() -> SessionSnapshot {
        let config = SessionConfig {
            width: 6,
            height: 8,
            seed: Some("0000000000000000000000000000beef".parse().unwrap()),
        };
        let mut session = GameSession::new(config).unwrap();
        session.start();
        session.snapshot()
    }

    #[test]
    fn test_size_follows_board() {
        let snapshot = snapshot();
        let display = BoardDisplay::new(&snapshot);
        assert_eq!((display.width(), display.height()), (12, 8));
        let display = display.block(BlockWidget::bordered());
        assert_eq!((display.width(), display.height()), (14, 10));
    }

    #[test]
    fn test_ghost_only_covers_empty_tiles() {
        let snapshot = snapshot();
        let display = BoardDisplay::new(&snapshot).ghost(snapshot.ghost);
        let tiles = display.tiles();

        let ghost_count = tiles.iter().flatten().filter(|t| **t == Tile::Ghost).count();
        let piece_count = tiles
            .iter()
            .flatten()
            .filter(|t| matches!(t, Tile::Piece(_)))
            .count();
        assert_eq!(piece_count, 4);
        assert!(ghost_count > 0 && ghost_count <= 4);
    }
}
