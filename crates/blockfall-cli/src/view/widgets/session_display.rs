use blockfall_engine::{SessionSnapshot, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::view::widgets::{
    BoardDisplay, PieceDisplay, SessionStatsDisplay, Tile, color, style,
};

/// Full game screen: stats on the left, board in the middle, next piece on
/// the right, and a popup over the board when the game is not running.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    snapshot: &'a SessionSnapshot,
    show_ghost: bool,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(snapshot: &'a SessionSnapshot, show_ghost: bool) -> Self {
        Self {
            snapshot,
            show_ghost,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    /// Height needed to show the whole board.
    pub fn height(&self) -> u16 {
        self.snapshot.height + 2
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = match self.snapshot.state {
            SessionState::Idle => color::GRAY,
            SessionState::Running => color::WHITE,
            SessionState::Paused => color::YELLOW,
            SessionState::GameOver => color::RED,
        };

        let game_board = {
            let widget = BoardDisplay::new(self.snapshot)
                .block(Block::bordered().border_style(border_style).style(style::DEFAULT));
            if self.show_ghost {
                widget.ghost(self.snapshot.ghost)
            } else {
                widget
            }
        };
        let next_panel = {
            let panel = PieceDisplay::new().block(
                Block::bordered()
                    .title(Line::from("NEXT").centered())
                    .padding(block_padding)
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
            match (self.snapshot.next, self.snapshot.next_preview()) {
                (Some(kind), Some(shape)) => panel.shape(shape, Tile::Piece(kind)),
                _ => panel,
            }
        };
        let session_stats = SessionStatsDisplay::new(self.snapshot).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(session_stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(session_stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let game_board_width = game_board.width();
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        let popup = match self.snapshot.state {
            SessionState::Running => None,
            SessionState::Idle => Some((
                "PRESS ENTER",
                Style::new().fg(color::BLACK).bg(color::WHITE),
            )),
            SessionState::Paused => {
                Some(("PAUSED", Style::new().fg(color::BLACK).bg(color::YELLOW)))
            }
            SessionState::GameOver => {
                Some(("GAME OVER!!", Style::new().fg(color::WHITE).bg(color::RED)))
            }
        };

        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{GameSession, SessionConfig};

    use super::*;

    fn render(snapshot: &SessionSnapshot) -> String {
        let area = Rect::new(0, 0, 80, 30);
        let mut buf = Buffer::empty(area);
        SessionDisplay::new(snapshot, true).render(area, &mut buf);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_popups_follow_state() {
        let mut session = GameSession::new(SessionConfig::default()).unwrap();
        assert!(render(&session.snapshot()).contains("PRESS ENTER"));

        session.start();
        let running = render(&session.snapshot());
        assert!(running.contains("SCORE:"));
        assert!(running.contains("NEXT"));
        assert!(!running.contains("PAUSED"));

        session.toggle_pause();
        assert!(render(&session.snapshot()).contains("PAUSED"));
    }
}
