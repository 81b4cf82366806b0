use blockfall_engine::SessionState;
use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

pub type KeyBinding<'a> = (&'a [&'a str], &'a str);

const RUNNING_BINDINGS: &[KeyBinding] = &[
    (&["←", "h", "a"], "Left"),
    (&["→", "l", "d"], "Right"),
    (&["↓", "j", "s"], "Drop"),
    (&["↑", "k", "w", "Space"], "Rotate"),
    (&["p"], "Pause"),
    (&["r"], "Reset"),
    (&["q"], "Quit"),
];
const PAUSED_BINDINGS: &[KeyBinding] = &[(&["p"], "Resume"), (&["r"], "Reset"), (&["q"], "Quit")];
const STOPPED_BINDINGS: &[KeyBinding] = &[(&["Enter"], "Start"), (&["q"], "Quit")];

/// Help line listing the keys that do something in the current state.
#[derive(Debug)]
pub struct KeyBindingDisplay<'a> {
    bindings: &'a [KeyBinding<'a>],
}

impl<'a> KeyBindingDisplay<'a> {
    pub fn new(bindings: &'a [KeyBinding<'a>]) -> Self {
        Self { bindings }
    }

    pub fn for_state(state: SessionState) -> Self {
        match state {
            SessionState::Running => Self::new(RUNNING_BINDINGS),
            SessionState::Paused => Self::new(PAUSED_BINDINGS),
            SessionState::Idle | SessionState::GameOver => Self::new(STOPPED_BINDINGS),
        }
    }
}

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const KEY_SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);
const DESCRIPTION_STYLE: Style = Style::new().fg(Color::White);
const ITEM_SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);

impl Widget for KeyBindingDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let mut spans = vec![];

        for (i, (keys, desc)) in self.bindings.iter().copied().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", ITEM_SEPARATOR_STYLE));
            }
            for (i, key) in keys.iter().copied().enumerate() {
                if i > 0 {
                    spans.push(Span::styled("/", KEY_SEPARATOR_STYLE));
                }
                spans.push(Span::styled(key, KEY_STYLE));
            }
            spans.push(Span::from(" "));
            spans.push(Span::styled(desc, DESCRIPTION_STYLE));
        }

        Line::from(spans).centered().render(area, buf);
    }
}
