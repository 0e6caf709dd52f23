use ratatui::style::{Color, Style};

use crate::tui::input::InputMode;

/// Black & gold on pink
pub struct BoardTheme {
    pub gold: Color,
    pub gold_dim: Color,
    pub blush: Color,
    pub background: Color,
    pub text_primary: Color,
    pub text_dim: Color,
    pub unread: Color,
    pub success: Color,
    pub error: Color,
    pub mode_normal: Color,
    pub mode_insert: Color,
}

impl Default for BoardTheme {
    fn default() -> Self {
        Self {
            gold: Color::Rgb(255, 215, 0),           // #FFD700
            gold_dim: Color::Rgb(201, 176, 106),     // #C9B06A
            blush: Color::Rgb(252, 231, 243),        // #FCE7F3 - page pink
            background: Color::Rgb(11, 11, 11),      // #0B0B0B
            text_primary: Color::Rgb(247, 238, 199), // #F7EEC7
            text_dim: Color::Rgb(128, 128, 128),
            unread: Color::Rgb(254, 243, 231), // #FEF3E7
            success: Color::Green,
            error: Color::Red,
            mode_normal: Color::Rgb(255, 215, 0),
            mode_insert: Color::Green,
        }
    }
}

impl BoardTheme {
    /// Titles, borders and active elements
    pub fn primary_style(&self) -> Style {
        Style::default().fg(self.gold)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.gold_dim)
    }

    pub fn background_style(&self) -> Style {
        Style::default().bg(self.background)
    }

    pub fn text_primary_style(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn text_dim_style(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    /// Highlight for confessions nobody has read yet
    pub fn unread_style(&self) -> Style {
        Style::default().fg(self.unread)
    }

    /// The unread counter pill
    pub fn badge_style(&self) -> Style {
        Style::default().fg(Color::Black).bg(self.gold)
    }

    pub fn toast_style(&self, is_error: bool) -> Style {
        if is_error {
            Style::default().fg(Color::White).bg(self.error)
        } else {
            Style::default().fg(Color::Black).bg(self.gold)
        }
    }

    pub fn mode_style(&self, mode: InputMode) -> Style {
        let color = match mode {
            InputMode::Normal => self.mode_normal,
            InputMode::Insert => self.mode_insert,
        };
        Style::default().fg(color)
    }
}
