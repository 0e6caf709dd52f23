use ratatui::prelude::*;
use ratatui::widgets::*;
use crate::tui::theme::BoardTheme;

pub struct Popup {
    pub title: String,
    pub content: String,
    pub details: Vec<String>, // Extra lines (quoted confession, etc.)
    pub buttons: Vec<String>,
}

impl Popup {
    pub fn new(title: String, content: String) -> Self {
        Self {
            title,
            content,
            details: Vec::new(),
            buttons: vec!["OK".to_string()],
        }
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    pub fn with_buttons(mut self, buttons: Vec<String>) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn render(&self, frame: &mut Frame, theme: &BoardTheme, area: Rect) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.error))
            .style(theme.background_style());

        let mut lines = vec![
            Line::from(Span::styled(self.content.as_str(), theme.text_primary_style().bold())),
            Line::from(""),
        ];
        for detail in &self.details {
            lines.push(Line::from(Span::styled(detail.as_str(), theme.text_dim_style())));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            self.buttons.join("   "),
            theme.primary_style(),
        )));

        let body = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(body, area);
    }
}
