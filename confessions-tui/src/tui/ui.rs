use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::tui::app::{App, Screen};
use crate::tui::input::InputMode;
use crate::tui::screens;
use crate::tui::theme::BoardTheme;

/// Render the current application state
pub fn render(frame: &mut Frame, app: &App) {
    let theme = BoardTheme::default();

    // Main layout: header, content, footer
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(frame, &theme, app, main_layout[0]);

    // The public board always sits underneath; the panel overlays it
    screens::render_board(frame, &theme, app, main_layout[1]);
    if app.screen() != Screen::Board {
        let panel_area = centered_rect(80, 80, main_layout[1]);
        screens::render_panel(frame, &theme, app, panel_area);
    }

    render_footer(frame, &theme, app, main_layout[2]);

    render_toast(frame, &theme, app, main_layout[1]);

    // Confirmation popup on top of everything
    if let Some(popup) = &app.popup {
        let area = centered_rect(50, 40, frame.area());
        popup.render(frame, &theme, area);
    }
}

fn render_header(frame: &mut Frame, theme: &BoardTheme, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(" ★ Campus Confessions ", theme.primary_style().bold()),
        Span::styled("│ Anonymous submissions, admin-only visibility ", theme.accent_style()),
        Span::styled("│ Unread ", theme.text_primary_style()),
        Span::styled(format!(" {} ", app.service.unread_count()), theme.badge_style().bold()),
    ];

    if app.service.is_logged_in() {
        spans.push(Span::styled("  Admin Logged In", Style::default().fg(theme.success).bold()));
    }
    if !app.service.is_persistent() {
        spans.push(Span::styled("  Not saved", Style::default().fg(theme.error).bold()));
    }

    let header = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.primary_style())
                .style(Style::default().bg(theme.blush).fg(Color::Black)),
        );

    frame.render_widget(header, area);
}

fn render_footer(frame: &mut Frame, theme: &BoardTheme, app: &App, area: Rect) {
    let mode_text = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Insert => "INSERT",
    };

    let screen_text = match app.screen() {
        Screen::Board => "BOARD",
        Screen::SignIn => "SIGN IN",
        Screen::Moderation => "ADMIN PANEL",
    };

    let help_text = match (app.screen(), app.input_mode) {
        (Screen::Board, InputMode::Insert) => "Enter: Send | Alt+Enter: Newline | Esc: Stop typing",
        (Screen::Board, InputMode::Normal) if app.service.is_logged_in() => {
            "i: Write | c: Clear | a: Open Admin Panel | L: Logout | q: Quit"
        }
        (Screen::Board, InputMode::Normal) => "i: Write | c: Clear | a: Sign in | q: Quit",
        (Screen::SignIn, InputMode::Insert) => "Tab: Next field | Enter: Sign in | Esc: Stop typing",
        (Screen::SignIn, InputMode::Normal) => "i: Type | j/k: Field | x: Reset | Esc: Close",
        (Screen::Moderation, _) => "j/k: Navigate | r: Read/Unread | d: Delete | L: Logout | Esc: Close",
    };

    let footer_line = Line::from(vec![
        Span::styled(format!(" {} ", mode_text), theme.mode_style(app.input_mode).bold()),
        Span::styled(" │ ", theme.text_dim_style()),
        Span::styled(screen_text, theme.text_primary_style()),
        Span::styled(" │ ", theme.text_dim_style()),
        Span::styled(help_text, theme.text_dim_style()),
    ]);

    let footer = Paragraph::new(footer_line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.primary_style()),
        );

    frame.render_widget(footer, area);
}

/// Bottom-right toast for the pending feedback notice
fn render_toast(frame: &mut Frame, theme: &BoardTheme, app: &App, content: Rect) {
    let Some(notice) = app.service.feedback() else {
        return;
    };

    let width = (notice.message.chars().count() as u16 + 4).min(content.width);
    let height = 3u16.min(content.height);
    let area = Rect {
        x: content.x + content.width.saturating_sub(width + 1),
        y: content.y + content.height.saturating_sub(height),
        width,
        height,
    };

    let toast = Paragraph::new(notice.message.as_str())
        .style(theme.toast_style(notice.is_error()))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(Clear, area);
    frame.render_widget(toast, area);
}

/// Helper to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
