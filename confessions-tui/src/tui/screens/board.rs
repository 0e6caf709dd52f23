use ratatui::prelude::*;
use ratatui::widgets::*;
use crate::tui::app::{App, Screen};
use crate::tui::input::InputMode;
use crate::tui::theme::BoardTheme;

pub fn render(frame: &mut Frame, theme: &BoardTheme, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(area);

    render_compose(frame, theme, app, columns[0]);
    render_admin_box(frame, theme, app, columns[1]);
}

fn render_compose(frame: &mut Frame, theme: &BoardTheme, app: &App, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Heading
            Constraint::Min(5),    // Editor
            Constraint::Length(3), // Tips
        ])
        .split(area);

    let heading = Paragraph::new(vec![
        Line::from(Span::styled("Share a secret", theme.primary_style().bold())),
        Line::from(Span::styled("Your confession is fully anonymous.", theme.accent_style())),
    ]);
    frame.render_widget(heading, layout[0]);

    let editing = app.screen() == Screen::Board && app.input_mode == InputMode::Insert;
    let body = if app.draft.is_empty() {
        Text::from(Span::styled("Type your confession...", theme.accent_style()))
    } else {
        let mut text = Text::styled(app.draft.clone(), theme.text_primary_style());
        if editing {
            text.push_span(Span::styled("▏", theme.primary_style()));
        }
        text
    };

    let border_style = if editing {
        theme.primary_style().bold()
    } else {
        theme.accent_style()
    };
    let editor = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .style(theme.background_style())
        .block(
            Block::default()
                .title(Span::styled(" Confession ", theme.primary_style()))
                .title_bottom(Line::from(" [Enter] Send  [c] Clear ").right_aligned())
                .borders(Borders::ALL)
                .border_style(border_style),
        );
    frame.render_widget(editor, layout[1]);

    let tips = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[2]);
    for (tip, area) in [
        "Tip: Keep confessions short & clear.",
        "You may submit multiple confessions anonymously.",
    ]
    .into_iter()
    .zip(tips.iter())
    {
        let widget = Paragraph::new(tip)
            .style(theme.text_dim_style())
            .block(Block::default().borders(Borders::ALL).border_style(theme.text_dim_style()));
        frame.render_widget(widget, *area);
    }
}

fn render_admin_box(frame: &mut Frame, theme: &BoardTheme, app: &App, area: Rect) {
    let (status, action) = if app.service.is_logged_in() {
        (
            Span::styled("Admin is Logged In!", Style::default().fg(theme.success).bold()),
            "[a] Open Admin Panel",
        )
    } else {
        (
            Span::styled("Admin access required.", theme.accent_style()),
            "[a] Sign in",
        )
    };

    let text = vec![
        Line::from(status),
        Line::from(""),
        Line::from(Span::styled(action, theme.primary_style())),
    ];

    let widget = Paragraph::new(text)
        .style(theme.background_style())
        .block(
            Block::default()
                .title(Span::styled(" Admin ", theme.primary_style().bold()))
                .borders(Borders::ALL)
                .border_style(theme.accent_style()),
        );
    frame.render_widget(widget, area);
}
