use chrono::Local;
use confessions::Confession;
use ratatui::prelude::*;
use ratatui::widgets::*;
use crate::tui::app::App;
use crate::tui::theme::BoardTheme;

pub fn render(frame: &mut Frame, theme: &BoardTheme, app: &App, area: Rect) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(" Admin Panel ", theme.primary_style().bold()))
        .title_bottom(Line::from(" Confessions visible only while signed in. ").centered())
        .borders(Borders::ALL)
        .border_style(theme.primary_style())
        .style(theme.background_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(33), Constraint::Percentage(67)])
        .split(inner);

    match app.service.visible_confessions() {
        None => {
            app.login_form.render(frame, theme, columns[0], " Admin sign-in ");
            let locked = Paragraph::new("Sign in to view confessions.")
                .style(theme.text_dim_style())
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(theme.text_dim_style()));
            frame.render_widget(locked, columns[1]);
        }
        Some(records) => {
            let welcome = Paragraph::new(vec![
                Line::from(Span::styled("Welcome, Admin", theme.primary_style().bold())),
                Line::from(""),
                Line::from(Span::styled(
                    "You can now review and moderate confessions.",
                    theme.text_primary_style(),
                )),
            ])
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).border_style(theme.accent_style()));
            frame.render_widget(welcome, columns[0]);

            render_list(frame, theme, app, records, columns[1]);
        }
    }
}

fn render_list(
    frame: &mut Frame,
    theme: &BoardTheme,
    app: &App,
    records: &[Confession],
    area: Rect,
) {
    let block = Block::default()
        .title(Span::styled(
            format!(" Confessions ({} unread) ", app.service.unread_count()),
            theme.primary_style(),
        ))
        .borders(Borders::ALL)
        .border_style(theme.primary_style());

    if records.is_empty() {
        let empty = Paragraph::new("No confessions yet.")
            .style(theme.text_dim_style())
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = records
        .iter()
        .map(|c| {
            let stamp = c.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S");
            let (badge, text_style) = if c.read {
                ("  read  ", theme.text_primary_style())
            } else {
                ("● unread", theme.unread_style().bold())
            };

            let mut lines = vec![Line::from(vec![
                Span::styled(format!("{} ", stamp), theme.text_dim_style()),
                Span::styled(badge, theme.accent_style()),
            ])];
            lines.extend(
                c.text
                    .lines()
                    .map(|l| Line::from(Span::styled(format!("  {}", l), text_style))),
            );
            lines.push(Line::from(""));
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(theme.gold).add_modifier(Modifier::REVERSED))
        .highlight_symbol("▸ ");

    let mut state = ListState::default().with_selected(Some(app.selected_index));
    frame.render_stateful_widget(list, area, &mut state);
}
