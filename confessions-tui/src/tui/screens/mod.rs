use ratatui::prelude::*;
use crate::tui::app::App;
use crate::tui::theme::BoardTheme;

mod board;
mod panel;

pub fn render_board(frame: &mut Frame, theme: &BoardTheme, app: &App, area: Rect) {
    board::render(frame, theme, app, area);
}

pub fn render_panel(frame: &mut Frame, theme: &BoardTheme, app: &App, area: Rect) {
    panel::render(frame, theme, app, area);
}
