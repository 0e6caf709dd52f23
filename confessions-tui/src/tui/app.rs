use std::time::Instant;

use confessions::store::SlotBackend;
use confessions::{ConfessionId, ConfessionsService};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::event::AppEvent;
use crate::tui::input::InputMode;
use crate::tui::widgets::{Form, Popup};

/// What currently receives keys, derived from the service state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    /// Public submission form
    Board,
    /// Admin panel while signed out
    SignIn,
    /// Admin panel while signed in
    Moderation,
}

const USERNAME_FIELD: &str = "Username";
const PASSWORD_FIELD: &str = "Password";

/// Main application state
pub struct App {
    pub service: ConfessionsService<SlotBackend>,
    pub input_mode: InputMode,
    pub should_quit: bool,

    /// Text being composed on the public form
    pub draft: String,
    pub login_form: Form,
    pub selected_index: usize,
    pub popup: Option<Popup>,
}

impl App {
    pub fn new(service: ConfessionsService<SlotBackend>) -> Self {
        let mut login_form = Form::new();
        login_form.add_field(USERNAME_FIELD, "Username");
        login_form.add_secret_field(PASSWORD_FIELD, "Password");

        Self {
            service,
            input_mode: InputMode::Normal,
            should_quit: false,
            draft: String::new(),
            login_form,
            selected_index: 0,
            popup: None,
        }
    }

    pub fn screen(&self) -> Screen {
        match (self.service.is_panel_open(), self.service.is_logged_in()) {
            (false, _) => Screen::Board,
            (true, false) => Screen::SignIn,
            (true, true) => Screen::Moderation,
        }
    }

    /// Handle application events. Returns false once the app should exit.
    pub fn handle_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::Quit => {
                self.should_quit = true;
                false
            }
            AppEvent::Key(key) => {
                // Ctrl-C always quits
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    self.should_quit = true;
                    return false;
                }
                if self.popup.is_some() {
                    self.handle_popup_key(key);
                    return true;
                }
                self.handle_key(key);
                !self.should_quit
            }
            AppEvent::Tick => {
                self.service.tick(Instant::now());
                true
            }
        }
    }

    fn handle_popup_key(&mut self, key: KeyEvent) {
        self.popup = None;
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                // Errors already surface through the toast.
                let _ = self.service.confirm_delete();
                self.clamp_selection();
            }
            _ => {
                self.service.cancel_delete();
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Insert => self.handle_insert_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match self.screen() {
            Screen::Board => match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('i') | KeyCode::Enter => self.input_mode = InputMode::Insert,
                KeyCode::Char('c') => self.draft.clear(),
                KeyCode::Char('a') => self.open_panel(),
                KeyCode::Char('L') if self.service.is_logged_in() => self.service.logout(),
                _ => {}
            },
            Screen::SignIn => match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Esc => self.service.close_panel(),
                KeyCode::Char('i') | KeyCode::Enter => self.input_mode = InputMode::Insert,
                KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => self.login_form.next_field(),
                KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => self.login_form.prev_field(),
                KeyCode::Char('x') => self.login_form.clear(),
                _ => {}
            },
            Screen::Moderation => match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Esc => self.service.close_panel(),
                KeyCode::Char('L') => self.service.logout(),
                KeyCode::Down | KeyCode::Char('j') => self.select_next(),
                KeyCode::Up | KeyCode::Char('k') => {
                    self.selected_index = self.selected_index.saturating_sub(1);
                }
                KeyCode::Char('r') | KeyCode::Char(' ') => self.toggle_selected(),
                KeyCode::Char('d') | KeyCode::Delete => self.request_delete_selected(),
                _ => {}
            },
        }
    }

    fn handle_insert_key(&mut self, key: KeyEvent) {
        match self.screen() {
            Screen::Board => match key.code {
                KeyCode::Esc => self.input_mode = InputMode::Normal,
                KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => self.draft.push('\n'),
                KeyCode::Enter => self.submit_draft(),
                KeyCode::Backspace => {
                    self.draft.pop();
                }
                KeyCode::Char(c) => self.draft.push(c),
                _ => {}
            },
            Screen::SignIn => match key.code {
                KeyCode::Esc => self.input_mode = InputMode::Normal,
                KeyCode::Tab => self.login_form.next_field(),
                KeyCode::BackTab => self.login_form.prev_field(),
                KeyCode::Enter => self.submit_login(),
                KeyCode::Backspace => self.login_form.delete_char(),
                KeyCode::Char(c) => self.login_form.input_char(c),
                _ => {}
            },
            // Nothing to type into while moderating
            Screen::Moderation => self.input_mode = InputMode::Normal,
        }
    }

    // --- Actions ---

    fn submit_draft(&mut self) {
        if self.service.submit(&self.draft).is_ok() {
            self.draft.clear();
            self.input_mode = InputMode::Normal;
        }
    }

    fn open_panel(&mut self) {
        self.input_mode = InputMode::Normal;
        self.selected_index = 0;
        self.service.open_panel();
    }

    fn submit_login(&mut self) {
        let username = self.login_form.get_value(USERNAME_FIELD).trim().to_string();
        let password = self.login_form.get_value(PASSWORD_FIELD).to_string();
        if self.service.login(&username, &password).is_ok() {
            self.login_form.clear();
            self.input_mode = InputMode::Normal;
            self.selected_index = 0;
        }
    }

    fn selected_id(&self) -> Option<ConfessionId> {
        self.service
            .visible_confessions()
            .and_then(|list| list.get(self.selected_index))
            .map(|c| c.id.clone())
    }

    fn select_next(&mut self) {
        let len = self.service.visible_confessions().map_or(0, |l| l.len());
        if self.selected_index + 1 < len {
            self.selected_index += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.service.visible_confessions().map_or(0, |l| l.len());
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }

    fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            let _ = self.service.toggle_read(&id);
        }
    }

    fn request_delete_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if !matches!(self.service.request_delete(&id), Ok(true)) {
            return;
        }
        let preview = self
            .service
            .pending_delete()
            .map(|c| preview_line(&c.text))
            .unwrap_or_default();

        let popup = Popup::new(
            "Delete".to_string(),
            "Delete this confession permanently?".to_string(),
        )
        .with_details(vec![preview])
        .with_buttons(vec!["[y] Delete".to_string(), "[n] Cancel".to_string()]);
        self.popup = Some(popup);
    }
}

/// First line of a confession, shortened for the confirmation popup
fn preview_line(text: &str) -> String {
    let first = text.lines().next().unwrap_or("");
    if first.chars().count() > 60 {
        let cut: String = first.chars().take(57).collect();
        format!("\"{}...\"", cut)
    } else {
        format!("\"{}\"", first)
    }
}
