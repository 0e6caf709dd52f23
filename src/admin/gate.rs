use serde::Serialize;

/// Admin session state. Never persisted; every run starts logged out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn,
}

/// Decides what the presentation may expose.
///
/// Also tracks whether the admin panel surface is open: it is closed on a
/// successful sign-in and on logout, matching the board's behaviour of
/// dropping back to the public view after either transition.
#[derive(Debug, Default)]
pub struct VisibilityGate {
    state: SessionState,
    panel_open: bool,
}

impl VisibilityGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_logged_in(&self) -> bool {
        self.state == SessionState::LoggedIn
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn open_panel(&mut self) {
        self.panel_open = true;
    }

    pub fn close_panel(&mut self) {
        self.panel_open = false;
    }

    /// Apply the outcome of a credential check. A failed check leaves the
    /// state untouched.
    pub fn admit(&mut self, verified: bool) -> SessionState {
        if verified {
            self.state = SessionState::LoggedIn;
            self.panel_open = false;
        }
        self.state
    }

    /// Returns true if a session was actually ended.
    pub fn logout(&mut self) -> bool {
        let was_logged_in = self.is_logged_in();
        self.state = SessionState::LoggedOut;
        self.panel_open = false;
        was_logged_in
    }

    /// `items` while an admin is signed in, nothing otherwise.
    pub fn reveal<'a, T>(&self, items: &'a [T]) -> Option<&'a [T]> {
        self.is_logged_in().then_some(items)
    }
}
