//! The board controller.
//!
//! [`ConfessionsService`] owns every piece of mutable state: the store, the
//! admin gate, the toast slot and a pending delete confirmation. The
//! presentation layer only talks to this type, one event at a time.

use std::time::{Duration, Instant};

use confessions_types::{Confession, ConfessionId};
use tracing::info;

use crate::admin::{Authenticator, CredentialCheck, SessionState, VisibilityGate};
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::feedback::{Feedback, Notice};
use crate::store::{ConfessionStore, SlotBackend, Storage};

pub struct ConfessionsService<S, A = CredentialCheck> {
    store: ConfessionStore<S>,
    auth: A,
    gate: VisibilityGate,
    feedback: Feedback,
    pending_delete: Option<ConfessionId>,
}

impl ConfessionsService<SlotBackend, CredentialCheck> {
    /// Build the service over the on-disk slot described by `config`. An
    /// unusable data directory leaves the board running in memory.
    ///
    /// The admin digest is not precomputed here; callers running inside a
    /// tokio runtime should kick off `authenticator().spawn_precompute()`.
    pub fn from_config(config: &AppConfig) -> Self {
        let storage = SlotBackend::open(config.data_dir());
        let store = ConfessionStore::load(storage, config.storage.slot_key.clone());
        let auth = CredentialCheck::new(
            config.admin.username.clone(),
            config.admin.password.clone(),
        );
        Self::new(store, auth, config.feedback.dismiss_after())
    }

    /// False when changes only live until the process exits.
    pub fn is_persistent(&self) -> bool {
        self.store.storage().is_persistent()
    }
}

impl<S: Storage, A: Authenticator> ConfessionsService<S, A> {
    pub fn new(store: ConfessionStore<S>, auth: A, feedback_ttl: Duration) -> Self {
        Self {
            store,
            auth,
            gate: VisibilityGate::new(),
            feedback: Feedback::new(feedback_ttl),
            pending_delete: None,
        }
    }

    // --- Public surface ---

    /// Submit a confession from the public form.
    pub fn submit(&mut self, text: &str) -> AppResult<ConfessionId> {
        match self.store.submit(text) {
            Ok(confession) => {
                let id = confession.id.clone();
                self.feedback.success("Confession submitted.");
                Ok(id)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Aggregate only; safe to show without a session.
    pub fn unread_count(&self) -> usize {
        self.store.unread_count()
    }

    pub fn confession_count(&self) -> usize {
        self.store.len()
    }

    // --- Session ---

    pub fn login(&mut self, username: &str, password: &str) -> AppResult<()> {
        if username.is_empty() || password.is_empty() {
            return Err(self.fail(AppError::MissingCredentials));
        }

        let verified = self.auth.verify(username, password);
        self.gate.admit(verified);
        if !verified {
            return Err(self.fail(AppError::InvalidCredentials));
        }

        info!("Admin signed in");
        self.feedback.success("Admin logged in successfully.");
        Ok(())
    }

    pub fn logout(&mut self) {
        if self.gate.logout() {
            info!("Admin signed out");
        }
        self.pending_delete = None;
        self.feedback.success("Admin logged out.");
    }

    pub fn session(&self) -> SessionState {
        self.gate.state()
    }

    pub fn is_logged_in(&self) -> bool {
        self.gate.is_logged_in()
    }

    pub fn open_panel(&mut self) {
        self.gate.open_panel();
    }

    pub fn close_panel(&mut self) {
        self.pending_delete = None;
        self.gate.close_panel();
    }

    pub fn is_panel_open(&self) -> bool {
        self.gate.is_panel_open()
    }

    // --- Moderation (admin only) ---

    /// Newest-first list, only while an admin is signed in.
    pub fn visible_confessions(&self) -> Option<&[Confession]> {
        self.gate.reveal(self.store.records())
    }

    /// Flip the read flag. `Ok(None)` when the id is unknown.
    pub fn toggle_read(&mut self, id: &ConfessionId) -> AppResult<Option<bool>> {
        self.require_admin()?;
        Ok(self.store.toggle_read(id))
    }

    /// First half of a delete: remember which record awaits confirmation.
    /// Returns false (and records nothing) for an unknown id.
    pub fn request_delete(&mut self, id: &ConfessionId) -> AppResult<bool> {
        self.require_admin()?;
        if self.store.get(id).is_none() {
            return Ok(false);
        }
        self.pending_delete = Some(id.clone());
        Ok(true)
    }

    /// The record awaiting confirmation, if any.
    pub fn pending_delete(&self) -> Option<&Confession> {
        if !self.gate.is_logged_in() {
            return None;
        }
        self.pending_delete.as_ref().and_then(|id| self.store.get(id))
    }

    /// Second half of a delete. Removes the pending record if it still exists.
    pub fn confirm_delete(&mut self) -> AppResult<Option<Confession>> {
        self.require_admin()?;
        let Some(id) = self.pending_delete.take() else {
            return Ok(None);
        };
        let removed = self.store.delete(&id);
        if removed.is_some() {
            self.feedback.success("Deleted.");
        }
        Ok(removed)
    }

    /// Drop the pending delete. Returns true if one was pending.
    pub fn cancel_delete(&mut self) -> bool {
        self.pending_delete.take().is_some()
    }

    // --- Feedback ---

    pub fn feedback(&self) -> Option<&Notice> {
        self.feedback.current()
    }

    /// Advance the toast clock; returns true if a notice was dismissed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.feedback.expire(now)
    }

    pub fn authenticator(&self) -> &A {
        &self.auth
    }

    fn require_admin(&mut self) -> AppResult<()> {
        if self.gate.is_logged_in() {
            Ok(())
        } else {
            Err(self.fail(AppError::AuthRequired))
        }
    }

    fn fail(&mut self, err: AppError) -> AppError {
        self.feedback.error(err.user_message());
        err
    }
}
