use std::time::{Duration, Instant};

/// Toast flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A message shown after a user action
#[derive(Clone, Debug)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub shown_at: Instant,
}

impl Notice {
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }

    pub fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= ttl
    }
}

/// Single-slot, self-expiring message holder.
///
/// A new message replaces the pending one and restarts its clock. Expiry is
/// applied by [`Feedback::expire`], which the UI calls on every tick.
#[derive(Debug)]
pub struct Feedback {
    slot: Option<Notice>,
    ttl: Duration,
}

impl Feedback {
    pub fn new(ttl: Duration) -> Self {
        Self { slot: None, ttl }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.set_at(NoticeKind::Success, message, Instant::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.set_at(NoticeKind::Error, message, Instant::now());
    }

    pub fn set_at(&mut self, kind: NoticeKind, message: impl Into<String>, now: Instant) {
        self.slot = Some(Notice {
            kind,
            message: message.into(),
            shown_at: now,
        });
    }

    /// The pending notice, if any
    pub fn current(&self) -> Option<&Notice> {
        self.slot.as_ref()
    }

    /// Clear the slot once its notice has been up for the full delay.
    /// Returns true if something was cleared.
    pub fn expire(&mut self, now: Instant) -> bool {
        match &self.slot {
            Some(notice) if notice.is_expired(self.ttl, now) => {
                self.slot = None;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_millis(3200);

    #[test]
    fn test_notice_expires_after_delay() {
        let start = Instant::now();
        let mut feedback = Feedback::new(TTL);
        feedback.set_at(NoticeKind::Success, "Confession submitted.", start);

        assert!(!feedback.expire(start + Duration::from_millis(3199)));
        assert_eq!(feedback.current().unwrap().message, "Confession submitted.");
        assert!(feedback.expire(start + TTL));
        assert!(feedback.current().is_none());
    }

    #[test]
    fn test_replacement_restarts_delay() {
        let start = Instant::now();
        let mut feedback = Feedback::new(TTL);
        feedback.set_at(NoticeKind::Success, "first", start);
        feedback.set_at(NoticeKind::Error, "second", start + Duration::from_secs(3));

        // The first message would have expired here; the second must not.
        assert!(!feedback.expire(start + Duration::from_millis(3300)));
        let notice = feedback.current().unwrap();
        assert_eq!(notice.message, "second");
        assert!(notice.is_error());

        assert!(feedback.expire(start + Duration::from_millis(6200)));
    }

    #[test]
    fn test_expire_on_empty_slot() {
        let mut feedback = Feedback::new(TTL);
        assert!(!feedback.expire(Instant::now()));
    }
}
