//! Transient user-facing notification slot.
//!
//! # Invariants
//! - The slot holds at most one message; posting replaces it.
//! - A message is visible from its post instant until `post + ttl`, no matter
//!   how many messages were posted before it.

use std::time::{Duration, Instant};

/// Default visibility window for a posted message.
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A message shown to the user until it expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub severity: Severity,
    expires_at: Instant,
}

impl Notification {
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Single-slot holder with one deadline.
#[derive(Debug, Clone)]
pub struct NotificationSlot {
    ttl: Duration,
    current: Option<Notification>,
}

impl NotificationSlot {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Replaces the slot content and restarts the deadline from `now`.
    pub fn post(&mut self, text: impl Into<String>, severity: Severity, now: Instant) {
        self.current = Some(Notification {
            text: text.into(),
            severity,
            expires_at: now + self.ttl,
        });
    }

    /// Returns the message still visible at `now`.
    pub fn visible_at(&self, now: Instant) -> Option<&Notification> {
        self.current
            .as_ref()
            .filter(|notification| !notification.is_expired_at(now))
    }

    /// Drops an expired message. Returns it when this call did the clearing.
    pub fn clear_expired(&mut self, now: Instant) -> Option<Notification> {
        if self.current.as_ref()?.is_expired_at(now) {
            return self.current.take();
        }
        None
    }
}

impl Default for NotificationSlot {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::{NotificationSlot, Severity};
    use std::time::{Duration, Instant};

    #[test]
    fn message_clears_after_ttl() {
        let start = Instant::now();
        let mut slot = NotificationSlot::new(Duration::from_secs(3));
        slot.post("Saved", Severity::Success, start);

        assert!(slot.visible_at(start + Duration::from_millis(2_999)).is_some());
        assert!(slot.visible_at(start + Duration::from_secs(3)).is_none());
    }

    #[test]
    fn newer_message_is_not_erased_by_older_deadline() {
        let start = Instant::now();
        let mut slot = NotificationSlot::new(Duration::from_secs(3));
        slot.post("first", Severity::Success, start);
        slot.post("second", Severity::Error, start + Duration::from_secs(2));

        // The first message's deadline has passed; the second must survive it.
        let after_first_deadline = start + Duration::from_millis(3_500);
        assert!(slot.clear_expired(after_first_deadline).is_none());
        let visible = slot.visible_at(after_first_deadline).unwrap();
        assert_eq!(visible.text, "second");
        assert_eq!(visible.severity, Severity::Error);

        let cleared = slot.clear_expired(start + Duration::from_secs(5)).unwrap();
        assert_eq!(cleared.text, "second");
        assert!(slot.clear_expired(start + Duration::from_secs(6)).is_none());
    }
}
