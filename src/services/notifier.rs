//! Notifier: transient success/error messages that expire after a fixed duration.

use std::time::{Duration, Instant};

use tracing::{info, warn};
use uuid::Uuid;

use crate::types::notification::{Notification, NotificationKind};

/// How long a notification stays visible by default.
pub const DEFAULT_DISPLAY_DURATION: Duration = Duration::from_secs(3);

/// Queue of messages waiting to be shown or already on screen.
pub struct Notifier {
    display_duration: Duration,
    queue: Vec<Notification>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_DURATION)
    }
}

impl Notifier {
    pub fn new(display_duration: Duration) -> Self {
        Self {
            display_duration,
            queue: Vec::new(),
        }
    }

    pub fn success(&mut self, message: &str) -> Uuid {
        info!(message, "notify");
        self.push(NotificationKind::Success, message)
    }

    pub fn error(&mut self, message: &str) -> Uuid {
        warn!(message, "notify");
        self.push(NotificationKind::Error, message)
    }

    fn push(&mut self, kind: NotificationKind, message: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.queue.push(Notification {
            id,
            kind,
            message: message.to_string(),
            created_at: Instant::now(),
        });
        id
    }

    /// Notifications still within their display window, oldest first.
    pub fn active(&mut self) -> Vec<Notification> {
        self.active_at(Instant::now())
    }

    /// Same as [`Notifier::active`] evaluated at `now`; expired entries are dropped.
    pub fn active_at(&mut self, now: Instant) -> Vec<Notification> {
        let ttl = self.display_duration;
        self.queue
            .retain(|n| now.saturating_duration_since(n.created_at) < ttl);
        self.queue.clone()
    }

    /// Removes a notification before it expires. Returns false if it was not queued.
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.queue.len();
        self.queue.retain(|n| n.id != id);
        self.queue.len() != before
    }

    /// The most recently queued notification, expired or not.
    pub fn latest(&self) -> Option<&Notification> {
        self.queue.last()
    }

    pub fn display_duration(&self) -> Duration {
        self.display_duration
    }

    /// Changes how long notifications stay active, including ones already queued.
    pub fn set_display_duration(&mut self, duration: Duration) {
        self.display_duration = duration;
    }
}
