/// Одно временное уведомление об ошибке

use std::time::{Duration, Instant};

use crate::form::FormField;

/// Уведомление скрывается через 5 секунд
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    /// Поле, получившее фокус, если ошибка относится к полю
    pub field: Option<FormField>,
    raised_at: Instant,
}

impl Notification {
    pub fn new(message: impl Into<String>, field: Option<FormField>, now: Instant) -> Self {
        Self {
            message: message.into(),
            field,
            raised_at: now,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= NOTIFICATION_TTL
    }
}

/// На экране не больше одного уведомления: новое заменяет старое
#[derive(Debug, Default)]
pub struct NotificationSlot {
    current: Option<Notification>,
}

impl NotificationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&mut self, notification: Notification) {
        tracing::debug!(message = %notification.message, "notification raised");
        self.current = Some(notification);
    }

    /// Активное уведомление; просроченное удаляется
    pub fn active(&mut self, now: Instant) -> Option<&Notification> {
        if self.current.as_ref().map_or(false, |n| n.is_expired(now)) {
            self.current = None;
        }
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_ttl() {
        let start = Instant::now();
        let notification = Notification::new("boom", None, start);
        assert!(!notification.is_expired(start));
        assert!(!notification.is_expired(start + Duration::from_millis(4999)));
        assert!(notification.is_expired(start + NOTIFICATION_TTL));
    }

    #[test]
    fn newer_notification_replaces_older() {
        let start = Instant::now();
        let mut slot = NotificationSlot::new();
        slot.raise(Notification::new("first", None, start));
        slot.raise(Notification::new("second", Some(FormField::Tasks), start));

        let active = slot.active(start).unwrap();
        assert_eq!(active.message, "second");
        assert_eq!(active.field, Some(FormField::Tasks));
    }

    #[test]
    fn expired_notification_is_cleared() {
        let start = Instant::now();
        let mut slot = NotificationSlot::new();
        slot.raise(Notification::new("gone soon", None, start));
        assert!(slot.active(start + Duration::from_secs(6)).is_none());
        assert!(slot.active(start).is_none());
    }
}
