//! Notification reads and session reminders

use chrono::{DateTime, Duration, Utc};
use skillswap_domain::{
    DomainError, DomainResult, LifecycleEvent, Notification, NotificationId, UserId,
};
use tracing::info;

use crate::marketplace::Marketplace;

impl Marketplace {
    /// A user's notifications, newest first
    pub fn notifications_for(&self, user: UserId) -> DomainResult<Vec<Notification>> {
        Ok(self.repos.notifications.find_for_user(user)?)
    }

    pub fn unread_count(&self, user: UserId) -> DomainResult<usize> {
        Ok(self.repos.notifications.count_unread(user)?)
    }

    pub fn mark_notification_read(&mut self, actor: UserId, id: NotificationId) -> DomainResult<Notification> {
        let mut notification = self
            .repos
            .notifications
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found("Notification", id))?;
        notification.mark_read(actor)?;
        self.repos.notifications.update(&notification)?;
        Ok(notification)
    }

    /// Returns how many notifications changed
    pub fn mark_all_read(&mut self, user: UserId) -> DomainResult<usize> {
        let mut changed = 0;
        for mut notification in self.repos.notifications.find_for_user(user)? {
            if notification.is_read() {
                continue;
            }
            notification.mark_read(user)?;
            self.repos.notifications.update(&notification)?;
            changed += 1;
        }
        Ok(changed)
    }

    /// Remind both participants of scheduled sessions starting soon
    ///
    /// A session is due when it starts after `now` and no later than the
    /// configured lead time. Each participant gets at most one reminder per
    /// session, however often this runs.
    pub fn emit_session_reminders(&mut self, now: DateTime<Utc>) -> DomainResult<Vec<Notification>> {
        if !self.config.notifications.enabled {
            return Ok(Vec::new());
        }

        let minutes = self.config.notifications.reminder_lead_minutes;
        let lead = Duration::try_minutes(minutes)
            .filter(|lead| *lead > Duration::zero())
            .ok_or_else(|| {
                DomainError::validation(
                    "reminder_lead_minutes",
                    format!("{minutes} minutes is not a usable reminder lead."),
                )
            })?;
        let due: Vec<_> = self
            .repos
            .sessions
            .find_scheduled()?
            .into_iter()
            .filter(|s| s.starts_within(now, lead))
            .collect();

        let mut created = Vec::new();
        for session in &due {
            for recipient in session.participants() {
                if self.repos.notifications.has_session_reminder(recipient, session.id())? {
                    continue;
                }
                created.extend(self.record(LifecycleEvent::SessionReminder { session, recipient })?);
            }
        }

        if !created.is_empty() {
            info!(sessions = due.len(), reminders = created.len(), "session reminders emitted");
        }
        Ok(created)
    }
}
