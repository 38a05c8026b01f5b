use skillswap_domain::{
    Notification, NotificationId, NotificationKind, NotificationRepository, RepositoryError,
    SessionId, UserId,
};

use super::Table;

/// In-memory Notification Repository
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationRepository {
    notifications: Table<NotificationId, Notification>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NotificationRepository for InMemoryNotificationRepository {
    fn insert(&mut self, notification: Notification) -> Result<(), RepositoryError> {
        self.notifications
            .write()?
            .insert(notification.id(), notification);
        Ok(())
    }

    fn update(&mut self, notification: &Notification) -> Result<(), RepositoryError> {
        let mut notifications = self.notifications.write()?;
        if !notifications.replace(&notification.id(), notification.clone()) {
            return Err(RepositoryError::not_found("Notification", notification.id()));
        }
        Ok(())
    }

    fn find_by_id(&self, id: NotificationId) -> Result<Option<Notification>, RepositoryError> {
        Ok(self.notifications.read()?.get(&id).cloned())
    }

    fn find_for_user(&self, user: UserId) -> Result<Vec<Notification>, RepositoryError> {
        let mut rows = self.notifications.read()?.select(|n| n.recipient() == user);
        rows.reverse();
        rows.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(rows)
    }

    fn has_session_reminder(&self, user: UserId, session: SessionId) -> Result<bool, RepositoryError> {
        let notifications = self.notifications.read()?;
        let reminded = notifications.values().any(|n| {
            n.recipient() == user
                && n.kind() == NotificationKind::SessionReminder
                && n.session() == Some(session)
        });
        Ok(reminded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use skillswap_domain::NotificationDraft;

    fn draft(recipient: UserId, title: &str) -> NotificationDraft {
        NotificationDraft {
            recipient,
            kind: NotificationKind::RatingReceived,
            title: title.to_string(),
            message: String::new(),
            exchange_request: None,
            session: None,
            booking: None,
        }
    }

    #[test]
    fn test_newest_first_and_unread_count() {
        let mut repo = InMemoryNotificationRepository::new();
        let user = UserId::generate();
        let now = Utc::now();

        repo.insert(Notification::from_draft(draft(user, "old"), now - Duration::minutes(5)))
            .unwrap();
        // Same timestamp: later insert wins
        repo.insert(Notification::from_draft(draft(user, "a"), now)).unwrap();
        repo.insert(Notification::from_draft(draft(user, "b"), now)).unwrap();
        repo.insert(Notification::from_draft(draft(UserId::generate(), "other"), now))
            .unwrap();

        let titles: Vec<String> = repo
            .find_for_user(user)
            .unwrap()
            .iter()
            .map(|n| n.title().to_string())
            .collect();
        assert_eq!(titles, vec!["b", "a", "old"]);
        assert_eq!(repo.count_unread(user).unwrap(), 3);
    }

    #[test]
    fn test_update_marks_read() {
        let mut repo = InMemoryNotificationRepository::new();
        let user = UserId::generate();
        let mut notification = Notification::from_draft(draft(user, "hello"), Utc::now());
        repo.insert(notification.clone()).unwrap();

        notification.mark_read(user).unwrap();
        repo.update(&notification).unwrap();
        assert_eq!(repo.count_unread(user).unwrap(), 0);
    }

    #[test]
    fn test_session_reminder_lookup() {
        let mut repo = InMemoryNotificationRepository::new();
        let (alice, bob) = (UserId::generate(), UserId::generate());
        let (session, other) = (SessionId::generate(), SessionId::generate());

        let mut reminder = draft(alice, "Starting soon");
        reminder.kind = NotificationKind::SessionReminder;
        reminder.session = Some(session);
        repo.insert(Notification::from_draft(reminder, Utc::now())).unwrap();
        // Same session, different kind
        let mut scheduled = draft(bob, "Scheduled");
        scheduled.kind = NotificationKind::SessionScheduled;
        scheduled.session = Some(session);
        repo.insert(Notification::from_draft(scheduled, Utc::now())).unwrap();

        assert!(repo.has_session_reminder(alice, session).unwrap());
        assert!(!repo.has_session_reminder(alice, other).unwrap());
        assert!(!repo.has_session_reminder(bob, session).unwrap());
    }
}
