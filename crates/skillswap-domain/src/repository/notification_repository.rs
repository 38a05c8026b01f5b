//! Notification Repository - Inert per-user event records

use crate::model::ids::{NotificationId, SessionId, UserId};
use crate::model::notification::{Notification, NotificationKind};
use crate::repository::RepositoryError;

pub trait NotificationRepository {
    fn insert(&mut self, notification: Notification) -> Result<(), RepositoryError>;

    fn update(&mut self, notification: &Notification) -> Result<(), RepositoryError>;

    fn find_by_id(&self, id: NotificationId) -> Result<Option<Notification>, RepositoryError>;

    /// Notifications addressed to `user`, newest first
    fn find_for_user(&self, user: UserId) -> Result<Vec<Notification>, RepositoryError>;

    fn count_unread(&self, user: UserId) -> Result<usize, RepositoryError> {
        Ok(self
            .find_for_user(user)?
            .iter()
            .filter(|n| !n.is_read())
            .count())
    }

    /// Whether `user` was already reminded of `session`
    fn has_session_reminder(&self, user: UserId, session: SessionId) -> Result<bool, RepositoryError> {
        Ok(self
            .find_for_user(user)?
            .iter()
            .any(|n| n.kind() == NotificationKind::SessionReminder && n.session() == Some(session)))
    }
}
