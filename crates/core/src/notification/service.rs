//! Notification creation service.

use std::sync::Arc;

use tracing::debug;

use savium_shared::types::UserId;
use savium_shared::AppResult;

use super::repository::NotificationRepository;
use super::types::{NewNotification, Notification, NotificationDraft};

/// Thin service over the notification port with multi-recipient fan-out.
pub struct NotificationService {
    notifications: Arc<dyn NotificationRepository>,
}

impl NotificationService {
    /// Creates a new service over the notification port.
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    /// Creates a single notification record.
    pub async fn notify(&self, notification: NewNotification) -> AppResult<Notification> {
        let stored = self.notifications.create(notification).await?;
        debug!(
            notification_id = %stored.id,
            user_id = %stored.user_id,
            category = ?stored.category,
            "notification created"
        );
        Ok(stored)
    }

    /// Fans a draft out to every recipient. Returns the number created.
    pub async fn notify_all(
        &self,
        recipients: &[UserId],
        draft: &NotificationDraft,
    ) -> AppResult<usize> {
        for user_id in recipients {
            self.notify(draft.for_user(*user_id)).await?;
        }
        Ok(recipients.len())
    }
}
