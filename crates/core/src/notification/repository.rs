//! Notification repository port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use savium_shared::types::UserId;
use savium_shared::AppResult;

use super::types::{NewNotification, Notification, NotificationCategory};

/// Port for notification persistence.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Durably creates a notification record.
    async fn create(&self, notification: NewNotification) -> AppResult<Notification>;

    /// Lists a user's notifications of a category created at or after the
    /// given instant, newest first.
    async fn find_since(
        &self,
        user_id: UserId,
        category: NotificationCategory,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<Notification>>;

    /// Deletes notifications whose expiry has passed. Returns the number
    /// of rows removed.
    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;
}
