//! Notification data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use savium_shared::types::{NotificationId, UserId};

/// Category of a notification, used for grouping and lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    /// Periodic saving-plan advice for a goal.
    GoalAdvice,
    /// A goal is at risk of missing its deadline.
    GoalRisk,
    /// No recent contributions toward a goal.
    GoalInactivity,
    /// A daily recommendation was generated.
    Recommendation,
}

/// A durable notification record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Notification ID.
    pub id: NotificationId,
    /// Recipient.
    pub user_id: UserId,
    /// Short title.
    pub title: String,
    /// Optional subtitle (e.g. the strategy label).
    pub subtitle: Option<String>,
    /// Message body.
    pub body: String,
    /// Category.
    pub category: NotificationCategory,
    /// Whether an email should also be sent by the delivery layer.
    pub send_email: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional expiry after which the record may be cleaned up.
    pub expires_at: Option<DateTime<Utc>>,
}

/// Input for creating a notification for a specific user.
#[derive(Debug, Clone)]
pub struct NewNotification {
    /// Recipient.
    pub user_id: UserId,
    /// Short title.
    pub title: String,
    /// Optional subtitle.
    pub subtitle: Option<String>,
    /// Message body.
    pub body: String,
    /// Category.
    pub category: NotificationCategory,
    /// Whether an email should also be sent.
    pub send_email: bool,
    /// Optional expiry.
    pub expires_at: Option<DateTime<Utc>>,
}

/// A notification without a recipient yet; fanned out to one or more users.
#[derive(Debug, Clone)]
pub struct NotificationDraft {
    /// Short title.
    pub title: String,
    /// Optional subtitle.
    pub subtitle: Option<String>,
    /// Message body.
    pub body: String,
    /// Category.
    pub category: NotificationCategory,
    /// Whether an email should also be sent.
    pub send_email: bool,
    /// Optional expiry.
    pub expires_at: Option<DateTime<Utc>>,
}

impl NotificationDraft {
    /// Addresses the draft to a recipient.
    #[must_use]
    pub fn for_user(&self, user_id: UserId) -> NewNotification {
        NewNotification {
            user_id,
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            body: self.body.clone(),
            category: self.category,
            send_email: self.send_email,
            expires_at: self.expires_at,
        }
    }
}
