use chrono::NaiveDateTime;

use crate::errors::Result;
use crate::notifications::notifications_model::{NewNotification, Notification};
use async_trait::async_trait;

/// Trait for notification repository operations
#[async_trait]
pub trait NotificationRepositoryTrait: Send + Sync {
    /// Notifications for a user, newest first
    fn get_notifications(&self, user_id: &str) -> Result<Vec<Notification>>;

    fn count_unread(&self, user_id: &str) -> Result<i64>;

    /// Latest budget warning carrying `link` created at or after `since`
    fn find_budget_warning_since(
        &self,
        user_id: &str,
        link: &str,
        since: NaiveDateTime,
    ) -> Result<Option<Notification>>;

    async fn create_notification(&self, new_notification: NewNotification)
        -> Result<Notification>;

    /// Inserts a budget warning unless one with the same link already exists
    /// at or after `since`. The check and the insert run as one write, so
    /// concurrent callers cannot both insert. Returns `None` when suppressed.
    async fn create_budget_warning_if_absent(
        &self,
        new_notification: NewNotification,
        since: NaiveDateTime,
    ) -> Result<Option<Notification>>;

    async fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<usize>;

    async fn mark_all_read(&self, user_id: &str) -> Result<usize>;

    async fn delete_notification(&self, user_id: &str, notification_id: &str) -> Result<usize>;
}

/// Trait for notification service operations
#[async_trait]
pub trait NotificationServiceTrait: Send + Sync {
    fn get_notifications(&self, user_id: &str) -> Result<Vec<Notification>>;

    fn count_unread(&self, user_id: &str) -> Result<i64>;

    async fn create_system_notification(
        &self,
        user_id: &str,
        message: String,
        link: Option<String>,
    ) -> Result<Notification>;

    async fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<()>;

    async fn mark_all_read(&self, user_id: &str) -> Result<usize>;

    async fn delete_notification(&self, user_id: &str, notification_id: &str) -> Result<()>;
}
