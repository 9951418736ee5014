use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::{Error, Result};
use crate::notifications::notifications_model::{
    NewNotification, Notification, NotificationType,
};
use crate::notifications::notifications_traits::{
    NotificationRepositoryTrait, NotificationServiceTrait,
};
use crate::utils::time_utils::local_now;

pub struct NotificationService {
    notification_repo: Arc<dyn NotificationRepositoryTrait>,
}

impl NotificationService {
    pub fn new(notification_repo: Arc<dyn NotificationRepositoryTrait>) -> Self {
        NotificationService { notification_repo }
    }
}

#[async_trait]
impl NotificationServiceTrait for NotificationService {
    fn get_notifications(&self, user_id: &str) -> Result<Vec<Notification>> {
        self.notification_repo.get_notifications(user_id)
    }

    fn count_unread(&self, user_id: &str) -> Result<i64> {
        self.notification_repo.count_unread(user_id)
    }

    async fn create_system_notification(
        &self,
        user_id: &str,
        message: String,
        link: Option<String>,
    ) -> Result<Notification> {
        if message.trim().is_empty() {
            return Err(Error::invalid_input("Notification message must not be empty"));
        }
        self.notification_repo
            .create_notification(NewNotification {
                id: None,
                user_id: user_id.to_string(),
                message,
                notification_type: NotificationType::System,
                created_at: local_now(),
                link,
            })
            .await
    }

    async fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<()> {
        let updated = self
            .notification_repo
            .mark_read(user_id, notification_id)
            .await?;
        if updated == 0 {
            return Err(Error::NotFound(format!("Notification {}", notification_id)));
        }
        Ok(())
    }

    async fn mark_all_read(&self, user_id: &str) -> Result<usize> {
        self.notification_repo.mark_all_read(user_id).await
    }

    async fn delete_notification(&self, user_id: &str, notification_id: &str) -> Result<()> {
        let deleted = self
            .notification_repo
            .delete_notification(user_id, notification_id)
            .await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Notification {}", notification_id)));
        }
        Ok(())
    }
}
