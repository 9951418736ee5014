//! Database models for notifications.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use log::warn;
use serde::{Deserialize, Serialize};

use budgetwise_core::notifications::{NewNotification, Notification, NotificationType};

#[derive(
    Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::notifications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct NotificationDB {
    pub id: String,
    pub user_id: String,
    pub message: String,
    pub notification_type: String,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
    pub link: Option<String>,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::notifications)]
#[serde(rename_all = "camelCase")]
pub struct NewNotificationDB {
    pub id: String,
    pub user_id: String,
    pub message: String,
    pub notification_type: String,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
    pub link: Option<String>,
}

impl From<NotificationDB> for Notification {
    fn from(db: NotificationDB) -> Self {
        let notification_type = db.notification_type.parse().unwrap_or_else(|_| {
            warn!(
                "Notification {} has unknown type '{}', treating as system",
                db.id, db.notification_type
            );
            NotificationType::System
        });
        Self {
            id: db.id,
            user_id: db.user_id,
            message: db.message,
            notification_type,
            read: db.is_read,
            created_at: db.created_at,
            link: db.link,
        }
    }
}

impl NewNotificationDB {
    pub fn from_domain(domain: NewNotification, id: String) -> Self {
        Self {
            id,
            user_id: domain.user_id,
            message: domain.message,
            notification_type: domain.notification_type.as_str().to_string(),
            is_read: false,
            created_at: domain.created_at,
            link: domain.link,
        }
    }
}
