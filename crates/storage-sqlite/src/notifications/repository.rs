use budgetwise_core::notifications::{
    NewNotification, Notification, NotificationRepositoryTrait, NotificationType,
};
use budgetwise_core::Result;

use super::model::{NewNotificationDB, NotificationDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::notifications;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;

use std::sync::Arc;
use uuid::Uuid;

pub struct NotificationRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl NotificationRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        NotificationRepository { pool, writer }
    }
}

fn find_warning(
    conn: &mut SqliteConnection,
    owner: &str,
    link: &str,
    since: NaiveDateTime,
) -> Result<Option<Notification>> {
    let row = notifications::table
        .filter(notifications::user_id.eq(owner))
        .filter(notifications::notification_type.eq(NotificationType::BudgetWarning.as_str()))
        .filter(notifications::link.eq(link))
        .filter(notifications::created_at.ge(since))
        .order(notifications::created_at.desc())
        .select(NotificationDB::as_select())
        .first::<NotificationDB>(conn)
        .optional()
        .into_core()?;
    Ok(row.map(Notification::from))
}

fn insert_notification(
    conn: &mut SqliteConnection,
    new_notification: NewNotification,
) -> Result<Notification> {
    let id = new_notification
        .id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let row = NewNotificationDB::from_domain(new_notification, id);
    let created = diesel::insert_into(notifications::table)
        .values(&row)
        .returning(NotificationDB::as_returning())
        .get_result::<NotificationDB>(conn)
        .into_core()?;
    Ok(Notification::from(created))
}

#[async_trait]
impl NotificationRepositoryTrait for NotificationRepository {
    fn get_notifications(&self, owner: &str) -> Result<Vec<Notification>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = notifications::table
            .filter(notifications::user_id.eq(owner))
            .order(notifications::created_at.desc())
            .select(NotificationDB::as_select())
            .load::<NotificationDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Notification::from).collect())
    }

    fn count_unread(&self, owner: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        notifications::table
            .filter(notifications::user_id.eq(owner))
            .filter(notifications::is_read.eq(false))
            .count()
            .get_result::<i64>(&mut conn)
            .into_core()
    }

    fn find_budget_warning_since(
        &self,
        owner: &str,
        link: &str,
        since: NaiveDateTime,
    ) -> Result<Option<Notification>> {
        let mut conn = get_connection(&self.pool)?;
        find_warning(&mut conn, owner, link, since)
    }

    async fn create_notification(&self, new_notification: NewNotification) -> Result<Notification> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Notification> {
                insert_notification(conn, new_notification)
            })
            .await
    }

    async fn create_budget_warning_if_absent(
        &self,
        new_notification: NewNotification,
        since: NaiveDateTime,
    ) -> Result<Option<Notification>> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<Notification>> {
                let link = new_notification.link.clone().unwrap_or_default();
                if let Some(existing) =
                    find_warning(conn, &new_notification.user_id, &link, since)?
                {
                    debug!("Budget warning {} already covers {}", existing.id, link);
                    return Ok(None);
                }
                insert_notification(conn, new_notification).map(Some)
            })
            .await
    }

    async fn mark_read(&self, owner: &str, notification_id: &str) -> Result<usize> {
        let owner = owner.to_string();
        let notification_id = notification_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::update(
                    notifications::table
                        .filter(notifications::user_id.eq(owner))
                        .filter(notifications::id.eq(notification_id)),
                )
                .set(notifications::is_read.eq(true))
                .execute(conn)
                .into_core()
            })
            .await
    }

    async fn mark_all_read(&self, owner: &str) -> Result<usize> {
        let owner = owner.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::update(
                    notifications::table
                        .filter(notifications::user_id.eq(owner))
                        .filter(notifications::is_read.eq(false)),
                )
                .set(notifications::is_read.eq(true))
                .execute(conn)
                .into_core()
            })
            .await
    }

    async fn delete_notification(&self, owner: &str, notification_id: &str) -> Result<usize> {
        let owner = owner.to_string();
        let notification_id = notification_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    notifications::table
                        .filter(notifications::user_id.eq(owner))
                        .filter(notifications::id.eq(notification_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}
