//! Notification domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Kind of user-visible message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    BudgetWarning,
    ReportReady,
    System,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::BudgetWarning => "budget_warning",
            NotificationType::ReportReady => "report_ready",
            NotificationType::System => "system",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "budget_warning" => Ok(NotificationType::BudgetWarning),
            "report_ready" => Ok(NotificationType::ReportReady),
            "system" => Ok(NotificationType::System),
            other => Err(Error::invalid_input(format!(
                "unknown notification type '{}'",
                other
            ))),
        }
    }
}

/// User-visible message record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub read: bool,
    pub created_at: NaiveDateTime,
    pub link: Option<String>,
}

/// Input model for creating a notification
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub id: Option<String>,
    pub user_id: String,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub created_at: NaiveDateTime,
    pub link: Option<String>,
}
