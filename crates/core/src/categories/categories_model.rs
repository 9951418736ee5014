//! Category domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain model for a user-defined expense category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub icon_name: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new category
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: String,
    pub name: String,
    pub icon_name: Option<String>,
}

/// Input model for updating a category
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub icon_name: Option<String>,
}
