use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Public view of a user; the image bytes are never included
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub has_image: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserDatasetItem {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub line_count: i64,
}

/// Activity figures shown on a user's profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStatistics {
    pub dataset_count: i64,
    /// Lines across all of the user's datasets
    pub line_count: i64,
    /// Absent when the user has no datasets
    pub avg_lines_per_dataset: Option<f64>,
    pub first_dataset_at: Option<DateTime<Utc>>,
    pub last_line_added_at: Option<DateTime<Utc>>,
    /// Title of the dataset that most recently received a line
    pub last_modified_dataset: Option<String>,
    pub comment_count: i64,
}
