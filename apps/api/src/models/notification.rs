use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A notice authored by the placement cell. `audience` is a branch name, or
/// NULL when the notice went to every student.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NotificationRow {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub audience: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Sent-notice listing row with fan-out and read tallies.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SentNotificationRow {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub audience: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub recipient_count: i64,
    pub read_count: i64,
}

/// One entry in a student's inbox: the notice content plus their read marker.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InboxItemRow {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub audience: Option<String>,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}
