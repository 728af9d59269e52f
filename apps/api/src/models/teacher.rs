use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Placement-cell staff profile. Credentials are kept in a separate table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TeacherRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub department: String,
    pub created_at: DateTime<Utc>,
}
