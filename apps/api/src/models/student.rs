use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Student profile as stored. Credentials live in their own table and are
/// never selected into this struct, so it is safe to serialize in responses.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub branch: String,
    pub graduation_year: i32,
    pub cgpa: f64,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}
