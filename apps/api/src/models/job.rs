use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A job posting. `package` is annual CTC in lakhs per annum; `status` is
/// `open` or `closed` (closing is manual, independent of the deadline).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: String,
    pub package: f64,
    pub eligible_branches: Vec<String>,
    pub min_cgpa: f64,
    pub deadline: NaiveDate,
    pub status: String,
    pub posted_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl JobRow {
    pub fn is_open(&self) -> bool {
        self.status == "open"
    }
}
