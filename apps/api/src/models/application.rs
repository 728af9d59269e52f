use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub student_id: Uuid,
    pub status: String,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A student's own application joined with the posting it targets.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentApplicationRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub status: String,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub company: String,
    pub package: f64,
    pub deadline: NaiveDate,
}

/// An application joined with the applicant, for the placement cell's
/// per-job applicant table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicantRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub status: String,
    pub applied_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub branch: String,
    pub cgpa: f64,
}
