use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::extract::{AuthFaculty, AuthUser};
use crate::errors::AppError;
use crate::jobs::validation::{validate_job_payload, validate_job_status, JobPayload};
use crate::models::job::JobRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobFilters {
    /// `open` or `closed`; omitted lists everything.
    pub status: Option<String>,
    /// Case-insensitive substring match on the company name.
    pub company: Option<String>,
    /// Restricts to postings whose eligible branches include this branch.
    pub branch: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateJobRequest {
    #[serde(flatten)]
    pub payload: JobPayload,
    pub status: String,
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    AuthFaculty(claims): AuthFaculty,
    Json(req): Json<JobPayload>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    let today = chrono::Utc::now().date_naive();
    validate_job_payload(&req, today, false).map_err(AppError::Validation)?;

    let job: JobRow = sqlx::query_as(
        r#"
        INSERT INTO jobs
            (id, title, company, description, location, package,
             eligible_branches, min_cgpa, deadline, status, posted_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'open', $10)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.title.trim())
    .bind(req.company.trim())
    .bind(&req.description)
    .bind(&req.location)
    .bind(req.package)
    .bind(&req.eligible_branches)
    .bind(req.min_cgpa)
    .bind(req.deadline)
    .bind(claims.subject)
    .fetch_one(&state.db)
    .await?;

    info!("Job {} posted by {} ({})", job.id, claims.subject, job.company);
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
    Query(filters): Query<JobFilters>,
) -> Result<Json<Vec<JobRow>>, AppError> {
    let jobs: Vec<JobRow> = sqlx::query_as(
        r#"
        SELECT * FROM jobs
        WHERE ($1::text IS NULL OR status = $1)
          AND ($2::text IS NULL OR company ILIKE '%' || $2 || '%')
          AND ($3::text IS NULL OR $3 = ANY(eligible_branches))
        ORDER BY deadline ASC, created_at DESC
        "#,
    )
    .bind(&filters.status)
    .bind(&filters.company)
    .bind(&filters.branch)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(jobs))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<JobRow>, AppError> {
    let job: Option<JobRow> = sqlx::query_as("SELECT * FROM jobs WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;

    let job = job.ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    Ok(Json(job))
}

/// PUT /api/v1/jobs/:id
pub async fn handle_update_job(
    State(state): State<AppState>,
    AuthFaculty(_claims): AuthFaculty,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateJobRequest>,
) -> Result<Json<JobRow>, AppError> {
    validate_job_status(&req.status).map_err(AppError::Validation)?;
    let today = chrono::Utc::now().date_naive();
    let closing = req.status == "closed";
    validate_job_payload(&req.payload, today, closing).map_err(AppError::Validation)?;

    let job: Option<JobRow> = sqlx::query_as(
        r#"
        UPDATE jobs
        SET title = $1, company = $2, description = $3, location = $4,
            package = $5, eligible_branches = $6, min_cgpa = $7,
            deadline = $8, status = $9
        WHERE id = $10
        RETURNING *
        "#,
    )
    .bind(req.payload.title.trim())
    .bind(req.payload.company.trim())
    .bind(&req.payload.description)
    .bind(&req.payload.location)
    .bind(req.payload.package)
    .bind(&req.payload.eligible_branches)
    .bind(req.payload.min_cgpa)
    .bind(req.payload.deadline)
    .bind(&req.status)
    .bind(id)
    .fetch_optional(&state.db)
    .await?;

    let job = job.ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    info!("Job {} updated (status: {})", job.id, job.status);
    Ok(Json(job))
}

/// DELETE /api/v1/jobs/:id
/// Applications against the posting are removed by the FK cascade.
pub async fn handle_delete_job(
    State(state): State<AppState>,
    AuthFaculty(claims): AuthFaculty,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Job {id} not found")));
    }

    info!("Job {id} deleted by {}", claims.subject);
    Ok(StatusCode::NO_CONTENT)
}
