use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::applications::eligibility::check_eligibility;
use crate::applications::status::ApplicationStatus;
use crate::auth::extract::{AuthFaculty, AuthStudent};
use crate::errors::AppError;
use crate::models::application::{ApplicantRow, ApplicationRow, StudentApplicationRow};
use crate::models::job::JobRow;
use crate::models::student::StudentRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ApplicantFilters {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// POST /api/v1/jobs/:id/applications
pub async fn handle_apply(
    State(state): State<AppState>,
    AuthStudent(claims): AuthStudent,
    Path(job_id): Path<Uuid>,
) -> Result<(StatusCode, Json<ApplicationRow>), AppError> {
    let job: Option<JobRow> = sqlx::query_as("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(&state.db)
        .await?;
    let job = job.ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let student: Option<StudentRow> = sqlx::query_as("SELECT * FROM students WHERE id = $1")
        .bind(claims.subject)
        .fetch_optional(&state.db)
        .await?;
    let student = student.ok_or(AppError::Unauthorized)?;

    let today = chrono::Utc::now().date_naive();
    check_eligibility(&job, &student.branch, student.cgpa, today)
        .map_err(AppError::UnprocessableEntity)?;

    let already_applied: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM applications WHERE job_id = $1 AND student_id = $2)",
    )
    .bind(job_id)
    .bind(student.id)
    .fetch_one(&state.db)
    .await?;
    if already_applied {
        return Err(AppError::Conflict(
            "You have already applied to this job".to_string(),
        ));
    }

    // The UNIQUE(job_id, student_id) constraint settles concurrent applies;
    // the EXISTS check above only improves the error message.
    let application: ApplicationRow = sqlx::query_as(
        r#"
        INSERT INTO applications (id, job_id, student_id, status)
        VALUES ($1, $2, $3, 'applied')
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(job_id)
    .bind(student.id)
    .fetch_one(&state.db)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, "You have already applied to this job"))?;

    info!(
        "Student {} applied to job {} ({})",
        student.id, job.id, job.company
    );
    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /api/v1/applications/mine
pub async fn handle_my_applications(
    State(state): State<AppState>,
    AuthStudent(claims): AuthStudent,
) -> Result<Json<Vec<StudentApplicationRow>>, AppError> {
    let applications: Vec<StudentApplicationRow> = sqlx::query_as(
        r#"
        SELECT a.id, a.job_id, a.status, a.applied_at, a.updated_at,
               j.title, j.company, j.package, j.deadline
        FROM applications a
        JOIN jobs j ON j.id = a.job_id
        WHERE a.student_id = $1
        ORDER BY a.applied_at DESC
        "#,
    )
    .bind(claims.subject)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(applications))
}

/// GET /api/v1/jobs/:id/applications
pub async fn handle_job_applicants(
    State(state): State<AppState>,
    AuthFaculty(_claims): AuthFaculty,
    Path(job_id): Path<Uuid>,
    Query(filters): Query<ApplicantFilters>,
) -> Result<Json<Vec<ApplicantRow>>, AppError> {
    let job_exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM jobs WHERE id = $1)")
        .bind(job_id)
        .fetch_one(&state.db)
        .await?;
    if !job_exists {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }

    let applicants: Vec<ApplicantRow> = sqlx::query_as(
        r#"
        SELECT a.id, a.student_id, a.status, a.applied_at,
               s.name, s.email, s.branch, s.cgpa
        FROM applications a
        JOIN students s ON s.id = a.student_id
        WHERE a.job_id = $1
          AND ($2::text IS NULL OR a.status = $2)
        ORDER BY a.applied_at ASC
        "#,
    )
    .bind(job_id)
    .bind(&filters.status)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(applicants))
}

/// PATCH /api/v1/applications/:id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    AuthFaculty(claims): AuthFaculty,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<ApplicationRow>, AppError> {
    let status = ApplicationStatus::parse(&req.status).ok_or_else(|| {
        AppError::Validation(format!(
            "Unknown application status '{}' (expected one of: applied, shortlisted, interview, selected, rejected)",
            req.status
        ))
    })?;

    let application: Option<ApplicationRow> = sqlx::query_as(
        r#"
        UPDATE applications
        SET status = $1, updated_at = NOW()
        WHERE id = $2
        RETURNING *
        "#,
    )
    .bind(status.as_str())
    .bind(id)
    .fetch_optional(&state.db)
    .await?;

    let application =
        application.ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;

    info!(
        "Application {} moved to {} by {}",
        application.id,
        status.as_str(),
        claims.subject
    );
    Ok(Json(application))
}
