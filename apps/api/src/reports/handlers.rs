//! Dashboard and placement report endpoints.
//!
//! Dashboards are a handful of scalar counts; the report tables each run one
//! GROUP BY query and hand the rows to [`super::shaping`] for presentation.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::auth::extract::{AuthFaculty, AuthStudent};
use crate::errors::AppError;
use crate::models::student::StudentRow;
use crate::reports::shaping::{
    self, BranchAggregateRow, BranchReport, CompanyAggregateRow, CompanyReport, StatusBreakdown,
    StatusCountRow, StudentPlacementReport, StudentSummaryRow,
};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StudentDashboard {
    pub open_jobs: i64,
    pub eligible_jobs: i64,
    pub my_applications: StatusBreakdown,
    pub unread_notifications: i64,
}

#[derive(Debug, Serialize)]
pub struct FacultyDashboard {
    pub students: i64,
    pub placed_students: i64,
    pub jobs: i64,
    pub open_jobs: i64,
    pub companies: i64,
    pub applications: i64,
    pub notifications_sent: i64,
}

/// GET /api/v1/dashboard/student
pub async fn handle_student_dashboard(
    State(state): State<AppState>,
    AuthStudent(claims): AuthStudent,
) -> Result<Json<StudentDashboard>, AppError> {
    let student = sqlx::query_as::<_, StudentRow>("SELECT * FROM students WHERE id = $1")
        .bind(claims.subject)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let open_jobs = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM jobs WHERE status = 'open' AND deadline >= CURRENT_DATE",
    )
    .fetch_one(&state.db)
    .await?;

    let eligible_jobs = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM jobs
         WHERE status = 'open'
           AND deadline >= CURRENT_DATE
           AND $1 = ANY(eligible_branches)
           AND min_cgpa <= $2",
    )
    .bind(&student.branch)
    .bind(student.cgpa)
    .fetch_one(&state.db)
    .await?;

    let status_rows = sqlx::query_as::<_, StatusCountRow>(
        "SELECT status, COUNT(*) AS count FROM applications
         WHERE student_id = $1
         GROUP BY status",
    )
    .bind(claims.subject)
    .fetch_all(&state.db)
    .await?;

    let unread_notifications = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM notification_recipients
         WHERE student_id = $1 AND read_at IS NULL",
    )
    .bind(claims.subject)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(StudentDashboard {
        open_jobs,
        eligible_jobs,
        my_applications: shaping::shape_status_breakdown(&status_rows),
        unread_notifications,
    }))
}

/// GET /api/v1/dashboard/faculty
pub async fn handle_faculty_dashboard(
    State(state): State<AppState>,
    AuthFaculty(_claims): AuthFaculty,
) -> Result<Json<FacultyDashboard>, AppError> {
    let students = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
        .fetch_one(&state.db)
        .await?;

    let placed_students = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(DISTINCT student_id) FROM applications WHERE status = 'selected'",
    )
    .fetch_one(&state.db)
    .await?;

    let jobs = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM jobs")
        .fetch_one(&state.db)
        .await?;

    let open_jobs = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM jobs WHERE status = 'open'")
        .fetch_one(&state.db)
        .await?;

    let companies = sqlx::query_scalar::<_, i64>("SELECT COUNT(DISTINCT company) FROM jobs")
        .fetch_one(&state.db)
        .await?;

    let applications = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM applications")
        .fetch_one(&state.db)
        .await?;

    let notifications_sent = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM notifications")
        .fetch_one(&state.db)
        .await?;

    Ok(Json(FacultyDashboard {
        students,
        placed_students,
        jobs,
        open_jobs,
        companies,
        applications,
        notifications_sent,
    }))
}

/// GET /api/v1/reports/branches
///
/// Per-branch placement picture. Students with no applications still count
/// through the LEFT JOIN, so a branch never disappears from the table.
pub async fn handle_branch_report(
    State(state): State<AppState>,
    AuthFaculty(_claims): AuthFaculty,
) -> Result<Json<Vec<BranchReport>>, AppError> {
    let rows = sqlx::query_as::<_, BranchAggregateRow>(
        "SELECT s.branch,
                COUNT(DISTINCT s.id) AS students,
                COUNT(a.id) AS applications,
                COUNT(a.id) FILTER (WHERE a.status = 'selected') AS selected,
                COUNT(DISTINCT a.student_id) FILTER (WHERE a.status = 'selected') AS placed_students,
                AVG(j.package) FILTER (WHERE a.status = 'selected') AS avg_package
         FROM students s
         LEFT JOIN applications a ON a.student_id = s.id
         LEFT JOIN jobs j ON j.id = a.job_id
         GROUP BY s.branch
         ORDER BY s.branch ASC",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(shaping::shape_branch_report(rows)))
}

/// GET /api/v1/reports/companies
pub async fn handle_company_report(
    State(state): State<AppState>,
    AuthFaculty(_claims): AuthFaculty,
) -> Result<Json<Vec<CompanyReport>>, AppError> {
    let rows = sqlx::query_as::<_, CompanyAggregateRow>(
        "SELECT j.company,
                COUNT(DISTINCT j.id) AS jobs,
                COUNT(a.id) AS applications,
                COUNT(a.id) FILTER (WHERE a.status = 'selected') AS selected,
                AVG(j.package) FILTER (WHERE a.status = 'selected') AS avg_package
         FROM jobs j
         LEFT JOIN applications a ON a.job_id = j.id
         GROUP BY j.company
         ORDER BY j.company ASC",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(shaping::shape_company_report(rows)))
}

/// GET /api/v1/reports/statuses
pub async fn handle_status_report(
    State(state): State<AppState>,
    AuthFaculty(_claims): AuthFaculty,
) -> Result<Json<StatusBreakdown>, AppError> {
    let rows = sqlx::query_as::<_, StatusCountRow>(
        "SELECT status, COUNT(*) AS count FROM applications GROUP BY status",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(shaping::shape_status_breakdown(&rows)))
}

/// GET /api/v1/reports/students
pub async fn handle_student_report(
    State(state): State<AppState>,
    AuthFaculty(_claims): AuthFaculty,
) -> Result<Json<Vec<StudentPlacementReport>>, AppError> {
    let rows = sqlx::query_as::<_, StudentSummaryRow>(
        "SELECT s.id, s.name, s.branch,
                COUNT(a.id) AS applications,
                COUNT(a.id) FILTER (WHERE a.status = 'selected') AS offers,
                MAX(j.package) FILTER (WHERE a.status = 'selected') AS best_package
         FROM students s
         LEFT JOIN applications a ON a.student_id = s.id
         LEFT JOIN jobs j ON j.id = a.job_id
         GROUP BY s.id, s.name, s.branch
         ORDER BY s.name ASC",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(shaping::shape_student_report(rows)))
}
