use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extract::{AuthFaculty, AuthStudent};
use crate::auth::validation::validate_name;
use crate::errors::AppError;
use crate::models::student::StudentRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StudentFilters {
    pub branch: Option<String>,
    /// Case-insensitive substring match over name and email.
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub phone: Option<String>,
}

/// GET /api/v1/students
pub async fn handle_list_students(
    State(state): State<AppState>,
    AuthFaculty(_claims): AuthFaculty,
    Query(filters): Query<StudentFilters>,
) -> Result<Json<Vec<StudentRow>>, AppError> {
    let students: Vec<StudentRow> = sqlx::query_as(
        r#"
        SELECT * FROM students
        WHERE ($1::text IS NULL OR branch = $1)
          AND ($2::text IS NULL
               OR name ILIKE '%' || $2 || '%'
               OR email ILIKE '%' || $2 || '%')
        ORDER BY name ASC
        "#,
    )
    .bind(&filters.branch)
    .bind(&filters.search)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(students))
}

/// GET /api/v1/students/me
pub async fn handle_my_profile(
    State(state): State<AppState>,
    AuthStudent(claims): AuthStudent,
) -> Result<Json<StudentRow>, AppError> {
    let student: Option<StudentRow> = sqlx::query_as("SELECT * FROM students WHERE id = $1")
        .bind(claims.subject)
        .fetch_optional(&state.db)
        .await?;

    let student = student.ok_or(AppError::Unauthorized)?;
    Ok(Json(student))
}

/// PUT /api/v1/students/me
/// Contact details only; branch, CGPA and batch are registrar data.
pub async fn handle_update_my_profile(
    State(state): State<AppState>,
    AuthStudent(claims): AuthStudent,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<StudentRow>, AppError> {
    validate_name(&req.name).map_err(AppError::Validation)?;

    let student: Option<StudentRow> = sqlx::query_as(
        r#"
        UPDATE students
        SET name = $1, phone = $2
        WHERE id = $3
        RETURNING *
        "#,
    )
    .bind(req.name.trim())
    .bind(&req.phone)
    .bind(claims.subject)
    .fetch_optional(&state.db)
    .await?;

    let student = student.ok_or(AppError::Unauthorized)?;
    Ok(Json(student))
}

/// GET /api/v1/students/:id
pub async fn handle_get_student(
    State(state): State<AppState>,
    AuthFaculty(_claims): AuthFaculty,
    Path(id): Path<Uuid>,
) -> Result<Json<StudentRow>, AppError> {
    let student: Option<StudentRow> = sqlx::query_as("SELECT * FROM students WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;

    let student = student.ok_or_else(|| AppError::NotFound(format!("Student {id} not found")))?;
    Ok(Json(student))
}
