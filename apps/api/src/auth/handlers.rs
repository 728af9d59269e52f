use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::extract::AuthUser;
use crate::auth::password::{check_password_policy, hash_password, verify_password};
use crate::auth::token::{now_ms, Role};
use crate::auth::validation::{
    validate_branch, validate_cgpa, validate_email, validate_graduation_year, validate_name,
};
use crate::errors::AppError;
use crate::models::student::StudentRow;
use crate::models::teacher::TeacherRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StudentRegisterRequest {
    pub name: String,
    pub email: String,
    pub branch: String,
    pub graduation_year: i32,
    pub cgpa: f64,
    pub phone: Option<String>,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct FacultyRegisterRequest {
    pub name: String,
    pub email: String,
    pub department: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct StudentAuthResponse {
    pub token: String,
    pub student: StudentRow,
}

#[derive(Debug, Serialize)]
pub struct FacultyAuthResponse {
    pub token: String,
    pub teacher: TeacherRow,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<StudentRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher: Option<TeacherRow>,
}

fn issue_token(state: &AppState, id: Uuid, role: Role, name: &str) -> Result<String, AppError> {
    state
        .tokens
        .issue(id, role, name, now_ms())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to issue auth token: {e}")))
}

/// POST /api/v1/auth/student/register
pub async fn handle_student_register(
    State(state): State<AppState>,
    Json(req): Json<StudentRegisterRequest>,
) -> Result<(StatusCode, Json<StudentAuthResponse>), AppError> {
    let email = req.email.trim().to_lowercase();

    validate_name(&req.name).map_err(AppError::Validation)?;
    validate_email(&email).map_err(AppError::Validation)?;
    validate_branch(&req.branch).map_err(AppError::Validation)?;
    validate_graduation_year(req.graduation_year).map_err(AppError::Validation)?;
    validate_cgpa(req.cgpa).map_err(AppError::Validation)?;
    check_password_policy(&req.password, &email).map_err(AppError::Validation)?;

    let password_hash = hash_password(&req.password)?;

    // Profile and credential rows land together or not at all.
    let mut tx = state.db.begin().await?;

    let student: StudentRow = sqlx::query_as(
        r#"
        INSERT INTO students (id, name, email, branch, graduation_year, cgpa, phone)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.name.trim())
    .bind(&email)
    .bind(req.branch.trim())
    .bind(req.graduation_year)
    .bind(req.cgpa)
    .bind(&req.phone)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, "An account with this email already exists"))?;

    sqlx::query("INSERT INTO student_credentials (student_id, password_hash) VALUES ($1, $2)")
        .bind(student.id)
        .bind(&password_hash)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!("Registered student {} ({})", student.id, student.email);

    let token = issue_token(&state, student.id, Role::Student, &student.name)?;
    Ok((
        StatusCode::CREATED,
        Json(StudentAuthResponse { token, student }),
    ))
}

/// POST /api/v1/auth/faculty/register
pub async fn handle_faculty_register(
    State(state): State<AppState>,
    Json(req): Json<FacultyRegisterRequest>,
) -> Result<(StatusCode, Json<FacultyAuthResponse>), AppError> {
    let email = req.email.trim().to_lowercase();

    validate_name(&req.name).map_err(AppError::Validation)?;
    validate_email(&email).map_err(AppError::Validation)?;
    if req.department.trim().is_empty() {
        return Err(AppError::Validation("Department must not be empty".into()));
    }
    check_password_policy(&req.password, &email).map_err(AppError::Validation)?;

    let password_hash = hash_password(&req.password)?;

    let mut tx = state.db.begin().await?;

    let teacher: TeacherRow = sqlx::query_as(
        r#"
        INSERT INTO teachers (id, name, email, department)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.name.trim())
    .bind(&email)
    .bind(req.department.trim())
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, "An account with this email already exists"))?;

    sqlx::query("INSERT INTO teacher_credentials (teacher_id, password_hash) VALUES ($1, $2)")
        .bind(teacher.id)
        .bind(&password_hash)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!("Registered faculty {} ({})", teacher.id, teacher.email);

    let token = issue_token(&state, teacher.id, Role::Faculty, &teacher.name)?;
    Ok((
        StatusCode::CREATED,
        Json(FacultyAuthResponse { token, teacher }),
    ))
}

/// POST /api/v1/auth/student/login
pub async fn handle_student_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<StudentAuthResponse>, AppError> {
    let email = req.email.trim().to_lowercase();

    let student: Option<StudentRow> = sqlx::query_as("SELECT * FROM students WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;
    // Same 401 whether the email is unknown or the password is wrong.
    let student = student.ok_or(AppError::Unauthorized)?;

    let password_hash: String =
        sqlx::query_scalar("SELECT password_hash FROM student_credentials WHERE student_id = $1")
            .bind(student.id)
            .fetch_one(&state.db)
            .await?;

    if !verify_password(&req.password, &password_hash)? {
        warn!("Failed login attempt for student {email}");
        return Err(AppError::Unauthorized);
    }

    sqlx::query("UPDATE student_credentials SET last_login = NOW() WHERE student_id = $1")
        .bind(student.id)
        .execute(&state.db)
        .await?;

    info!("Student {} logged in", student.id);

    let token = issue_token(&state, student.id, Role::Student, &student.name)?;
    Ok(Json(StudentAuthResponse { token, student }))
}

/// POST /api/v1/auth/faculty/login
pub async fn handle_faculty_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<FacultyAuthResponse>, AppError> {
    let email = req.email.trim().to_lowercase();

    let teacher: Option<TeacherRow> = sqlx::query_as("SELECT * FROM teachers WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;
    let teacher = teacher.ok_or(AppError::Unauthorized)?;

    let password_hash: String =
        sqlx::query_scalar("SELECT password_hash FROM teacher_credentials WHERE teacher_id = $1")
            .bind(teacher.id)
            .fetch_one(&state.db)
            .await?;

    if !verify_password(&req.password, &password_hash)? {
        warn!("Failed login attempt for faculty {email}");
        return Err(AppError::Unauthorized);
    }

    sqlx::query("UPDATE teacher_credentials SET last_login = NOW() WHERE teacher_id = $1")
        .bind(teacher.id)
        .execute(&state.db)
        .await?;

    info!("Faculty {} logged in", teacher.id);

    let token = issue_token(&state, teacher.id, Role::Faculty, &teacher.name)?;
    Ok(Json(FacultyAuthResponse { token, teacher }))
}

/// POST /api/v1/auth/password
/// Changes the caller's password after re-verifying the current one.
/// Already-issued tokens stay valid until they expire.
pub async fn handle_change_password(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<StatusCode, AppError> {
    let (email, current_hash): (String, String) = match claims.role {
        Role::Student => sqlx::query_as(
            r#"
            SELECT s.email, c.password_hash
            FROM students s JOIN student_credentials c ON c.student_id = s.id
            WHERE s.id = $1
            "#,
        )
        .bind(claims.subject)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::Unauthorized)?,
        Role::Faculty => sqlx::query_as(
            r#"
            SELECT t.email, c.password_hash
            FROM teachers t JOIN teacher_credentials c ON c.teacher_id = t.id
            WHERE t.id = $1
            "#,
        )
        .bind(claims.subject)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::Unauthorized)?,
    };

    if !verify_password(&req.current_password, &current_hash)? {
        warn!("Password change rejected for {}: bad current password", claims.subject);
        return Err(AppError::Unauthorized);
    }

    check_password_policy(&req.new_password, &email).map_err(AppError::Validation)?;
    let new_hash = hash_password(&req.new_password)?;

    match claims.role {
        Role::Student => {
            sqlx::query("UPDATE student_credentials SET password_hash = $1 WHERE student_id = $2")
                .bind(&new_hash)
                .bind(claims.subject)
                .execute(&state.db)
                .await?;
        }
        Role::Faculty => {
            sqlx::query("UPDATE teacher_credentials SET password_hash = $1 WHERE teacher_id = $2")
                .bind(&new_hash)
                .bind(claims.subject)
                .execute(&state.db)
                .await?;
        }
    }

    info!("Password changed for {} ({})", claims.subject, claims.role.as_str());
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
pub async fn handle_me(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<MeResponse>, AppError> {
    match claims.role {
        Role::Student => {
            let student: Option<StudentRow> =
                sqlx::query_as("SELECT * FROM students WHERE id = $1")
                    .bind(claims.subject)
                    .fetch_optional(&state.db)
                    .await?;
            // A valid token for a deleted account is treated as unauthenticated.
            let student = student.ok_or(AppError::Unauthorized)?;
            Ok(Json(MeResponse {
                role: Role::Student,
                student: Some(student),
                teacher: None,
            }))
        }
        Role::Faculty => {
            let teacher: Option<TeacherRow> =
                sqlx::query_as("SELECT * FROM teachers WHERE id = $1")
                    .bind(claims.subject)
                    .fetch_optional(&state.db)
                    .await?;
            let teacher = teacher.ok_or(AppError::Unauthorized)?;
            Ok(Json(MeResponse {
                role: Role::Faculty,
                student: None,
                teacher: Some(teacher),
            }))
        }
    }
}
