use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::extract::{AuthFaculty, AuthStudent};
use crate::errors::AppError;
use crate::models::notification::{InboxItemRow, NotificationRow, SentNotificationRow};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateNotificationRequest {
    pub title: String,
    pub body: String,
    /// Branch to target, or omitted to notify every student.
    pub audience: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateNotificationResponse {
    pub notification: NotificationRow,
    pub recipient_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct InboxFilters {
    #[serde(default)]
    pub unread_only: bool,
}

#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub unread: i64,
}

/// POST /api/v1/notifications
///
/// Creates the notice and fans out one recipient row per targeted student in
/// the same transaction. Targeting a branch with no students succeeds with
/// `recipient_count: 0`.
pub async fn handle_create_notification(
    State(state): State<AppState>,
    AuthFaculty(claims): AuthFaculty,
    Json(req): Json<CreateNotificationRequest>,
) -> Result<(StatusCode, Json<CreateNotificationResponse>), AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::Validation("Title must not be empty".into()));
    }
    if req.body.trim().is_empty() {
        return Err(AppError::Validation("Body must not be empty".into()));
    }
    if matches!(&req.audience, Some(branch) if branch.trim().is_empty()) {
        return Err(AppError::Validation(
            "Audience branch must not be blank".into(),
        ));
    }

    let mut tx = state.db.begin().await?;

    let notification: NotificationRow = sqlx::query_as(
        r#"
        INSERT INTO notifications (id, title, body, audience, created_by)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.title.trim())
    .bind(&req.body)
    .bind(&req.audience)
    .bind(claims.subject)
    .fetch_one(&mut *tx)
    .await?;

    // Fan-out: one recipient row per targeted student, single pass.
    let fanned_out = sqlx::query(
        r#"
        INSERT INTO notification_recipients (notification_id, student_id)
        SELECT $1, id FROM students
        WHERE ($2::text IS NULL OR branch = $2)
        "#,
    )
    .bind(notification.id)
    .bind(&notification.audience)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    let recipient_count = fanned_out.rows_affected() as i64;
    info!(
        "Notification {} sent to {} student(s) (audience: {})",
        notification.id,
        recipient_count,
        notification.audience.as_deref().unwrap_or("all")
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateNotificationResponse {
            notification,
            recipient_count,
        }),
    ))
}

/// GET /api/v1/notifications
pub async fn handle_list_sent(
    State(state): State<AppState>,
    AuthFaculty(_claims): AuthFaculty,
) -> Result<Json<Vec<SentNotificationRow>>, AppError> {
    let sent: Vec<SentNotificationRow> = sqlx::query_as(
        r#"
        SELECT n.id, n.title, n.body, n.audience, n.created_by, n.created_at,
               COUNT(r.student_id) AS recipient_count,
               COUNT(r.read_at) AS read_count
        FROM notifications n
        LEFT JOIN notification_recipients r ON r.notification_id = n.id
        GROUP BY n.id
        ORDER BY n.created_at DESC
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(sent))
}

/// GET /api/v1/notifications/inbox
pub async fn handle_inbox(
    State(state): State<AppState>,
    AuthStudent(claims): AuthStudent,
    Query(filters): Query<InboxFilters>,
) -> Result<Json<Vec<InboxItemRow>>, AppError> {
    let inbox: Vec<InboxItemRow> = sqlx::query_as(
        r#"
        SELECT n.id, n.title, n.body, n.audience, n.created_at, r.read_at
        FROM notification_recipients r
        JOIN notifications n ON n.id = r.notification_id
        WHERE r.student_id = $1
          AND (NOT $2 OR r.read_at IS NULL)
        ORDER BY n.created_at DESC
        "#,
    )
    .bind(claims.subject)
    .bind(filters.unread_only)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(inbox))
}

/// POST /api/v1/notifications/:id/read
/// Idempotent: the first call stamps `read_at`, later calls leave it as is.
pub async fn handle_mark_read(
    State(state): State<AppState>,
    AuthStudent(claims): AuthStudent,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE notification_recipients
        SET read_at = COALESCE(read_at, NOW())
        WHERE notification_id = $1 AND student_id = $2
        "#,
    )
    .bind(id)
    .bind(claims.subject)
    .execute(&state.db)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Notification {id} not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/notifications/unread-count
pub async fn handle_unread_count(
    State(state): State<AppState>,
    AuthStudent(claims): AuthStudent,
) -> Result<Json<UnreadCountResponse>, AppError> {
    let unread: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM notification_recipients WHERE student_id = $1 AND read_at IS NULL",
    )
    .bind(claims.subject)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(UnreadCountResponse { unread }))
}
