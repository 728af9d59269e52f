use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::{debug, warn};

use crate::auth::token::{now_ms, Claims, Role};
use crate::errors::AppError;
use crate::state::AppState;

/// Extractor for any authenticated caller, student or faculty.
///
/// Validates the `Authorization: Bearer <token>` header against the token
/// service and yields the verified claims. Missing/invalid/expired tokens
/// reject with 401 before the handler runs.
pub struct AuthUser(pub Claims);

/// Extractor for student-only routes. Faculty tokens reject with 403.
pub struct AuthStudent(pub Claims);

/// Extractor for faculty-only routes. Student tokens reject with 403.
pub struct AuthFaculty(pub Claims);

fn claims_from_parts(parts: &Parts, state: &AppState) -> Result<Claims, AppError> {
    let auth_header = parts
        .headers
        .get("Authorization")
        .ok_or_else(|| {
            debug!("Missing Authorization header");
            AppError::Unauthorized
        })?
        .to_str()
        .map_err(|_| {
            warn!("Invalid Authorization header encoding");
            AppError::Unauthorized
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("Authorization header does not start with 'Bearer '");
        AppError::Unauthorized
    })?;

    state.tokens.verify(token, now_ms()).map_err(|e| {
        debug!("Token rejected: {e}");
        AppError::Unauthorized
    })
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(claims_from_parts(parts, state)?))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthStudent {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = claims_from_parts(parts, state)?;
        if claims.role != Role::Student {
            return Err(AppError::Forbidden);
        }
        Ok(Self(claims))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthFaculty {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = claims_from_parts(parts, state)?;
        if claims.role != Role::Faculty {
            return Err(AppError::Forbidden);
        }
        Ok(Self(claims))
    }
}
