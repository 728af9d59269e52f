use sqlx::PgPool;

use crate::auth::token::TokenService;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Issues and verifies the bearer tokens carried by every authenticated request.
    pub tokens: TokenService,
}
