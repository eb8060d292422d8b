//! Authentication handlers.

use actix_web::{HttpRequest, HttpResponse, web};

use verse_core::ports::RateLimitDecision;
use verse_shared::dto::{AuthResponse, LoginRequest, UserResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const ADMIN_ROLE: &str = "admin";

/// POST /api/auth/login
pub async fn login(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let client = req
        .connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string();

    let decision = state
        .login_limiter
        .check(&client)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if let RateLimitDecision::Limited { retry_after } = decision {
        tracing::warn!(client = %client, "Login rate limit exceeded");
        return Err(AppError::TooManyRequests(retry_after.as_secs().max(1)));
    }

    let req = body.into_inner();

    if let Err(e) = state.credentials.verify(&req.email, &req.password) {
        tracing::info!(email = %req.email, "Rejected sign-in attempt");
        return Err(e.into());
    }

    let user = state
        .users
        .find_by_email(&req.email)
        .ok_or(AppError::Unauthorized)?;

    let roles = if state.users.is_admin(&user.id) {
        vec![ADMIN_ROLE.to_string()]
    } else {
        Vec::new()
    };

    let token = state.tokens.generate_token(&user.id, &user.email, roles)?;

    tracing::info!(user_id = %user.id, "User signed in");

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expiration_seconds().max(0) as u64,
    }))
}

/// GET /api/auth/me - Protected route
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let is_admin = state.users.is_admin(&identity.user.id);
    Ok(HttpResponse::Ok().json(UserResponse {
        id: identity.user.id,
        name: identity.user.name,
        email: identity.user.email,
        is_admin,
    }))
}
