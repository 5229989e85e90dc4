//! Authentication handlers — login, logout, change-password, refresh.

use axum::Json;
use axum::extract::State;

use tempus_core::error::AppError;

use crate::dto::request::{ChangePasswordRequest, LoginRequest, RefreshRequest};
use crate::dto::response::{
    ApiResponse, LoginResponse, MessageResponse, PrincipalResponse, RefreshResponse,
};
use crate::error::ApiResult;
use crate::extractors::AuthPrincipal;
use crate::state::AppState;

/// POST /authenticate/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<ApiResponse<LoginResponse>>> {
    validator::Validate::validate(&req)
        .map_err(|e| AppError::validation(e.to_string()))?;

    let session = state.sessions.login(&req.email, &req.password).await?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        access_token: session.access.token,
        refresh_token: session.refresh.token,
        access_expires_at: session.access.expires_at,
        refresh_expires_at: session.refresh.expires_at,
        principal: PrincipalResponse::from(&session.principal),
    })))
}

/// DELETE /authenticate/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthPrincipal,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.sessions.logout(auth.claims()).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Logged out successfully",
    ))))
}

/// POST /authenticate/change-password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthPrincipal,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    validator::Validate::validate(&req)
        .map_err(|e| AppError::validation(e.to_string()))?;

    let subject = auth.subject()?;
    state
        .sessions
        .change_password(subject, &req.old_password, &req.new_password)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Password changed successfully",
    ))))
}

/// POST /authenticate/refresh-token
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<ApiResponse<RefreshResponse>>> {
    let access = state.sessions.refresh(&req.refresh_token).await?;

    Ok(Json(ApiResponse::ok(RefreshResponse {
        access_token: access.token,
        expires_at: access.expires_at,
    })))
}
