use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::errors::ApiError;
use crate::middleware::AuthUser;
use crate::models::{Role, User};
use crate::store::StoreError;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
}

#[derive(Debug, Deserialize, Validate)]
struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    password: String,
    #[validate(length(min = 1, message = "Name must not be empty"))]
    name: String,
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct TokenResponse {
    access_token: String,
    token_type: &'static str,
    user: User,
}

// POST /api/auth/register
async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let password_hash = state.auth.hash_password(&req.password)?;
    let user = state
        .store
        .insert_user(User::new(req.email, password_hash, req.name, Role::User))
        .map_err(|e| match e {
            StoreError::EmailTaken => ApiError::BadRequest("Email already registered".to_string()),
        })?;

    tracing::info!(email = %user.email, "Registered new user");

    let access_token = state.auth.issue_token(&user)?;
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
        user,
    }))
}

// POST /api/auth/login
async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // Один и тот же ответ для незнакомого email и неверного пароля,
    // чтобы не подсвечивать, какие адреса зарегистрированы.
    let user = state
        .store
        .find_user_by_email(&req.email)
        .filter(|u| state.auth.verify_password(&req.password, &u.password_hash))
        .ok_or_else(|| ApiError::Unauthorized("Incorrect email or password".to_string()))?;

    let access_token = state.auth.issue_token(&user)?;
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
        user,
    }))
}

// GET /api/auth/me
async fn me(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .store
        .get_user(&auth.user_id)
        .ok_or_else(|| ApiError::Unauthorized("Could not validate credentials".to_string()))?;
    Ok(Json(user))
}
