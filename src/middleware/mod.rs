//! middleware/mod.rs
//!
//! Аутентификация и авторизация. `AuthUser` достаётся из Bearer-токена
//! экстрактором, проверка прав делается в начале хендлера через
//! `require`: единая таблица «роль × операция» вместо россыпи if-ов.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::errors::ApiError;
use crate::models::Role;
use crate::AppState;

/// Аутентифицированный пользователь текущего запроса.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub email: String,
    pub role: Role,
}

/// Операции, требующие проверки прав.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ManageCatalog,
    ManageWorkers,
    ViewAllBookings,
    CreateBooking,
    ViewOwnBookings,
}

/// Таблица доступа. Worker читает как обычный пользователь, админские
/// операции закрыты для всех, кроме админа.
pub fn is_allowed(role: Role, operation: Operation) -> bool {
    match operation {
        Operation::ManageCatalog | Operation::ManageWorkers | Operation::ViewAllBookings => {
            role == Role::Admin
        }
        Operation::CreateBooking | Operation::ViewOwnBookings => true,
    }
}

pub fn require(role: Role, operation: Operation) -> Result<(), ApiError> {
    if is_allowed(role, operation) {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

// Bearer auth extractor
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))?;

        let claims = state
            .auth
            .decode_token(token)
            .map_err(|_| ApiError::Unauthorized("Could not validate credentials".to_string()))?;

        // Токен мог пережить пользователя; источник истины — реестр.
        let user = state
            .store
            .get_user(&claims.sub)
            .ok_or_else(|| ApiError::Unauthorized("Could not validate credentials".to_string()))?;

        Ok(AuthUser {
            user_id: user.id,
            email: user.email,
            role: user.role,
        })
    }
}
