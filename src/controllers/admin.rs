use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::controllers::bookings::{expand_booking, BookingDetails};
use crate::errors::ApiError;
use crate::middleware::{require, AuthUser, Operation};
use crate::models::{Movie, Role, Screen, Showtime, User};
use crate::store::StoreError;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/movies", post(create_movie))
        .route("/admin/screens", post(create_screen))
        .route("/admin/showtimes", post(create_showtime))
        .route("/admin/workers", post(create_worker))
        .route("/admin/workers", get(list_workers))
        .route("/admin/bookings", get(list_bookings))
}

// POST /api/admin/movies
#[derive(Debug, Deserialize, Validate)]
struct CreateMovieRequest {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    poster_url: String,
    duration: i32,
    #[serde(default)]
    genre: String,
    #[serde(default)]
    language: String,
    #[serde(default)]
    rating: String,
}

async fn create_movie(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(req): Json<CreateMovieRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require(user.role, Operation::ManageCatalog)?;
    req.validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    if req.duration <= 0 {
        return Err(ApiError::BadRequest(
            "Duration must be a positive number of minutes".to_string(),
        ));
    }

    let movie = state.store.insert_movie(Movie {
        id: Uuid::new_v4().to_string(),
        title: req.title,
        description: req.description,
        poster_url: req.poster_url,
        duration: req.duration,
        genre: req.genre,
        language: req.language,
        rating: req.rating,
        now_showing: true,
        created_at: Utc::now(),
    });
    tracing::info!(title = %movie.title, "Added movie to catalog");
    Ok(Json(movie))
}

// POST /api/admin/screens
#[derive(Debug, Deserialize)]
struct CreateScreenRequest {
    name: String,
    rows: i32,
    columns: i32,
    #[serde(default)]
    vip_seats: Vec<String>,
}

async fn create_screen(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(req): Json<CreateScreenRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require(user.role, Operation::ManageCatalog)?;

    // Screen::new сам валидирует геометрию и принадлежность VIP-мест
    let screen = state
        .store
        .insert_screen(Screen::new(req.name, req.rows, req.columns, req.vip_seats)?);
    tracing::info!(name = %screen.name, total_seats = screen.total_seats, "Added screen");
    Ok(Json(screen))
}

// POST /api/admin/showtimes
#[derive(Debug, Deserialize)]
struct CreateShowtimeRequest {
    movie_id: String,
    screen_id: String,
    showtime: String,
    /// Дата в формате YYYY-MM-DD
    date: String,
}

async fn create_showtime(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(req): Json<CreateShowtimeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require(user.role, Operation::ManageCatalog)?;

    state
        .store
        .get_movie(&req.movie_id)
        .ok_or_else(|| ApiError::NotFound("Movie not found".to_string()))?;
    state
        .store
        .get_screen(&req.screen_id)
        .ok_or_else(|| ApiError::NotFound("Screen not found".to_string()))?;
    let date = NaiveDate::parse_from_str(&req.date, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest("Date must be in YYYY-MM-DD format".to_string()))?;
    if req.showtime.trim().is_empty() {
        return Err(ApiError::BadRequest("Showtime must not be empty".to_string()));
    }

    let showtime = state.store.insert_showtime(Showtime {
        id: Uuid::new_v4().to_string(),
        movie_id: req.movie_id,
        screen_id: req.screen_id,
        showtime: req.showtime,
        date,
        created_at: Utc::now(),
    });
    Ok(Json(showtime))
}

// POST /api/admin/workers
#[derive(Debug, Deserialize, Validate)]
struct CreateWorkerRequest {
    #[validate(email(message = "Invalid email address"))]
    email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    password: String,
    #[validate(length(min = 1, message = "Name must not be empty"))]
    name: String,
}

async fn create_worker(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(req): Json<CreateWorkerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require(user.role, Operation::ManageWorkers)?;
    req.validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let password_hash = state.auth.hash_password(&req.password)?;
    let worker = state
        .store
        .insert_user(User::new(req.email, password_hash, req.name, Role::Worker))
        .map_err(|e| match e {
            StoreError::EmailTaken => ApiError::BadRequest("Email already registered".to_string()),
        })?;
    tracing::info!(email = %worker.email, "Created worker account");
    Ok(Json(worker))
}

// GET /api/admin/workers
async fn list_workers(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    require(user.role, Operation::ManageWorkers)?;
    Ok(Json(state.store.users_with_role(Role::Worker)))
}

// GET /api/admin/bookings
async fn list_bookings(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    require(user.role, Operation::ViewAllBookings)?;
    let payload: Vec<BookingDetails> = state
        .ledger
        .all_bookings()
        .into_iter()
        .map(|b| expand_booking(&state.store, b))
        .collect();
    Ok(Json(payload))
}
