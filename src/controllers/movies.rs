use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::errors::ApiError;
use crate::models::{seat_map, SeatClass, Showtime};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies", get(list_movies))
        .route("/movies/{id}", get(get_movie))
        .route("/movies/{id}/showtimes", get(movie_showtimes))
        .route("/screens", get(list_screens))
        .route("/showtimes/{id}/seats", get(showtime_seats))
}

// GET /api/movies
async fn list_movies(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.store.list_movies())
}

// GET /api/movies/{id}
async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let movie = state
        .store
        .get_movie(&id)
        .ok_or_else(|| ApiError::NotFound("Movie not found".to_string()))?;
    Ok(Json(movie))
}

#[derive(Debug, Serialize)]
struct ShowtimeResponse {
    #[serde(flatten)]
    showtime: Showtime,
    screen_name: String,
}

// GET /api/movies/{id}/showtimes
async fn movie_showtimes(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .store
        .get_movie(&id)
        .ok_or_else(|| ApiError::NotFound("Movie not found".to_string()))?;

    let payload: Vec<ShowtimeResponse> = state
        .store
        .showtimes_for_movie(&id)
        .into_iter()
        .map(|showtime| {
            let screen_name = state
                .store
                .get_screen(&showtime.screen_id)
                .map(|s| s.name)
                .unwrap_or_default();
            ShowtimeResponse {
                showtime,
                screen_name,
            }
        })
        .collect();
    Ok(Json(payload))
}

// GET /api/screens
async fn list_screens(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.store.list_screens())
}

#[derive(Debug, Serialize)]
struct SeatResponse {
    seat: String,
    row: u32,
    number: u32,
    category: &'static str,
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct SeatMapResponse {
    showtime_id: String,
    screen_id: String,
    screen_name: String,
    rows: i32,
    columns: i32,
    seats: Vec<SeatResponse>,
}

// GET /api/showtimes/{id}/seats
//
// Карта зала с актуальной занятостью. Места идут построчно, как их
// рисует фронт: A1..A8, B1..B8 и так далее.
async fn showtime_seats(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let showtime = state
        .store
        .get_showtime(&id)
        .ok_or_else(|| ApiError::NotFound("Showtime not found".to_string()))?;
    let screen = state
        .store
        .get_screen(&showtime.screen_id)
        .ok_or_else(|| ApiError::NotFound("Showtime not found".to_string()))?;

    let occupied = state.ledger.occupied_seats(&id);
    let seats = screen
        .seat_labels()
        .into_iter()
        .map(|label| {
            let (row_index, number) = seat_map::parse_label(&label).unwrap_or((0, 0));
            let category = match screen.classify(&label) {
                Some(SeatClass::Vip) => "vip",
                _ => "standard",
            };
            let status = if occupied.contains(&label) {
                "booked"
            } else {
                "free"
            };
            SeatResponse {
                seat: label,
                row: row_index + 1,
                number,
                category,
                status,
            }
        })
        .collect();

    Ok(Json(SeatMapResponse {
        showtime_id: showtime.id,
        screen_id: screen.id,
        screen_name: screen.name,
        rows: screen.rows,
        columns: screen.columns,
        seats,
    }))
}
