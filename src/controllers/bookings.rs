use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::errors::ApiError;
use crate::middleware::{require, AuthUser, Operation};
use crate::models::Booking;
use crate::store::Store;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bookings", post(create_booking))
        .route("/user/bookings", get(get_user_bookings))
}

// POST /api/bookings
#[derive(Debug, Deserialize)]
struct CreateBookingRequest {
    showtime_id: String,
    seats: Vec<String>,
}

async fn create_booking(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(req): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require(user.role, Operation::CreateBooking)?;

    let booking = state
        .ledger
        .create_booking(&user.user_id, &req.showtime_id, &req.seats)?;

    tracing::info!(
        booking_number = %booking.booking_number,
        seats = booking.seats.len(),
        "Booking confirmed"
    );
    Ok(Json(booking))
}

/// Бронь, развёрнутая для списков: с фильмом, залом и временем сеанса.
#[derive(Debug, Serialize)]
pub struct BookingDetails {
    #[serde(flatten)]
    pub booking: Booking,
    pub movie_title: String,
    pub screen_name: String,
    pub showtime: String,
    pub date: String,
}

pub fn expand_booking(store: &Store, booking: Booking) -> BookingDetails {
    let showtime = store.get_showtime(&booking.showtime_id);
    let movie_title = showtime
        .as_ref()
        .and_then(|s| store.get_movie(&s.movie_id))
        .map(|m| m.title)
        .unwrap_or_default();
    let screen_name = showtime
        .as_ref()
        .and_then(|s| store.get_screen(&s.screen_id))
        .map(|s| s.name)
        .unwrap_or_default();
    BookingDetails {
        movie_title,
        screen_name,
        showtime: showtime
            .as_ref()
            .map(|s| s.showtime.clone())
            .unwrap_or_default(),
        date: showtime
            .as_ref()
            .map(|s| s.date.to_string())
            .unwrap_or_default(),
        booking,
    }
}

// GET /api/user/bookings
async fn get_user_bookings(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    require(user.role, Operation::ViewOwnBookings)?;

    let payload: Vec<BookingDetails> = state
        .ledger
        .bookings_for_user(&user.user_id)
        .into_iter()
        .map(|b| expand_booking(&state.store, b))
        .collect();
    Ok(Json(payload))
}
