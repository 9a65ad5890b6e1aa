use chrono::{DateTime, Utc};
use serde::Serialize;

/// Подтверждённое бронирование. Запись неизменяема: занятость мест сеанса
/// выводится из журнала таких записей, а не хранится отдельно.
#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    pub id: String,
    /// Человекочитаемый номер брони, например "BK-20260806-3FA2C1"
    pub booking_number: String,
    pub user_id: String,
    pub showtime_id: String,
    pub seats: Vec<String>,
    pub created_at: DateTime<Utc>,
}
