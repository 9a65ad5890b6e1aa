use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Сеанс: фильм на конкретном экране в конкретные дату и время.
/// Каждый сеанс — независимая область резервирования мест.
#[derive(Debug, Clone, Serialize)]
pub struct Showtime {
    pub id: String,
    pub movie_id: String,
    pub screen_id: String,
    /// Отображаемое время, например "7:00 PM"
    pub showtime: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}
