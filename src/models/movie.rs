use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub description: String,
    pub poster_url: String,
    /// Длительность в минутах
    pub duration: i32,
    pub genre: String,
    pub language: String,
    pub rating: String,
    pub now_showing: bool,
    pub created_at: DateTime<Utc>,
}
