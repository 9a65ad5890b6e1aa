use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use super::seat_map::{self, SeatClass};

/// Зал кинотеатра. После создания геометрия неизменна.
#[derive(Debug, Clone, Serialize)]
pub struct Screen {
    pub id: String,
    pub name: String,
    pub rows: i32,
    pub columns: i32,
    pub vip_seats: Vec<String>,
    pub total_seats: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScreenError {
    #[error("Rows and columns must be positive")]
    InvalidGeometry,
    #[error("VIP seat {seat} is not part of the screen layout")]
    InvalidVipSeat { seat: String },
}

impl Screen {
    /// Создаёт зал, проверяя геометрию и принадлежность VIP-мест залу.
    pub fn new(
        name: impl Into<String>,
        rows: i32,
        columns: i32,
        vip_seats: Vec<String>,
    ) -> Result<Self, ScreenError> {
        if rows <= 0 || columns <= 0 {
            return Err(ScreenError::InvalidGeometry);
        }
        let total_seats = rows
            .checked_mul(columns)
            .ok_or(ScreenError::InvalidGeometry)?;

        for seat in &vip_seats {
            if !seat_map::is_within(rows as u32, columns as u32, seat) {
                return Err(ScreenError::InvalidVipSeat { seat: seat.clone() });
            }
        }

        Ok(Screen {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            rows,
            columns,
            vip_seats,
            total_seats,
            created_at: Utc::now(),
        })
    }

    /// Входит ли метка в набор мест этого зала.
    pub fn is_valid_seat(&self, label: &str) -> bool {
        seat_map::is_within(self.rows as u32, self.columns as u32, label)
    }

    /// Категория места; `None` для меток вне геометрии зала.
    pub fn classify(&self, label: &str) -> Option<SeatClass> {
        if !self.is_valid_seat(label) {
            return None;
        }
        if self.vip_seats.iter().any(|s| s == label) {
            Some(SeatClass::Vip)
        } else {
            Some(SeatClass::Standard)
        }
    }

    /// Все метки зала в построчном порядке.
    pub fn seat_labels(&self) -> Vec<String> {
        seat_map::generate_labels(self.rows as u32, self.columns as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_geometry() {
        assert_eq!(
            Screen::new("Bad", 0, 8, vec![]).unwrap_err(),
            ScreenError::InvalidGeometry
        );
        assert_eq!(
            Screen::new("Bad", 6, -1, vec![]).unwrap_err(),
            ScreenError::InvalidGeometry
        );
    }

    #[test]
    fn rejects_vip_seat_outside_layout() {
        let err = Screen::new("Screen 1", 6, 8, vec!["A1".into(), "G1".into()]).unwrap_err();
        assert_eq!(err, ScreenError::InvalidVipSeat { seat: "G1".into() });
    }

    #[test]
    fn derives_total_seats_from_geometry() {
        let screen = Screen::new("Screen 1", 8, 10, vec!["A1".into(), "A10".into()]).unwrap();
        assert_eq!(screen.total_seats, 80);
    }

    #[test]
    fn classifies_vip_and_standard_seats() {
        let screen = Screen::new("Screen 1", 6, 8, vec!["A1".into(), "A2".into()]).unwrap();
        assert_eq!(screen.classify("A1"), Some(SeatClass::Vip));
        assert_eq!(screen.classify("C3"), Some(SeatClass::Standard));
        assert_eq!(screen.classify("Z1"), None);
    }

    #[test]
    fn seat_labels_cover_the_whole_hall() {
        let screen = Screen::new("Screen 1", 2, 2, vec![]).unwrap();
        assert_eq!(screen.seat_labels(), vec!["A1", "A2", "B1", "B2"]);
    }
}
