//! services/ledger.rs
//!
//! Журнал бронирований и проверка конфликтов мест. Единственный владелец
//! записей `Booking`: занятость мест любого сеанса выводится из журнала,
//! отдельной таблицы «занятых мест» нет, поэтому рассинхронизация невозможна.
//!
//! Коммит брони сериализуется по сеансу: на каждый showtime_id берётся свой
//! мьютекс, так что два конкурирующих запроса на пересекающиеся места видят
//! журнал последовательно. Разные сеансы друг друга не блокируют.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, RwLock};

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Booking, Screen};
use crate::store::Store;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookingError {
    #[error("Showtime not found")]
    ShowtimeNotFound,
    #[error("{}", invalid_seats_message(.seats))]
    InvalidSeat { seats: Vec<String> },
    #[error("Duplicate seat in request: {seat}")]
    DuplicateSeatInRequest { seat: String },
    #[error("Seats already booked: {}", .seats.join(", "))]
    SeatsUnavailable { seats: Vec<String> },
}

fn invalid_seats_message(seats: &[String]) -> String {
    if seats.is_empty() {
        "No seats requested".to_string()
    } else {
        format!("Invalid seats for this screen: {}", seats.join(", "))
    }
}

#[derive(Clone)]
pub struct BookingLedger {
    store: Store,
    inner: Arc<LedgerInner>,
}

#[derive(Default)]
struct LedgerInner {
    bookings: RwLock<Vec<Booking>>,
    // Порядок взятия локов: сначала реестр, потом лок сеанса, потом bookings.
    showtime_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl BookingLedger {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            inner: Arc::new(LedgerInner::default()),
        }
    }

    /// Атомарно проверяет и фиксирует бронь. Либо все места запроса
    /// достаются пользователю, либо ни одно (и ошибка называет виновников).
    pub fn create_booking(
        &self,
        user_id: &str,
        showtime_id: &str,
        seats: &[String],
    ) -> Result<Booking, BookingError> {
        let showtime = self
            .store
            .get_showtime(showtime_id)
            .ok_or(BookingError::ShowtimeNotFound)?;
        // Сеанс без зала — битая ссылка, для клиента это тот же 404.
        let screen = self
            .store
            .get_screen(&showtime.screen_id)
            .ok_or(BookingError::ShowtimeNotFound)?;

        self.validate_request(&screen, seats)?;

        let lock = self.showtime_lock(showtime_id);
        let _guard = lock.lock().unwrap();

        let occupied = self.occupied_seats(showtime_id);
        let conflicts: Vec<String> = seats
            .iter()
            .filter(|s| occupied.contains(s.as_str()))
            .cloned()
            .collect();
        if !conflicts.is_empty() {
            return Err(BookingError::SeatsUnavailable { seats: conflicts });
        }

        let mut bookings = self.inner.bookings.write().unwrap();
        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            booking_number: next_booking_number(&bookings),
            user_id: user_id.to_string(),
            showtime_id: showtime_id.to_string(),
            seats: seats.to_vec(),
            created_at: Utc::now(),
        };
        bookings.push(booking.clone());
        Ok(booking)
    }

    /// Занятые места сеанса, выведенные из журнала.
    pub fn occupied_seats(&self, showtime_id: &str) -> HashSet<String> {
        self.inner
            .bookings
            .read()
            .unwrap()
            .iter()
            .filter(|b| b.showtime_id == showtime_id)
            .flat_map(|b| b.seats.iter().cloned())
            .collect()
    }

    pub fn bookings_for_user(&self, user_id: &str) -> Vec<Booking> {
        self.inner
            .bookings
            .read()
            .unwrap()
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn all_bookings(&self) -> Vec<Booking> {
        self.inner.bookings.read().unwrap().clone()
    }

    fn validate_request(&self, screen: &Screen, seats: &[String]) -> Result<(), BookingError> {
        if seats.is_empty() {
            return Err(BookingError::InvalidSeat { seats: vec![] });
        }
        let invalid: Vec<String> = seats
            .iter()
            .filter(|s| !screen.is_valid_seat(s))
            .cloned()
            .collect();
        if !invalid.is_empty() {
            return Err(BookingError::InvalidSeat { seats: invalid });
        }
        let mut seen = HashSet::new();
        for seat in seats {
            if !seen.insert(seat.as_str()) {
                return Err(BookingError::DuplicateSeatInRequest {
                    seat: seat.clone(),
                });
            }
        }
        Ok(())
    }

    fn showtime_lock(&self, showtime_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.inner.showtime_locks.lock().unwrap();
        locks
            .entry(showtime_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Номер брони вида "BK-20260806-3FA2C1". Суффикс перегенерируется при
/// коллизии; вызывается строго под write-локом журнала.
fn next_booking_number(existing: &[Booking]) -> String {
    loop {
        let suffix: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(6)
            .collect::<String>()
            .to_uppercase();
        let number = format!("BK-{}-{}", Utc::now().format("%Y%m%d"), suffix);
        if !existing.iter().any(|b| b.booking_number == number) {
            return number;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, Screen, Showtime, User};
    use chrono::NaiveDate;

    fn setup() -> (Store, BookingLedger, String, String) {
        let store = Store::new();
        let user = store
            .insert_user(User::new("user@example.com", "h", "John", Role::User))
            .unwrap();
        let screen = store.insert_screen(
            Screen::new("Screen 1", 6, 8, vec!["A1".into(), "A2".into()]).unwrap(),
        );
        let showtime = store.insert_showtime(Showtime {
            id: Uuid::new_v4().to_string(),
            movie_id: "m1".to_string(),
            screen_id: screen.id.clone(),
            showtime: "7:00 PM".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
            created_at: Utc::now(),
        });
        let ledger = BookingLedger::new(store.clone());
        (store, ledger, user.id, showtime.id)
    }

    fn seats(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn books_free_seats_and_rejects_overlap() {
        let (_store, ledger, user_id, showtime_id) = setup();

        let first = ledger
            .create_booking(&user_id, &showtime_id, &seats(&["C3", "C4"]))
            .unwrap();
        assert_eq!(first.seats, vec!["C3", "C4"]);
        assert!(first.booking_number.starts_with("BK-"));

        // Пересечение по C4: отклоняется целиком, C5 не бронируется.
        let err = ledger
            .create_booking(&user_id, &showtime_id, &seats(&["C4", "C5"]))
            .unwrap_err();
        assert_eq!(
            err,
            BookingError::SeatsUnavailable {
                seats: vec!["C4".to_string()]
            }
        );
        assert!(!ledger.occupied_seats(&showtime_id).contains("C5"));

        // После отказа C5 по-прежнему свободно.
        ledger
            .create_booking(&user_id, &showtime_id, &seats(&["C5"]))
            .unwrap();
    }

    #[test]
    fn unknown_showtime_is_checked_before_seats() {
        let (_store, ledger, user_id, _showtime_id) = setup();
        let err = ledger
            .create_booking(&user_id, "missing", &seats(&["ZZ99"]))
            .unwrap_err();
        assert_eq!(err, BookingError::ShowtimeNotFound);
    }

    #[test]
    fn rejects_empty_invalid_and_duplicate_requests() {
        let (_store, ledger, user_id, showtime_id) = setup();

        let err = ledger
            .create_booking(&user_id, &showtime_id, &[])
            .unwrap_err();
        assert_eq!(err, BookingError::InvalidSeat { seats: vec![] });
        assert_eq!(err.to_string(), "No seats requested");

        let err = ledger
            .create_booking(&user_id, &showtime_id, &seats(&["C3", "Z9"]))
            .unwrap_err();
        assert_eq!(
            err,
            BookingError::InvalidSeat {
                seats: vec!["Z9".to_string()]
            }
        );

        let err = ledger
            .create_booking(&user_id, &showtime_id, &seats(&["C3", "C3"]))
            .unwrap_err();
        assert_eq!(
            err,
            BookingError::DuplicateSeatInRequest {
                seat: "C3".to_string()
            }
        );

        // Ни одна из отклонённых попыток не оставила следа в журнале.
        assert!(ledger.occupied_seats(&showtime_id).is_empty());
    }

    #[test]
    fn occupancy_is_scoped_to_showtime() {
        let (store, ledger, user_id, showtime_id) = setup();
        let screen_id = store.get_showtime(&showtime_id).unwrap().screen_id;
        let other = store.insert_showtime(Showtime {
            id: Uuid::new_v4().to_string(),
            movie_id: "m1".to_string(),
            screen_id,
            showtime: "9:30 PM".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
            created_at: Utc::now(),
        });

        ledger
            .create_booking(&user_id, &showtime_id, &seats(&["C3"]))
            .unwrap();
        // То же место на другом сеансе свободно.
        ledger
            .create_booking(&user_id, &other.id, &seats(&["C3"]))
            .unwrap();
    }

    #[test]
    fn concurrent_requests_produce_exactly_one_winner() {
        let (_store, ledger, user_id, showtime_id) = setup();
        let mut handles = Vec::new();
        for _ in 0..8 {
            let ledger = ledger.clone();
            let user_id = user_id.clone();
            let showtime_id = showtime_id.clone();
            handles.push(std::thread::spawn(move || {
                ledger.create_booking(&user_id, &showtime_id, &seats(&["D4"]))
            }));
        }
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let wins = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(wins, 1);
        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            assert_eq!(
                *err,
                BookingError::SeatsUnavailable {
                    seats: vec!["D4".to_string()]
                }
            );
        }
    }

    #[test]
    fn booking_numbers_are_unique_and_dated() {
        let (_store, ledger, user_id, showtime_id) = setup();
        let a = ledger
            .create_booking(&user_id, &showtime_id, &seats(&["A3"]))
            .unwrap();
        let b = ledger
            .create_booking(&user_id, &showtime_id, &seats(&["A4"]))
            .unwrap();
        assert_ne!(a.booking_number, b.booking_number);
        let expected_prefix = format!("BK-{}-", Utc::now().format("%Y%m%d"));
        assert!(a.booking_number.starts_with(&expected_prefix));
        assert_eq!(a.booking_number.len(), expected_prefix.len() + 6);
    }
}
