pub mod booking;
pub mod movie;
pub mod screen;
pub mod seat_map;
pub mod showtime;
pub mod user;

pub use booking::Booking;
pub use movie::Movie;
pub use screen::{Screen, ScreenError};
pub use seat_map::SeatClass;
pub use showtime::Showtime;
pub use user::{Role, User};
