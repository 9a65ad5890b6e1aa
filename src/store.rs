//! store.rs
//!
//! Каталог и реестр пользователей в памяти процесса. Один общий экземпляр
//! на приложение; хендлеры получают его через `AppState`.
//!
//! Списки хранятся в порядке вставки, чтобы витрины (`GET /movies` и т.п.)
//! возвращали стабильный порядок. Записи о бронированиях здесь не живут —
//! ими владеет исключительно `services::ledger`.

use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::models::{Movie, Role, Screen, Showtime, User};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Email already registered")]
    EmailTaken,
}

#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    users: RwLock<Vec<User>>,
    movies: RwLock<Vec<Movie>>,
    screens: RwLock<Vec<Screen>>,
    showtimes: RwLock<Vec<Showtime>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /* ---------- ПОЛЬЗОВАТЕЛИ ---------- */

    /// Регистрирует пользователя; email уникален без учёта регистра.
    pub fn insert_user(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.inner.users.write().unwrap();
        if users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(StoreError::EmailTaken);
        }
        users.push(user.clone());
        Ok(user)
    }

    pub fn get_user(&self, id: &str) -> Option<User> {
        self.inner
            .users
            .read()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.inner
            .users
            .read()
            .unwrap()
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    pub fn users_with_role(&self, role: Role) -> Vec<User> {
        self.inner
            .users
            .read()
            .unwrap()
            .iter()
            .filter(|u| u.role == role)
            .cloned()
            .collect()
    }

    /* ---------- ФИЛЬМЫ ---------- */

    pub fn insert_movie(&self, movie: Movie) -> Movie {
        self.inner.movies.write().unwrap().push(movie.clone());
        movie
    }

    pub fn list_movies(&self) -> Vec<Movie> {
        self.inner.movies.read().unwrap().clone()
    }

    pub fn get_movie(&self, id: &str) -> Option<Movie> {
        self.inner
            .movies
            .read()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned()
    }

    /* ---------- ЗАЛЫ ---------- */

    pub fn insert_screen(&self, screen: Screen) -> Screen {
        self.inner.screens.write().unwrap().push(screen.clone());
        screen
    }

    pub fn list_screens(&self) -> Vec<Screen> {
        self.inner.screens.read().unwrap().clone()
    }

    pub fn get_screen(&self, id: &str) -> Option<Screen> {
        self.inner
            .screens
            .read()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    /* ---------- СЕАНСЫ ---------- */

    pub fn insert_showtime(&self, showtime: Showtime) -> Showtime {
        self.inner
            .showtimes
            .write()
            .unwrap()
            .push(showtime.clone());
        showtime
    }

    pub fn get_showtime(&self, id: &str) -> Option<Showtime> {
        self.inner
            .showtimes
            .read()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    pub fn showtimes_for_movie(&self, movie_id: &str) -> Vec<Showtime> {
        self.inner
            .showtimes
            .read()
            .unwrap()
            .iter()
            .filter(|s| s.movie_id == movie_id)
            .cloned()
            .collect()
    }
}
