//! services/seed.rs
//!
//! Стартовое наполнение каталога: админ, демо-пользователь, залы, фильмы
//! и сеансы на ближайшие дни. Идемпотентно: повторный запуск ничего не
//! дублирует, так что рестарт процесса безопасен.

use chrono::{Duration, Utc};
use tracing::info;
use uuid::Uuid;

use crate::models::{Movie, Role, Screen, Showtime, User};
use crate::AppState;

pub fn seed_baseline(state: &AppState) -> anyhow::Result<()> {
    seed_users(state)?;
    if state.config.seed.enable_sample_data {
        seed_catalog(state)?;
    }
    Ok(())
}

fn seed_users(state: &AppState) -> anyhow::Result<()> {
    let seed = &state.config.seed;
    if state.store.find_user_by_email(&seed.admin_email).is_none() {
        let hash = state.auth.hash_password(&seed.admin_password)?;
        state
            .store
            .insert_user(User::new(
                seed.admin_email.clone(),
                hash,
                "Admin",
                Role::Admin,
            ))
            .ok();
        info!(email = %seed.admin_email, "Seeded admin account");
    }
    if state.store.find_user_by_email("user@example.com").is_none() {
        let hash = state.auth.hash_password("user123")?;
        state
            .store
            .insert_user(User::new("user@example.com", hash, "John Doe", Role::User))
            .ok();
        info!("Seeded demo user account");
    }
    Ok(())
}

fn seed_catalog(state: &AppState) -> anyhow::Result<()> {
    if !state.store.list_movies().is_empty() {
        return Ok(());
    }

    let screen_1 = state.store.insert_screen(Screen::new(
        "Screen 1",
        8,
        10,
        vec!["A1".into(), "A2".into(), "A9".into(), "A10".into()],
    )?);
    let screen_2 = state.store.insert_screen(Screen::new(
        "Screen 2 - IMAX",
        10,
        12,
        vec![
            "A1".into(),
            "A2".into(),
            "A11".into(),
            "A12".into(),
            "B1".into(),
            "B2".into(),
            "B11".into(),
            "B12".into(),
        ],
    )?);

    let movies = [
        Movie {
            id: Uuid::new_v4().to_string(),
            title: "The Matrix Resurrections".to_string(),
            description: "Return to a world of two realities: one, everyday life; the other, what lies behind it.".to_string(),
            poster_url: "https://images.unsplash.com/photo-1536440136628-849c177e76a1?w=500".to_string(),
            duration: 148,
            genre: "Sci-Fi".to_string(),
            language: "English".to_string(),
            rating: "R".to_string(),
            now_showing: true,
            created_at: Utc::now(),
        },
        Movie {
            id: Uuid::new_v4().to_string(),
            title: "Inception".to_string(),
            description: "A thief who steals corporate secrets through dream-sharing technology.".to_string(),
            poster_url: "https://images.unsplash.com/photo-1440404653325-ab127d49abc1?w=500".to_string(),
            duration: 148,
            genre: "Sci-Fi".to_string(),
            language: "English".to_string(),
            rating: "PG-13".to_string(),
            now_showing: true,
            created_at: Utc::now(),
        },
        Movie {
            id: Uuid::new_v4().to_string(),
            title: "Interstellar".to_string(),
            description: "A team of explorers travel through a wormhole in space to ensure humanity's survival.".to_string(),
            poster_url: "https://images.unsplash.com/photo-1446776811953-b23d57bd21aa?w=500".to_string(),
            duration: 169,
            genre: "Sci-Fi".to_string(),
            language: "English".to_string(),
            rating: "PG-13".to_string(),
            now_showing: true,
            created_at: Utc::now(),
        },
    ];

    let times = ["10:00 AM", "1:30 PM", "5:00 PM", "8:30 PM"];
    let today = Utc::now().date_naive();
    for (idx, movie) in movies.into_iter().enumerate() {
        let movie = state.store.insert_movie(movie);
        let screen_id = if idx % 2 == 0 {
            screen_1.id.clone()
        } else {
            screen_2.id.clone()
        };
        for day in 0..3 {
            for time in times {
                state.store.insert_showtime(Showtime {
                    id: Uuid::new_v4().to_string(),
                    movie_id: movie.id.clone(),
                    screen_id: screen_id.clone(),
                    showtime: time.to_string(),
                    date: today + Duration::days(day),
                    created_at: Utc::now(),
                });
            }
        }
    }
    info!("Seeded sample catalog: 2 screens, 3 movies with showtimes");
    Ok(())
}
