use std::env;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub jwt: JwtConfig,
    pub seed: SeedConfig,
}

// Настройки приложения
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
}

// Настройки JWT
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expires_in_hours: i64,
}

// Стартовые учётки и демо-каталог
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub admin_email: String,
    pub admin_password: String,
    pub enable_sample_data: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()
                    .expect("PORT must be a valid number"),
                environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "cinema_system=debug,tower_http=debug".to_string()),
            },
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET")
                    .unwrap_or_else(|_| "cinema-dev-secret".to_string()),
                expires_in_hours: env::var("JWT_EXPIRES_IN_HOURS")
                    .unwrap_or_else(|_| "24".to_string())
                    .parse()
                    .expect("JWT_EXPIRES_IN_HOURS must be a valid number"),
            },
            seed: SeedConfig {
                admin_email: env::var("ADMIN_EMAIL")
                    .unwrap_or_else(|_| "admin@cineplex.com".to_string()),
                admin_password: env::var("ADMIN_PASSWORD")
                    .unwrap_or_else(|_| "admin123".to_string()),
                enable_sample_data: env::var("ENABLE_SAMPLE_DATA")
                    .unwrap_or_else(|_| "true".to_string())
                    .parse()
                    .expect("ENABLE_SAMPLE_DATA must be true or false"),
            },
        }
    }

    /// Конфиг для тестов: без чтения окружения, с дешёвым секретом.
    pub fn for_tests() -> Self {
        Config {
            app: AppConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                environment: "test".to_string(),
                rust_log: "cinema_system=debug".to_string(),
            },
            jwt: JwtConfig {
                secret: "test-secret".to_string(),
                expires_in_hours: 24,
            },
            seed: SeedConfig {
                admin_email: "admin@cineplex.com".to_string(),
                admin_password: "admin123".to_string(),
                enable_sample_data: true,
            },
        }
    }
}
