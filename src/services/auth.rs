//! services/auth.rs
//!
//! Пароли и JWT. Хеширование через bcrypt, токены подписываются HS256
//! секретом из конфига и живут ограниченное число часов.

use anyhow::Context;
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;
use crate::models::{Role, User};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// id пользователя
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expires_in_hours: i64,
}

impl AuthService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            expires_in_hours: config.expires_in_hours,
        }
    }

    pub fn hash_password(&self, password: &str) -> anyhow::Result<String> {
        hash(password, DEFAULT_COST).context("Failed to hash password")
    }

    /// Любая ошибка верификации (битый хеш и т.п.) трактуется как несовпадение.
    pub fn verify_password(&self, password: &str, password_hash: &str) -> bool {
        verify(password, password_hash).unwrap_or(false)
    }

    pub fn issue_token(&self, user: &User) -> anyhow::Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.expires_in_hours)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key).context("Failed to sign token")
    }

    pub fn decode_token(&self, token: &str) -> anyhow::Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .context("Invalid or expired token")?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new(&JwtConfig {
            secret: "test-secret".to_string(),
            expires_in_hours: 24,
        })
    }

    #[test]
    fn hashes_and_verifies_passwords() {
        let auth = service();
        let hash = auth.hash_password("user123").unwrap();
        assert_ne!(hash, "user123");
        assert!(auth.verify_password("user123", &hash));
        assert!(!auth.verify_password("wrong", &hash));
    }

    #[test]
    fn garbage_hash_never_verifies() {
        let auth = service();
        assert!(!auth.verify_password("user123", "not-a-bcrypt-hash"));
    }

    #[test]
    fn token_round_trip_preserves_identity() {
        let auth = service();
        let user = User::new("user@example.com", "h", "John", Role::User);
        let token = auth.issue_token(&user).unwrap();
        let claims = auth.decode_token(&token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, "user@example.com");
        assert_eq!(claims.role, Role::User);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let auth = service();
        let other = AuthService::new(&JwtConfig {
            secret: "other-secret".to_string(),
            expires_in_hours: 24,
        });
        let user = User::new("user@example.com", "h", "John", Role::User);
        let token = other.issue_token(&user).unwrap();
        assert!(auth.decode_token(&token).is_err());
    }
}
