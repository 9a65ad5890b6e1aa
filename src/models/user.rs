use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Роль определяет, какие операции доступны пользователю (см. middleware::is_allowed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
    Worker,
}

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: String,
    pub email: String,
    // Хеш пароля наружу не отдаём
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        email: impl Into<String>,
        password_hash: impl Into<String>,
        name: impl Into<String>,
        role: Role,
    ) -> Self {
        User {
            id: Uuid::new_v4().to_string(),
            email: email.into(),
            password_hash: password_hash.into(),
            name: name.into(),
            role,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_without_password_hash() {
        let user = User::new("user@example.com", "$2b$12$hash", "John Doe", Role::User);
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "user");
        assert_eq!(json["email"], "user@example.com");
    }

    #[test]
    fn roles_use_lowercase_wire_names() {
        assert_eq!(serde_json::to_value(Role::Admin).unwrap(), "admin");
        assert_eq!(serde_json::to_value(Role::Worker).unwrap(), "worker");
        let role: Role = serde_json::from_value(serde_json::json!("user")).unwrap();
        assert_eq!(role, Role::User);
    }
}
