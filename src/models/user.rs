use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Role assigned to every account created through registration.
pub const ROLE_REGULAR_USER: &str = "regular_user";

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether this account may create categories.
    pub fn is_regular_user(&self) -> bool {
        self.role == ROLE_REGULAR_USER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_check() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            role: ROLE_REGULAR_USER.to_string(),
            created_at: Utc::now(),
        };
        assert!(user.is_regular_user());

        let admin = User {
            role: "admin".to_string(),
            ..user
        };
        assert!(!admin.is_regular_user());
    }
}
