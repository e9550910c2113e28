use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Payload for creating a category.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CategoryInput {
    /// The label text. Must be between 1 and 500 characters.
    #[validate(length(min = 1, max = 500))]
    pub text: String,
}

/// A user-owned label that can be attached to multiple todos.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Category {
    /// Unique identifier (UUID v4).
    pub id: Uuid,
    /// The label text.
    pub text: String,
    /// Identifier of the owning user.
    pub user_id: i32,
    /// Timestamp of when the category was created.
    pub created_at: DateTime<Utc>,
}

/// Join row associating one todo with one category. The pair is the primary
/// key, so a given association exists at most once.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct TodoCategory {
    pub todo_id: Uuid,
    pub category_id: Uuid,
}

impl Category {
    /// Creates a new `Category` owned by `user_id`.
    pub fn new(input: CategoryInput, user_id: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: input.text,
            user_id,
            created_at: Utc::now(),
        }
    }
}
