use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Payload for creating a todo.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TodoInput {
    /// The text of the todo. Must be between 1 and 500 characters.
    #[validate(length(min = 1, max = 500))]
    pub text: String,
}

/// Payload for updating a todo. Both fields are optional.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TodoUpdate {
    #[validate(length(max = 500))]
    pub text: Option<String>,
    pub done: Option<bool>,
}

/// A todo item as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Todo {
    /// Unique identifier (UUID v4).
    pub id: Uuid,
    /// The text of the todo.
    pub text: String,
    /// Completion flag. False on creation.
    pub done: bool,
    /// Identifier of the owning user.
    pub user_id: i32,
    /// Timestamp of when the todo was created.
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Creates a new `Todo` owned by `user_id` with `done` set to false.
    pub fn new(input: TodoInput, user_id: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: input.text,
            done: false,
            user_id,
            created_at: Utc::now(),
        }
    }

    /// Applies an update payload in place.
    ///
    /// A field is only written when its new value is "truthy": an empty `text`
    /// or `done: false` is skipped entirely, so a client cannot clear the text
    /// or flip a todo back to not-done through this endpoint. Long-standing
    /// behavior of the API, kept as is.
    pub fn apply_update(&mut self, update: &TodoUpdate) {
        if let Some(text) = &update.text {
            if !text.is_empty() {
                self.text = text.clone();
            }
        }
        if update.done == Some(true) {
            self.done = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_todo_creation() {
        let input = TodoInput {
            text: "Buy groceries".to_string(),
        };

        let todo = Todo::new(input, 1);
        assert_eq!(todo.text, "Buy groceries");
        assert_eq!(todo.user_id, 1);
        assert!(!todo.done);
    }

    #[test]
    fn test_todo_input_validation() {
        let valid_input = TodoInput {
            text: "Water the plants".to_string(),
        };
        assert!(valid_input.validate().is_ok());

        let empty_input = TodoInput {
            text: "".to_string(),
        };
        assert!(empty_input.validate().is_err());

        let long_input = TodoInput {
            text: "a".repeat(501),
        };
        assert!(long_input.validate().is_err());
    }

    #[test]
    fn test_apply_update_sets_truthy_fields() {
        let mut todo = Todo::new(
            TodoInput {
                text: "Original".to_string(),
            },
            1,
        );

        todo.apply_update(&TodoUpdate {
            text: Some("Changed".to_string()),
            done: Some(true),
        });
        assert_eq!(todo.text, "Changed");
        assert!(todo.done);
    }

    #[test]
    fn test_apply_update_skips_falsy_fields() {
        let mut todo = Todo::new(
            TodoInput {
                text: "Original".to_string(),
            },
            1,
        );
        todo.done = true;

        // Empty text and done=false are both ignored.
        todo.apply_update(&TodoUpdate {
            text: Some("".to_string()),
            done: Some(false),
        });
        assert_eq!(todo.text, "Original");
        assert!(todo.done);

        // Omitted fields leave the todo untouched as well.
        todo.apply_update(&TodoUpdate {
            text: None,
            done: None,
        });
        assert_eq!(todo.text, "Original");
        assert!(todo.done);
    }
}
