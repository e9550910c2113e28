use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{Todo, TodoInput, TodoUpdate},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Retrieves all todos owned by the authenticated user, newest first.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of `Todo` objects.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
#[get("/todos")]
pub async fn get_todos(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let todos = sqlx::query_as::<_, Todo>(
        "SELECT id, text, done, user_id, created_at FROM todos \
         WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user.0)
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(todos))
}

/// Retrieves a single todo by id.
///
/// The lookup is scoped to the authenticated user: a todo that does not exist
/// and a todo owned by somebody else are both answered with `401 Unauthorized`,
/// so the two cases cannot be told apart from the outside.
#[get("/todo/{id}")]
pub async fn get_todo(
    pool: web::Data<PgPool>,
    todo_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let todo = sqlx::query_as::<_, Todo>(
        "SELECT id, text, done, user_id, created_at FROM todos \
         WHERE id = $1 AND user_id = $2",
    )
    .bind(todo_id.into_inner())
    .bind(user.0)
    .fetch_optional(&**pool)
    .await?;

    match todo {
        Some(todo) => Ok(HttpResponse::Ok().json(todo)),
        None => Err(AppError::Unauthorized("Unauthorized".into())),
    }
}

/// Creates a new todo for the authenticated user.
///
/// The new todo starts with `done = false` and is owned by the caller.
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `Todo` object as JSON.
/// - `422 Unprocessable Entity`: If the text is empty or too long.
/// - `503 Service Unavailable`: If persisting the todo fails.
#[post("/todos")]
pub async fn create_todo(
    pool: web::Data<PgPool>,
    todo_data: web::Json<TodoInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    todo_data.validate()?;

    let todo = Todo::new(todo_data.into_inner(), user.0);

    let result = sqlx::query_as::<_, Todo>(
        "INSERT INTO todos (id, text, done, user_id) VALUES ($1, $2, $3, $4) \
         RETURNING id, text, done, user_id, created_at",
    )
    .bind(todo.id)
    .bind(todo.text)
    .bind(todo.done)
    .bind(todo.user_id)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(result))
}

/// Updates a todo owned by the authenticated user.
///
/// Only "truthy" values are applied: a present, non-empty `text` replaces the
/// text, and `done: true` marks the todo done. An empty `text` or
/// `done: false` is ignored, see `Todo::apply_update`.
///
/// ## Responses:
/// - `200 OK`: Returns the updated `Todo` object as JSON.
/// - `401 Unauthorized`: If the todo does not exist or is not owned by the caller.
/// - `503 Service Unavailable`: If persisting the update fails.
#[put("/todo/{id}")]
pub async fn update_todo(
    pool: web::Data<PgPool>,
    todo_id: web::Path<Uuid>,
    todo_data: web::Json<TodoUpdate>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    todo_data.validate()?;

    let todo = sqlx::query_as::<_, Todo>(
        "SELECT id, text, done, user_id, created_at FROM todos \
         WHERE id = $1 AND user_id = $2",
    )
    .bind(todo_id.into_inner())
    .bind(user.0)
    .fetch_optional(&**pool)
    .await?;

    let mut todo = match todo {
        Some(todo) => todo,
        None => return Err(AppError::Unauthorized("Unauthorized".into())),
    };

    todo.apply_update(&todo_data);

    let result = sqlx::query_as::<_, Todo>(
        "UPDATE todos SET text = $1, done = $2 WHERE id = $3 AND user_id = $4 \
         RETURNING id, text, done, user_id, created_at",
    )
    .bind(&todo.text)
    .bind(todo.done)
    .bind(todo.id)
    .bind(user.0)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(result))
}

/// Deletes a todo owned by the authenticated user.
///
/// ## Responses:
/// - `200 OK`: On successful deletion.
/// - `401 Unauthorized`: If the todo does not exist or is not owned by the caller.
/// - `503 Service Unavailable`: If the deletion fails.
#[delete("/todo/{id}")]
pub async fn delete_todo(
    pool: web::Data<PgPool>,
    todo_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
        .bind(todo_id.into_inner())
        .bind(user.0)
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::Unauthorized("Unauthorized".into()));
    }

    Ok(HttpResponse::Ok().finish())
}
