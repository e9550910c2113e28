use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{Category, CategoryInput, Todo, TodoCategory, User},
};
use actix_web::{delete, get, post, web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Creates a new category for the authenticated user.
///
/// Restricted to accounts with the `regular_user` role. The role is read from
/// the users table on every call rather than from the token, so role changes
/// apply immediately.
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `Category` object as JSON.
/// - `403 Forbidden`: If the caller's role is not `regular_user`.
/// - `422 Unprocessable Entity`: If the text is empty or too long.
/// - `503 Service Unavailable`: If persisting the category fails.
#[post("/category")]
pub async fn create_category(
    pool: web::Data<PgPool>,
    category_data: web::Json<CategoryInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    category_data.validate()?;

    let account = sqlx::query_as::<_, User>(
        "SELECT id, username, email, role, created_at FROM users WHERE id = $1",
    )
    .bind(user.0)
    .fetch_optional(&**pool)
    .await?
    .ok_or_else(|| AppError::Unauthorized("Unauthorized".into()))?;

    if !account.is_regular_user() {
        return Err(AppError::Forbidden(
            "Only regular users can create a category".into(),
        ));
    }

    let category = Category::new(category_data.into_inner(), user.0);

    let result = sqlx::query_as::<_, Category>(
        "INSERT INTO categories (id, text, user_id) VALUES ($1, $2, $3) \
         RETURNING id, text, user_id, created_at",
    )
    .bind(category.id)
    .bind(category.text)
    .bind(category.user_id)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(result))
}

/// Returns the row `(id,)` of a todo if it exists and belongs to `user_id`.
async fn find_owned_todo(
    pool: &PgPool,
    todo_id: Uuid,
    user_id: i32,
) -> Result<Option<(Uuid,)>, AppError> {
    let row = sqlx::query_as::<_, (Uuid,)>("SELECT id FROM todos WHERE id = $1 AND user_id = $2")
        .bind(todo_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Returns the row `(id,)` of a category if it exists and belongs to `user_id`.
async fn find_owned_category(
    pool: &PgPool,
    category_id: Uuid,
    user_id: i32,
) -> Result<Option<(Uuid,)>, AppError> {
    let row =
        sqlx::query_as::<_, (Uuid,)>("SELECT id FROM categories WHERE id = $1 AND user_id = $2")
            .bind(category_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
    Ok(row)
}

/// Assigns a category to a todo.
///
/// Both the todo and the category must belong to the authenticated user,
/// otherwise the request fails with `401 Unauthorized`. Assigning a pair that
/// is already linked fails with `400 Bad Request`; the link table's composite
/// primary key backs the same invariant in the schema.
#[post("/todo/{todo_id}/category/{cat_id}")]
pub async fn assign_category(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let (todo_id, cat_id) = path.into_inner();

    if find_owned_todo(pool.get_ref(), todo_id, user.0).await?.is_none() {
        return Err(AppError::Unauthorized("Unauthorized".into()));
    }
    if find_owned_category(pool.get_ref(), cat_id, user.0).await?.is_none() {
        return Err(AppError::Unauthorized("Unauthorized".into()));
    }

    let existing = sqlx::query_as::<_, TodoCategory>(
        "SELECT todo_id, category_id FROM todo_categories \
         WHERE todo_id = $1 AND category_id = $2",
    )
    .bind(todo_id)
    .bind(cat_id)
    .fetch_optional(&**pool)
    .await?;

    if existing.is_some() {
        return Err(AppError::BadRequest(
            "Category already assigned to todo".into(),
        ));
    }

    sqlx::query("INSERT INTO todo_categories (todo_id, category_id) VALUES ($1, $2)")
        .bind(todo_id)
        .bind(cat_id)
        .execute(&**pool)
        .await?;

    Ok(HttpResponse::Ok().finish())
}

/// Removes a category from a todo.
///
/// Ownership checks mirror `assign_category`. Unlinking a pair that was never
/// linked fails with `400 Bad Request`.
#[delete("/todo/{todo_id}/category/{cat_id}")]
pub async fn unassign_category(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let (todo_id, cat_id) = path.into_inner();

    if find_owned_todo(pool.get_ref(), todo_id, user.0).await?.is_none() {
        return Err(AppError::Unauthorized("Unauthorized".into()));
    }
    if find_owned_category(pool.get_ref(), cat_id, user.0).await?.is_none() {
        return Err(AppError::Unauthorized("Unauthorized".into()));
    }

    let result = sqlx::query(
        "DELETE FROM todo_categories WHERE todo_id = $1 AND category_id = $2",
    )
    .bind(todo_id)
    .bind(cat_id)
    .execute(&**pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::BadRequest(
            "Category and todo aren't linked".into(),
        ));
    }

    Ok(HttpResponse::Ok().finish())
}

/// Lists the todos assigned to a category.
///
/// The category must belong to the authenticated user; the todos come back
/// through the link table, newest first.
#[get("/category/{cat_id}/todos")]
pub async fn get_category_todos(
    pool: web::Data<PgPool>,
    cat_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let cat_id = cat_id.into_inner();

    if find_owned_category(pool.get_ref(), cat_id, user.0).await?.is_none() {
        return Err(AppError::Unauthorized("Unauthorized".into()));
    }

    let todos = sqlx::query_as::<_, Todo>(
        "SELECT t.id, t.text, t.done, t.user_id, t.created_at FROM todos t \
         JOIN todo_categories tc ON tc.todo_id = t.id \
         WHERE tc.category_id = $1 ORDER BY t.created_at DESC",
    )
    .bind(cat_id)
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(todos))
}
