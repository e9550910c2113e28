pub mod auth;
pub mod categories;
pub mod health;
pub mod todos;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::login)
            .service(auth::register),
    )
    .service(todos::get_todos)
    .service(todos::create_todo)
    .service(todos::get_todo)
    .service(todos::update_todo)
    .service(todos::delete_todo)
    .service(categories::create_category)
    .service(categories::assign_category)
    .service(categories::unassign_category)
    .service(categories::get_category_todos);
}
