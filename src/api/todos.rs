use actix_web::{web, HttpResponse};

use crate::api::error::ApiError;
use crate::models::todo::PostTodo;
use crate::repository::{RepositoryError, TodoStore};

pub async fn get_todos(db: web::Data<dyn TodoStore>) -> Result<HttpResponse, ApiError> {
    let todos = web::block(move || db.list_todos()).await??;
    Ok(HttpResponse::Ok().json(todos))
}

pub async fn create_todo(
    db: web::Data<dyn TodoStore>,
    new_todo: web::Json<PostTodo>,
) -> Result<HttpResponse, ApiError> {
    let new_todo = new_todo.into_inner();
    web::block(move || db.create_todo(&new_todo)).await??;
    Ok(HttpResponse::Created().finish())
}

pub async fn get_todo_by_id(
    db: web::Data<dyn TodoStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let todo_id = parse_id(&id)?;
    let todo = web::block(move || db.get_todo_by_id(todo_id)).await??;
    Ok(HttpResponse::Ok().json(todo))
}

pub async fn delete_todo_by_id(
    db: web::Data<dyn TodoStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let todo_id = parse_id(&id)?;
    web::block(move || db.delete_todo_by_id(todo_id)).await??;
    Ok(HttpResponse::Ok().finish())
}

/// `/todos/` with nothing after the slash.
pub async fn blank_id() -> HttpResponse {
    HttpResponse::Ok().finish()
}

// The id column is a 32-bit integer; anything else is rejected the way
// the database rejects a failed cast.
fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>()
        .map_err(|_| RepositoryError::InvalidId(raw.to_string()).into())
}
