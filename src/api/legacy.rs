//! The single `/todo` endpoint of the first schema, which only knew about
//! `id` and `title`. It reads and writes the same table as `/todos`.

use actix_web::{web, HttpResponse};

use crate::api::error::ApiError;
use crate::models::todo::PostLegacyTodo;
use crate::repository::TodoStore;

pub async fn get_todos(db: web::Data<dyn TodoStore>) -> Result<HttpResponse, ApiError> {
    let todos = web::block(move || db.list_legacy_todos()).await??;
    Ok(HttpResponse::Ok().json(todos))
}

pub async fn create_todo(
    db: web::Data<dyn TodoStore>,
    new_todo: web::Json<PostLegacyTodo>,
) -> Result<HttpResponse, ApiError> {
    let new_todo = new_todo.into_inner();
    web::block(move || db.create_legacy_todo(&new_todo)).await??;
    Ok(HttpResponse::Created().finish())
}
