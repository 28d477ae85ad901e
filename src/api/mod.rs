pub mod error;
pub mod legacy;
pub mod todos;

use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse, Responder, Result};

use crate::api::error::ApiError;
use crate::models::todo::Response;

pub async fn healthcheck() -> impl Responder {
    let response = Response {
        message: "Everything is working fine".to_string(),
    };
    HttpResponse::Ok().json(response)
}

pub async fn not_found() -> Result<HttpResponse> {
    let response = Response {
        message: "Resource not found".to_string(),
    };
    Ok(HttpResponse::NotFound().json(response))
}

pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .content_type(ContentType::plaintext())
        .body("Method not allowed")
}

/// Request bodies are decoded whatever their declared content type.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .content_type(|_| true)
        .error_handler(|err, _req| ApiError::Decode(err.to_string()).into())
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(healthcheck))
        .service(
            web::resource("/todos")
                .route(web::get().to(todos::get_todos))
                .route(web::post().to(todos::create_todo))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/todos/")
                .route(web::get().to(todos::blank_id))
                .route(web::delete().to(todos::blank_id))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/todos/{id}")
                .route(web::get().to(todos::get_todo_by_id))
                .route(web::delete().to(todos::delete_todo_by_id))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/todo")
                .route(web::get().to(legacy::get_todos))
                .route(web::post().to(legacy::create_todo))
                .default_service(web::to(method_not_allowed)),
        );
}
