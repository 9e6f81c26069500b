//! HTTP handlers and route configuration.

mod comment;
mod health;
mod posts;
mod share;
mod views;

use actix_web::{HttpResponse, http::header::ContentType, web};
use tera::Context;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::NotFound(err.to_string()).into()),
    )
    .app_data(
        web::FormConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .route("/health", web::get().to(health::health_check))
    .route("/", web::get().to(posts::post_list))
    .route("/tag/{tag_slug}/", web::get().to(posts::post_list_by_tag))
    .route(
        "/{year}/{month}/{day}/{slug}/",
        web::get().to(posts::post_detail),
    )
    .service(
        web::resource("/{post_id}/share/")
            .route(web::get().to(share::share_form))
            .route(web::post().to(share::share_post))
            .default_service(web::to(method_not_allowed)),
    )
    .service(
        web::resource("/{post_id}/comment/")
            .route(web::post().to(comment::post_comment))
            .default_service(web::to(method_not_allowed)),
    )
    .default_service(web::to(not_found));
}

/// Render `template` as an HTML page.
fn render(state: &AppState, template: &str, context: &Context) -> AppResult<HttpResponse> {
    let body = state.templates.render(template, context)?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body))
}

async fn method_not_allowed() -> AppResult<HttpResponse> {
    Err(AppError::MethodNotAllowed)
}

async fn not_found() -> AppResult<HttpResponse> {
    Err(AppError::NotFound("No route matches this path".to_string()))
}
